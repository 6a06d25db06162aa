//! Prompt templates for the two request modes.

const SPELLCHECK_TEMPLATE: &str = r#"You are a strict spell and grammar checker.
Find every misspelled or grammatically incorrect word in the text below and return a JSON array of corrections.

Each element of the array must be an object with:
- "misspelled_word": the incorrect word exactly as it appears in the text
- "suggestion": the correct replacement as a string

Output format:
[
    {"misspelled_word": "mispelled", "suggestion": "misspelled"}
]

Text:
{text}

Rules:
1. Reply with a valid JSON array and nothing else.
2. "suggestion" is always a single string, never an array.
3. Do not rewrite the text; only report incorrect words.
4. Use the surrounding context to choose the right spelling or grammar.
5. Do not report words that are already correct.
"#;

const REWRITE_TEMPLATE: &str = r#"Correct the spelling and grammar of the following text while preserving its tone and meaning.
Return ONLY the corrected text, with no JSON and no commentary.

Text:
"""{text}"""
"#;

/// Prompt asking for per-word corrections of one chunk.
pub fn spellcheck_prompt(chunk_text: &str) -> String {
    SPELLCHECK_TEMPLATE.replace("{text}", chunk_text)
}

/// Prompt asking for the whole text rewritten.
pub fn rewrite_prompt(text: &str) -> String {
    REWRITE_TEMPLATE.replace("{text}", text)
}
