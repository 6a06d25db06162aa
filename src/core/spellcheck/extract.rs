//! Model Reply Extraction
//!
//! Models wrap their JSON in conversational text ("Sure! Here are the
//! corrections: [...]"). These helpers salvage the array payload and turn
//! each element into a normalized [`Annotation`], discarding anything that
//! does not fit. Nothing here returns an error.

use serde_json::Value;

use super::types::Annotation;

/// Parse the substring between the first `[` and the last `]` as JSON.
///
/// Returns an empty vector when there is no bracket pair or the enclosed
/// text is not a valid JSON array.
pub fn extract_json_array(text: &str) -> Vec<Value> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<Value>>(&text[start..=end]) {
        Ok(items) => items,
        Err(e) => {
            log::debug!("Discarding unparseable model reply payload: {}", e);
            Vec::new()
        }
    }
}

/// Normalize the `suggestion` field: a string becomes a one-item list, an
/// array keeps its string items, anything else yields nothing. Duplicates
/// are dropped.
pub fn normalize_suggestions(value: Option<&Value>) -> Vec<String> {
    let candidates: Vec<&str> = match value {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    let mut suggestions: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !suggestions.iter().any(|s| s == candidate) {
            suggestions.push(candidate.to_string());
        }
    }
    suggestions
}

/// Decode one `{misspelled_word, suggestion}` item.
///
/// Returns `None` when `misspelled_word` is missing, not a string, or blank.
pub fn decode_annotation(item: &Value) -> Option<Annotation> {
    let word = item.get("misspelled_word")?.as_str()?;
    if word.trim().is_empty() {
        return None;
    }
    Some(Annotation::new(
        word,
        normalize_suggestions(item.get("suggestion")),
    ))
}

/// Extract every well-formed annotation from a raw model reply.
pub fn parse_annotations(reply: &str) -> Vec<Annotation> {
    extract_json_array(reply)
        .iter()
        .filter_map(decode_annotation)
        .collect()
}
