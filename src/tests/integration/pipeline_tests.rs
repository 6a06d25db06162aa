//! Pipeline Integration Tests
//!
//! Tests for `SpellcheckService` including:
//! - Single-chunk and multi-chunk correction assembly
//! - Global offsets across chunk boundaries
//! - Chatty and malformed model replies
//! - Cache hits, namespaces and expiry
//! - Upstream failure propagation

use std::time::Duration;

use crate::core::llm::LLMError;
use crate::core::spellcheck::{Correction, Position};
use crate::tests::mocks::{
    annotations_reply, constant_generator, scripted_generator, service_with, service_with_cache,
    TEST_MODEL,
};

fn correction(word: &str, suggestions: &[&str], positions: &[Position]) -> Correction {
    Correction {
        word: word.to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        positions: positions.to_vec(),
    }
}

// =============================================================================
// Single Chunk
// =============================================================================

#[tokio::test]
async fn test_single_chunk_spellcheck() {
    let (generator, prompts) = constant_generator(&annotations_reply(&[("has", "have")]));
    let service = service_with(generator);

    let corrections = service
        .spellcheck("I has a apple", Some("m"), None)
        .await
        .unwrap();

    assert_eq!(corrections, vec![correction("has", &["have"], &[(2, 5)])]);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].0, "m");
    assert!(prompts[0].1.contains("I has a apple"));
}

#[tokio::test]
async fn test_every_occurrence_in_chunk_is_located() {
    let (generator, _) = constant_generator(&annotations_reply(&[("teh", "the")]));
    let service = service_with(generator);

    let corrections = service
        .spellcheck("Teh cat and teh dog", None, None)
        .await
        .unwrap();

    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].word, "teh");
    assert_eq!(corrections[0].positions, vec![(0, 3), (12, 15)]);
}

#[tokio::test]
async fn test_default_model_used_when_missing_or_blank() {
    let (generator, prompts) = scripted_generator(vec![Ok("[]".to_string()), Ok("[]".to_string())]);
    let service = service_with(generator);

    service.spellcheck("one", None, None).await.unwrap();
    service.spellcheck("two", Some("  "), None).await.unwrap();

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts[0].0, TEST_MODEL);
    assert_eq!(prompts[1].0, TEST_MODEL);
}

#[tokio::test]
async fn test_hallucinated_word_has_no_positions() {
    let (generator, _) = constant_generator(&annotations_reply(&[("recieve", "receive")]));
    let service = service_with(generator);

    let corrections = service.spellcheck("nothing wrong", None, None).await.unwrap();

    assert_eq!(corrections, vec![correction("recieve", &["receive"], &[])]);
}

#[tokio::test]
async fn test_reply_without_json_yields_no_corrections() {
    let (generator, _) = constant_generator("Looks good to me, no mistakes found.");
    let service = service_with(generator);

    let corrections = service.spellcheck("A fine sentence.", None, None).await.unwrap();
    assert!(corrections.is_empty());
}

#[tokio::test]
async fn test_list_suggestions_from_model_are_accepted() {
    let reply = r#"[{"misspelled_word": "a", "suggestion": ["an", "one", "an"]}]"#;
    let (generator, _) = constant_generator(reply);
    let service = service_with(generator);

    let corrections = service.spellcheck("I has a apple", None, None).await.unwrap();
    assert_eq!(corrections, vec![correction("a", &["an", "one"], &[(6, 7)])]);
}

#[tokio::test]
async fn test_empty_text_skips_model() {
    let (generator, prompts) = constant_generator("[]");
    let service = service_with(generator);

    let corrections = service.spellcheck("   ", None, None).await.unwrap();

    assert!(corrections.is_empty());
    assert!(prompts.lock().unwrap().is_empty());
}

// =============================================================================
// Multiple Chunks
// =============================================================================

#[tokio::test]
async fn test_offsets_are_global_across_chunks() {
    // max 10 splits into "Teh quick " (0) and "teh  brown" (10)
    let (generator, prompts) = scripted_generator(vec![
        Ok(annotations_reply(&[("Teh", "The")])),
        Ok(r#"[{"misspelled_word": "teh", "suggestion": ["the", "The"]}]"#.to_string()),
    ]);
    let service = service_with(generator);

    let corrections = service
        .spellcheck("Teh quick teh  brown", None, Some(10))
        .await
        .unwrap();

    assert_eq!(
        corrections,
        vec![correction("Teh", &["The", "the"], &[(0, 3), (10, 13)])]
    );

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].1.contains("Teh quick "));
    assert!(prompts[1].1.contains("teh  brown"));
}

#[tokio::test]
async fn test_irregular_whitespace_does_not_drift_offsets() {
    let text = "alpha\t\tbeta   gamma  wrng";
    let (generator, prompts) = constant_generator(&annotations_reply(&[("wrng", "wrong")]));
    let service = service_with(generator);

    let corrections = service.spellcheck(text, None, Some(8)).await.unwrap();

    assert_eq!(prompts.lock().unwrap().len(), 4);
    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].positions, vec![(21, 25)]);
    let (start, end) = corrections[0].positions[0];
    let located: String = text.chars().skip(start).take(end - start).collect();
    assert_eq!(located, "wrng");
}

#[tokio::test]
async fn test_padding_is_chunked_within_budget_and_not_sent() {
    let text = format!("teh{}teh", " ".repeat(40));
    let (generator, prompts) = constant_generator(&annotations_reply(&[("teh", "the")]));
    let service = service_with(generator);

    let corrections = service.spellcheck(&text, None, Some(10)).await.unwrap();

    assert_eq!(corrections[0].positions, vec![(0, 3), (43, 46)]);
    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].1.contains(&format!("{}teh", " ".repeat(7))));
}

#[tokio::test]
async fn test_merge_keeps_first_seen_order() {
    let (generator, _) = scripted_generator(vec![
        Ok(annotations_reply(&[("zeh", "the"), ("apel", "apple")])),
        Ok(annotations_reply(&[("bok", "book"), ("ZEH", "the")])),
    ]);
    let service = service_with(generator);

    let corrections = service
        .spellcheck("zeh apel fell bok ZEH", None, Some(13))
        .await
        .unwrap();

    let words: Vec<&str> = corrections.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, vec!["zeh", "apel", "bok"]);
    assert_eq!(corrections[0].positions, vec![(0, 3), (18, 21)]);
}

#[tokio::test]
async fn test_upstream_failure_on_later_chunk_aborts_request() {
    let (generator, _) = scripted_generator(vec![
        Ok(annotations_reply(&[("teh", "the")])),
        Err(LLMError::Timeout),
    ]);
    let service = service_with(generator);

    let result = service.spellcheck("teh first second", None, Some(10)).await;

    assert!(matches!(result, Err(LLMError::Timeout)));
    assert!(service.cache().is_empty().await);
}

// =============================================================================
// Cache
// =============================================================================

#[tokio::test]
async fn test_repeated_request_is_served_from_cache() {
    let (generator, prompts) = constant_generator(&annotations_reply(&[("has", "have")]));
    let service = service_with(generator);

    let first = service.spellcheck("I has a apple", None, None).await.unwrap();
    let second = service.spellcheck("I has a apple", None, None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cache_is_keyed_by_model() {
    let (generator, prompts) = constant_generator("[]");
    let service = service_with(generator);

    service.spellcheck("same text", Some("a"), None).await.unwrap();
    service.spellcheck("same text", Some("b"), None).await.unwrap();

    assert_eq!(prompts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_expired_entry_triggers_new_model_call() {
    let (generator, prompts) = constant_generator("[]");
    let service = service_with_cache(generator, Duration::from_millis(20));

    service.spellcheck("text", None, None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    service.spellcheck("text", None, None).await.unwrap();

    assert_eq!(prompts.lock().unwrap().len(), 2);
}

// =============================================================================
// Rewrite Mode
// =============================================================================

#[tokio::test]
async fn test_correct_trims_and_caches() {
    let (generator, prompts) = constant_generator("\n  I have an apple.  \n");
    let service = service_with(generator);

    let first = service.correct("I has a apple.", None).await.unwrap();
    let second = service.correct("I has a apple.", None).await.unwrap();

    assert_eq!(first, "I have an apple.");
    assert_eq!(second, "I have an apple.");

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].1.contains("\"\"\"I has a apple.\"\"\""));
}

#[tokio::test]
async fn test_rewrite_and_spellcheck_do_not_share_cache_entries() {
    let (generator, prompts) = scripted_generator(vec![
        Ok(annotations_reply(&[("has", "have")])),
        Ok("I have a apple".to_string()),
    ]);
    let service = service_with(generator);

    let corrections = service.spellcheck("I has a apple", None, None).await.unwrap();
    let rewritten = service.correct("I has a apple", None).await.unwrap();

    assert_eq!(corrections.len(), 1);
    assert_eq!(rewritten, "I have a apple");
    assert_eq!(prompts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_tagged_text_does_not_share_rewrite_entry() {
    let (generator, prompts) = scripted_generator(vec![
        Ok("[]".to_string()),
        Ok("rewritten".to_string()),
    ]);
    let service = service_with(generator);

    service.spellcheck("AUTO|x", None, None).await.unwrap();
    assert_eq!(service.correct("x", None).await.unwrap(), "rewritten");

    // Both entries survive side by side.
    assert_eq!(service.cache().len().await, 2);
    assert!(service.spellcheck("AUTO|x", None, None).await.unwrap().is_empty());
    assert_eq!(service.correct("x", None).await.unwrap(), "rewritten");
    assert_eq!(prompts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_correct_propagates_upstream_error() {
    let (generator, _) = scripted_generator(vec![Err(LLMError::ApiError {
        status: 500,
        message: "boom".to_string(),
    })]);
    let service = service_with(generator);

    let result = service.correct("text", None).await;
    assert!(matches!(result, Err(LLMError::ApiError { status: 500, .. })));
}
