use pretty_assertions::assert_eq;
use wordnote_core::{evaluate, MarkupWordCounter, WordCountResult, WordCounter};

#[test]
fn plain_text_counts_whitespace_tokens() {
    let samples = [
        ("", 0),
        ("   ", 0),
        ("one", 1),
        ("one two", 2),
        ("  leading and trailing  ", 3),
        ("tabs\tand\nnewlines\r\nmixed", 4),
    ];
    for (text, expected) in samples {
        assert_eq!(
            evaluate(Some(text), 100).count,
            text.split_whitespace().count() as u32
        );
        assert_eq!(evaluate(Some(text), 100).count, expected, "input {text:?}");
    }
}

#[test]
fn markup_is_stripped_before_counting() {
    assert_eq!(
        evaluate(Some("<p>a b</p>"), 5),
        WordCountResult {
            count: 2,
            limit: 5,
            exceeded: false,
        }
    );
    assert_eq!(
        evaluate(Some("<div><b>bold</b> and <i>italic</i></div>"), 5).count,
        3
    );
    assert_eq!(evaluate(Some("<br/><br/>"), 5).count, 0);
}

#[test]
fn exceeding_limit_produces_message() {
    let result = evaluate(Some("a b c"), 2);
    assert_eq!(result.count, 3);
    assert!(result.exceeded);
    assert_eq!(
        result.message().as_deref(),
        Some("Description contains 3 words but should have less than 2 words")
    );
}

#[test]
fn missing_content_counts_as_empty() {
    let result = evaluate(None, 5);
    assert_eq!(result.count, 0);
    assert!(!result.exceeded);
    assert_eq!(result.message(), None);
}

#[test]
fn zero_limit_flags_any_word() {
    assert!(!evaluate(Some(""), 0).exceeded);
    assert!(evaluate(Some("word"), 0).exceeded);
}

#[test]
fn trait_and_free_function_agree() {
    let raw = "<p>The quick</p> brown <em>fox</em>";
    assert_eq!(MarkupWordCounter.evaluate(Some(raw), 3), evaluate(Some(raw), 3));
    assert_eq!(MarkupWordCounter.count(raw), 4);
}
