//! JSON Extraction
//!
//! Pulls the JSON object out of a vision model answer.
//!
//! Handles common LLM output noise:
//! - Markdown code fence wrapping (```json ... ```)
//! - Byte order mark and surrounding whitespace
//! - JSON embedded in explanatory prose

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n?(.*?)```").expect("code fence pattern is valid")
});

/// Extract the JSON object from a model answer
///
/// Order of attempts: fenced code block, the whole (trimmed) answer, then the
/// first balanced `{...}` substring. Returns `None` if none of them parses to
/// a JSON object.
pub fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    let cleaned = raw.trim().trim_start_matches('\u{feff}').trim();

    if let Some(fenced) = strip_code_fence(cleaned)
        && let Some(object) = parse_object(fenced)
    {
        return Some(object);
    }

    if let Some(object) = parse_object(cleaned) {
        return Some(object);
    }

    let embedded = first_balanced_object(cleaned)?;
    debug!("JSON extracted from mixed content");
    parse_object(embedded)
}

/// Contents of the first fenced code block, if any
fn strip_code_fence(s: &str) -> Option<&str> {
    CODE_FENCE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn parse_object(s: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// First `{...}` substring whose braces balance, ignoring braces inside strings
fn first_balanced_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in s[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let object = extract_json_object(r#"{"lightingScore": 80}"#).unwrap();
        assert_eq!(object["lightingScore"], 80);
    }

    #[test]
    fn test_fenced_object() {
        let raw = "```json\n{\"lightingScore\": 81}\n```";
        assert_eq!(extract_json_object(raw).unwrap()["lightingScore"], 81);

        let bare_fence = "```\n{\"lightingScore\": 82}\n```";
        assert_eq!(extract_json_object(bare_fence).unwrap()["lightingScore"], 82);
    }

    #[test]
    fn test_fence_after_prose() {
        let raw = "Here is the analysis:\n```json\n{\"roomType\": \"kitchen\"}\n```\nLet me know!";
        assert_eq!(extract_json_object(raw).unwrap()["roomType"], "kitchen");
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let raw = r#"Sure! {"aiFeedback": "Nice {curly} text", "nested": {"a": 1}} Hope that helps."#;
        let object = extract_json_object(raw).unwrap();
        assert_eq!(object["aiFeedback"], "Nice {curly} text");
        assert_eq!(object["nested"]["a"], 1);
    }

    #[test]
    fn test_escaped_quotes_in_strings() {
        let raw = r#"Result: {"aiFeedback": "Say \"cheese\" }", "clarityScore": 60}"#;
        let object = extract_json_object(raw).unwrap();
        assert_eq!(object["clarityScore"], 60);
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(extract_json_object("").is_none());
        assert!(extract_json_object("I cannot analyze this image.").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("{\"unterminated\": ").is_none());
    }

    #[test]
    fn test_bom_is_ignored() {
        let raw = "\u{feff}{\"appealScore\": 90}";
        assert_eq!(extract_json_object(raw).unwrap()["appealScore"], 90);
    }
}
