//! Text extraction from loosely-structured upstream responses.
//!
//! Neither provider guarantees a schema across API versions, so extraction is
//! an ordered chain of matches over a `serde_json::Value`. Every step is total.
//! If nothing matches, the whole value is serialized so the caller still gets
//! something printable.

use serde_json::{Map, Value};

/// Extract the generated text from an upstream response body.
///
/// Order of attempts for objects:
/// 1. a flattened `output_text` string
/// 2. `choices[].message.content` (chat completions)
/// 3. `output[].content[].text` (Responses API)
/// 4. top-level `content[].text`
/// 5. the JSON serialization of the value
///
/// `null`, `false` and `0` yield an empty string; other scalars yield their
/// JSON text. Arrays are extracted element-wise and joined with newlines.
pub fn extract_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(extract_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => flattened_output_text(map)
            .or_else(|| chat_choice_content(map))
            .or_else(|| output_item_content(map))
            .or_else(|| map.get("content").and_then(joined_text_parts))
            .unwrap_or_else(|| value.to_string()),
    }
}

fn flattened_output_text(map: &Map<String, Value>) -> Option<String> {
    map.get("output_text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn chat_choice_content(map: &Map<String, Value>) -> Option<String> {
    map.get("choices")?.as_array()?.iter().find_map(|choice| {
        match choice.get("message").and_then(|m| m.get("content")) {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
            Some(parts @ Value::Array(_)) => joined_text_parts(parts),
            // legacy completions put the text directly on the choice
            _ => choice
                .get("text")
                .and_then(Value::as_str)
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string),
        }
    })
}

fn output_item_content(map: &Map<String, Value>) -> Option<String> {
    map.get("output")?
        .as_array()?
        .iter()
        .find_map(|item| item.get("content").and_then(joined_text_parts))
}

/// Join the `text` of every part in a content list, `None` if that is blank.
fn joined_text_parts(parts: &Value) -> Option<String> {
    let joined = parts
        .as_array()?
        .iter()
        .map(|part| {
            part.as_str()
                .or_else(|| part.get("text").and_then(Value::as_str))
                .unwrap_or("")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_completion_content() {
        let body = json!({"choices": [{"message": {"content": "Hello"}}]});
        assert_eq!(extract_text(&body), "Hello");
    }

    #[test]
    fn test_responses_output_items_joined() {
        let body = json!({"output": [{"content": [{"text": "A"}, {"text": "B"}]}]});
        assert_eq!(extract_text(&body), "A\nB");
    }

    #[test]
    fn test_unknown_shape_serializes_whole_object() {
        let body = json!({"foo": 1});
        assert_eq!(extract_text(&body), r#"{"foo":1}"#);
    }

    #[test]
    fn test_null_is_empty() {
        assert_eq!(extract_text(&Value::Null), "");
    }

    #[test]
    fn test_output_text_wins_over_nested_locations() {
        let body = json!({
            "output_text": "flat",
            "output": [{"content": [{"text": "nested"}]}],
            "choices": [{"message": {"content": "chat"}}]
        });
        assert_eq!(extract_text(&body), "flat");
    }

    #[test]
    fn test_empty_output_text_falls_through() {
        let body = json!({"output_text": "", "choices": [{"message": {"content": "chat"}}]});
        assert_eq!(extract_text(&body), "chat");
    }

    #[test]
    fn test_output_skips_items_without_text() {
        let body = json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [{"type": "output_text", "text": "  report  "}]}
            ]
        });
        assert_eq!(extract_text(&body), "report");
    }

    #[test]
    fn test_chat_content_as_part_list() {
        let body = json!({
            "choices": [{"message": {"content": [
                {"type": "text", "text": "first"},
                {"type": "text", "text": "second"}
            ]}}]
        });
        assert_eq!(extract_text(&body), "first\nsecond");
    }

    #[test]
    fn test_chat_null_content_falls_back_to_later_choice() {
        let body = json!({
            "choices": [
                {"message": {"content": null}},
                {"message": {"content": "second choice"}}
            ]
        });
        assert_eq!(extract_text(&body), "second choice");
    }

    #[test]
    fn test_top_level_content_parts() {
        let body = json!({"content": [{"type": "text", "text": "anthropic style"}]});
        assert_eq!(extract_text(&body), "anthropic style");
    }

    #[test]
    fn test_array_and_scalars() {
        assert_eq!(extract_text(&json!(["a", null, "b"])), "a\n\nb");
        assert_eq!(extract_text(&json!("plain")), "plain");
        assert_eq!(extract_text(&json!(42)), "42");
        assert_eq!(extract_text(&json!(true)), "true");
    }

    #[test]
    fn test_falsy_scalars_are_empty() {
        assert_eq!(extract_text(&json!(false)), "");
        assert_eq!(extract_text(&json!(0)), "");
        assert_eq!(extract_text(&json!(0.0)), "");
        assert_eq!(extract_text(&json!([0, "x"])), "\nx");
    }

    #[test]
    fn test_blank_nested_text_serializes_object() {
        let body = json!({"output": [{"content": [{"text": "  "}]}]});
        assert_eq!(extract_text(&body), body.to_string());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let body = json!({"choices": [{"message": {"content": "same"}}], "id": "x"});
        assert_eq!(extract_text(&body), extract_text(&body));
        let unknown = json!({"nested": {"deep": [1, 2, 3]}});
        assert_eq!(extract_text(&unknown), extract_text(&unknown));
    }
}
