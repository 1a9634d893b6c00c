use serde_json::{json, Value};

/// Flatten an Atlassian Document Format value into plain text for display.
pub fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(arr) => {
            let parts: Vec<String> = arr.iter().filter_map(extract_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        Value::Object(obj) => {
            if obj.get("type").and_then(|v| v.as_str()) == Some("text") {
                return obj.get("text").and_then(|v| v.as_str()).map(String::from);
            }
            if let Some(content) = obj.get("content") {
                return extract_text(content);
            }
            None
        }
        _ => None,
    }
}

/// Wrap plain text in the single-paragraph ADF document the v3 comment and
/// description fields require.
pub fn document(text: &str) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [{"type": "text", "text": text}]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_nested_paragraphs() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "first"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "second"}]}
            ]
        });
        assert_eq!(extract_text(&doc), Some("first second".to_string()));
    }

    #[test]
    fn plain_string_passes_through() {
        assert_eq!(
            extract_text(&Value::String("legacy body".into())),
            Some("legacy body".to_string())
        );
    }

    #[test]
    fn empty_document_extracts_nothing() {
        let doc = json!({"type": "doc", "version": 1, "content": []});
        assert_eq!(extract_text(&doc), None);
    }

    #[test]
    fn built_document_round_trips() {
        let doc = document("ship it");
        assert_eq!(doc["type"], "doc");
        assert_eq!(doc["version"], 1);
        assert_eq!(extract_text(&doc), Some("ship it".to_string()));
    }
}
