//! Pull a JSON object out of free-form model output.

use serde_json::Value;

/// Parse the text between the first `{` and the last `}`.
///
/// Models often wrap JSON in prose or code fences; anything outside the
/// outermost braces is ignored. Returns `None` when no object parses.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Value>(&text[start..=end])
        .ok()
        .filter(Value::is_object)
}
