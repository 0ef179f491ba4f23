//! Input validation for item payloads.
//!
//! Accepts an arbitrary JSON value and either produces a normalized
//! [`NewItem`] or a single aggregated failure message. There is no partial
//! success: every violation found is reported in one pass.

use serde_json::Value;

use crate::items::types::NewItem;

/// Maximum item name length in characters, counted after trimming.
pub const NAME_MAX_LEN: usize = 120;

/// Validate a raw JSON payload into a normalized `{name, done}` pair.
///
/// Rules:
/// - the payload must be a JSON object;
/// - `name` must be a string whose trimmed length is in `[1, NAME_MAX_LEN]`;
/// - `done` must be a boolean when present; absent or `null` means `false`.
///
/// On failure, all violations are joined into one message.
pub fn validate(input: &Value) -> Result<NewItem, String> {
    let Some(object) = input.as_object() else {
        return Err("body must be a JSON object".to_string());
    };

    let mut violations: Vec<String> = Vec::new();
    let mut name = String::new();

    match object.get("name") {
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            let len = trimmed.chars().count();
            if len == 0 {
                violations.push("name must not be empty".to_string());
            } else if len > NAME_MAX_LEN {
                violations.push(format!("name must be at most {NAME_MAX_LEN} characters"));
            } else {
                name = trimmed.to_string();
            }
        }
        Some(_) => violations.push("name must be a string".to_string()),
        None => violations.push("name is required".to_string()),
    }

    let done = match object.get("done") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            violations.push("done must be a boolean".to_string());
            false
        }
    };

    if violations.is_empty() {
        Ok(NewItem { name, done })
    } else {
        Err(violations.join("; "))
    }
}
