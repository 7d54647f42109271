//! Diff summaries for audit entries
//!
//! Compares the serialized before/after forms of an entity and produces a
//! one-line summary such as `budget: 10000 -> 12000, frequency: "Monthly" -> "Weekly"`.

use serde_json::Value;

/// Summarize the differences between two JSON values
///
/// Nested objects are walked with dotted field paths; arrays are compared
/// by length only. Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, path: &str, changes: &mut Vec<String>) {
    if before == after {
        return;
    }

    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let field = join_path(path, key);
                match after_obj.get(key) {
                    Some(after_val) => collect_changes(before_val, after_val, &field, changes),
                    None => changes.push(format!("{}: {} -> (removed)", field, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_path(path, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        _ => {
            let label = if path.is_empty() { "value" } else { path };
            changes.push(format!(
                "{}: {} -> {}",
                label,
                format_value(before),
                format_value(after)
            ));
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
