//! CLI output formatting utilities.
//!
//! This module provides utilities for formatting CLI output including:
//! - JSON syntax highlighting
//! - Rectangles and change markers for tables

use colored::Colorize;
use serde_json::Value;

use crate::modules::gaps::Rect;

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (bold)
pub fn print_highlighted_json(value: &Value) {
    println!("{}", highlight_json(value));
}

/// Renders JSON the way `serde_json::to_string_pretty` does, with colors.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().magenta().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().yellow().to_string()),
        Value::String(s) => out.push_str(&quote(s).green().to_string()),
        Value::Array(items) => {
            let entries: Vec<_> = items.iter().map(|item| (None, item)).collect();
            write_container(out, ('[', ']'), &entries, depth);
        }
        Value::Object(map) => {
            let entries: Vec<_> = map.iter().map(|(key, item)| (Some(key.as_str()), item)).collect();
            write_container(out, ('{', '}'), &entries, depth);
        }
    }
}

fn write_container(
    out: &mut String,
    (open, close): (char, char),
    entries: &[(Option<&str>, &Value)],
    depth: usize,
) {
    let open = open.to_string().white().bold().to_string();
    let close = close.to_string().white().bold().to_string();

    if entries.is_empty() {
        out.push_str(&open);
        out.push_str(&close);
        return;
    }

    out.push_str(&open);
    out.push('\n');

    let indent = "  ".repeat(depth + 1);
    for (i, (key, value)) in entries.iter().enumerate() {
        out.push_str(&indent);
        if let Some(key) = key {
            out.push_str(&quote(key).cyan().to_string());
            out.push_str(": ");
        }
        write_value(out, value, depth + 1);
        if i + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }

    out.push_str(&"  ".repeat(depth));
    out.push_str(&close);
}

/// Quotes and escapes a string as JSON.
fn quote(s: &str) -> String { serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\"")) }

/// Formats a rectangle as `x, y  width×height`.
#[must_use]
pub fn format_rect(rect: &Rect) -> String {
    format!("{}, {}  {}×{}", rect.x, rect.y, rect.width, rect.height)
}

/// Formats a rectangle, highlighted if it differs from `before`.
#[must_use]
pub fn format_rect_change(before: &Rect, after: &Rect) -> String {
    let text = format_rect(after);
    if before == after { text.dimmed().to_string() } else { text.green().bold().to_string() }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_highlight_matches_pretty_layout() {
        colored::control::set_override(false);

        let value = json!({
            "screens": [],
            "windows": [{ "id": 1, "class": "term \"main\"", "isDock": false, "parent": null }],
            "gaps": { "mid": 12 }
        });

        assert_eq!(highlight_json(&value), serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn test_highlight_scalars() {
        colored::control::set_override(false);
        assert_eq!(highlight_json(&json!(3)), "3");
        assert_eq!(highlight_json(&json!("a")), "\"a\"");
        assert_eq!(highlight_json(&json!({})), "{}");
    }

    #[test]
    fn test_format_rect() {
        assert_eq!(format_rect(&Rect::new(12, 24, 800, 600)), "12, 24  800×600");
    }

    #[test]
    fn test_format_rect_change_contains_rect() {
        let before = Rect::new(0, 0, 10, 10);
        let after = Rect::new(1, 0, 9, 10);
        assert!(format_rect_change(&before, &after).contains("1, 0  9×10"));
        assert!(format_rect_change(&before, &before).contains("0, 0  10×10"));
    }
}
