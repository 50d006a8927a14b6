//! NEON-style rendering of merged sections.
//!
//! Maps render as `key: value` lines, nested maps and lists as indented
//! blocks (one tab per level), lists as `- item`. Strings stay bare unless
//! they could be read back as something else, in which case they are
//! double-quoted.

use serde_json::Value;

/// First line of every generated file.
pub const GENERATED_HEADER: &str =
    "# This file is generated by the package registrar. Manual changes will be overwritten.";

const RESERVED: &[&str] = &["true", "false", "yes", "no", "on", "off", "null"];

/// Render a structured section.
pub fn render_tree_section(name: &str, value: &Value) -> String {
    let mut out = String::new();
    if is_nested(value) {
        out.push_str(&format_string(name));
        out.push_str(":\n");
        render_block(&mut out, value, 1);
    } else {
        out.push_str(&format_string(name));
        out.push_str(": ");
        out.push_str(&inline(value));
        out.push('\n');
    }
    out
}

/// Render a text section: its non-blank lines, one level deep.
pub fn render_text_section(name: &str, text: &str) -> String {
    let mut out = format_string(name);
    out.push_str(":\n");
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        out.push('\t');
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_block(out: &mut String, value: &Value, depth: usize) {
    let indent = "\t".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                out.push_str(&indent);
                out.push_str(&format_string(key));
                if is_nested(item) {
                    out.push_str(":\n");
                    render_block(out, item, depth + 1);
                } else {
                    out.push_str(": ");
                    out.push_str(&inline(item));
                    out.push('\n');
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                out.push_str(&indent);
                if is_nested(item) {
                    out.push_str("-\n");
                    render_block(out, item, depth + 1);
                } else {
                    out.push_str("- ");
                    out.push_str(&inline(item));
                    out.push('\n');
                }
            }
        }
        scalar => {
            out.push_str(&indent);
            out.push_str(&format_scalar(scalar));
            out.push('\n');
        }
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn inline(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => "[]".to_string(),
        scalar => format_scalar(scalar),
    }
}

/// Spell a scalar value.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format_string(s),
        other => other.to_string(),
    }
}

/// A string, bare when unambiguous, otherwise double-quoted.
pub fn format_string(s: &str) -> String {
    if needs_quotes(s) {
        Value::String(s.to_string()).to_string()
    } else {
        s.to_string()
    }
}

fn needs_quotes(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };

    s.trim() != s
        || "-[]{}()\"'@`!&*|>?#=,:".contains(first)
        || s.contains(['\n', '\r', '\t', ',', '=', '[', ']', '{', '}', '(', ')', '"', '\''])
        || s.contains(": ")
        || s.contains(" #")
        || s.ends_with(':')
        || RESERVED.contains(&s.to_ascii_lowercase().as_str())
        || s.parse::<f64>().is_ok()
}
