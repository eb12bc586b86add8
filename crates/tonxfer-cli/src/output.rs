//! Output formatting for human-readable and JSON modes.
//!
//! Human mode uses colored terminal output.
//! JSON mode outputs pure JSON with no ANSI escapes.

use colored::Colorize;

/// One output value with its JSON key and human-readable label.
pub struct Field<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub value: String,
}

impl<'a> Field<'a> {
    pub fn new(key: &'a str, label: &'a str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
        }
    }
}

/// Prints fields as labelled lines, or as a single JSON object.
pub fn print_fields(fields: &[Field<'_>], json_mode: bool) {
    if json_mode {
        let obj: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .map(|f| (f.key.to_owned(), serde_json::Value::String(f.value.clone())))
            .collect();
        println!("{}", serde_json::Value::Object(obj));
    } else {
        for field in fields {
            print_kv(field.label, &field.value);
        }
    }
}

/// Prints a single key-value pair in human mode.
pub fn print_kv(key: &str, value: &str) {
    println!("{}: {}", key.bold(), value);
}

/// Prints an error message.
pub fn print_error(msg: &str, json_mode: bool) {
    if json_mode {
        let obj = serde_json::json!({ "error": msg });
        eprintln!("{}", obj);
    } else {
        eprintln!("{} {}", "error:".red().bold(), msg);
    }
}
