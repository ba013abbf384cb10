pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print the full envelope to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// The `result` object of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Priced rows of a table or quote result, if the result carries any.
pub(crate) fn rows_of(result: &Value) -> Option<&Vec<Value>> {
    result
        .get("rows")
        .or_else(|| result.get("table").and_then(|t| t.get("rows")))
        .and_then(Value::as_array)
}

/// Scalar rendering shared by the text formatters; `null` becomes `null_marker`.
pub(crate) fn scalar_text(value: &Value, null_marker: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null_marker.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
