use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{result_of, rows_of, scalar_text};

/// Columns shown for each priced row, with their headers.
const ROW_COLUMNS: [(&str, &str); 9] = [
    ("pv_id", "#"),
    ("pv", "PV"),
    ("total_buyout", "Buyout"),
    ("rate_over15", "Over 15 (raw)"),
    ("rate_over15_rounded", "Over 15"),
    ("rate_under15_rounded", "Under 15"),
    ("market_check", "Market check"),
    ("percent_from_car_price", "% of car"),
    ("status", "Status"),
];

/// Format output as tables: the quote text (if any), the priced rows, then
/// warnings and methodology from the envelope.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    if let Some(Value::String(text)) = result.get("text") {
        if !text.is_empty() {
            println!("{}\n", text);
        }
    }

    if let Some(rows) = rows_of(result) {
        print_rows(rows);
    } else {
        print_flat_object(result);
    }

    if let Some(tally) = result
        .get("tally")
        .or_else(|| result.get("table").and_then(|t| t.get("tally")))
    {
        println!(
            "\nGood: {}  Warning: {}  Bad: {}",
            scalar_text(&tally["good"], "0"),
            scalar_text(&tally["warning"], "0"),
            scalar_text(&tally["bad"], "0"),
        );
    }

    if let Value::Object(envelope) = value {
        print_envelope_notes(envelope);
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(ROW_COLUMNS.iter().map(|(_, header)| header.to_string()));
    for row in rows {
        builder.push_record(ROW_COLUMNS.iter().map(|(key, _)| {
            row.get(*key)
                .map(|v| scalar_text(v, "invalid"))
                .unwrap_or_default()
        }));
    }
    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    match value {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                builder.push_record([key.as_str(), &scalar_text(val, "invalid")]);
            }
            println!("{}", Table::from(builder));
        }
        other => println!("{}", scalar_text(other, "null")),
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
