use serde_json::Value;

use super::{result_of, scalar_text};

/// Keys tried in order when picking the single answer to print.
const PRIORITY_KEYS: [&str; 5] = [
    "text",
    "status",
    "rate_over15_rounded",
    "total_buyout",
    "percent_from_car_price",
];

/// Print just the key answer: the quote text, a row's status line, or one
/// `id: over15 / under15` line per priced row.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Some(Value::String(text)) = result.get("text") {
        println!("{}", text);
        return;
    }

    if let Some(Value::Array(rows)) = result.get("rows") {
        for row in rows {
            println!("{}", row_line(row));
        }
        return;
    }

    if let Value::Object(map) = result {
        if map.contains_key("rate_over15_rounded") {
            println!("{}", row_line(result));
            return;
        }
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", scalar_text(val, "null"));
                    return;
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val, "null"));
            return;
        }
    }

    println!("{}", scalar_text(result, "null"));
}

fn row_line(row: &Value) -> String {
    let field = |key: &str| row.get(key).map(|v| scalar_text(v, "invalid")).unwrap_or_default();
    let label = row
        .get("pv_id")
        .map(|id| format!("#{} ", scalar_text(id, "")))
        .unwrap_or_default();
    format!(
        "{}pv={} over15={} under15={} buyout={} status={}",
        label,
        field("pv"),
        field("rate_over15_rounded"),
        field("rate_under15_rounded"),
        field("total_buyout"),
        field("status"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_line_with_missing_rate() {
        let row = json!({
            "pv_id": 3,
            "pv": "0",
            "rate_over15_rounded": null,
            "rate_under15_rounded": null,
            "total_buyout": "0",
            "status": "bad"
        });
        assert_eq!(
            row_line(&row),
            "#3 pv=0 over15=invalid under15=invalid buyout=0 status=bad"
        );
    }
}
