use serde_json::Value;
use std::io;

use super::{result_of, rows_of, scalar_text};

/// Write output as CSV to stdout: one record per priced row, or a
/// field/value listing for single results.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let result = result_of(value);

    if let Some(rows) = rows_of(result) {
        write_rows(&mut wtr, rows);
    } else if let Value::Object(map) = result {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &scalar_text(val, "")]);
        }
    } else {
        let _ = wtr.write_record([&scalar_text(result, "")]);
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(|v| scalar_text(v, "")).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_rows_uses_first_row_headers() {
        let rows = vec![
            json!({"pv": "0", "status": "good", "rate_over15_rounded": "3900"}),
            json!({"pv": "5", "status": "bad", "rate_over15_rounded": null}),
        ];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, &rows);
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("pv") && lines[0].contains("status"));
        assert!(lines[2].contains("bad"));
    }
}
