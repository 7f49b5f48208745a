use serde_json::{Map, Value};
use std::io::Write;

/// Write output as CSV.
///
/// A result carrying a `schedule` array is written one row per payment;
/// any other result becomes two-column `field,value` pairs, with nested
/// objects flattened as `parent.child`.
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(out);

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("schedule") {
                write_array_csv(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                write_fields(&mut wtr, "", map)?;
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(result)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_fields<W: Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &Map<String, Value>,
) -> csv::Result<()> {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(nested) => write_fields(wtr, &name, nested)?,
            _ => wtr.write_record([name.as_str(), &format_csv_value(val)])?,
        }
    }
    Ok(())
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    if arr.is_empty() {
        return Ok(());
    }

    // Extract headers from first object
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
