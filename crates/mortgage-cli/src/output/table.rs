use serde_json::{Map, Value};
use std::io::Write;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go into one Field/Value table; each nested object
/// (the summary) and each array of objects (the schedule) gets its own
/// titled table underneath.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                write_result_tables(out, result, map)?;
            } else {
                writeln!(out, "{}", field_table(map.iter()))?;
            }
        }
        Value::Array(arr) => write_array_table(out, arr)?,
        _ => writeln!(out, "{}", value)?,
    }
    Ok(())
}

fn write_result_tables<W: Write>(
    out: &mut W,
    result: &Value,
    envelope: &Map<String, Value>,
) -> std::io::Result<()> {
    if let Value::Object(res_map) = result {
        let scalars = res_map
            .iter()
            .filter(|(_, v)| !v.is_object() && !v.is_array());
        writeln!(out, "{}", field_table(scalars))?;

        for (key, val) in res_map {
            match val {
                Value::Object(nested) => {
                    writeln!(out, "\n{}:", title(key))?;
                    writeln!(out, "{}", field_table(nested.iter()))?;
                }
                Value::Array(rows) => {
                    writeln!(out, "\n{}:", title(key))?;
                    write_array_table(out, rows)?;
                }
                _ => {}
            }
        }
    } else {
        writeln!(out, "{}", format_value(result))?;
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings {
                if let Value::String(s) = w {
                    writeln!(out, "  - {}", s)?;
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }
    Ok(())
}

fn field_table<'a>(fields: impl Iterator<Item = (&'a String, &'a Value)>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.clone(), format_value(val)]);
    }
    Table::from(builder)
}

fn write_array_table<W: Write>(out: &mut W, arr: &[Value]) -> std::io::Result<()> {
    if arr.is_empty() {
        return writeln!(out, "(empty)");
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        writeln!(out, "{}", Table::from(builder))
    } else {
        for item in arr {
            writeln!(out, "{}", format_value(item))?;
        }
        Ok(())
    }
}

/// `average_interest_per_year` -> `Average interest per year`
fn title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
