use mortgage_core::amortization::report::format_amount;
use rust_decimal::Decimal;
use serde_json::Value;
use std::io::Write;

/// Headline figures, in priority order.
const PRIORITY_KEYS: [&str; 4] = [
    "blended_payment",
    "total_interest_paid",
    "total_paid",
    "periodic_interest_factor",
];

/// Write just the key answer value from the output.
///
/// Looks for well-known result fields in priority order, then falls back to
/// the first field in the result object. Monetary strings are printed with
/// two decimal places.
pub fn write_minimal<W: Write>(
    out: &mut W,
    value: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    let text = if key == "periodic_interest_factor" {
                        format_minimal(val)
                    } else {
                        format_money(val)
                    };
                    writeln!(out, "{}", text)?;
                    return Ok(());
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            writeln!(out, "{}: {}", key, format_minimal(val))?;
            return Ok(());
        }
    }

    writeln!(out, "{}", format_minimal(result_obj))?;
    Ok(())
}

fn format_money(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(amount) => format_amount(amount),
            Err(_) => s.clone(),
        },
        _ => format_minimal(value),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
