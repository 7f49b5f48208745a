use serde_json::Value;
use std::io::Write;

/// Pretty-print the envelope as JSON.
pub fn write_json<W: Write>(out: &mut W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
