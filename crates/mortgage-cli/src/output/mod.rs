pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use std::io::Write;

use crate::commands::CommandOutput;
use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output<W: Write>(
    format: &OutputFormat,
    output: &CommandOutput,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Report => out.write_all(output.report.as_bytes())?,
        OutputFormat::Json => json::write_json(out, &output.value)?,
        OutputFormat::Table => table::write_table(out, &output.value)?,
        OutputFormat::Csv => csv_out::write_csv(out, &output.value)?,
        OutputFormat::Minimal => minimal::write_minimal(out, &output.value)?,
    }
    out.flush()?;
    Ok(())
}
