pub mod amortization;

use serde_json::Value;

/// What a command hands to the output layer: the computation envelope as
/// JSON and its plain-text report.
pub struct CommandOutput {
    pub value: Value,
    pub report: String,
}
