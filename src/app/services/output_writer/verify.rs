//! Post-write JSON verification.
//!
//! Generic JSON encoders are known to widen integers back to floats;
//! when that happens the file contains `5.0` where coercion had produced
//! an `Integer`. The check re-reads the file it cannot trust and scans
//! every number: a float with a zero fractional part is reported with its
//! JSON path (`data[3].Postal`).

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::app::models::WarningLog;
use crate::error::Result;

/// Scan a written JSON file for floats that should have been integers.
/// Returns the JSON paths of all findings.
pub fn scan_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let mut findings = Vec::new();
    scan_value(&value, "", &mut findings);
    Ok(findings)
}

/// Run the scan and report each finding as a warning
pub fn verify_json_integers(path: &Path, warnings: &mut WarningLog) -> Result<usize> {
    let findings = scan_file(path)?;
    for json_path in &findings {
        warnings.push(format!(
            "{}: integral value serialized as float at {}",
            path.display(),
            json_path
        ));
    }
    Ok(findings.len())
}

fn scan_value(value: &Value, path: &str, findings: &mut Vec<String>) {
    match value {
        Value::Number(number) => {
            // integers parse as i64/u64; only true floats reach is_f64
            if number.is_f64() {
                let float = number.as_f64().unwrap_or(f64::NAN);
                if float.is_finite() && float.fract() == 0.0 {
                    findings.push(path.to_string());
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                scan_value(item, &format!("{}[{}]", path, index), findings);
            }
        }
        Value::Object(entries) => {
            for (key, item) in entries {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                scan_value(item, &child, findings);
            }
        }
        _ => {}
    }
}
