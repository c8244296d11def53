//! Config loading, JSON output and determinism digests.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Result, ToolError};

/// Load a pass config from a JSON file, or use its defaults.
///
/// Keys missing from the file keep their default values.
pub fn load_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded config from {}", path.display());
    Ok(serde_json::from_str(&text)?)
}

/// Serialize a pass result into a JSON tree.
pub fn to_json<T: Serialize>(result: &T) -> Result<Value> {
    Ok(serde_json::to_value(result)?)
}

/// Write pretty JSON to `output`, or to stdout when absent.
pub fn write_json(value: &Value, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, text + "\n").map_err(|source| ToolError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}

/// SHA-256 over every number in the tree, in document order.
pub fn numeric_digest(value: &Value) -> String {
    let mut numbers = Vec::new();
    collect_numbers(value, &mut numbers);
    compute_samples_hash(&numbers)
}

/// SHA-256 of a slice of values, little-endian.
pub fn compute_samples_hash(values: &[f64]) -> String {
    let mut hasher = Sha256::new();
    for v in values {
        hasher.update(v.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

fn collect_numbers(value: &Value, out: &mut Vec<f64>) {
    match value {
        Value::Number(n) => out.extend(n.as_f64()),
        Value::Array(items) => items.iter().for_each(|v| collect_numbers(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_numbers(v, out)),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}
