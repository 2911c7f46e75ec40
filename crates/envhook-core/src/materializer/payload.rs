//! Validation of `direnv export json` output.

use serde_json::Value;
use tracing::debug;

use crate::error::ExportError;
use crate::outcome::Variables;

/// Tracing target for payload validation.
const PAYLOAD_TARGET: &str = "envhook_core::materializer::payload";

/// Parses an export payload.
///
/// Blank output means there is nothing to apply and yields `Ok(None)`.
/// Otherwise the payload must be a flat JSON object. String values become
/// variables; `null` marks a variable the tool wants unset and is skipped.
pub(crate) fn parse_export(stdout: &str) -> Result<Option<Variables>, ExportError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|err| ExportError::Malformed {
        message: format!("export is not valid JSON: {err}"),
        source: Some(err),
    })?;

    let Value::Object(entries) = value else {
        return Err(ExportError::Malformed {
            message: format!("expected a JSON object, found {}", kind_of(&value)),
            source: None,
        });
    };

    let mut variables = Variables::new();
    for (name, value) in entries {
        match value {
            Value::String(text) => {
                variables.insert(name, text);
            }
            // `null` is the tool asking for the variable to be unset. The
            // merge is additive only, so the request is dropped rather than
            // treated as a malformed value.
            Value::Null => {
                debug!(target: PAYLOAD_TARGET, variable = %name, "skipping unset request");
            }
            other => {
                return Err(ExportError::Malformed {
                    message: format!("variable '{name}' has a {} value", kind_of(&other)),
                    source: None,
                });
            }
        }
    }

    Ok(Some(variables))
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
