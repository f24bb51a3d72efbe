use sage_core::errors::CoreError;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
///
/// Failures are `CoreError::Validation` so the binary exits with the
/// validation code.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| {
        CoreError::validation(format!("invalid {field} '{raw}': {error}")).into()
    })
}
