use serde::{Deserialize, Deserializer};

/// Treats a missing, null, or empty string as `None`.
///
/// The backend sends `""` for unset foreign keys on some entities.
pub fn deserialize_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        other => Ok(other),
    }
}
