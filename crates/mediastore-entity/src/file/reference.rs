//! Closed reference-type enum for files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mediastore_core::error::AppError;

/// What a file is attached to.
///
/// Stored as lowercase text; invalid values are rejected at the
/// boundary and never reach the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    /// Not attached to anything.
    None,
    /// An ordinary uploaded file.
    Normal,
    /// A file produced by a call recording.
    Recording,
}

impl ReferenceType {
    /// The lowercase textual form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Normal => "normal",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "normal" => Ok(Self::Normal),
            "recording" => Ok(Self::Recording),
            other => Err(AppError::validation(format!(
                "invalid reference type '{other}'"
            ))),
        }
    }
}

// Stored in a plain TEXT column, so Type/Encode/Decode delegate to &str
// rather than mapping to a database-side enum type.

impl sqlx::Type<sqlx::Postgres> for ReferenceType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for ReferenceType {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ReferenceType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for rt in [
            ReferenceType::None,
            ReferenceType::Normal,
            ReferenceType::Recording,
        ] {
            assert_eq!(rt.as_str().parse::<ReferenceType>().unwrap(), rt);
        }
    }

    #[test]
    fn test_invalid_rejected() {
        assert!("voicemail".parse::<ReferenceType>().is_err());
        assert!("Normal".parse::<ReferenceType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ReferenceType::Recording).unwrap();
        assert_eq!(json, "\"recording\"");
    }
}
