//! Cursor pagination for list operations.
//!
//! Lists are ordered by creation time descending. The page token is an
//! exclusive upper bound on creation time: a page never contains rows
//! with `created_at >= token`, so repeated calls that feed the last
//! row's creation time back as the next token produce no duplicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Default number of rows per page.
const DEFAULT_PAGE_SIZE: u64 = 100;
/// Maximum number of rows per page.
const MAX_PAGE_SIZE: u64 = 1000;

/// Request parameters for cursor-paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Exclusive creation-time upper bound, RFC 3339. Empty or absent
    /// means "now".
    #[serde(default)]
    pub token: Option<String>,
    /// Number of rows to return.
    #[serde(default = "default_page_size")]
    pub size: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(token: Option<String>, size: u64) -> Self {
        Self { token, size }
    }

    /// Parse the token into the cursor timestamp. An empty token means
    /// the current time is the implicit upper bound.
    pub fn cursor(&self) -> AppResult<DateTime<Utc>> {
        match self.token.as_deref() {
            None | Some("") => Ok(Utc::now()),
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    AppError::validation(format!("invalid page token '{raw}': {e}"))
                }),
        }
    }

    /// The SQL `LIMIT` value, clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            token: None,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Build the next-page token from the last row of the current page.
pub fn next_token(last_created_at: DateTime<Utc>) -> String {
    last_created_at.to_rfc3339()
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
