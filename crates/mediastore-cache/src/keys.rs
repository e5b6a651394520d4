//! Cache key builders for all mediastore cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Cache key for a file entity by ID.
pub fn file_by_id(file_id: Uuid) -> String {
    format!("file:{file_id}")
}

/// Cache key for an account entity by ID.
pub fn account_by_id(account_id: Uuid) -> String {
    format!("account:{account_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_key() {
        let id = Uuid::nil();
        assert_eq!(
            file_by_id(id),
            "file:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_keys_distinct() {
        let id = Uuid::nil();
        assert_ne!(account_by_id(id), file_by_id(id));
    }
}
