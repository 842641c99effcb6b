//! Shared response envelope types.
//!
//! Every API endpoint wraps its payload in `{success, data, ...}` so the
//! browser client can treat responses uniformly.

use serde::Serialize;

/// Pagination echo for list envelopes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

/// Success envelope for list responses.
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    /// Number of rows in this response, not a total count.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ListEnvelope<T> {
    /// Envelope without pagination (categories).
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count,
            pagination: None,
        }
    }

    /// Envelope echoing the resolved pagination bounds (listings).
    pub fn paginated(data: Vec<T>, limit: u64, offset: u64) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count,
            pagination: Some(Pagination { limit, offset }),
        }
    }
}

/// Success envelope for single-record responses.
#[derive(Debug, Serialize)]
pub struct ItemEnvelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T> ItemEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Envelope for a freshly created record.
    pub fn created(data: T, message: &'static str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_counts_rows() {
        let env = ListEnvelope::new(vec!["a", "b"]);
        let value = serde_json::to_value(&env).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 2);
        assert!(value.get("pagination").is_none());
    }

    #[test]
    fn paginated_envelope_echoes_bounds() {
        let env = ListEnvelope::paginated(vec![1, 2, 3], 50, 10);
        let value = serde_json::to_value(&env).unwrap();

        assert_eq!(value["pagination"]["limit"], 50);
        assert_eq!(value["pagination"]["offset"], 10);
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn item_envelope_skips_absent_message() {
        let value = serde_json::to_value(ItemEnvelope::new(42)).unwrap();
        assert_eq!(value["data"], 42);
        assert!(value.get("message").is_none());

        let created = serde_json::to_value(ItemEnvelope::created(42, "Listing created successfully"))
            .unwrap();
        assert_eq!(created["message"], "Listing created successfully");
    }
}
