use serde::{Deserialize, Serialize};

/// Response body of `GET /api/vector_db/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStats {
    /// Number of documents in the vector index. Defaults to 0 when the
    /// backend omits the field.
    #[serde(default)]
    pub total_documents: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_count() {
        let stats: VectorStats = serde_json::from_value(serde_json::json!({
            "total_documents": 7
        }))
        .unwrap();
        assert_eq!(stats.total_documents, 7);
    }

    #[test]
    fn missing_count_defaults_to_zero() {
        let stats: VectorStats = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(stats.total_documents, 0);
    }
}
