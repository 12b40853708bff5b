use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A saved opportunity. `status` is the stored enum name (`DRAFT`, `SENT`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OpportunityRow {
    pub id: i32,
    pub tenant_id: i32,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub source_post_id: Option<i32>,
    pub title: String,
    pub summary: Option<String>,
    pub status: String,
    pub tags: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl OpportunityRow {
    /// Tags stored as a JSON array of strings; anything else reads as no tags.
    pub fn tag_list(&self) -> Vec<String> {
        match &self.tags {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_support::sample_opportunity;

    #[test]
    fn test_tag_list_reads_string_array() {
        let mut row = sample_opportunity(3, 1);
        row.tags = Some(json!(["react", 5, "fintech"]));
        assert_eq!(row.tag_list(), vec!["react", "fintech"]);
    }

    #[test]
    fn test_tag_list_tolerates_null_and_non_arrays() {
        let mut row = sample_opportunity(3, 1);
        row.tags = None;
        assert!(row.tag_list().is_empty());
        row.tags = Some(json!({"react": true}));
        assert!(row.tag_list().is_empty());
    }
}
