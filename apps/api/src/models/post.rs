use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::opportunity::SourcePost;

/// A scraped LinkedIn post owned by one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LinkedInPostRow {
    pub id: i32,
    pub tenant_id: i32,
    pub user_id: Option<i32>,
    pub post_url: String,
    pub author_profile_url: Option<String>,
    pub content: Option<String>,
    pub scraped_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkedInPostRow {
    /// The analyzable part of the post, or `None` when it has no text.
    pub fn source_post(&self) -> Option<SourcePost> {
        let content = self.content.as_deref().filter(|c| !c.trim().is_empty())?;
        Some(SourcePost {
            content: content.to_string(),
            author_profile_url: self.author_profile_url.clone(),
        })
    }
}
