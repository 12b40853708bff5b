use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::opportunity::OpportunityRow;
use crate::models::post::LinkedInPostRow;

/// Tenant-scoped reads of CRM records.
///
/// Carried in `AppState` as `Arc<dyn CrmStore>`. A record owned by another
/// tenant is reported as missing, never as forbidden.
#[async_trait]
pub trait CrmStore: Send + Sync {
    async fn get_post(&self, post_id: i32, tenant_id: i32)
        -> Result<Option<LinkedInPostRow>, AppError>;

    async fn get_opportunity(
        &self,
        opportunity_id: i32,
        tenant_id: i32,
    ) -> Result<Option<OpportunityRow>, AppError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrmStore for PgStore {
    async fn get_post(
        &self,
        post_id: i32,
        tenant_id: i32,
    ) -> Result<Option<LinkedInPostRow>, AppError> {
        let row = sqlx::query_as::<_, LinkedInPostRow>(
            r#"
            SELECT id, tenant_id, user_id, post_url, author_profile_url, content,
                   scraped_at, created_at, updated_at
            FROM linkedin_posts
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(post_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_opportunity(
        &self,
        opportunity_id: i32,
        tenant_id: i32,
    ) -> Result<Option<OpportunityRow>, AppError> {
        // status is a native enum column; read its label as text
        let row = sqlx::query_as::<_, OpportunityRow>(
            r#"
            SELECT id, tenant_id, company_id, contact_id, source_post_id, title, summary,
                   status::text AS status, tags::jsonb AS tags, created_at
            FROM opportunities
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(opportunity_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
