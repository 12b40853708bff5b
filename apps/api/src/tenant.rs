use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::state::AppState;

/// Tenant every request resolves to when `DEMO_MODE` is on.
pub const DEMO_TENANT_ID: i32 = 1;

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const USER_HEADER: &str = "x-user-id";

/// Who a request acts for. Set by the upstream auth gateway; every CRM read is
/// scoped to `tenant_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: i32,
    pub user_id: Option<i32>,
}

#[async_trait]
impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        if state.config.demo_mode {
            return Ok(TenantContext {
                tenant_id: DEMO_TENANT_ID,
                user_id: None,
            });
        }

        let tenant_id = header_id(parts, TENANT_HEADER)
            .ok_or_else(|| AppError::Unauthorized("No tenant associated with this request".into()))?;
        let user_id = header_id(parts, USER_HEADER);

        Ok(TenantContext { tenant_id, user_id })
    }
}

/// A positive integer id from a header; anything else reads as absent.
fn header_id(parts: &Parts, name: &str) -> Option<i32> {
    parts
        .headers
        .get(name)?
        .to_str()
        .ok()?
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::test_support::test_state;

    async fn resolve(headers: &[(&str, &str)], demo_mode: bool) -> Result<TenantContext, AppError> {
        let mut builder = Request::builder().uri("/api/ai/analyze-opportunity");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        let mut state = test_state();
        state.config.demo_mode = demo_mode;
        TenantContext::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn test_reads_tenant_and_user_headers() {
        let ctx = resolve(&[("x-tenant-id", "4"), ("x-user-id", "12")], false)
            .await
            .unwrap();
        assert_eq!(
            ctx,
            TenantContext {
                tenant_id: 4,
                user_id: Some(12)
            }
        );
    }

    #[tokio::test]
    async fn test_user_header_is_optional() {
        let ctx = resolve(&[("x-tenant-id", "4")], false).await.unwrap();
        assert_eq!(ctx.user_id, None);
    }

    #[tokio::test]
    async fn test_missing_or_invalid_tenant_is_unauthorized() {
        for headers in [vec![], vec![("x-tenant-id", "abc")], vec![("x-tenant-id", "0")]] {
            let err = resolve(&headers, false).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(_)));
        }
    }

    #[tokio::test]
    async fn test_demo_mode_ignores_headers() {
        let ctx = resolve(&[("x-tenant-id", "9")], true).await.unwrap();
        assert_eq!(ctx.tenant_id, DEMO_TENANT_ID);
    }
}
