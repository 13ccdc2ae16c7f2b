//! Trait abstraction for the backend client to enable mocking in tests

use crate::api::client::ApiError;
use crate::state::{AuditLog, EmailAnalysis, Icp, IcpValues};
use async_trait::async_trait;

/// Operations against the Resonate backend, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Exchange credentials for a bearer token held for the session
    async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError>;

    /// Whether a bearer token is currently held
    fn is_authenticated(&self) -> bool;

    /// List the current user's ICPs
    async fn list_icps(&mut self) -> Result<Vec<Icp>, ApiError>;

    /// Fetch a single ICP
    async fn get_icp(&mut self, icp_id: i64) -> Result<Icp, ApiError>;

    /// Create a new ICP from the completed form state
    async fn create_icp(&mut self, values: &IcpValues) -> Result<Icp, ApiError>;

    /// Update an existing ICP from the completed form state
    async fn update_icp(&mut self, icp_id: i64, values: &IcpValues) -> Result<Icp, ApiError>;

    /// Delete an ICP
    async fn delete_icp(&mut self, icp_id: i64) -> Result<(), ApiError>;

    /// Submit an email for analysis against an ICP
    async fn analyze_email(
        &mut self,
        icp_id: i64,
        email_content: &str,
    ) -> Result<EmailAnalysis, ApiError>;

    /// List recent audit log entries
    async fn list_audit_logs(&mut self) -> Result<Vec<AuditLog>, ApiError>;
}
