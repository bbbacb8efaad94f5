use async_trait::async_trait;
use outreach_core::AppResult;
use outreach_domain::AuditAction;

/// Audit event emitted by application use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Branch partition key for the event.
    pub branch_key: String,
    /// Subject that performed the action.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends one event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
