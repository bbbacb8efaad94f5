use async_trait::async_trait;
use outreach_application::{AuditEvent, AuditRepository};
use outreach_core::AppResult;
use tokio::sync::RwLock;

/// In-memory audit sink.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns appended events in order.
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
