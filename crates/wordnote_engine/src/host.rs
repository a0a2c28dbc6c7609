use thiserror::Error;
use wordnote_core::WorkItemId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host service failed: {0}")]
pub struct HostError(pub String);

/// Form services of the work item hosting the widget.
#[async_trait::async_trait]
pub trait WorkItemFormService: Send + Sync {
    async fn work_item_id(&self) -> Result<WorkItemId, HostError>;

    /// Current raw value of a field, markup included.
    async fn field_value(&self, field_name: &str) -> Result<Option<String>, HostError>;

    async fn set_error(&self, message: &str) -> Result<(), HostError>;

    async fn clear_error(&self) -> Result<(), HostError>;
}

pub trait IdentityService: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}
