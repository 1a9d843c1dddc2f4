use uuid::Uuid;

/// Outbox entry handed to the external mail relay.
#[derive(Debug, Clone)]
pub struct NotificationInput {
    pub employee_id: Uuid,
    pub email: String,
    pub subject: String,
    pub body: String,
}
