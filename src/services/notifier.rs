use uuid::Uuid;

use crate::database::models::NotificationInput;
use crate::database::repositories::NotificationRepository;

/// Best-effort notification dispatch. Messages are queued to the outbox
/// table on a detached task; a failure is logged and swallowed so an API
/// response never depends on delivery.
#[derive(Clone)]
pub struct Notifier {
    repository: NotificationRepository,
}

impl Notifier {
    pub fn new(repository: NotificationRepository) -> Self {
        Self { repository }
    }

    pub fn leave_submitted(&self, employee_id: Uuid, email: &str, leave_type: &str, days: f32) {
        self.send(NotificationInput {
            employee_id,
            email: email.to_string(),
            subject: "Leave request submitted".to_string(),
            body: format!(
                "Your {} leave request for {} day(s) has been submitted and is awaiting approval.",
                leave_type, days
            ),
        });
    }

    pub fn leave_status_changed(&self, employee_id: Uuid, email: &str, status: &str) {
        self.send(NotificationInput {
            employee_id,
            email: email.to_string(),
            subject: format!("Leave request {}", status),
            body: format!("Your leave request has been {}.", status),
        });
    }

    fn send(&self, input: NotificationInput) {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            if let Err(err) = repository.enqueue(input).await {
                log::warn!("Failed to queue notification: {}", err);
            }
        });
    }
}
