use serde::{Deserialize, Serialize};

/// Response envelope: `{success: true, data?, message?}` on success,
/// `{success: false, error}` on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn success_with_message(data: Option<T>, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn error(error: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.to_string()),
        }
    }
}
