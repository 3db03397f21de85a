//! Status and confirmation messages for operation feedback.

use std::fmt;

use crate::models::HealthStatus;

/// A one-line success or failure message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }

    /// Summarize a health probe of the backend at `base_url`.
    pub fn from_health(health: &HealthStatus, base_url: &str) -> Self {
        if health.is_ok() {
            Self::success(format!("Backend at {base_url} is healthy"))
        } else {
            Self::failure(format!(
                "Backend at {base_url} reported status '{}'",
                health.status
            ))
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}
