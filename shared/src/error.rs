use thiserror::Error;

/// Failure of a single call against the medication API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (server down, CORS, offline)
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text the server sent back with a rejected request, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } if !body.trim().is_empty() => Some(body.trim()),
            _ => None,
        }
    }

    /// Short reason shown in the connection badge after a failed fetch
    pub fn connection_reason(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "Server not reachable",
            ApiError::Status { .. } => "Server error",
            ApiError::Decode(_) => "Unexpected response",
        }
    }
}

/// Client-side rejection of medication form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MedicationFormError {
    #[error("Please enter a medication name.")]
    EmptyName,

    #[error("Please enter a dosage form.")]
    EmptyDosageForm,

    #[error("Dosages per day must be at least 1.")]
    NoDoses,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let rejected = ApiError::Status { status: 401, body: "Invalid username or password.".to_string() };
        assert_eq!(rejected.server_message(), Some("Invalid username or password."));

        let empty = ApiError::Status { status: 500, body: "  ".to_string() };
        assert_eq!(empty.server_message(), None);

        let offline = ApiError::Network("Failed to fetch".to_string());
        assert_eq!(offline.server_message(), None);
    }

    #[test]
    fn test_connection_reason() {
        assert_eq!(ApiError::Network("Failed to fetch".to_string()).connection_reason(), "Server not reachable");
        assert_eq!(
            ApiError::Status { status: 503, body: String::new() }.connection_reason(),
            "Server error"
        );
        assert_eq!(ApiError::Decode("expected a list".to_string()).connection_reason(), "Unexpected response");
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status { status: 404, body: "not found".to_string() };
        assert_eq!(err.to_string(), "server returned 404: not found");
    }
}
