use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// User-facing domain failures. Anything infrastructural travels inside
/// `Internal` and surfaces as a 500.
#[derive(Debug, Error)]
pub enum DomainError {
    // One variant for both unknown-username and wrong-password so the two
    // are indistinguishable to the caller.
    #[error("Username or password is incorrect.")]
    InvalidCredentials,

    #[error("Username [{0}] already exists.")]
    UsernameTaken(String),

    #[error("User with id [{0}] does not exist.")]
    UserNotFound(Uuid),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn status(&self) -> StatusCode {
        match self {
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::UsernameTaken(_) => StatusCode::CONFLICT,
            DomainError::UserNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for (StatusCode, String) {
    fn from(e: DomainError) -> Self {
        if let DomainError::Internal(inner) = &e {
            error!(error = %inner, "request failed");
        }
        (e.status(), e.to_string())
    }
}

/// Map a raw repository failure to a 500 rejection.
pub fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_text_is_stable() {
        assert_eq!(
            DomainError::InvalidCredentials.to_string(),
            "Username or password is incorrect."
        );
    }

    #[test]
    fn username_taken_includes_the_username() {
        let e = DomainError::UsernameTaken("alice".into());
        assert_eq!(e.to_string(), "Username [alice] already exists.");
    }

    #[test]
    fn user_not_found_includes_the_id() {
        let id = Uuid::new_v4();
        let e = DomainError::UserNotFound(id);
        assert_eq!(e.to_string(), format!("User with id [{id}] does not exist."));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            DomainError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DomainError::UsernameTaken("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            DomainError::UserNotFound(Uuid::new_v4()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DomainError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejection_carries_status_and_message() {
        let (status, body): (StatusCode, String) =
            DomainError::UsernameTaken("alice".into()).into();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, "Username [alice] already exists.");
    }
}
