//! Acceptable-status policy for strict-form verb calls.

use http::StatusCode;

/// Which response statuses a strict-form call treats as success.
///
/// # Example
///
/// ```
/// use hermes_client::StatusAccept;
/// use http::StatusCode;
///
/// let default = StatusAccept::default();
/// assert!(default.accepts(StatusCode::NO_CONTENT));
/// assert!(!default.accepts(StatusCode::NOT_FOUND));
///
/// let explicit = StatusAccept::list([200, 404]);
/// assert!(explicit.accepts(StatusCode::NOT_FOUND));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusAccept {
    /// Any 2xx status (the default).
    #[default]
    Success,
    /// Exactly the listed status codes.
    List(Vec<u16>),
}

impl StatusAccept {
    /// Creates an explicit acceptance list.
    #[must_use]
    pub fn list(statuses: impl Into<Vec<u16>>) -> Self {
        Self::List(statuses.into())
    }

    /// Returns `true` if the status is acceptable under this policy.
    #[must_use]
    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            Self::Success => status.is_success(),
            Self::List(statuses) => statuses.contains(&status.as_u16()),
        }
    }
}
