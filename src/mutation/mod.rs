//! Add/remove commands.
//!
//! Mutations are fire-and-poll: a request is sent and its response only
//! decides whether to show an error. The target list itself changes when the
//! next snapshot arrives; nothing here creates or deletes local records.

mod error;

pub use error::ValidationError;

use crate::api::ApiError;

/// Generic message when an add fails without a server explanation.
pub const ADD_FAILED: &str = "Failed to add website";
/// Message for any failed removal.
pub const REMOVE_FAILED: &str = "Failed to remove website";

/// Check user input for an Add command.
///
/// Returns the trimmed URL when it is an absolute `http`/`https` URL with a host.
///
/// # Examples
///
/// ```
/// use sitewatch::mutation::{validate_target_url, ValidationError};
///
/// assert_eq!(
///     validate_target_url("  https://example.com ").unwrap(),
///     "https://example.com"
/// );
/// assert_eq!(validate_target_url("   "), Err(ValidationError::Empty));
/// assert!(validate_target_url("not a url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}

/// Which mutation a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Remove,
}

/// Completion of an in-flight mutation request.
///
/// Carries the url by value so a late response never depends on what the
/// view currently shows.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub url: String,
    pub result: Result<(), ApiError>,
}

impl MutationOutcome {
    /// User-facing failure message, or `None` on success.
    ///
    /// Adds show the server's `detail` verbatim when present; removals always
    /// use the generic message.
    pub fn failure_message(&self) -> Option<String> {
        let err = self.result.as_ref().err()?;
        Some(match self.kind {
            MutationKind::Add => err.user_message(ADD_FAILED),
            MutationKind::Remove => REMOVE_FAILED.to_string(),
        })
    }
}

/// Contents of the add-target input control.
#[derive(Debug, Default)]
pub struct AddInput {
    text: String,
}

impl AddInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Clear the control after a successful add, unless the user has since
    /// typed something else.
    pub(crate) fn clear_if(&mut self, url: &str) -> bool {
        if self.text.trim() == url {
            self.text.clear();
            true
        } else {
            false
        }
    }
}

/// Result of asking to remove a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalRequest {
    /// Confirmation must be asked for this url
    Prompt(String),
    /// Same url already awaiting confirmation; nothing to do
    AlreadyPending,
}

/// Destructive-action guard: a removal is only sent after explicit confirmation.
#[derive(Debug, Default)]
pub struct RemovalGuard {
    pending: Option<String>,
}

impl RemovalGuard {
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Ask to remove `url`. Repeated requests before confirmation are no-ops.
    pub fn request(&mut self, url: &str) -> RemovalRequest {
        if self.pending.as_deref() == Some(url) {
            return RemovalRequest::AlreadyPending;
        }
        self.pending = Some(url.to_string());
        RemovalRequest::Prompt(url.to_string())
    }

    /// Answer the pending confirmation. Returns the url to delete only when
    /// the user confirmed.
    pub fn resolve(&mut self, confirmed: bool) -> Option<String> {
        let url = self.pending.take()?;
        confirmed.then_some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_http_and_https() {
        assert!(validate_target_url("http://example.com").is_ok());
        assert!(validate_target_url("https://example.com/status?x=1").is_ok());
        assert!(validate_target_url("https://localhost:8443").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_whitespace() {
        assert_eq!(validate_target_url(""), Err(ValidationError::Empty));
        assert_eq!(validate_target_url(" \t "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_validate_rejects_relative_and_garbage() {
        assert!(matches!(
            validate_target_url("not a url"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            validate_target_url("example.com"),
            Err(ValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        assert_eq!(
            validate_target_url("ftp://example.com"),
            Err(ValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            validate_target_url("mailto:ops@example.com"),
            Err(ValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_add_failure_uses_server_detail() {
        let outcome = MutationOutcome {
            kind: MutationKind::Add,
            url: "https://a.test".to_string(),
            result: Err(ApiError::Rejected {
                status: 400,
                detail: Some("Website already exists".to_string()),
            }),
        };
        assert_eq!(
            outcome.failure_message().as_deref(),
            Some("Website already exists")
        );
    }

    #[test]
    fn test_add_failure_without_detail_is_generic() {
        let outcome = MutationOutcome {
            kind: MutationKind::Add,
            url: "https://a.test".to_string(),
            result: Err(ApiError::Network("refused".to_string())),
        };
        assert_eq!(outcome.failure_message().as_deref(), Some(ADD_FAILED));
    }

    #[test]
    fn test_remove_failure_is_always_generic() {
        let outcome = MutationOutcome {
            kind: MutationKind::Remove,
            url: "https://a.test".to_string(),
            result: Err(ApiError::Rejected {
                status: 404,
                detail: Some("Website not found".to_string()),
            }),
        };
        assert_eq!(outcome.failure_message().as_deref(), Some(REMOVE_FAILED));
    }

    #[test]
    fn test_success_has_no_message() {
        let outcome = MutationOutcome {
            kind: MutationKind::Add,
            url: "https://a.test".to_string(),
            result: Ok(()),
        };
        assert!(outcome.failure_message().is_none());
    }

    #[test]
    fn test_add_input_clears_only_matching_text() {
        let mut input = AddInput::default();
        input.set("https://a.test");
        assert!(!input.clear_if("https://b.test"));
        assert_eq!(input.text(), "https://a.test");
        assert!(input.clear_if("https://a.test"));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_removal_guard_repeated_request_is_noop() {
        let mut guard = RemovalGuard::default();
        assert_eq!(
            guard.request("https://a.test"),
            RemovalRequest::Prompt("https://a.test".to_string())
        );
        assert_eq!(guard.request("https://a.test"), RemovalRequest::AlreadyPending);
        assert_eq!(guard.pending(), Some("https://a.test"));
    }

    #[test]
    fn test_removal_guard_decline_returns_nothing() {
        let mut guard = RemovalGuard::default();
        guard.request("https://a.test");
        assert_eq!(guard.resolve(false), None);
        assert_eq!(guard.pending(), None);
    }

    #[test]
    fn test_removal_guard_confirm_returns_url() {
        let mut guard = RemovalGuard::default();
        guard.request("https://a.test");
        assert_eq!(guard.resolve(true).as_deref(), Some("https://a.test"));
        // Nothing left to confirm
        assert_eq!(guard.resolve(true), None);
    }

    #[test]
    fn test_removal_guard_switches_target() {
        let mut guard = RemovalGuard::default();
        guard.request("https://a.test");
        assert_eq!(
            guard.request("https://b.test"),
            RemovalRequest::Prompt("https://b.test".to_string())
        );
        assert_eq!(guard.resolve(true).as_deref(), Some("https://b.test"));
    }
}
