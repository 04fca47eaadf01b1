//! Authentication session state.
//!
//! A session is either anonymous or holds the authenticated user record plus
//! the bearer credential used for backend calls. The epoch counter lets the
//! passive startup validation detect that a logout happened while its
//! profile request was in flight, so a stale response cannot resurrect the
//! session.

use secrecy::{ExposeSecret, SecretString};

use crate::api::types::User;

/// The authenticated-user record plus bearer credential, or anonymous.
#[derive(Default)]
pub struct Session {
    user: Option<User>,
    token: Option<SecretString>,
    epoch: u64,
}

impl Session {
    /// Create an anonymous session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The authenticated user record, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The bearer credential, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Generation counter, bumped on every [`Self::clear`].
    ///
    /// Snapshot this before an async validation call and compare after: a
    /// mismatch means the session was explicitly cleared in the meantime and
    /// the response must be discarded.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Populate the session after a successful login, registration, or
    /// startup validation.
    pub fn authenticate(&mut self, user: User, token: SecretString) {
        self.user = Some(user);
        self.token = Some(token);
    }

    /// Replace the user record, keeping the credential (profile update).
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Return to the anonymous state, invalidating in-flight validations.
    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.epoch += 1;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("epoch", &self.epoch)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_user() -> User {
        serde_json::from_str(
            r#"{
                "id": "u-1",
                "email": "user@example.com",
                "name": "Test User",
                "is_admin": false,
                "created_at": "2025-08-25T10:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_starts_anonymous() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_authenticate_then_clear() {
        let mut session = Session::anonymous();
        session.authenticate(test_user(), SecretString::from("tok"));
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_clear_bumps_epoch() {
        let mut session = Session::anonymous();
        let before = session.epoch();
        session.clear();
        assert_eq!(session.epoch(), before + 1);
    }

    #[test]
    fn test_authenticate_does_not_bump_epoch() {
        let mut session = Session::anonymous();
        let before = session.epoch();
        session.authenticate(test_user(), SecretString::from("tok"));
        assert_eq!(session.epoch(), before);
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut session = Session::anonymous();
        session.authenticate(test_user(), SecretString::from("super-secret"));

        let debug = format!("{session:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
