//! In-memory session store.
//!
//! ARCHITECTURE
//! ============
//! The access token and doctor id are held as one `Credentials` value behind
//! an `Option`, so the pair is either fully present or fully absent. The only
//! mutation entry points are `establish` (login) and `clear` (logout), each a
//! single assignment.

use std::fmt;

use crate::routing::ViewState;

/// Credentials returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    doctor_id: String,
}

impl Credentials {
    /// Build credentials; `None` if either half is blank.
    #[must_use]
    pub fn new(access_token: impl Into<String>, doctor_id: impl Into<String>) -> Option<Self> {
        let access_token = access_token.into();
        let doctor_id = doctor_id.into();
        if access_token.trim().is_empty() || doctor_id.trim().is_empty() {
            return None;
        }
        Some(Self { access_token, doctor_id })
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }
}

// Keep the bearer token out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("doctor_id", &self.doctor_id)
            .finish()
    }
}

/// Client-side session. Starts empty.
#[derive(Debug, Clone, Default)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was held with fresh credentials.
    pub fn establish(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Drop the credentials, returning what was held.
    pub fn clear(&mut self) -> Option<Credentials> {
        self.credentials.take()
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::access_token)
    }

    #[must_use]
    pub fn doctor_id(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::doctor_id)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        if self.is_authenticated() { ViewState::Authenticated } else { ViewState::LoggedOut }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
