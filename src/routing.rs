//! Session gate: maps (view state, action) to what the client may do.
//!
//! DESIGN
//! ======
//! Pure function, no I/O. `PortalClient` consults it before every operation,
//! so a gated action without a session never reaches the backend.

use std::fmt;

/// Whether the client currently holds a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    LoggedOut,
    Authenticated,
}

/// A user-triggered portal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    UploadPrescription,
    ViewReports,
    Dashboard,
    RiskProfile,
    Logout,
}

impl Action {
    /// Actions that need a session before they may be dispatched.
    #[must_use]
    pub fn is_gated(self) -> bool {
        matches!(self, Self::UploadPrescription | Self::ViewReports | Self::Dashboard | Self::RiskProfile)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Login => "login",
            Self::UploadPrescription => "prescription upload",
            Self::ViewReports => "reports",
            Self::Dashboard => "dashboard",
            Self::RiskProfile => "risk profile",
            Self::Logout => "logout",
        };
        f.write_str(label)
    }
}

/// Outcome of the gate for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Send the request to the backend.
    Dispatch,
    /// Short-circuit: the action needs a session.
    LoginRequired,
    /// Handle locally with no request (logout while logged out).
    LocalOnly,
}

/// Decide how `action` is handled in `state`.
#[must_use]
pub fn route(state: ViewState, action: Action) -> Route {
    match (state, action) {
        (_, Action::Login) | (ViewState::Authenticated, _) => Route::Dispatch,
        (ViewState::LoggedOut, action) if action.is_gated() => Route::LoginRequired,
        (ViewState::LoggedOut, _) => Route::LocalOnly,
    }
}

#[cfg(test)]
#[path = "routing_test.rs"]
mod tests;
