//! Typed, session-gated client for the doctor portal backend.
//!
//! ARCHITECTURE
//! ============
//! `PortalClient` holds the in-memory session and routes each action through
//! the gate in `routing` before calling the backend via `PortalBackend`.
//! `HttpBackend` is the `reqwest` implementation; the CLI in `main.rs` is one
//! front end over it.

pub mod backend;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod report;
pub mod routing;
pub mod session;
pub mod types;

pub use backend::{HttpBackend, PortalBackend};
pub use client::PortalClient;
pub use config::PortalConfig;
pub use dashboard::{Dashboard, DashboardMetrics};
pub use error::PortalError;
pub use routing::{Action, Route, ViewState};
pub use session::{Credentials, Session};
pub use types::{AnalysisResult, PrescriptionRecord, PrescriptionUpload, ReportEntry, RiskProfile};
