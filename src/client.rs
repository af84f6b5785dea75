//! Session-gated portal client.
//!
//! ARCHITECTURE
//! ============
//! `PortalClient` owns the `Session` and a `PortalBackend`. Each operation:
//! 1. asks `routing::route` whether the action may run in the current state,
//! 2. validates local input,
//! 3. issues exactly one backend call,
//! 4. mutates the session only on login success or logout.
//!
//! Steps 1 and 2 never touch the network. Operations take `&mut self`, so a
//! client can have at most one call in flight.

use tracing::{info, warn};

use crate::backend::PortalBackend;
use crate::dashboard::Dashboard;
use crate::error::PortalError;
use crate::report::decode_reports;
use crate::routing::{Action, Route, ViewState, route};
use crate::session::{Credentials, Session};
use crate::types::{
    ACCEPTED_EXTENSIONS, AnalysisResult, LoginRequest, PrescriptionRecord, PrescriptionUpload, ReportEntry,
    RiskProfile,
};

pub struct PortalClient<B> {
    backend: B,
    session: Session,
    last_analysis: Option<AnalysisResult>,
}

impl<B: PortalBackend> PortalClient<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend, session: Session::new(), last_analysis: None }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.session.view_state()
    }

    #[must_use]
    pub fn doctor_id(&self) -> Option<&str> {
        self.session.doctor_id()
    }

    /// Most recent successful analysis; failed uploads leave it unchanged.
    #[must_use]
    pub fn last_analysis(&self) -> Option<&AnalysisResult> {
        self.last_analysis.as_ref()
    }

    /// Bearer token for a gated action, or `LoginRequired`.
    fn gate(&self, action: Action) -> Result<&str, PortalError> {
        match (route(self.view_state(), action), self.session.credentials()) {
            (Route::Dispatch, Some(credentials)) => Ok(credentials.access_token()),
            _ => {
                warn!(%action, "action rejected: not logged in");
                Err(PortalError::LoginRequired { action })
            }
        }
    }

    /// Authenticate and replace the session with fresh credentials.
    ///
    /// # Errors
    ///
    /// `Validation` for empty input, `Authentication` when the backend
    /// rejects the credentials, `InvalidResponse` when the success body lacks
    /// a token or doctor id. The existing session is untouched on any error.
    ///
    /// Credentials are sent as typed. When a session already exists, its
    /// token is logged out best-effort once the new login succeeds.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Credentials, PortalError> {
        if username.is_empty() || password.is_empty() {
            return Err(PortalError::Validation("username and password are required".to_owned()));
        }

        let response = match self.backend.login(&LoginRequest { username, password }).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%username, error = %e, "login failed");
                return Err(e);
            }
        };
        let credentials = Credentials::new(response.access_token, response.doctor_id.into_string())
            .ok_or_else(|| PortalError::InvalidResponse("login response missing access_token or doctor_id".to_owned()))?;

        if let Some(previous) = self.session.access_token() {
            if let Err(e) = self.backend.logout(previous).await {
                warn!(error = %e, "backend logout of replaced session failed");
            }
        }

        info!(%username, doctor_id = credentials.doctor_id(), "logged in");
        self.session.establish(credentials.clone());
        self.last_analysis = None;
        Ok(credentials)
    }

    /// Upload a prescription for analysis.
    ///
    /// # Errors
    ///
    /// `LoginRequired` without a session; `Validation` for an empty file,
    /// blank patient id, or unsupported file type; `Backend`/`Network` from
    /// the call itself. On error the last analysis result is kept.
    pub async fn upload_prescription(&mut self, mut upload: PrescriptionUpload) -> Result<&AnalysisResult, PortalError> {
        let token = self.gate(Action::UploadPrescription)?;

        if upload.bytes.is_empty() {
            return Err(PortalError::Validation("prescription file is empty".to_owned()));
        }
        upload.patient_id = required_patient_id(&upload.patient_id)?.to_owned();
        match upload.extension() {
            Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(PortalError::Validation(format!(
                    "unsupported file type '{}' (expected one of: {})",
                    upload.file_name,
                    ACCEPTED_EXTENSIONS.join(", ")
                )));
            }
        }

        let response = self.backend.upload_prescription(token, &upload).await;
        let result = match response {
            Ok(response) => AnalysisResult::from(response),
            Err(e) => {
                warn!(patient_id = %upload.patient_id, error = %e, "prescription analysis failed");
                return Err(e);
            }
        };

        info!(patient_id = %upload.patient_id, file = %upload.file_name, "prescription analyzed");
        Ok(self.last_analysis.insert(result))
    }

    /// Fetch and decode every stored report for a patient.
    ///
    /// # Errors
    ///
    /// `LoginRequired`, `Validation` for a blank patient id, or the backend
    /// call's error. Individual undecodable records are returned as
    /// `ReportEntry::Malformed`, not as an error.
    pub async fn get_reports(&mut self, patient_id: &str) -> Result<Vec<ReportEntry>, PortalError> {
        let token = self.gate(Action::ViewReports)?;
        let patient_id = required_patient_id(patient_id)?;

        let response = self.backend.get_prescriptions(token, patient_id).await?;
        let entries = decode_reports(patient_id, response.result);
        info!(%patient_id, count = entries.len(), "reports fetched");
        Ok(entries)
    }

    /// Fetch the doctor's uploads and derive dashboard metrics.
    ///
    /// # Errors
    ///
    /// `LoginRequired`, or the backend call's error.
    pub async fn get_dashboard(&mut self) -> Result<Dashboard, PortalError> {
        let token = self.gate(Action::Dashboard)?;

        let response = self.backend.dashboard(token).await?;
        let uploads: Vec<PrescriptionRecord> = response.uploads.into_iter().map(PrescriptionRecord::from).collect();
        Ok(Dashboard::new(uploads, self.session.is_authenticated()))
    }

    /// Ask the backend for a patient's risk profile.
    ///
    /// # Errors
    ///
    /// `LoginRequired`, `Validation` for a blank patient id, or the backend
    /// call's error.
    pub async fn get_risk_profile(&mut self, patient_id: &str) -> Result<RiskProfile, PortalError> {
        let token = self.gate(Action::RiskProfile)?;
        let patient_id = required_patient_id(patient_id)?;

        let response = self.backend.risk_profile(token, patient_id).await?;
        Ok(RiskProfile(response.risk_profile))
    }

    /// End the session. The backend is notified best-effort; the local
    /// session is cleared regardless. Returns `false` if there was no
    /// session (and nothing was sent).
    pub async fn logout(&mut self) -> bool {
        if route(self.view_state(), Action::Logout) != Route::Dispatch {
            info!("logout requested without a session");
            return false;
        }

        if let Some(token) = self.session.access_token() {
            if let Err(e) = self.backend.logout(token).await {
                warn!(error = %e, "backend logout failed; clearing local session anyway");
            }
        }
        if let Some(previous) = self.session.clear() {
            info!(doctor_id = previous.doctor_id(), "logged out");
        }
        self.last_analysis = None;
        true
    }
}

fn required_patient_id(raw: &str) -> Result<&str, PortalError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PortalError::Validation("patient id is required".to_owned()));
    }
    Ok(trimmed)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
