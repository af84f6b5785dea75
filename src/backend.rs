//! Portal backend: the HTTP seam.
//!
//! DESIGN
//! ======
//! `PortalBackend` has one method per endpoint. `HttpBackend` implements it
//! with `reqwest`; tests substitute a recording mock so the client's gating
//! and validation can be checked without a server.
//!
//! Every method except `login` takes the bearer token explicitly. Login maps
//! a non-success status to `Authentication`; the others map it to `Backend`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::types::{
    DashboardResponse, LoginRequest, LoginResponse, PrescriptionUpload, ReportsResponse, RiskProfileResponse,
    UploadResponse,
};

#[async_trait::async_trait]
pub trait PortalBackend: Send + Sync {
    /// `POST /login`
    async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, PortalError>;

    /// `POST /upload_prescription`
    async fn upload_prescription(&self, token: &str, upload: &PrescriptionUpload)
    -> Result<UploadResponse, PortalError>;

    /// `GET /get_prescriptions/{patient_id}`
    async fn get_prescriptions(&self, token: &str, patient_id: &str) -> Result<ReportsResponse, PortalError>;

    /// `GET /dashboard`
    async fn dashboard(&self, token: &str) -> Result<DashboardResponse, PortalError>;

    /// `GET /generate_patient_risk_profile/{patient_id}`
    async fn risk_profile(&self, token: &str, patient_id: &str) -> Result<RiskProfileResponse, PortalError>;

    /// `POST /logout`
    async fn logout(&self, token: &str) -> Result<(), PortalError>;
}

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpBackend {
    /// Build a backend client with the configured origin and timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &PortalConfig) -> Result<Self, PortalError> {
        let base_url = reqwest::Url::parse(&config.backend_url)
            .map_err(|e| PortalError::Config(format!("invalid backend URL '{}': {e}", config.backend_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(PortalError::Config(format!("backend URL cannot be a base: {}", config.backend_url)));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| PortalError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> reqwest::Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, segments: &[&str]) -> Result<T, PortalError> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).bearer_auth(token).send().await?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl PortalBackend for HttpBackend {
    async fn login(&self, request: &LoginRequest<'_>) -> Result<LoginResponse, PortalError> {
        let url = self.endpoint(&["login"]);
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Authentication { status: status.as_u16() });
        }
        read_json(response).await
    }

    async fn upload_prescription(
        &self,
        token: &str,
        upload: &PrescriptionUpload,
    ) -> Result<UploadResponse, PortalError> {
        let url = self.endpoint(&["upload_prescription"]);
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.content_type())?;
        let form = Form::new()
            .part("file", file)
            .text("patient_id", upload.patient_id.clone())
            .text("timestamp", upload.timestamp.clone());
        tracing::debug!(%url, bytes = upload.bytes.len(), "POST");
        let response = self.http.post(url).bearer_auth(token).multipart(form).send().await?;
        read_json(response).await
    }

    async fn get_prescriptions(&self, token: &str, patient_id: &str) -> Result<ReportsResponse, PortalError> {
        self.get_json(token, &["get_prescriptions", patient_id]).await
    }

    async fn dashboard(&self, token: &str) -> Result<DashboardResponse, PortalError> {
        self.get_json(token, &["dashboard"]).await
    }

    async fn risk_profile(&self, token: &str, patient_id: &str) -> Result<RiskProfileResponse, PortalError> {
        self.get_json(token, &["generate_patient_risk_profile", patient_id]).await
    }

    async fn logout(&self, token: &str) -> Result<(), PortalError> {
        let url = self.endpoint(&["logout"]);
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PortalError::Backend { status: status.as_u16(), body });
        }
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PortalError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(PortalError::Backend { status: status.as_u16(), body: text });
    }
    serde_json::from_str(&text).map_err(|e| PortalError::InvalidResponse(format!("{e}: {text}")))
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
