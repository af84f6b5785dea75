//! Wire types for the portal backend and the records derived from them.
//!
//! Field names on the wire follow the backend exactly (`Extracted_Text`,
//! `"DDI Analysis"`, `Patient_ID`, ...); the Rust side uses snake case.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when an upload response carries no extracted text.
pub const NO_EXTRACTED_TEXT: &str = "No text extracted";

/// Shown when an upload response carries no DDI analysis.
pub const NO_DDI_ANALYSIS: &str = "No DDI analysis available";

/// Shown for a report field the stored document does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// File extensions the backend accepts for prescription uploads.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

// =============================================================================
// SHARED
// =============================================================================

/// Identifier the backend may send either as a string or as a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// A prescription as the backend stored it. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrescriptionRecord {
    pub patient_id: String,
    /// Content address of the stored file.
    pub cid: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddi_analysis: Option<String>,
}

/// Text for display: strings as-is, anything else as JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub doctor_id: WireId,
}

// =============================================================================
// UPLOAD
// =============================================================================

/// A prescription file plus the metadata sent alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub patient_id: String,
    pub timestamp: String,
}

impl PrescriptionUpload {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        patient_id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self { file_name: file_name.into(), bytes, patient_id: patient_id.into(), timestamp: timestamp.into() }
    }

    /// Lowercased file extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// MIME type for the multipart file part.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "Extracted_Text", default)]
    pub extracted_text: Option<String>,
    #[serde(rename = "DDI Analysis", default)]
    pub ddi_analysis: Option<String>,
}

/// Outcome of a prescription analysis, with placeholders for absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub extracted_text: String,
    pub ddi_analysis: String,
}

impl From<UploadResponse> for AnalysisResult {
    fn from(resp: UploadResponse) -> Self {
        Self {
            extracted_text: resp.extracted_text.unwrap_or_else(|| NO_EXTRACTED_TEXT.to_owned()),
            ddi_analysis: resp.ddi_analysis.unwrap_or_else(|| NO_DDI_ANALYSIS.to_owned()),
        }
    }
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ReportsResponse {
    #[serde(default)]
    pub result: Vec<ReportItem>,
}

/// One stored report; `data` is hex-encoded JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportItem {
    #[serde(default)]
    pub data: Option<String>,
}

/// The fields read from a report's JSON document. Absent fields hold
/// `NOT_AVAILABLE`; non-string values hold their JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPayload {
    pub timestamp: String,
    pub cid: String,
    pub ddi_analysis: String,
}

/// One element of a reports listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportEntry {
    Record(PrescriptionRecord),
    /// The payload at `index` could not be decoded.
    Malformed { index: usize, reason: String },
}

impl ReportEntry {
    #[must_use]
    pub fn record(&self) -> Option<&PrescriptionRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Malformed { .. } => None,
        }
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub uploads: Vec<DashboardUpload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardUpload {
    #[serde(rename = "Patient_ID")]
    pub patient_id: WireId,
    #[serde(rename = "CID")]
    pub cid: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<DashboardUpload> for PrescriptionRecord {
    fn from(upload: DashboardUpload) -> Self {
        Self {
            patient_id: upload.patient_id.into_string(),
            cid: upload.cid,
            timestamp: upload.timestamp,
            ddi_analysis: None,
        }
    }
}

// =============================================================================
// RISK PROFILE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RiskProfileResponse {
    #[serde(default)]
    pub risk_profile: Value,
}

/// Backend-computed risk summary; opaque to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RiskProfile(pub Value);

impl RiskProfile {
    #[must_use]
    pub fn display_text(&self) -> String {
        value_text(&self.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
