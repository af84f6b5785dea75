use super::*;
use serde_json::json;

// ===== login =====

#[test]
fn login_response_accepts_string_doctor_id() {
    let resp: LoginResponse = serde_json::from_value(json!({ "access_token": "t", "doctor_id": "D-9" })).unwrap();
    assert_eq!(resp.doctor_id.into_string(), "D-9");
}

#[test]
fn login_response_accepts_numeric_doctor_id() {
    let resp: LoginResponse = serde_json::from_value(json!({ "access_token": "t", "doctor_id": 42 })).unwrap();
    assert_eq!(resp.doctor_id.into_string(), "42");
}

#[test]
fn login_request_serializes_credentials() {
    let body = serde_json::to_value(LoginRequest { username: "dr", password: "pw" }).unwrap();
    assert_eq!(body, json!({ "username": "dr", "password": "pw" }));
}

// ===== upload =====

#[test]
fn analysis_result_keeps_present_fields() {
    let resp: UploadResponse =
        serde_json::from_value(json!({ "Extracted_Text": "aspirin 100mg", "DDI Analysis": "no interactions" }))
            .unwrap();
    let result = AnalysisResult::from(resp);
    assert_eq!(result.extracted_text, "aspirin 100mg");
    assert_eq!(result.ddi_analysis, "no interactions");
}

#[test]
fn analysis_result_substitutes_placeholders() {
    let resp: UploadResponse = serde_json::from_value(json!({})).unwrap();
    let result = AnalysisResult::from(resp);
    assert_eq!(result.extracted_text, NO_EXTRACTED_TEXT);
    assert_eq!(result.ddi_analysis, NO_DDI_ANALYSIS);
}

#[test]
fn analysis_result_treats_null_as_absent() {
    let resp: UploadResponse = serde_json::from_value(json!({ "Extracted_Text": null })).unwrap();
    assert_eq!(AnalysisResult::from(resp).extracted_text, NO_EXTRACTED_TEXT);
}

#[test]
fn upload_extension_is_lowercased() {
    let upload = PrescriptionUpload::new("Scan.JPEG", vec![1], "p1", "");
    assert_eq!(upload.extension().as_deref(), Some("jpeg"));
    assert_eq!(upload.content_type(), "image/jpeg");
}

#[test]
fn upload_content_type_by_extension() {
    assert_eq!(PrescriptionUpload::new("rx.pdf", vec![1], "p", "").content_type(), "application/pdf");
    assert_eq!(PrescriptionUpload::new("rx.png", vec![1], "p", "").content_type(), "image/png");
    assert_eq!(PrescriptionUpload::new("rx", vec![1], "p", "").content_type(), "application/octet-stream");
}

// ===== reports =====

#[test]
fn reports_response_defaults_to_empty() {
    let resp: ReportsResponse = serde_json::from_value(json!({})).unwrap();
    assert!(resp.result.is_empty());
}

#[test]
fn report_entry_serializes_with_status_tag() {
    let entry = ReportEntry::Malformed { index: 2, reason: "invalid hex".into() };
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value, json!({ "status": "malformed", "index": 2, "reason": "invalid hex" }));
    assert!(entry.record().is_none());
}

// ===== dashboard =====

#[test]
fn dashboard_upload_maps_backend_field_names() {
    let resp: DashboardResponse = serde_json::from_value(json!({
        "uploads": [{ "Patient_ID": "P-1", "CID": "bafy", "Timestamp": "2024-03-01 10:00:00" }]
    }))
    .unwrap();
    let record = PrescriptionRecord::from(resp.uploads[0].clone());
    assert_eq!(record.patient_id, "P-1");
    assert_eq!(record.cid, "bafy");
    assert_eq!(record.timestamp, "2024-03-01 10:00:00");
    assert_eq!(record.ddi_analysis, None);
}

#[test]
fn dashboard_response_missing_uploads_is_empty() {
    let resp: DashboardResponse = serde_json::from_value(json!({ "doctor": "x" })).unwrap();
    assert!(resp.uploads.is_empty());
}

// ===== risk profile =====

#[test]
fn risk_profile_string_displays_verbatim() {
    let profile = RiskProfile(json!("High risk: warfarin + aspirin"));
    assert_eq!(profile.display_text(), "High risk: warfarin + aspirin");
}

#[test]
fn risk_profile_structured_displays_as_json() {
    let profile = RiskProfile(json!({ "score": 7 }));
    assert_eq!(profile.display_text(), r#"{"score":7}"#);
    assert!(!profile.is_empty());
}

#[test]
fn risk_profile_missing_is_null() {
    let resp: RiskProfileResponse = serde_json::from_value(json!({})).unwrap();
    assert!(RiskProfile(resp.risk_profile).is_empty());
}
