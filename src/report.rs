//! Report payload decoding.
//!
//! Each stored report arrives as hex-encoded JSON. A record that fails to
//! decode is flagged in place; the remaining records are still returned.

use serde_json::{Map, Value};

use crate::error::PortalError;
use crate::types::{NOT_AVAILABLE, PrescriptionRecord, ReportEntry, ReportItem, ReportPayload, value_text};

/// Decode one hex payload into its report fields.
///
/// # Errors
///
/// Returns `PortalError::Decode` if the hex is invalid, the bytes are not
/// JSON, or the JSON is not an object. Missing or non-string fields are not
/// errors.
pub fn decode_payload(data: &str) -> Result<ReportPayload, PortalError> {
    let bytes = hex::decode(data.trim()).map_err(|e| PortalError::Decode(format!("invalid hex: {e}")))?;
    let document: Value =
        serde_json::from_slice(&bytes).map_err(|e| PortalError::Decode(format!("invalid report json: {e}")))?;
    let Value::Object(fields) = document else {
        return Err(PortalError::Decode("report json is not an object".to_owned()));
    };
    Ok(ReportPayload {
        timestamp: field_text(&fields, "timestamp"),
        cid: field_text(&fields, "cid"),
        ddi_analysis: field_text(&fields, "ddi_analysis"),
    })
}

fn field_text(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).map_or_else(|| NOT_AVAILABLE.to_owned(), value_text)
}

/// Decode every report for `patient_id`, flagging the ones that fail.
#[must_use]
pub fn decode_reports(patient_id: &str, items: Vec<ReportItem>) -> Vec<ReportEntry> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let decoded = item
                .data
                .ok_or_else(|| PortalError::Decode("missing data field".to_owned()))
                .and_then(|data| decode_payload(&data));
            match decoded {
                Ok(payload) => ReportEntry::Record(PrescriptionRecord {
                    patient_id: patient_id.to_owned(),
                    cid: payload.cid,
                    timestamp: payload.timestamp,
                    ddi_analysis: Some(payload.ddi_analysis),
                }),
                Err(e) => {
                    tracing::warn!(%patient_id, index, error = %e, "malformed report record");
                    ReportEntry::Malformed { index, reason: e.to_string() }
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
