//! Dashboard view model: uploads plus the summary metrics derived from them.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::PrescriptionRecord;

/// Summary figures shown above the upload list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_uploads: usize,
    pub distinct_patients: usize,
    pub active_sessions: usize,
}

impl DashboardMetrics {
    #[must_use]
    pub fn compute(uploads: &[PrescriptionRecord], authenticated: bool) -> Self {
        let patients: HashSet<&str> = uploads.iter().map(|u| u.patient_id.as_str()).collect();
        Self {
            total_uploads: uploads.len(),
            distinct_patients: patients.len(),
            active_sessions: usize::from(authenticated),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    pub uploads: Vec<PrescriptionRecord>,
}

impl Dashboard {
    #[must_use]
    pub fn new(uploads: Vec<PrescriptionRecord>, authenticated: bool) -> Self {
        let metrics = DashboardMetrics::compute(&uploads, authenticated);
        Self { metrics, uploads }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
