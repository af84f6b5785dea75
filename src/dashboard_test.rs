use super::*;

fn upload(patient_id: &str, cid: &str) -> PrescriptionRecord {
    PrescriptionRecord {
        patient_id: patient_id.to_owned(),
        cid: cid.to_owned(),
        timestamp: "2024-01-01 09:00:00".to_owned(),
        ddi_analysis: None,
    }
}

#[test]
fn empty_uploads_yield_zero_metrics() {
    let metrics = DashboardMetrics::compute(&[], true);
    assert_eq!(metrics.total_uploads, 0);
    assert_eq!(metrics.distinct_patients, 0);
}

#[test]
fn distinct_patients_counts_unique_ids() {
    let uploads = vec![upload("P-1", "a"), upload("P-2", "b"), upload("P-1", "c")];
    let metrics = DashboardMetrics::compute(&uploads, true);
    assert_eq!(metrics.total_uploads, 3);
    assert_eq!(metrics.distinct_patients, 2);
}

#[test]
fn patient_ids_are_case_sensitive() {
    let uploads = vec![upload("p-1", "a"), upload("P-1", "b")];
    assert_eq!(DashboardMetrics::compute(&uploads, true).distinct_patients, 2);
}

#[test]
fn active_sessions_follows_authentication() {
    assert_eq!(DashboardMetrics::compute(&[], true).active_sessions, 1);
    assert_eq!(DashboardMetrics::compute(&[], false).active_sessions, 0);
}

#[test]
fn dashboard_new_computes_metrics() {
    let dashboard = Dashboard::new(vec![upload("P-1", "a")], true);
    assert_eq!(dashboard.metrics.total_uploads, 1);
    assert_eq!(dashboard.uploads.len(), 1);
}
