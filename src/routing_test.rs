use super::*;

const ALL: [Action; 6] = [
    Action::Login,
    Action::UploadPrescription,
    Action::ViewReports,
    Action::Dashboard,
    Action::RiskProfile,
    Action::Logout,
];

#[test]
fn login_always_dispatches() {
    assert_eq!(route(ViewState::LoggedOut, Action::Login), Route::Dispatch);
    assert_eq!(route(ViewState::Authenticated, Action::Login), Route::Dispatch);
}

#[test]
fn gated_actions_require_login_when_logged_out() {
    for action in ALL.into_iter().filter(|a| a.is_gated()) {
        assert_eq!(route(ViewState::LoggedOut, action), Route::LoginRequired, "{action}");
    }
}

#[test]
fn every_action_dispatches_when_authenticated() {
    for action in ALL {
        assert_eq!(route(ViewState::Authenticated, action), Route::Dispatch, "{action}");
    }
}

#[test]
fn logout_while_logged_out_is_local() {
    assert_eq!(route(ViewState::LoggedOut, Action::Logout), Route::LocalOnly);
}

#[test]
fn only_data_actions_are_gated() {
    let gated: Vec<_> = ALL.into_iter().filter(|a| a.is_gated()).collect();
    assert_eq!(
        gated,
        vec![Action::UploadPrescription, Action::ViewReports, Action::Dashboard, Action::RiskProfile]
    );
}
