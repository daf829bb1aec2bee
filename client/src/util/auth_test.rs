use super::*;
use session::{Identity, Role, SessionPhase};

fn settled(access_token: Option<&str>) -> SessionSnapshot {
    SessionSnapshot {
        access_token: access_token.map(str::to_owned),
        refresh_token: None,
        user: access_token.map(|_| Identity { id: "u1".to_owned(), role: Role::Manager, building_id: None }),
        is_loading: false,
        phase: if access_token.is_some() { SessionPhase::Authenticated } else { SessionPhase::Anonymous },
    }
}

#[test]
fn should_redirect_unauth_when_settled_and_token_missing() {
    assert!(should_redirect_unauth(&settled(None)));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&SessionSnapshot::default()));
}

#[test]
fn should_not_redirect_while_refreshing() {
    let mut state = settled(Some("t"));
    state.phase = SessionPhase::Refreshing;
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_token_exists() {
    assert!(!should_redirect_unauth(&settled(Some("t"))));
}
