use super::*;
use crate::claims::{Identity, Role};
use crate::manager::SessionPhase;

fn settled(phase: SessionPhase, access_token: Option<&str>) -> SessionSnapshot {
    SessionSnapshot {
        access_token: access_token.map(str::to_owned),
        refresh_token: None,
        user: access_token.map(|_| Identity { id: "u1".into(), role: Role::Resident, building_id: None }),
        is_loading: false,
        phase,
    }
}

#[test]
fn pending_while_loading() {
    assert_eq!(guard(&SessionSnapshot::default()), GuardDecision::Pending);
}

#[test]
fn pending_while_loading_even_with_token() {
    let mut session = settled(SessionPhase::Authenticated, Some("t"));
    session.is_loading = true;
    assert_eq!(guard(&session), GuardDecision::Pending);
}

#[test]
fn pending_while_restored_token_is_undecoded() {
    assert_eq!(guard(&settled(SessionPhase::Restoring, Some("t"))), GuardDecision::Pending);
}

#[test]
fn pending_while_refreshing() {
    assert_eq!(guard(&settled(SessionPhase::Refreshing, Some("t"))), GuardDecision::Pending);
}

#[test]
fn redirects_when_settled_without_token() {
    assert_eq!(guard(&settled(SessionPhase::Anonymous, None)), GuardDecision::Redirect("/login"));
}

#[test]
fn renders_when_authenticated() {
    assert_eq!(guard(&settled(SessionPhase::Authenticated, Some("t"))), GuardDecision::Render);
}
