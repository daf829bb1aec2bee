use super::*;
use session::{Identity, SessionPhase};

// =============================================================
// current_role
// =============================================================

#[test]
fn current_role_none_while_loading() {
    assert_eq!(current_role(&SessionSnapshot::default()), None);
}

#[test]
fn current_role_reads_decoded_identity() {
    let state = SessionSnapshot {
        access_token: Some("t".to_owned()),
        refresh_token: None,
        user: Some(Identity { id: "u1".to_owned(), role: Role::BuildingAdmin, building_id: Some("b1".to_owned()) }),
        is_loading: false,
        phase: SessionPhase::Authenticated,
    };
    assert_eq!(current_role(&state), Some(Role::BuildingAdmin));
}
