use super::*;

#[test]
fn parse_is_case_insensitive_and_trims() {
    assert_eq!(Role::parse("  Doctor "), Some(Role::Doctor));
    assert_eq!(Role::parse("BUSINESS"), Some(Role::Business));
    assert_eq!(Role::parse("Super Admin"), Some(Role::SuperAdmin));
}

#[test]
fn parse_accepts_super_admin_aliases() {
    assert_eq!(Role::parse("superadmin"), Some(Role::SuperAdmin));
    assert_eq!(Role::parse("super_admin"), Some(Role::SuperAdmin));
}

#[test]
fn parse_rejects_unknown_and_blank() {
    assert_eq!(Role::parse("nurse"), None);
    assert_eq!(Role::parse(""), None);
    assert_eq!("patient".parse::<Role>(), Err(UnknownRole("patient".to_owned())));
}

#[test]
fn canonical_tags_round_trip() {
    for role in Role::ALL {
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
}

#[test]
fn only_business_and_doctor_have_landing_paths() {
    assert_eq!(Role::Business.landing_path(), Some("/app/sales/dashboard"));
    assert_eq!(Role::Doctor.landing_path(), Some("/app/project/dashboard"));
    assert_eq!(Role::SuperAdmin.landing_path(), None);
    assert_eq!(Role::Admin.landing_path(), None);
    assert_eq!(Role::User.landing_path(), None);
}

#[test]
fn unknown_role_is_a_displayable_error() {
    let err = "nurse".parse::<Role>().unwrap_err();
    assert_eq!(err.to_string(), "unknown role: nurse");
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!(boxed.to_string(), "unknown role: nurse");
}
