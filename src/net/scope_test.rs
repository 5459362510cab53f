use super::*;

#[test]
fn admin_prefixes_classify_as_admin() {
    assert_eq!(RequestScope::classify("/api/admin"), RequestScope::Admin);
    assert_eq!(RequestScope::classify("/api/admin/stats"), RequestScope::Admin);
    assert_eq!(RequestScope::classify("/api/auth/admin/login"), RequestScope::Admin);
    assert_eq!(RequestScope::classify("/api/auth/admin/verify"), RequestScope::Admin);
}

#[test]
fn citizen_paths_classify_as_user() {
    assert_eq!(RequestScope::classify("/api/auth/login"), RequestScope::User);
    assert_eq!(RequestScope::classify("/api/auth/verify"), RequestScope::User);
    assert_eq!(RequestScope::classify("/api/tenders"), RequestScope::User);
    assert_eq!(RequestScope::classify("/api/issues/report"), RequestScope::User);
    assert_eq!(RequestScope::classify(""), RequestScope::User);
}

#[test]
fn classify_respects_segment_boundaries() {
    assert_eq!(RequestScope::classify("/api/administer"), RequestScope::User);
    assert_eq!(RequestScope::classify("/api/auth/administrators"), RequestScope::User);
    assert_eq!(RequestScope::classify("/public/api/admin"), RequestScope::User);
}

#[test]
fn classify_strips_origin_query_and_fragment() {
    assert_eq!(
        RequestScope::classify("http://localhost:6001/api/auth/admin/verify?x=1"),
        RequestScope::Admin
    );
    assert_eq!(RequestScope::classify("/api/admin#top"), RequestScope::Admin);
    assert_eq!(
        RequestScope::classify("https://api.example.org/api/tenders?q=/api/admin"),
        RequestScope::User
    );
    assert_eq!(RequestScope::classify("https://api.example.org"), RequestScope::User);
}

#[test]
fn scope_maps_to_matching_credential() {
    assert_eq!(RequestScope::User.credential(), CredentialKind::User);
    assert_eq!(CredentialKind::from(RequestScope::Admin), CredentialKind::Admin);
}
