use docbridge_types::{join_with_slash, resolve_url, slash};
use proptest::prelude::*;

// ── join_with_slash ──────────────────────────────────────────────

#[test]
fn join_adds_missing_slash() {
    assert_eq!(join_with_slash("movia/content", "abc"), "movia/content/abc");
}

#[test]
fn join_keeps_single_slash() {
    assert_eq!(join_with_slash("movia/content/", "abc"), "movia/content/abc");
    assert_eq!(join_with_slash("movia/content", "/abc"), "movia/content/abc");
}

#[test]
fn join_collapses_double_slash() {
    assert_eq!(join_with_slash("movia/content/", "/abc"), "movia/content/abc");
}

#[test]
fn join_with_empty_sides() {
    assert_eq!(join_with_slash("", "/a/b"), "/a/b");
    assert_eq!(join_with_slash("http://host", ""), "http://host");
}

// ── slash ────────────────────────────────────────────────────────

#[test]
fn slash_builds_token_url() {
    let url = slash(
        "http://auth.local/auth/",
        &["realms", "demo", "protocol/openid-connect/token"],
    );
    assert_eq!(
        url,
        "http://auth.local/auth/realms/demo/protocol/openid-connect/token"
    );
}

#[test]
fn slash_without_segments_is_root() {
    let url = slash::<&str>("http://auth.local", &[]);
    assert_eq!(url, "http://auth.local");
}

// ── resolve_url ──────────────────────────────────────────────────

#[test]
fn resolve_keeps_absolute_urls() {
    assert_eq!(
        resolve_url("http://localhost:4200", "https://cdn.example/x").unwrap(),
        "https://cdn.example/x"
    );
    assert_eq!(
        resolve_url("http://localhost:4200", "HTTPS://auth.example/realms").unwrap(),
        "https://auth.example/realms"
    );
}

#[test]
fn resolve_protocol_relative_takes_origin_scheme() {
    assert_eq!(
        resolve_url("http://localhost:4200", "//cdn.example/content").unwrap(),
        "http://cdn.example/content"
    );
}

#[test]
fn resolve_joins_relative_urls() {
    assert_eq!(
        resolve_url("http://localhost:4200", "movia/content").unwrap(),
        "http://localhost:4200/movia/content"
    );
    assert_eq!(
        resolve_url("http://localhost:4200/app/", "assets/keycloak.json").unwrap(),
        "http://localhost:4200/app/assets/keycloak.json"
    );
}

#[test]
fn resolve_root_relative_replaces_path() {
    assert_eq!(
        resolve_url("http://localhost:4200/app/", "/movia/content").unwrap(),
        "http://localhost:4200/movia/content"
    );
}

#[test]
fn resolve_rejects_unparsable_origin() {
    assert!(resolve_url("not a url", "movia/content").is_err());
    assert!(resolve_url("", "movia/content").is_err());
}

proptest! {
    #[test]
    fn join_never_doubles_the_seam(
        start in "[a-z]{1,8}/?",
        end in "/?[a-z]{1,8}",
    ) {
        let joined = join_with_slash(&start, &end);
        prop_assert!(!joined.contains("//"));
        prop_assert_eq!(joined.matches('/').count(), 1);
        prop_assert!(joined.starts_with(start.trim_end_matches('/')));
        prop_assert!(joined.ends_with(end.trim_start_matches('/')));
    }
}
