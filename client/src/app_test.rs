use super::*;

#[test]
fn resolve_known_paths() {
    assert_eq!(Route::resolve("/login"), Route::Login);
    assert_eq!(Route::resolve("/login/"), Route::Login);
    assert_eq!(Route::resolve("/login?next=/"), Route::Login);
    assert_eq!(Route::resolve("/"), Route::Home);
}

#[test]
fn resolve_unknown_path_falls_back_to_home() {
    assert_eq!(Route::resolve("/settings/profile"), Route::Home);
    assert_eq!(Route::resolve(""), Route::Home);
}

#[test]
fn route_paths_round_trip() {
    for route in [Route::Login, Route::Home] {
        assert_eq!(Route::resolve(route.path()), route);
    }
}

#[test]
fn home_guard_redirects_when_logged_out() {
    let session = SessionContext::in_memory();
    assert_eq!(Route::Home.guard(&session), Some(Route::Login));
    assert_eq!(Route::Login.guard(&session), None);
}

#[test]
fn login_guard_redirects_when_logged_in() {
    let session = SessionContext::in_memory();
    session.set_token("tok", 1).unwrap();
    assert_eq!(Route::Login.guard(&session), Some(Route::Home));
    assert_eq!(Route::Home.guard(&session), None);
}

#[test]
fn enter_applies_guard() {
    let session = SessionContext::in_memory();
    assert_eq!(enter("/anything", &session), Route::Login);

    session.set_token("tok", 1).unwrap();
    assert_eq!(enter("/login", &session), Route::Home);
}
