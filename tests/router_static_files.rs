use rule_router::static_routes::{register_files, register_spa_root};
use rule_router::{HttpMethod, RegistryError, Router, RouterError};

#[test]
fn router_when_files_registered_then_each_is_a_public_get_route() {
    let router = Router::new(None);
    let index = register_files(
        &router,
        "/static",
        ["index.html", "css/site.css", "js/app.js"],
        |file| file.to_string(),
    )
    .expect("files should register");

    assert_eq!(index, 0);
    assert_eq!(router.tree_count(), 1);
    assert_eq!(router.routes().len(), 3);

    let found = router
        .find(HttpMethod::Get, "/static/css/site.css")
        .expect("file should be served");
    assert_eq!(found.handler.as_str(), "css/site.css");
    assert!(!found.options.requires_auth);
    assert!(found.params.is_empty());

    assert!(router.find(HttpMethod::Post, "/static/index.html").is_none());
    assert!(router.find(HttpMethod::Get, "/static/missing.txt").is_none());
}

#[test]
fn router_when_same_file_listed_twice_then_registration_fails() {
    let router = Router::new(None);
    let err = register_files(&router, "/", ["a.txt", "a.txt"], |file| file.to_string());
    assert!(matches!(
        err,
        Err(RouterError::Rule(rule_router::RuleError::DuplicateMethod { .. }))
    ));
    assert_eq!(router.tree_count(), 0);
}

#[test]
fn router_when_spa_root_registered_then_client_routes_fall_back_to_it() {
    let router = Router::new(None);
    router.get("/app/api/status", "status").expect("api should register");
    register_spa_root(&router, "/app", "index").expect("spa root should register");

    assert_eq!(
        *router.find(HttpMethod::Get, "/app/api/status").unwrap().handler,
        "status"
    );
    let found = router
        .find(HttpMethod::Get, "/app/settings/profile")
        .expect("client route should fall back");
    assert_eq!(*found.handler, "index");
    assert!(!found.options.requires_auth);
    assert_eq!(
        found.params.get("**").map(String::as_str),
        Some("settings/profile")
    );

    let entry = router
        .find(HttpMethod::Get, "/app")
        .expect("spa root itself should be served");
    assert_eq!(*entry.handler, "index");
    assert!(!entry.options.requires_auth);
    assert!(entry.params.is_empty());
    assert_eq!(router.routes().len(), 3);
}

#[test]
fn router_when_spa_root_conflicts_with_wildcard_then_registration_fails() {
    let router = Router::new(None);
    router.get("/app/*", "one").expect("wildcard should register");
    assert!(matches!(
        register_spa_root(&router, "/app", "index"),
        Err(RouterError::Registry(RegistryError::DuplicatedAsterisk { .. }))
    ));
}
