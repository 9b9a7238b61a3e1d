const CARGO_TOML: &str = include_str!("../Cargo.toml");

#[test]
fn cargo_toml_has_release_profile() {
    assert!(
        CARGO_TOML.contains("[profile.release]"),
        "Cargo.toml must have a [profile.release] section"
    );
    assert!(CARGO_TOML.contains("lto = true"), "Release profile must enable LTO");
    assert!(
        CARGO_TOML.contains("strip = true"),
        "Release profile must strip symbols"
    );
    assert!(
        CARGO_TOML.contains("codegen-units = 1"),
        "Release profile must use single codegen unit"
    );
}

#[test]
fn http_client_avoids_native_tls() {
    let reqwest = CARGO_TOML
        .lines()
        .find(|line| line.starts_with("reqwest"))
        .expect("reqwest dependency");
    assert!(
        reqwest.contains("default-features = false"),
        "reqwest must not pull in default TLS"
    );
    assert!(reqwest.contains("rustls"), "reqwest must use rustls");
    assert!(reqwest.contains("blocking"), "backend uses the blocking client");
}
