#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Configuration loading tests

use std::io::Write;
use std::path::Path;

use gatekeeper_server::{AppConfig, LogFormat};
use static_token_authenticator::AuthnMode;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn bundled_example_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/gatekeeper.yaml");

    let cfg = AppConfig::load_file(&path).unwrap();

    assert_eq!(cfg.server.bind_addr.port(), 8087);
    assert_eq!(cfg.gate.deployments.len(), 3);
    assert_eq!(cfg.permissions.len(), 3);
    assert_eq!(
        cfg.static_token.as_ref().map(|s| s.mode),
        Some(AuthnMode::StaticTokens)
    );
}

#[test]
fn file_values_override_defaults() {
    let file = write_config(
        r#"
server:
  bind_addr: "0.0.0.0:9000"
logging:
  format: json
gate:
  deployments:
    - context_path: /app
      require_authentication: true
      bypass_uris: "/app/a,/app/b"
"#,
    );

    let cfg = AppConfig::load_file(file.path()).unwrap();

    assert_eq!(cfg.server.bind_addr.port(), 9000);
    assert_eq!(cfg.logging.format, LogFormat::Json);
    assert_eq!(cfg.logging.level, "info");
    assert_eq!(cfg.gate.skipped_contexts, vec!["carbon", "services"]);
    assert_eq!(cfg.gate.deployments[0].context_path, "/app");
    assert_eq!(cfg.gate.deployments[0].require_authentication, Some(true));
    assert!(cfg.static_token.is_none());
    assert!(cfg.permissions.is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
    let file = write_config(
        r"
gate:
  doAuthentication: true
",
    );

    assert!(AppConfig::load_file(file.path()).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = AppConfig::load_file(&dir.path().join("absent.yaml")).unwrap_err();

    assert!(err.to_string().contains("config file not found"));
}
