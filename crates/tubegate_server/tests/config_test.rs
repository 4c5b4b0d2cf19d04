//! Configuration loading and precedence.

use std::collections::HashMap;
use std::io::Write;
use tubegate_media::AudioSelection;
use tubegate_server::ServiceConfig;
use tubegate_token::AddressBinding;

fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn bundled_defaults_with_secret_from_env() {
    let config =
        ServiceConfig::load_with_env(None, env(&[("TUBEGATE_TOKEN__SECRET", "s3cret")])).unwrap();

    assert_eq!(config.token.secret, "s3cret");
    assert_eq!(config.token.ttl_secs, 900);
    assert_eq!(config.token.binding, AddressBinding::Exact);
    assert_eq!(config.server.port, 5000);
    assert!(!config.server.trust_proxy);
    assert_eq!(config.rate_limit.requests_per_second, 1);
    assert_eq!(config.rate_limit.burst, 1);
    assert!(config.cors.allowed_origins.is_empty());
    assert_eq!(config.media.audio_selection, AudioSelection::BestOnly);
    assert_eq!(config.media.min_video_height, 240);
    assert_eq!(config.log.level, "info");
}

#[test]
fn missing_secret_is_fatal() {
    let err = ServiceConfig::load_with_env(None, env(&[])).unwrap_err();
    assert!(err.to_string().contains("secret"), "{err}");
}

#[test]
fn explicit_file_then_environment() {
    let file = config_file(
        r#"
        [server]
        port = 8088
        trust_proxy = true

        [token]
        secret = "from-file"
        ttl_secs = 60

        [token.binding]
        mode = "subnet"

        [cors]
        allowed_origins = ["https://app.test"]

        [media]
        audio_selection = "all"
        "#,
    );

    let config = ServiceConfig::load_with_env(
        Some(file.path()),
        env(&[("TUBEGATE_SERVER__PORT", "9090")]),
    )
    .unwrap();

    assert_eq!(config.server.port, 9090);
    assert!(config.server.trust_proxy);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.token.secret, "from-file");
    assert_eq!(config.token.ttl_secs, 60);
    assert_eq!(
        config.token.binding,
        AddressBinding::Subnet {
            ipv4_prefix: 24,
            ipv6_prefix: 64
        }
    );
    assert_eq!(config.cors.allowed_origins, vec!["https://app.test"]);
    assert_eq!(config.media.audio_selection, AudioSelection::All);
}

#[test]
fn origin_list_from_environment() {
    let config = ServiceConfig::load_with_env(
        None,
        env(&[
            ("TUBEGATE_TOKEN__SECRET", "s"),
            ("TUBEGATE_CORS__ALLOWED_ORIGINS", "https://a.test,https://b.test"),
        ]),
    )
    .unwrap();
    assert_eq!(
        config.cors.allowed_origins,
        vec!["https://a.test", "https://b.test"]
    );
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(
        ServiceConfig::load_with_env(Some(&path), env(&[("TUBEGATE_TOKEN__SECRET", "s")])).is_err()
    );
}

#[test]
fn zero_rate_is_rejected() {
    let err = ServiceConfig::load_with_env(
        None,
        env(&[
            ("TUBEGATE_TOKEN__SECRET", "s"),
            ("TUBEGATE_RATE_LIMIT__BURST", "0"),
        ]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("burst"), "{err}");
}

#[test]
fn bad_subnet_prefix_is_rejected() {
    let file = config_file(
        r#"
        [token]
        secret = "s"

        [token.binding]
        mode = "subnet"
        ipv4_prefix = 40
        "#,
    );
    assert!(ServiceConfig::load_with_env(Some(file.path()), env(&[])).is_err());
}
