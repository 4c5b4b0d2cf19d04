//! Tamper, expiry and binding failures.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tubegate_core::{AudioQuality, ResourceDescriptor, VideoQuality};
use tubegate_token::{
    AddressBinding, ManualClock, TokenConfig, TokenContext, TokenErrorKind, TokenIssuer,
    TokenVerifier,
};

struct Fixture {
    clock: Arc<ManualClock>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

fn fixture(config: TokenConfig) -> Fixture {
    let start = DateTime::parse_from_rfc3339("2026-01-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let clock = Arc::new(ManualClock::new(start));
    let context = Arc::new(TokenContext::from_config(&config).unwrap());
    Fixture {
        issuer: TokenIssuer::new(context.clone()).with_clock(clock.clone()),
        verifier: TokenVerifier::new(context).with_clock(clock.clone()),
        clock,
    }
}

fn scenario_descriptor() -> ResourceDescriptor {
    ResourceDescriptor::new("abc123", "Test Video", VideoQuality::P720)
}

#[test]
fn scenario_same_client_other_client_and_later() {
    let f = fixture(TokenConfig::new("scenario"));
    let descriptor = scenario_descriptor();
    let token = f.issuer.issue(&descriptor, "1.2.3.4").unwrap();

    let recovered = f.verifier.verify(&token, "1.2.3.4").unwrap();
    assert_eq!(recovered.id(), "abc123");
    assert_eq!(recovered.title(), "Test Video");
    assert_eq!(recovered, descriptor);

    let err = f.verifier.verify(&token, "5.6.7.8").unwrap_err();
    assert_eq!(err.kind(), &TokenErrorKind::AddressMismatch);

    f.clock.advance(TimeDelta::minutes(16));
    let err = f.verifier.verify(&token, "1.2.3.4").unwrap_err();
    assert_eq!(err.kind(), &TokenErrorKind::Expired);
}

#[test]
fn valid_just_before_ttl_expired_at_and_after() {
    let f = fixture(TokenConfig::new("edges"));
    let token = f.issuer.issue(&scenario_descriptor(), "1.2.3.4").unwrap();

    f.clock.advance(TimeDelta::minutes(15) - TimeDelta::milliseconds(1));
    assert!(f.verifier.verify(&token, "1.2.3.4").is_ok());

    f.clock.advance(TimeDelta::milliseconds(1));
    assert_eq!(
        f.verifier.verify(&token, "1.2.3.4").unwrap_err().kind(),
        &TokenErrorKind::Expired
    );

    f.clock.advance(TimeDelta::seconds(1));
    assert_eq!(
        f.verifier.verify(&token, "1.2.3.4").unwrap_err().kind(),
        &TokenErrorKind::Expired
    );
}

#[test]
fn custom_ttl_is_honored() {
    let f = fixture(TokenConfig::new("short").with_ttl(std::time::Duration::from_secs(30)));
    let token = f.issuer.issue(&scenario_descriptor(), "1.2.3.4").unwrap();

    f.clock.advance(TimeDelta::seconds(29));
    assert!(f.verifier.verify(&token, "1.2.3.4").is_ok());
    f.clock.advance(TimeDelta::seconds(1));
    assert!(f.verifier.verify(&token, "1.2.3.4").is_err());
}

#[test]
fn expired_and_replayed_reports_expired() {
    let f = fixture(TokenConfig::new("order"));
    let token = f.issuer.issue(&scenario_descriptor(), "1.2.3.4").unwrap();
    f.clock.advance(TimeDelta::hours(1));
    assert_eq!(
        f.verifier.verify(&token, "5.6.7.8").unwrap_err().kind(),
        &TokenErrorKind::Expired
    );
}

#[test]
fn tampered_expired_token_reports_tamper_not_expiry() {
    let f = fixture(TokenConfig::new("auth-first"));
    let token = f.issuer.issue(&scenario_descriptor(), "1.2.3.4").unwrap();
    f.clock.advance(TimeDelta::hours(1));

    let mut chars: Vec<char> = token.chars().collect();
    let middle = chars.len() / 2;
    chars[middle] = if chars[middle] == 'A' { 'B' } else { 'A' };
    let forged: String = chars.into_iter().collect();

    let err = f.verifier.verify(&forged, "5.6.7.8").unwrap_err();
    assert!(!matches!(
        err.kind(),
        TokenErrorKind::Expired | TokenErrorKind::AddressMismatch
    ));
}

#[test]
fn every_single_character_substitution_is_rejected() {
    let f = fixture(TokenConfig::new("flip"));
    let descriptor = ResourceDescriptor::new("abc", "Song", AudioQuality::new(2).unwrap());
    let token = f.issuer.issue(&descriptor, "1.2.3.4").unwrap();

    for position in 0..token.len() {
        let mut bytes = token.clone().into_bytes();
        bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
        let forged = String::from_utf8(bytes).unwrap();

        let err = f
            .verifier
            .verify(&forged, "1.2.3.4")
            .expect_err("forged token must not verify");
        assert!(
            matches!(
                err.kind(),
                TokenErrorKind::Tampered | TokenErrorKind::Malformed(_)
            ),
            "position {position}: unexpected {err}"
        );
    }
}

#[test]
fn truncated_and_extended_tokens_are_rejected() {
    let f = fixture(TokenConfig::new("length"));
    let token = f.issuer.issue(&scenario_descriptor(), "1.2.3.4").unwrap();

    assert!(f.verifier.verify(&token[..token.len() - 4], "1.2.3.4").is_err());
    assert!(f.verifier.verify(&format!("{token}AAAA"), "1.2.3.4").is_err());
    assert!(matches!(
        f.verifier.verify(&token[..10], "1.2.3.4").unwrap_err().kind(),
        TokenErrorKind::Malformed(_)
    ));
}

#[test]
fn empty_and_garbage_tokens_are_malformed() {
    let f = fixture(TokenConfig::new("garbage"));
    for input in ["", "%%%", "abc def", "===="] {
        let err = f.verifier.verify(input, "1.2.3.4").unwrap_err();
        assert!(
            matches!(err.kind(), TokenErrorKind::Malformed(_)),
            "{input:?}: {err}"
        );
    }
}

#[test]
fn subnet_binding_tolerates_address_changes_within_prefix() {
    let f = fixture(TokenConfig::new("subnet").with_binding(AddressBinding::Subnet {
        ipv4_prefix: 24,
        ipv6_prefix: 64,
    }));
    let token = f.issuer.issue(&scenario_descriptor(), "203.0.113.7").unwrap();

    assert!(f.verifier.verify(&token, "203.0.113.200").is_ok());
    assert_eq!(
        f.verifier.verify(&token, "198.51.100.7").unwrap_err().kind(),
        &TokenErrorKind::AddressMismatch
    );
}

#[test]
fn oversized_ttl_fails_at_startup() {
    let config = TokenConfig::new("s").with_ttl(std::time::Duration::from_secs(1e15 as u64));
    assert!(TokenContext::from_config(&config).is_err());
}

#[test]
fn issuing_at_the_end_of_time_is_an_error() {
    let f = fixture(TokenConfig::new("far-future"));
    f.clock.set(DateTime::<Utc>::MAX_UTC - TimeDelta::seconds(1));
    let err = f.issuer.issue(&scenario_descriptor(), "1.2.3.4").unwrap_err();
    assert!(matches!(err.kind(), TokenErrorKind::Malformed(_)));
}
