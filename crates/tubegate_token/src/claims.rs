//! The plaintext record sealed inside a token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tubegate_core::{AudioQuality, MediaKind, MediaVariant, ResourceDescriptor, VideoQuality};
use tubegate_error::{TokenError, TokenResult};

/// Variant as it appears on the wire: a bare number for audio, a label for
/// video. The record's `kind` says which one to expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum WireVariant {
    Level(u64),
    Label(String),
}

/// Compact JSON record: `{"id","title","kind","variant","addr","exp"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Claims {
    id: String,
    title: String,
    kind: MediaKind,
    variant: WireVariant,
    addr: String,
    /// Expiry, Unix milliseconds
    exp: i64,
}

impl Claims {
    pub(crate) fn new(descriptor: &ResourceDescriptor, addr: &str, expiry: DateTime<Utc>) -> Self {
        let variant = match descriptor.variant() {
            MediaVariant::Audio(level) => WireVariant::Level(u64::from(level.level())),
            MediaVariant::Video(label) => WireVariant::Label(label.to_string()),
        };
        Self {
            id: descriptor.id().clone(),
            title: descriptor.title().clone(),
            kind: descriptor.kind(),
            variant,
            addr: addr.to_string(),
            exp: expiry.timestamp_millis(),
        }
    }

    pub(crate) fn to_bytes(&self) -> TokenResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| TokenError::malformed(format!("record not serializable: {}", e)))
    }

    /// Parse an authenticated record and re-type its variant.
    pub(crate) fn from_bytes(bytes: &[u8]) -> TokenResult<(Self, MediaVariant)> {
        let claims: Self = serde_json::from_slice(bytes)
            .map_err(|e| TokenError::malformed(format!("record does not parse: {}", e)))?;
        let variant = claims.typed_variant()?;
        Ok((claims, variant))
    }

    fn typed_variant(&self) -> TokenResult<MediaVariant> {
        match (self.kind, &self.variant) {
            (MediaKind::Audio, WireVariant::Level(level)) => AudioQuality::try_from(*level)
                .map(MediaVariant::Audio)
                .map_err(|e| TokenError::malformed(e.to_string())),
            (MediaKind::Video, WireVariant::Label(label)) => label
                .parse::<VideoQuality>()
                .map(MediaVariant::Video)
                .map_err(|_| TokenError::malformed(format!("unknown video quality '{}'", label))),
            (kind, variant) => Err(TokenError::malformed(format!(
                "variant {:?} does not belong to kind {}",
                variant, kind
            ))),
        }
    }

    pub(crate) fn expiry(&self) -> TokenResult<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.exp)
            .ok_or_else(|| TokenError::malformed(format!("expiry {} out of range", self.exp)))
    }

    pub(crate) fn addr(&self) -> &str {
        &self.addr
    }

    pub(crate) fn into_descriptor(self, variant: MediaVariant) -> ResourceDescriptor {
        ResourceDescriptor::new(self.id, self.title, variant)
    }
}
