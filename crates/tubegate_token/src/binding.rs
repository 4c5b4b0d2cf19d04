//! Client binding strategies.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use tubegate_error::ConfigError;

fn default_ipv4_prefix() -> u8 {
    24
}

fn default_ipv6_prefix() -> u8 {
    64
}

/// How strictly a redeeming client must match the client a token was issued to.
///
/// # Configuration
///
/// ```toml
/// [token.binding]
/// mode = "exact"
/// ```
///
/// ```toml
/// [token.binding]
/// mode = "subnet"
/// ipv4_prefix = 24
/// ipv6_prefix = 64
/// ```
///
/// # Example
///
/// ```
/// use tubegate_token::AddressBinding;
///
/// assert!(!AddressBinding::Exact.matches("10.0.0.1", "10.0.0.2"));
///
/// let subnet = AddressBinding::Subnet { ipv4_prefix: 24, ipv6_prefix: 64 };
/// assert!(subnet.matches("10.0.0.1", "10.0.0.2"));
/// assert!(!subnet.matches("10.0.0.1", "10.0.1.1"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum AddressBinding {
    /// Addresses must be byte-for-byte identical strings
    #[default]
    Exact,
    /// Addresses must be IPs of the same family sharing a network prefix
    Subnet {
        /// Prefix length compared for IPv4 clients
        #[serde(default = "default_ipv4_prefix")]
        ipv4_prefix: u8,
        /// Prefix length compared for IPv6 clients
        #[serde(default = "default_ipv6_prefix")]
        ipv6_prefix: u8,
    },
}

impl AddressBinding {
    /// Reject prefix lengths longer than the address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Self::Subnet {
            ipv4_prefix,
            ipv6_prefix,
        } = *self
        {
            if ipv4_prefix > 32 {
                return Err(ConfigError::new(format!(
                    "ipv4_prefix must be at most 32, got {}",
                    ipv4_prefix
                )));
            }
            if ipv6_prefix > 128 {
                return Err(ConfigError::new(format!(
                    "ipv6_prefix must be at most 128, got {}",
                    ipv6_prefix
                )));
            }
        }
        Ok(())
    }

    /// Whether `presented` may redeem a token bound to `bound`.
    ///
    /// Under [`AddressBinding::Subnet`], IPv4-mapped IPv6 addresses are
    /// compared as IPv4, and a pair that does not parse as IP addresses falls
    /// back to exact comparison.
    pub fn matches(&self, bound: &str, presented: &str) -> bool {
        match *self {
            Self::Exact => bound == presented,
            Self::Subnet {
                ipv4_prefix,
                ipv6_prefix,
            } => match (bound.parse::<IpAddr>(), presented.parse::<IpAddr>()) {
                (Ok(a), Ok(b)) => {
                    same_network(a.to_canonical(), b.to_canonical(), ipv4_prefix, ipv6_prefix)
                }
                _ => bound == presented,
            },
        }
    }
}

fn same_network(a: IpAddr, b: IpAddr, ipv4_prefix: u8, ipv6_prefix: u8) -> bool {
    match (a, b) {
        (IpAddr::V4(a), IpAddr::V4(b)) => {
            let mask = match ipv4_prefix {
                0 => 0,
                p => u32::MAX << (32 - u32::from(p.min(32))),
            };
            u32::from(a) & mask == u32::from(b) & mask
        }
        (IpAddr::V6(a), IpAddr::V6(b)) => {
            let mask = match ipv6_prefix {
                0 => 0,
                p => u128::MAX << (128 - u32::from(p.min(128))),
            };
            u128::from(a) & mask == u128::from(b) & mask
        }
        _ => false,
    }
}
