//! 128-bit identities for catalog entries.

use std::fmt;

/// Identity of a footprint, light source or sight type.
///
/// Catalog entries compare by `Guid`, never by structural content: two
/// footprints with identical offsets are still distinct entities when
/// separately created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guid(u128);

impl Guid {
    /// Build a guid from a raw 128-bit value.
    #[inline]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// The raw 128-bit value.
    #[inline]
    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Mint a fresh random guid.
    #[cfg(feature = "rand")]
    pub fn random(rng: &mut impl rand::Rng) -> Self {
        use rand::RngExt;
        Self(rng.random())
    }

    /// Parse a 32-digit hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 32 {
            return None;
        }
        u128::from_str_radix(s, 16).ok().map(Self)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let g = Guid::from_raw(0x00ff_1234_5678_9abc_def0_1122_3344_5566);
        let s = g.to_string();
        assert_eq!(s.len(), 32);
        assert_eq!(Guid::from_hex(&s), Some(g));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert_eq!(Guid::from_hex("abc"), None);
        assert_eq!(Guid::from_hex(&"g".repeat(32)), None);
    }
}
