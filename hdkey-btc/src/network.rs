//! Bitcoin network types and their version-byte tables.

use core::fmt;
use core::str::FromStr;

/// Supported Bitcoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Bitcoin mainnet.
    #[default]
    Mainnet,
    /// Bitcoin testnet.
    Testnet,
}

impl Network {
    /// All supported networks.
    pub const ALL: [Self; 2] = [Self::Mainnet, Self::Testnet];

    /// Version bytes of a serialized extended private key (`xprv` / `tprv`).
    #[inline]
    #[must_use]
    pub const fn xprv_version(self) -> [u8; 4] {
        match self {
            Self::Mainnet => [0x04, 0x88, 0xAD, 0xE4],
            Self::Testnet => [0x04, 0x35, 0x83, 0x94],
        }
    }

    /// Version bytes of a serialized extended public key (`xpub` / `tpub`).
    #[inline]
    #[must_use]
    pub const fn xpub_version(self) -> [u8; 4] {
        match self {
            Self::Mainnet => [0x04, 0x88, 0xB2, 0x1E],
            Self::Testnet => [0x04, 0x35, 0x87, 0xCF],
        }
    }

    /// WIF private key prefix.
    #[inline]
    #[must_use]
    pub const fn wif_prefix(self) -> u8 {
        match self {
            Self::Mainnet => 0x80,
            Self::Testnet => 0xEF,
        }
    }

    /// P2PKH address prefix.
    #[inline]
    #[must_use]
    pub const fn p2pkh_prefix(self) -> u8 {
        match self {
            Self::Mainnet => 0x00,
            Self::Testnet => 0x6F,
        }
    }

    /// Get the BIP44 coin type for this network.
    #[inline]
    #[must_use]
    pub const fn coin_type(self) -> u32 {
        match self {
            Self::Mainnet => 0,
            Self::Testnet => 1,
        }
    }

    /// Look up the network whose `xprv` version matches.
    pub fn from_xprv_version(version: [u8; 4]) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.xprv_version() == version)
    }

    /// Look up the network whose `xpub` version matches.
    pub fn from_xpub_version(version: [u8; 4]) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.xpub_version() == version)
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an invalid network string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseNetworkError;

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid network, expected: mainnet or testnet")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("mainnet") || s.eq_ignore_ascii_case("bitcoin") {
            Ok(Self::Mainnet)
        } else if s.eq_ignore_ascii_case("testnet") {
            Ok(Self::Testnet)
        } else {
            Err(ParseNetworkError)
        }
    }
}
