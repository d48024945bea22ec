//! A private or public extended key behind one type.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use hdkey::{base58, Error, Result};
use zeroize::Zeroizing;

use crate::network::Network;
use crate::path::{ChildIndex, DerivationPath};
use crate::serialize::SERIALIZED_LEN;
use crate::xprv::ExtendedPrivateKey;
use crate::xpub::ExtendedPublicKey;

/// Either half of a BIP-32 key pair.
///
/// Parsing from text dispatches on the four version bytes, so a caller
/// holding an unknown `xprv`/`xpub`/`tprv`/`tpub` string can use
/// `s.parse::<ExtendedKey>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedKey {
    /// Carries the secret scalar.
    Private(ExtendedPrivateKey),
    /// Watch-only.
    Public(ExtendedPublicKey),
}

impl ExtendedKey {
    /// Whether the secret scalar is present.
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// Derive the child at `index`.
    ///
    /// A public key asked for a hardened child, or for any `index` at or
    /// above 2^31, fails with [`Error::HardenedFromPublic`], the same as
    /// [`ExtendedPublicKey::derive_child`].
    pub fn child(&self, index: u32, hardened: bool) -> Result<Self> {
        match self {
            Self::Private(xprv) => xprv.child(index, hardened).map(Self::Private),
            Self::Public(_) if hardened => Err(Error::HardenedFromPublic),
            Self::Public(xpub) => xpub.derive_child(index).map(Self::Public),
        }
    }

    /// Derive along a parsed path.
    pub fn derive(&self, path: &DerivationPath) -> Result<Self> {
        match self {
            Self::Private(xprv) => xprv.derive(path).map(Self::Private),
            Self::Public(xpub) => xpub.derive(path).map(Self::Public),
        }
    }

    /// Derive from a path string.
    pub fn derive_path(&self, path: &str) -> Result<Self> {
        self.derive(&path.parse::<DerivationPath>()?)
    }

    /// The public half. Already-public keys are returned as a copy.
    pub fn neuter(&self) -> ExtendedPublicKey {
        match self {
            Self::Private(xprv) => xprv.neuter(),
            Self::Public(xpub) => xpub.clone(),
        }
    }

    /// Serialize to the 78-byte BIP-32 layout.
    pub fn serialize(&self) -> Zeroizing<[u8; SERIALIZED_LEN]> {
        match self {
            Self::Private(xprv) => xprv.serialize(),
            Self::Public(xpub) => Zeroizing::new(xpub.serialize()),
        }
    }

    /// HASH160 of the compressed public key.
    pub fn hash160(&self) -> [u8; 20] {
        match self {
            Self::Private(xprv) => xprv.identifier(),
            Self::Public(xpub) => xpub.identifier(),
        }
    }

    /// First four bytes of [`hash160`](Self::hash160).
    pub fn fingerprint(&self) -> [u8; 4] {
        match self {
            Self::Private(xprv) => xprv.fingerprint(),
            Self::Public(xpub) => xpub.fingerprint(),
        }
    }

    /// Compressed WIF for a private key, P2PKH address for a public key.
    pub fn encode(&self) -> String {
        match self {
            Self::Private(xprv) => xprv.to_wif(),
            Self::Public(xpub) => xpub.to_address(),
        }
    }

    /// Get the depth.
    pub const fn depth(&self) -> u8 {
        match self {
            Self::Private(xprv) => xprv.depth(),
            Self::Public(xpub) => xpub.depth(),
        }
    }

    /// Get the child index.
    pub const fn child_index(&self) -> ChildIndex {
        match self {
            Self::Private(xprv) => xprv.child_index(),
            Self::Public(xpub) => xpub.child_index(),
        }
    }

    /// Get the parent fingerprint.
    pub const fn parent_fingerprint(&self) -> &[u8; 4] {
        match self {
            Self::Private(xprv) => xprv.parent_fingerprint(),
            Self::Public(xpub) => xpub.parent_fingerprint(),
        }
    }

    /// Get the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        match self {
            Self::Private(xprv) => xprv.chain_code(),
            Self::Public(xpub) => xpub.chain_code(),
        }
    }

    /// Get the network.
    pub const fn network(&self) -> Network {
        match self {
            Self::Private(xprv) => xprv.network(),
            Self::Public(xpub) => xpub.network(),
        }
    }
}

impl From<ExtendedPrivateKey> for ExtendedKey {
    fn from(key: ExtendedPrivateKey) -> Self {
        Self::Private(key)
    }
}

impl From<ExtendedPublicKey> for ExtendedKey {
    fn from(key: ExtendedPublicKey) -> Self {
        Self::Public(key)
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private(xprv) => fmt::Display::fmt(xprv, f),
            Self::Public(xpub) => fmt::Display::fmt(xpub, f),
        }
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let data = Zeroizing::new(base58::decode_exact::<SERIALIZED_LEN>(s)?);
        let version = [data[0], data[1], data[2], data[3]];

        if Network::from_xprv_version(version).is_some() {
            ExtendedPrivateKey::from_serialized(&data).map(Self::Private)
        } else if Network::from_xpub_version(version).is_some() {
            ExtendedPublicKey::from_serialized(&data).map(Self::Public)
        } else {
            Err(Error::UnknownVersion(version))
        }
    }
}
