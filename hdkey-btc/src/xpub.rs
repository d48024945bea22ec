//! BIP-32 Extended Public Key for Bitcoin.
//!
//! Supports non-hardened child derivation, xpub serialization and legacy
//! P2PKH address encoding, which is all a watch-only wallet needs.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use hdkey::{base58, Error, Result};
use k256::PublicKey;

use crate::network::Network;
use crate::path::{ChildIndex, DerivationPath};
use crate::secp::{self, COMPRESSED_POINT_LEN};
use crate::serialize::{Header, KEY_DATA_OFFSET, SERIALIZED_LEN};
use crate::xprv::hmac_split;

/// BIP-32 Extended Public Key for Bitcoin.
///
/// Used for watch-only wallets and deriving addresses without private keys.
/// Only supports non-hardened child derivation.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    /// The public point
    public_key: PublicKey,
    /// Chain code for key derivation
    chain_code: [u8; 32],
    /// Depth in the derivation tree (0 for master)
    depth: u8,
    /// Parent key fingerprint (first 4 bytes of hash160 of parent public key)
    parent_fingerprint: [u8; 4],
    /// Child index that produced this key
    child_index: ChildIndex,
    /// Network (mainnet or testnet)
    network: Network,
}

impl ExtendedPublicKey {
    pub(crate) const fn from_parts(
        public_key: PublicKey,
        chain_code: [u8; 32],
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_index: ChildIndex,
        network: Network,
    ) -> Self {
        Self {
            public_key,
            chain_code,
            depth,
            parent_fingerprint,
            child_index,
            network,
        }
    }

    /// Derive a child key at the given index (non-hardened only).
    ///
    /// Indices at or above 2^31 fail with [`Error::HardenedFromPublic`].
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        if index >= ChildIndex::HARDENED_OFFSET {
            return Err(Error::HardenedFromPublic);
        }
        if self.depth == u8::MAX {
            return Err(Error::DepthOverflow);
        }

        // HMAC-SHA512(Key = chainCode, Data = serP(Kpar) || ser32(i))
        let point = secp::compress(&self.public_key);
        let (il, ir) = hmac_split(&self.chain_code, &[&point[..], &index.to_be_bytes()[..]])?;

        // Ki = point(parse256(IL)) + Kpar
        let child_key = secp::parse_scalar(&il)
            .and_then(|tweak| secp::add_tweak(&self.public_key, &tweak))
            .ok_or_else(|| {
                tracing::debug!(
                    depth = self.depth,
                    index,
                    "child point invalid, caller should skip this index"
                );
                Error::InvalidChildScalar
            })?;

        Ok(Self {
            public_key: child_key,
            chain_code: ir,
            depth: self.depth + 1,
            parent_fingerprint: secp::fingerprint(&self.public_key),
            child_index: ChildIndex::Normal(index),
            network: self.network,
        })
    }

    /// Derive along a parsed path. Any hardened step fails with
    /// [`Error::HardenedFromPublic`].
    pub fn derive(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.clone();
        for index in path {
            current = current.derive_child(index.to_u32())?;
        }
        tracing::debug!(%path, depth = current.depth, "derived extended public key");
        Ok(current)
    }

    /// Derive from a path string (e.g., "m/0/1/2").
    pub fn derive_path(&self, path: &str) -> Result<Self> {
        self.derive(&path.parse::<DerivationPath>()?)
    }

    /// Get the public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// SEC1 compressed public key.
    pub fn public_key_bytes(&self) -> [u8; COMPRESSED_POINT_LEN] {
        secp::compress(&self.public_key)
    }

    /// HASH160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        secp::identifier(&self.public_key)
    }

    /// First four bytes of [`identifier`](Self::identifier).
    pub fn fingerprint(&self) -> [u8; 4] {
        secp::fingerprint(&self.public_key)
    }

    /// Get the chain code.
    pub const fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent fingerprint.
    pub const fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Get the child index.
    pub const fn child_index(&self) -> ChildIndex {
        self.child_index
    }

    /// Get the network.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Serialize to the 78-byte BIP-32 layout.
    pub fn serialize(&self) -> [u8; SERIALIZED_LEN] {
        let header = Header {
            version: self.network.xpub_version(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            chain_code: self.chain_code,
        };
        let mut data = [0u8; SERIALIZED_LEN];
        header.serialize_into(&self.public_key_bytes(), &mut data);
        data
    }

    /// Serialize to xpub format (Base58Check encoded).
    pub fn to_xpub(&self) -> String {
        base58::encode(&self.serialize())
    }

    /// Parse from xpub format (Base58Check encoded).
    pub fn from_xpub(xpub: &str) -> Result<Self> {
        Self::from_serialized(&base58::decode_exact::<SERIALIZED_LEN>(xpub)?)
    }

    pub(crate) fn from_serialized(data: &[u8; SERIALIZED_LEN]) -> Result<Self> {
        let header = Header::parse(data)?;
        let network = Network::from_xpub_version(header.version)
            .ok_or(Error::UnknownVersion(header.version))?;
        let public_key =
            secp::decompress(&data[KEY_DATA_OFFSET..]).ok_or(Error::InvalidKeyData)?;

        Ok(Self {
            public_key,
            chain_code: header.chain_code,
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_index: header.child_index,
            network,
        })
    }

    /// Legacy P2PKH address: Base58Check of `prefix || hash160(pubkey)`.
    pub fn to_address(&self) -> String {
        let mut data = [0u8; 21];
        data[0] = self.network.p2pkh_prefix();
        data[1..].copy_from_slice(&self.identifier());
        base58::encode(&data)
    }
}

impl fmt::Display for ExtendedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xpub())
    }
}

impl FromStr for ExtendedPublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_xpub(s)
    }
}

impl fmt::Debug for ExtendedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPublicKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_index", &self.child_index)
            .field("network", &self.network)
            .field("public_key", &self.public_key_bytes())
            .finish_non_exhaustive()
    }
}
