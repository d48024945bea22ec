//! BIP-32 Hierarchical Deterministic (HD) key derivation.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use hdkey::{base58, hash, seed, Error, Result};
use k256::{FieldBytes, NonZeroScalar, PublicKey, SecretKey};
use zeroize::{Zeroize, Zeroizing};

use crate::network::Network;
use crate::path::{ChildIndex, DerivationPath};
use crate::secp::{self, COMPRESSED_POINT_LEN};
use crate::serialize::{Header, KEY_DATA_OFFSET, SERIALIZED_LEN};
use crate::xpub::ExtendedPublicKey;

/// HMAC key used to derive the master key from a seed.
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Parent fingerprint recorded in master keys.
pub const MASTER_FINGERPRINT: [u8; 4] = [0u8; 4];

/// Split `I = HMAC-SHA512(key, data)` into `IL` and `IR`.
pub(crate) fn hmac_split(
    key: &[u8],
    parts: &[&[u8]],
) -> Result<(Zeroizing<[u8; 32]>, [u8; 32])> {
    let i = Zeroizing::new(hash::hmac_sha512(key, parts)?);
    let mut il = Zeroizing::new([0u8; 32]);
    let mut ir = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    Ok((il, ir))
}

/// BIP-32 Extended Private Key.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPrivateKey {
    /// The secret scalar, always in `[1, n-1]`
    secret_key: SecretKey,
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

impl Drop for ExtendedPrivateKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl ExtendedPrivateKey {
    /// Create master key from seed (BIP-32).
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self> {
        let (il, ir) = hmac_split(MASTER_HMAC_KEY, &[seed])?;

        let secret_key = SecretKey::from_bytes(&FieldBytes::from(*il))
            .map_err(|_| Error::InvalidMasterScalar)?;

        Ok(Self {
            secret_key,
            chain_code: ir,
            depth: 0,
            parent_fingerprint: MASTER_FINGERPRINT,
            child_index: ChildIndex::Normal(0),
            network,
        })
    }

    /// Create master key from a BIP-39 mnemonic and passphrase.
    ///
    /// Both inputs must already be NFKD-normalized.
    pub fn from_mnemonic(mnemonic: &[u8], passphrase: &[u8], network: Network) -> Result<Self> {
        let seed = seed::to_seed(mnemonic, passphrase);
        Self::from_seed(seed.as_slice(), network)
    }

    /// Derive the child at `index`, hardened when `hardened` is set.
    ///
    /// `index` is given without the hardened offset and must be below 2^31.
    pub fn child(&self, index: u32, hardened: bool) -> Result<Self> {
        self.derive_child(ChildIndex::new(index, hardened))
    }

    /// Derive a child key at the given index.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        let index = index.check()?;
        if self.depth == u8::MAX {
            return Err(Error::DepthOverflow);
        }

        let parent_public = self.secret_key.public_key();
        let index_bytes = index.to_u32().to_be_bytes();

        let (il, ir) = match index {
            ChildIndex::Normal(_) => {
                // HMAC-SHA512(Key = chainCode, Data = serP(point(kpar)) || ser32(i))
                let point = secp::compress(&parent_public);
                hmac_split(&self.chain_code, &[&point[..], &index_bytes[..]])
            }
            ChildIndex::Hardened(_) => {
                // HMAC-SHA512(Key = chainCode, Data = 0x00 || ser256(kpar) || ser32(i))
                let secret = self.secret_bytes();
                hmac_split(&self.chain_code, &[&[0u8][..], &secret[..], &index_bytes[..]])
            }
        }?;

        // child = parse256(IL) + kpar (mod n)
        let tweak = secp::parse_scalar(&il).ok_or_else(|| self.reject(index))?;
        let child_scalar = tweak + *self.secret_key.to_nonzero_scalar();
        let child_scalar = Option::<NonZeroScalar>::from(NonZeroScalar::new(child_scalar))
            .ok_or_else(|| self.reject(index))?;

        Ok(Self {
            secret_key: SecretKey::from(child_scalar),
            chain_code: ir,
            depth: self.depth + 1,
            parent_fingerprint: secp::fingerprint(&parent_public),
            child_index: index,
            network: self.network,
        })
    }

    fn reject(&self, index: ChildIndex) -> Error {
        tracing::debug!(
            depth = self.depth,
            %index,
            "child scalar out of range, caller should skip this index"
        );
        Error::InvalidChildScalar
    }

    /// Derive along a parsed path, applying each step left to right.
    pub fn derive(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.clone();
        for index in path {
            current = current.derive_child(*index)?;
        }
        tracing::debug!(%path, depth = current.depth, "derived extended private key");
        Ok(current)
    }

    /// Derive from a path string (e.g., "m/44H/0H/0H/0/0").
    ///
    /// The hardened marker is `H` or `h`; the path `m` returns a copy of
    /// this key.
    pub fn derive_path(&self, path: &str) -> Result<Self> {
        self.derive(&path.parse::<DerivationPath>()?)
    }

    /// Drop the private half, keeping chain code and metadata.
    pub fn neuter(&self) -> ExtendedPublicKey {
        ExtendedPublicKey::from_parts(
            self.secret_key.public_key(),
            self.chain_code,
            self.depth,
            self.parent_fingerprint,
            self.child_index,
            self.network,
        )
    }

    /// Get the underlying secret key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Raw 32-byte big-endian secret scalar.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret_key.to_bytes().into())
    }

    /// Get the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        self.secret_key.public_key()
    }

    /// SEC1 compressed public key.
    pub fn public_key_bytes(&self) -> [u8; COMPRESSED_POINT_LEN] {
        secp::compress(&self.public_key())
    }

    /// HASH160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        secp::identifier(&self.public_key())
    }

    /// First four bytes of [`identifier`](Self::identifier), recorded as the
    /// parent fingerprint of every child.
    pub fn fingerprint(&self) -> [u8; 4] {
        secp::fingerprint(&self.public_key())
    }

    /// Get the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
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
    pub fn serialize(&self) -> Zeroizing<[u8; SERIALIZED_LEN]> {
        let mut key_data = Zeroizing::new([0u8; COMPRESSED_POINT_LEN]);
        key_data[1..].copy_from_slice(self.secret_bytes().as_slice());

        let mut data = Zeroizing::new([0u8; SERIALIZED_LEN]);
        self.header().serialize_into(&key_data, &mut data);
        data
    }

    fn header(&self) -> Header {
        Header {
            version: self.network.xprv_version(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            chain_code: self.chain_code,
        }
    }

    /// Serialize to xprv format (Base58Check).
    pub fn to_xprv(&self) -> String {
        base58::encode(self.serialize().as_slice())
    }

    /// Parse from xprv format (Base58Check).
    pub fn from_xprv(xprv: &str) -> Result<Self> {
        let data = Zeroizing::new(base58::decode_exact::<SERIALIZED_LEN>(xprv)?);
        Self::from_serialized(&data)
    }

    pub(crate) fn from_serialized(data: &[u8; SERIALIZED_LEN]) -> Result<Self> {
        let header = Header::parse(data)?;

        let network = Network::from_xprv_version(header.version)
            .ok_or(Error::UnknownVersion(header.version))?;
        if data[KEY_DATA_OFFSET] != 0x00 {
            return Err(Error::InvalidKeyData);
        }
        let secret_key = SecretKey::from_slice(&data[KEY_DATA_OFFSET + 1..])
            .map_err(|_| Error::InvalidKeyData)?;

        Ok(Self {
            secret_key,
            chain_code: header.chain_code,
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_index: header.child_index,
            network,
        })
    }

    /// Export the secret scalar as compressed WIF (Wallet Import Format).
    pub fn to_wif(&self) -> String {
        let mut data = Zeroizing::new([0u8; 34]);
        data[0] = self.network.wif_prefix();
        data[1..33].copy_from_slice(self.secret_bytes().as_slice());
        data[33] = 0x01;

        base58::encode(data.as_slice())
    }
}

impl fmt::Display for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xprv())
    }
}

impl FromStr for ExtendedPrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_xprv(s)
    }
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_index", &self.child_index)
            .field("network", &self.network)
            .field("private_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-32 test vector 1
    const TEST_SEED_1: &[u8] = &hex_literal::hex!("000102030405060708090a0b0c0d0e0f");

    fn master() -> ExtendedPrivateKey {
        ExtendedPrivateKey::from_seed(TEST_SEED_1, Network::Mainnet).unwrap()
    }

    #[test]
    fn test_master_key_from_seed() {
        let xkey = master();
        assert_eq!(xkey.depth(), 0);
        assert_eq!(xkey.parent_fingerprint(), &MASTER_FINGERPRINT);
        assert_eq!(xkey.child_index(), ChildIndex::Normal(0));
        assert_eq!(
            *xkey.secret_bytes(),
            hex_literal::hex!("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35")
        );
        assert_eq!(
            xkey.chain_code(),
            &hex_literal::hex!("873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508")
        );
    }

    #[test]
    fn test_bip32_vector1_chain_m() {
        assert_eq!(
            master().to_xprv(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
        );
    }

    #[test]
    fn test_bip32_vector1_chain_m_0h() {
        let child = master().child(0, true).unwrap();
        assert_eq!(
            child.to_xprv(),
            "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
        );
    }

    #[test]
    fn test_child_metadata() {
        let parent = master();
        let child = parent.child(7, false).unwrap();
        assert_eq!(child.depth(), parent.depth() + 1);
        assert_eq!(child.parent_fingerprint(), &parent.fingerprint());
        assert_eq!(child.child_index(), ChildIndex::Normal(7));

        let hardened = parent.child(7, true).unwrap();
        assert_eq!(hardened.child_index().to_u32(), 0x8000_0007);
        assert_ne!(*hardened.secret_bytes(), *child.secret_bytes());
    }

    #[test]
    fn test_derivation_leaves_parent_untouched() {
        let parent = master();
        let before = parent.to_xprv();
        let _ = parent.derive_path("m/0H/1").unwrap();
        assert_eq!(parent.to_xprv(), before);
    }

    #[test]
    fn test_index_too_large() {
        let parent = master();
        assert_eq!(
            parent.child(0x8000_0000, true),
            Err(Error::IndexTooLarge(0x8000_0000))
        );
        assert_eq!(
            parent.child(u32::MAX, false),
            Err(Error::IndexTooLarge(u32::MAX))
        );
    }

    #[test]
    fn test_depth_overflow() {
        let mut key = master();
        for _ in 0..255 {
            key = key.child(0, false).unwrap();
        }
        assert_eq!(key.depth(), 255);
        assert_eq!(key.child(0, false), Err(Error::DepthOverflow));
        assert_eq!(key.child(0, true), Err(Error::DepthOverflow));
    }

    #[test]
    fn test_derive_path() {
        let master = master();
        let derived = master.derive_path("m/0H").unwrap();
        assert_eq!(derived.depth(), 1);
        assert_eq!(derived, master.child(0, true).unwrap());

        let derived2 = master.derive_path("m/0h/1").unwrap();
        assert_eq!(derived2.depth(), 2);

        assert_eq!(master.derive_path("m").unwrap(), master);
    }

    #[test]
    fn test_derive_path_malformed() {
        let master = master();
        for path in ["", "m/", "m/0'", "m/x", "m/2147483648"] {
            assert!(matches!(
                master.derive_path(path),
                Err(Error::MalformedPath(_))
            ));
        }
    }

    #[test]
    fn test_from_serialized_zero_scalar() {
        let mut data = *master().serialize();
        data[46..78].fill(0);
        assert_eq!(
            ExtendedPrivateKey::from_serialized(&data),
            Err(Error::InvalidKeyData)
        );
    }

    #[test]
    fn test_xprv_roundtrip() {
        let key = master().derive_path("m/0H/1/2H").unwrap();
        let recovered = ExtendedPrivateKey::from_xprv(&key.to_xprv()).unwrap();
        assert_eq!(key, recovered);
        assert_eq!(key.to_string().parse::<ExtendedPrivateKey>().unwrap(), key);
    }

    #[test]
    fn test_from_xprv_rejects_xpub() {
        let xpub = master().neuter().to_xpub();
        assert_eq!(
            ExtendedPrivateKey::from_xprv(&xpub),
            Err(Error::UnknownVersion([0x04, 0x88, 0xB2, 0x1E]))
        );
    }

    #[test]
    fn test_from_xprv_bad_prefix() {
        let mut data = *master().serialize();
        data[45] = 0x01;
        assert_eq!(
            ExtendedPrivateKey::from_xprv(&base58::encode(&data)),
            Err(Error::InvalidKeyData)
        );
    }

    #[test]
    fn test_testnet_tprv() {
        let xkey = ExtendedPrivateKey::from_seed(TEST_SEED_1, Network::Testnet).unwrap();
        let tprv = xkey.to_xprv();
        assert!(tprv.starts_with("tprv"));
        assert_eq!(
            ExtendedPrivateKey::from_xprv(&tprv).unwrap().network(),
            Network::Testnet
        );
    }

    #[test]
    fn test_wif_export() {
        let key = master();
        let wif = key.to_wif();
        assert!(wif.starts_with('K') || wif.starts_with('L'));

        let payload = base58::decode(&wif).unwrap();
        assert_eq!(payload.len(), 34);
        assert_eq!(payload[0], 0x80);
        assert_eq!(&payload[1..33], key.secret_bytes().as_slice());
        assert_eq!(payload[33], 0x01);
    }

    #[test]
    fn test_testnet_wif() {
        let key = ExtendedPrivateKey::from_seed(TEST_SEED_1, Network::Testnet).unwrap();
        assert!(key.to_wif().starts_with('c'));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = alloc::format!("{:?}", master());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("e8f32e72"));
    }
}
