//! The 78-byte BIP-32 serialization layout shared by `xprv` and `xpub`.
//!
//! ```text
//! version(4) | depth(1) | parent fingerprint(4) | child index(4, BE) | chain code(32) | key data(33)
//! ```

use hdkey::{Error, Result};
use zeroize::Zeroize;

use crate::path::ChildIndex;
use crate::secp::COMPRESSED_POINT_LEN;

/// Length of a serialized extended key.
pub const SERIALIZED_LEN: usize = 78;

/// Offset of the 33-byte key data.
pub(crate) const KEY_DATA_OFFSET: usize = SERIALIZED_LEN - COMPRESSED_POINT_LEN;

/// Metadata carried by every extended key.
///
/// The chain code is wiped on drop, since for a private key it is secret.
pub(crate) struct Header {
    pub(crate) version: [u8; 4],
    pub(crate) depth: u8,
    pub(crate) parent_fingerprint: [u8; 4],
    pub(crate) child_index: ChildIndex,
    pub(crate) chain_code: [u8; 32],
}

impl Zeroize for Header {
    fn zeroize(&mut self) {
        self.chain_code.zeroize();
    }
}

impl Drop for Header {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Header {
    /// Lay out header and key data in serialization order into `out`.
    pub(crate) fn serialize_into(
        &self,
        key_data: &[u8; COMPRESSED_POINT_LEN],
        out: &mut [u8; SERIALIZED_LEN],
    ) {
        out[0..4].copy_from_slice(&self.version);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_index.to_u32().to_be_bytes());
        out[13..KEY_DATA_OFFSET].copy_from_slice(&self.chain_code);
        out[KEY_DATA_OFFSET..].copy_from_slice(key_data);
    }

    /// Read the header of serialized bytes. The key data stays in place at
    /// `data[KEY_DATA_OFFSET..]`.
    ///
    /// Rejects a master key (depth 0) carrying a parent fingerprint or child
    /// index, since no derivation can produce one.
    pub(crate) fn parse(data: &[u8; SERIALIZED_LEN]) -> Result<Self> {
        let header = Self {
            version: [data[0], data[1], data[2], data[3]],
            depth: data[4],
            parent_fingerprint: [data[5], data[6], data[7], data[8]],
            child_index: ChildIndex::from(u32::from_be_bytes([
                data[9], data[10], data[11], data[12],
            ])),
            chain_code: {
                let mut chain_code = [0u8; 32];
                chain_code.copy_from_slice(&data[13..KEY_DATA_OFFSET]);
                chain_code
            },
        };

        if header.depth == 0
            && (header.parent_fingerprint != [0u8; 4] || header.child_index.to_u32() != 0)
        {
            return Err(Error::InvalidKeyData);
        }

        Ok(header)
    }
}
