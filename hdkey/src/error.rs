//! Error types for encoding and key derivation.

use alloc::string::String;
use core::fmt;

/// Errors that can occur while encoding, decoding or deriving keys.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Base58 text contains a character outside the alphabet.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Position of the character in the input.
        index: usize,
    },
    /// Base58Check checksum does not match the payload.
    InvalidChecksum,
    /// Decoded payload has an unexpected length.
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },
    /// Master secret derived from the seed is zero or not below the curve order.
    InvalidMasterScalar,
    /// Child tweak is not below the curve order, or the child key is zero / infinity.
    InvalidChildScalar,
    /// Hardened child requested from a public-only key.
    HardenedFromPublic,
    /// Derivation attempted from a key at depth 255.
    DepthOverflow,
    /// Caller-supplied child index is not below 2^31.
    IndexTooLarge(u32),
    /// Derivation path text does not follow `m(/<index>[H])*`.
    MalformedPath(String),
    /// Serialized extended key carries unknown version bytes.
    UnknownVersion([u8; 4]),
    /// Serialized extended key carries an invalid key or inconsistent metadata.
    InvalidKeyData,
    /// HMAC rejected its key.
    InvalidMacKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => {
                write!(f, "invalid base58 character {character:?} at position {index}")
            }
            Self::InvalidChecksum => write!(f, "invalid base58check checksum"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected} bytes, got {actual}")
            }
            Self::InvalidMasterScalar => write!(f, "seed produces an invalid master key"),
            Self::InvalidChildScalar => write!(f, "index produces an invalid child key"),
            Self::HardenedFromPublic => {
                write!(f, "cannot derive a hardened child from a public key")
            }
            Self::DepthOverflow => write!(f, "maximum derivation depth (255) exceeded"),
            Self::IndexTooLarge(i) => write!(f, "child index {i} must be below 2^31"),
            Self::MalformedPath(p) => write!(f, "malformed derivation path: {p}"),
            Self::UnknownVersion(v) => write!(
                f,
                "unknown extended key version {:02x}{:02x}{:02x}{:02x}",
                v[0], v[1], v[2], v[3]
            ),
            Self::InvalidKeyData => write!(f, "invalid extended key data"),
            Self::InvalidMacKey => write!(f, "invalid HMAC key"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                Self::InvalidCharacter { character, index }
            }
            bs58::decode::Error::NonAsciiCharacter { index } => Self::InvalidCharacter {
                character: char::REPLACEMENT_CHARACTER,
                index,
            },
            // Remaining variants only arise with fixed-size output buffers
            // or the crate's own check mode, neither of which is used here.
            _ => Self::InvalidChecksum,
        }
    }
}

/// A convenient Result type alias for hdkey operations.
pub type Result<T> = core::result::Result<T, Error>;
