//! secp256k1 operations needed by BIP-32, on top of `k256`.

use k256::elliptic_curve::ff::PrimeField;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, ProjectivePoint, PublicKey, Scalar};

use hdkey::hash::hash160;

/// Length of a compressed SEC1 point.
pub const COMPRESSED_POINT_LEN: usize = 33;

/// Parse a big-endian 256-bit integer as a scalar.
///
/// Returns `None` when the value is not below the curve order. Zero is
/// accepted; callers that need a non-zero scalar check separately.
pub(crate) fn parse_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    Scalar::from_repr(FieldBytes::from(*bytes)).into()
}

/// SEC1 compressed encoding of a point.
pub(crate) fn compress(public_key: &PublicKey) -> [u8; COMPRESSED_POINT_LEN] {
    let mut out = [0u8; COMPRESSED_POINT_LEN];
    out.copy_from_slice(public_key.to_encoded_point(true).as_bytes());
    out
}

/// Parse a SEC1 compressed point, rejecting anything not on the curve or
/// not exactly 33 bytes long.
pub(crate) fn decompress(bytes: &[u8]) -> Option<PublicKey> {
    if bytes.len() != COMPRESSED_POINT_LEN {
        return None;
    }
    PublicKey::from_sec1_bytes(bytes).ok()
}

/// `tweak·G + point`, or `None` for the point at infinity.
pub(crate) fn add_tweak(public_key: &PublicKey, tweak: &Scalar) -> Option<PublicKey> {
    let sum = ProjectivePoint::GENERATOR * tweak + public_key.to_projective();
    PublicKey::from_affine(sum.to_affine()).ok()
}

/// HASH160 of the compressed point, the BIP-32 key identifier.
pub(crate) fn identifier(public_key: &PublicKey) -> [u8; 20] {
    hash160(&compress(public_key))
}

/// First four bytes of the key identifier.
pub(crate) fn fingerprint(public_key: &PublicKey) -> [u8; 4] {
    let id = identifier(public_key);
    [id[0], id[1], id[2], id[3]]
}
