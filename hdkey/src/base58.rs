//! Base58 and Base58Check encoding.
//!
//! The raw layer converts between byte strings and the Bitcoin base-58
//! alphabet (`123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz`).
//! Each leading zero byte maps to one leading `'1'` and back. The checked
//! layer appends the first four bytes of a double SHA-256 to the payload
//! before encoding and verifies them on decode.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// Number of checksum bytes appended by [`encode`].
pub const CHECKSUM_LEN: usize = 4;

/// Encode bytes as base58 without a checksum.
///
/// An empty payload encodes to an empty string.
pub fn raw_encode(payload: &[u8]) -> String {
    bs58::encode(payload).into_string()
}

/// Decode base58 text without verifying a checksum.
pub fn raw_decode(text: &str) -> Result<Vec<u8>> {
    Ok(bs58::decode(text).into_vec()?)
}

/// First four bytes of `SHA256(SHA256(payload))`.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = double_sha256(payload);
    let mut sum = [0u8; CHECKSUM_LEN];
    sum.copy_from_slice(&hash[..CHECKSUM_LEN]);
    sum
}

/// Encode bytes to Base58Check.
pub fn encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    raw_encode(&data)
}

/// Decode Base58Check text and return the payload without its checksum.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut data = raw_decode(text)?;
    if data.len() < CHECKSUM_LEN {
        return Err(Error::InvalidChecksum);
    }

    let body_len = data.len() - CHECKSUM_LEN;
    if data[body_len..] != checksum(&data[..body_len]) {
        tracing::trace!(len = data.len(), "base58check checksum mismatch");
        return Err(Error::InvalidChecksum);
    }

    data.truncate(body_len);
    Ok(data)
}

/// Decode Base58Check text whose payload must be exactly `N` bytes long.
pub fn decode_exact<const N: usize>(text: &str) -> Result<[u8; N]> {
    let data = decode(text)?;
    data.as_slice()
        .try_into()
        .map_err(|_| Error::InvalidLength {
            expected: N,
            actual: data.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    mod raw_tests {
        use super::*;

        #[test]
        fn test_raw_encode() {
            assert_eq!(raw_encode(&hex_literal::hex!("60619091")), "3TtamW");
        }

        #[test]
        fn test_raw_decode() {
            assert_eq!(
                raw_decode("3TtamW").unwrap(),
                hex_literal::hex!("60619091").to_vec()
            );
        }

        #[test]
        fn test_raw_empty() {
            assert_eq!(raw_encode(&[]), "");
            assert_eq!(raw_decode("").unwrap(), Vec::<u8>::new());
        }

        #[test]
        fn test_raw_leading_zeros() {
            assert_eq!(raw_encode(&[0, 0, 0]), "111");
            assert_eq!(raw_encode(&[0, 0, 0x39]), "11z");
            assert_eq!(raw_decode("111").unwrap(), vec![0, 0, 0]);
            assert_eq!(raw_decode("11z").unwrap(), vec![0, 0, 0x39]);
        }

        #[test]
        fn test_raw_decode_invalid_character() {
            for (text, character, index) in [("0", '0', 0), ("1O", 'O', 1), ("abIl", 'I', 2)] {
                assert_eq!(
                    raw_decode(text).unwrap_err(),
                    Error::InvalidCharacter { character, index }
                );
            }
        }
    }

    mod check_tests {
        use super::*;

        #[test]
        fn test_encode_p2pkh_mainnet() {
            let payload = hex_literal::hex!("0062e907b15cbf27d5425399ebf6f0fb50ebb88f18");
            assert_eq!(encode(&payload), "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        }

        #[test]
        fn test_encode_p2pkh_testnet() {
            let payload = hex_literal::hex!("6f62e907b15cbf27d5425399ebf6f0fb50ebb88f18");
            assert_eq!(encode(&payload), "mpXwg4jMtRhuSpVq4xS3HFHmCmWp9NyGKt");
        }

        #[test]
        fn test_encode_wif_compressed() {
            let payload = hex_literal::hex!(
                "800c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d01"
            );
            assert_eq!(
                encode(&payload),
                "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617"
            );
        }

        #[test]
        fn test_decode_p2pkh_mainnet() {
            assert_eq!(
                decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").unwrap(),
                hex_literal::hex!("0062e907b15cbf27d5425399ebf6f0fb50ebb88f18").to_vec()
            );
        }

        #[test]
        fn test_decode_invalid_checksum() {
            // Last character altered
            assert_eq!(
                decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb").unwrap_err(),
                Error::InvalidChecksum
            );
        }

        #[test]
        fn test_decode_too_short() {
            assert_eq!(decode("").unwrap_err(), Error::InvalidChecksum);
            assert_eq!(decode("1234").unwrap_err(), Error::InvalidChecksum);
        }

        #[test]
        fn test_decode_invalid_base58() {
            assert!(matches!(
                decode("0OIl").unwrap_err(),
                Error::InvalidCharacter { character: '0', index: 0 }
            ));
        }

        #[test]
        fn test_decode_exact_length() {
            let text = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
            assert!(decode_exact::<21>(text).is_ok());
            assert_eq!(
                decode_exact::<78>(text).unwrap_err(),
                Error::InvalidLength {
                    expected: 78,
                    actual: 21
                }
            );
        }

        #[test]
        fn test_checked_roundtrip() {
            let payloads: &[&[u8]] = &[
                &[],
                &[0x00],
                &[0x00, 0x00, 0x01, 0x02],
                &[0xff; 78],
                &hex_literal::hex!("0488ade4000000000000000000"),
            ];

            for payload in payloads {
                assert_eq!(decode(&encode(payload)).unwrap(), *payload);
            }
        }
    }
}
