//! BIP-39 seed stretching.
//!
//! Turns a mnemonic sentence and optional passphrase into the 64-byte seed
//! consumed by master key generation. Word-list handling is out of scope:
//! the mnemonic is taken as raw bytes and must already be NFKD-normalized,
//! as must the passphrase.

use zeroize::Zeroizing;

use crate::hash::pbkdf2_hmac_sha512;

/// Number of PBKDF2 rounds for seed derivation.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Length of a derived seed in bytes.
pub const SEED_LEN: usize = 64;

/// Salt prefix prepended to the passphrase.
pub const SALT_PREFIX: &[u8] = b"mnemonic";

/// A 64-byte seed, wiped from memory on drop.
pub type Seed = Zeroizing<[u8; SEED_LEN]>;

/// Derive the BIP-39 seed for `mnemonic` and `passphrase`.
///
/// Pass an empty slice when there is no passphrase.
pub fn to_seed(mnemonic: &[u8], passphrase: &[u8]) -> Seed {
    let mut salt = Zeroizing::new(alloc::vec::Vec::with_capacity(
        SALT_PREFIX.len() + passphrase.len(),
    ));
    salt.extend_from_slice(SALT_PREFIX);
    salt.extend_from_slice(passphrase);

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac_sha512(mnemonic, &salt, PBKDF2_ROUNDS, &mut seed[..]);
    seed
}
