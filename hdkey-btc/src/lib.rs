//! BIP-32 hierarchical deterministic keys for Bitcoin.
//!
//! Extended private and public keys on secp256k1, their `xprv`/`xpub`
//! text forms, WIF export, legacy P2PKH addresses and a BIP-44 wallet.
//! Encoding and seed stretching come from [`hdkey`].
//!
//! # Features
//!
//! - `std` (default): Enable standard library support. Without it the crate
//!   is `no_std` and only needs `alloc`.
//!
//! # Usage
//!
//! ```
//! use hdkey_btc::{ExtendedPrivateKey, Network};
//!
//! let seed = hdkey::to_seed(b"gap own cram expect trim name middle magic grid", b"HODL");
//! let master = ExtendedPrivateKey::from_seed(seed.as_slice(), Network::Mainnet)?;
//!
//! let account = master.derive_path("m/44H/0H/0H")?;
//! let watch_only = account.neuter();
//! let receive = watch_only.derive_path("m/0/0")?;
//!
//! assert_eq!(
//!     receive.to_address(),
//!     account.derive_path("m/0/0")?.neuter().to_address()
//! );
//! # Ok::<(), hdkey_btc::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_fields_in_debug
)]
#![forbid(unsafe_code)]

extern crate alloc;

mod key;
mod network;
mod path;
mod secp;
mod serialize;
mod wallet;
mod xprv;
mod xpub;

pub use hdkey::{Error, Result};
pub use key::ExtendedKey;
pub use network::{Network, ParseNetworkError};
pub use path::{ChildIndex, DerivationPath};
pub use secp::COMPRESSED_POINT_LEN;
pub use serialize::SERIALIZED_LEN;
pub use wallet::{Change, Coin, Wallet};
pub use xprv::{ExtendedPrivateKey, MASTER_FINGERPRINT, MASTER_HMAC_KEY};
pub use xpub::ExtendedPublicKey;
