//! # hdkey - encoding and seed primitives for HD wallets
//!
//! The leaf layer of the workspace: hash primitives, the Base58Check codec
//! and BIP-39 seed stretching. Curve arithmetic and BIP-32 derivation live in
//! `hdkey-btc`, which builds on the modules here.
//!
//! ## Features
//!
//! - `std` (default): `std::error::Error` impls and `std` in dependencies.
//!   Without it the crate is `no_std` and only needs `alloc`.
//!
//! ## Example
//!
//! ```
//! use hdkey::{base58, seed};
//!
//! let seed = seed::to_seed(b"gap own cram expect trim name middle magic grid", b"HODL");
//! assert_eq!(seed.len(), 64);
//!
//! let text = base58::encode(&[0x00, 0x01, 0x02]);
//! assert_eq!(base58::decode(&text)?, vec![0x00, 0x01, 0x02]);
//! # Ok::<(), hdkey::Error>(())
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
    clippy::doc_markdown
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod base58;
pub mod error;
pub mod hash;
pub mod seed;

pub use error::{Error, Result};
pub use seed::{Seed, to_seed};
