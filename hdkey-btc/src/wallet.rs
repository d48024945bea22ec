//! BIP-44 account and address resolution on top of a master key.
//!
//! Paths follow `m / 44' / coin_type' / account' / change / address_index`.

use core::fmt;

use hdkey::Result;

use crate::network::Network;
use crate::xprv::ExtendedPrivateKey;
use crate::xpub::ExtendedPublicKey;

/// Registered BIP-44 coin types supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Coin {
    /// Bitcoin mainnet.
    Bitcoin = 0,
    /// Any testnet.
    Testnet = 1,
}

impl Coin {
    /// The coin type used for keys on `network`.
    pub const fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::Bitcoin,
            Network::Testnet => Self::Testnet,
        }
    }

    /// The `coin_type` path component, without the hardened offset.
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitcoin => f.write_str("bitcoin"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

/// The BIP-44 `change` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Change {
    /// Receiving addresses.
    External = 0,
    /// Change addresses.
    Internal = 1,
}

impl Change {
    /// The `change` path component.
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// A BIP-44 wallet rooted at a master private key.
///
/// The coin and account keys are derived once; address lookups only walk
/// the last two non-hardened levels.
///
/// # Example
///
/// ```
/// use hdkey_btc::{Network, Wallet};
///
/// let wallet = Wallet::from_seed(&[0x42; 32], Network::Mainnet).unwrap();
/// let receive = wallet.address(0).unwrap();
/// assert_eq!(receive.depth(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Wallet {
    /// Master extended private key.
    master_key: ExtendedPrivateKey,
    /// `m/44'/coin'`
    coin_key: ExtendedPrivateKey,
    /// `m/44'/coin'/account'`
    account_key: ExtendedPrivateKey,
    coin: Coin,
    account: u32,
}

impl Wallet {
    /// BIP-44 purpose field.
    pub const PURPOSE: u32 = 44;

    /// Build a wallet for `coin` at account 0.
    pub fn new(master_key: ExtendedPrivateKey, coin: Coin) -> Result<Self> {
        let coin_key = master_key
            .child(Self::PURPOSE, true)?
            .child(coin.index(), true)?;
        let account_key = coin_key.child(0, true)?;

        tracing::debug!(
            %coin,
            master = ?master_key.fingerprint(),
            "opened BIP-44 wallet"
        );

        Ok(Self {
            master_key,
            coin_key,
            account_key,
            coin,
            account: 0,
        })
    }

    /// Build a wallet from a raw seed, picking the coin type from `network`.
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Self> {
        let master_key = ExtendedPrivateKey::from_seed(seed, network)?;
        Self::new(master_key, Coin::for_network(network))
    }

    /// Build a wallet from a BIP-39 mnemonic and passphrase.
    ///
    /// Both inputs must already be NFKD-normalized.
    pub fn from_mnemonic(mnemonic: &[u8], passphrase: &[u8], network: Network) -> Result<Self> {
        let master_key = ExtendedPrivateKey::from_mnemonic(mnemonic, passphrase, network)?;
        Self::new(master_key, Coin::for_network(network))
    }

    /// Switch to account `account`.
    ///
    /// On error the wallet keeps its previous account.
    pub fn set_account(&mut self, account: u32) -> Result<()> {
        self.account_key = self.coin_key.child(account, true)?;
        self.account = account;
        tracing::debug!(account, "switched BIP-44 account");
        Ok(())
    }

    /// Derive `account / change / index`.
    pub fn derive(&self, change: Change, index: u32) -> Result<ExtendedPrivateKey> {
        self.account_key
            .child(change.index(), false)?
            .child(index, false)
    }

    /// Receiving key at `index` on the external chain.
    pub fn address(&self, index: u32) -> Result<ExtendedPrivateKey> {
        self.derive(Change::External, index)
    }

    /// Change key at `index` on the internal chain.
    pub fn change_address(&self, index: u32) -> Result<ExtendedPrivateKey> {
        self.derive(Change::Internal, index)
    }

    /// Account-level xpub, enough for a watch-only wallet of this account.
    pub fn account_xpub(&self) -> ExtendedPublicKey {
        self.account_key.neuter()
    }

    /// Get the master key.
    pub const fn master_key(&self) -> &ExtendedPrivateKey {
        &self.master_key
    }

    /// Get the coin key, `m/44'/coin'`.
    pub const fn coin_key(&self) -> &ExtendedPrivateKey {
        &self.coin_key
    }

    /// Get the current account key.
    pub const fn account_key(&self) -> &ExtendedPrivateKey {
        &self.account_key
    }

    /// Get the coin.
    pub const fn coin(&self) -> Coin {
        self.coin
    }

    /// Get the current account number.
    pub const fn account(&self) -> u32 {
        self.account
    }
}
