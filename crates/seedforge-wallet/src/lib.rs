//! Hierarchical-deterministic Bitcoin wallet library.
//!
//! Builds on [`seedforge_crypto`] for mnemonics and curve arithmetic and
//! adds BIP-32 extended keys, derivation paths, Bitcoin address encodings
//! and the [`HdWallet`] facade.

pub mod address;
pub mod error;
pub mod extended_key;
pub mod path;
pub mod wallet;

pub use error::{AddressError, Bip32Error, WalletError};
pub use extended_key::{ExtendedPrivateKey, ExtendedPublicKey, KeyPair};
pub use path::{ChildNumber, DerivationPath, HARDENED_OFFSET};
pub use wallet::{BitcoinWallet, HdWallet, SeedPhraseSize, BITCOIN_ACCOUNT_PATH};
