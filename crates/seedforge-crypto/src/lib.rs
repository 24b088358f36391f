//! Seedforge Crypto - Cryptographic primitives for Seedforge HD wallets.
//!
//! This crate provides:
//! - BIP-39 mnemonics (generation, validation, seed derivation)
//! - Hash utilities (SHA-256, double SHA-256, RIPEMD-160, HASH160, HMAC-SHA512)
//! - A pluggable secp256k1 curve capability used for child-key tweaking

pub mod curve;
pub mod error;
pub mod hash;
pub mod mnemonic;

pub use curve::{Curve, Secp256k1Curve};
pub use error::CryptoError;
pub use hash::{hash160, hmac_sha512, ripemd160, sha256, sha256d};
pub use mnemonic::{Mnemonic, Strength};
