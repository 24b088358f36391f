use seedforge_crypto::CryptoError;
use thiserror::Error;

/// Errors from BIP-32 extended-key operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Bip32Error {
    #[error("invalid seed length: expected 16..=64 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("master key material out of range for the curve")]
    InvalidMasterKey,

    #[error("hardened derivation requires private key")]
    HardenedFromPublic,

    #[error("maximum derivation depth exceeded")]
    DepthOverflow,

    #[error("child key at index {index} is unusable, proceed to the next index")]
    DerivationRetry { index: u32 },

    #[error("derivation failed at path segment {segment}")]
    Segment {
        segment: usize,
        #[source]
        source: Box<Bip32Error>,
    },

    #[error("checksum mismatch in serialized extended key")]
    BadChecksum,

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid extended key length: expected 78 bytes, got {0}")]
    InvalidLength(usize),

    #[error("unknown extended key version bytes: {0}")]
    UnknownVersion(String),

    #[error("invalid extended key data")]
    InvalidKeyData,

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Errors from address encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid public key: expected 33-byte compressed key")]
    InvalidPublicKey,

    #[error("invalid bech32 human-readable part: {0}")]
    InvalidHrp(String),

    #[error("address encoding failed: {0}")]
    Encoding(String),
}

/// Umbrella error for wallet-facade operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Bip32(#[from] Bip32Error),

    #[error(transparent)]
    Address(#[from] AddressError),
}
