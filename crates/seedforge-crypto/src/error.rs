use thiserror::Error;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid mnemonic word count: {0}")]
    InvalidWordCount(usize),

    #[error("unknown mnemonic word at position {0}")]
    UnknownWord(usize),

    #[error("mnemonic checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid entropy length: {0} bits")]
    InvalidEntropy(usize),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("scalar tweak out of range")]
    TweakOutOfRange,
}

impl From<bip39::Error> for CryptoError {
    fn from(e: bip39::Error) -> Self {
        match e {
            bip39::Error::BadWordCount(n) => CryptoError::InvalidWordCount(n),
            bip39::Error::UnknownWord(pos) => CryptoError::UnknownWord(pos),
            bip39::Error::InvalidChecksum => CryptoError::ChecksumMismatch,
            bip39::Error::BadEntropyBitCount(n) => CryptoError::InvalidEntropy(n),
            other => CryptoError::InvalidMnemonic(other.to_string()),
        }
    }
}
