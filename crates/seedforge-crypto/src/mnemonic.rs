//! BIP-39 mnemonic phrases and seed derivation.
//!
//! Phrases are zeroized on drop and never appear in `Debug` output.

use crate::error::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Entropy strength for mnemonic generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// 128 bits of entropy, 12 words
    Bits128,
    /// 256 bits of entropy, 24 words
    Bits256,
}

impl Strength {
    pub const fn entropy_bytes(self) -> usize {
        match self {
            Strength::Bits128 => 16,
            Strength::Bits256 => 32,
        }
    }

    pub const fn word_count(self) -> usize {
        match self {
            Strength::Bits128 => 12,
            Strength::Bits256 => 24,
        }
    }
}

/// A validated BIP-39 mnemonic phrase.
///
/// Generation produces 12 or 24 words; externally supplied phrases of
/// 12/15/18/21/24 words are accepted after wordlist and checksum
/// validation. Invalid phrases are rejected, never silently accepted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    phrase: String,
    // Parsed once at construction so seed derivation never re-validates
    inner: bip39::Mnemonic,
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl Mnemonic {
    /// Generate a fresh mnemonic from OS randomness.
    pub fn generate(strength: Strength) -> Result<Self, CryptoError> {
        let mut entropy = [0u8; 32];
        let len = strength.entropy_bytes();
        OsRng.fill_bytes(&mut entropy[..len]);

        let inner = bip39::Mnemonic::from_entropy(&entropy[..len])?;
        entropy.zeroize();

        Ok(Self {
            phrase: inner.to_string(),
            inner,
        })
    }

    /// Validate and accept an externally supplied phrase.
    ///
    /// Checks word count (12/15/18/21/24), wordlist membership and the
    /// entropy checksum; whitespace is normalized.
    pub fn from_phrase(phrase: &str) -> Result<Self, CryptoError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let count = words.len();
        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(CryptoError::InvalidWordCount(count));
        }

        let normalized = words.join(" ");
        let inner = bip39::Mnemonic::parse(&normalized)?;

        Ok(Self {
            phrase: normalized,
            inner,
        })
    }

    /// Whether a phrase passes full BIP-39 validation.
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// The mnemonic phrase. Handle with care: this is key material.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Derive the 64-byte seed: PBKDF2-HMAC-SHA512 over the NFKD-normalized
    /// phrase, salt `"mnemonic" + passphrase`, 2048 iterations.
    ///
    /// Deterministic in (phrase, passphrase). The result is zeroized on drop.
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.inner.to_seed(passphrase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VECTOR_PHRASE: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_word_counts() {
        let m12 = Mnemonic::generate(Strength::Bits128).unwrap();
        assert_eq!(m12.word_count(), 12);
        assert_eq!(m12.phrase().split_whitespace().count(), 12);

        let m24 = Mnemonic::generate(Strength::Bits256).unwrap();
        assert_eq!(m24.word_count(), 24);
        assert_eq!(m24.phrase().split_whitespace().count(), 24);
    }

    #[test]
    fn test_generate_validates() {
        for _ in 0..8 {
            let m = Mnemonic::generate(Strength::Bits128).unwrap();
            assert!(Mnemonic::validate(m.phrase()));
        }
    }

    #[test]
    fn test_from_phrase_rejects_bad_word_count() {
        let err = Mnemonic::from_phrase("abandon abandon abandon").unwrap_err();
        assert_eq!(err, CryptoError::InvalidWordCount(3));
    }

    #[test]
    fn test_from_phrase_rejects_unknown_word() {
        let phrase = VECTOR_PHRASE.replace("about", "notaword");
        assert!(matches!(
            Mnemonic::from_phrase(&phrase).unwrap_err(),
            CryptoError::UnknownWord(_)
        ));
    }

    #[test]
    fn test_from_phrase_rejects_bad_checksum() {
        // Swapping the final word breaks the checksum bits
        let phrase = VECTOR_PHRASE.replace("about", "abandon");
        assert_eq!(
            Mnemonic::from_phrase(&phrase).unwrap_err(),
            CryptoError::ChecksumMismatch
        );
    }

    #[test]
    fn test_whitespace_normalization() {
        let sloppy = format!("  {}  ", VECTOR_PHRASE.replace(' ', "   "));
        let m = Mnemonic::from_phrase(&sloppy).unwrap();
        assert_eq!(m.phrase(), VECTOR_PHRASE);
    }

    #[test]
    fn test_seed_vector_empty_passphrase() {
        let m = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        let seed = m.to_seed("");
        assert_eq!(
            hex::encode(*seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_seed_vectors_trezor_passphrase() {
        // Official BIP-39 test vectors, passphrase "TREZOR"
        let cases = [
            (
                VECTOR_PHRASE.to_string(),
                "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e534955\
                 31f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
            ),
            (
                "legal winner thank year wave sausage worth useful legal winner thank yellow"
                    .to_string(),
                "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6\
                 fa457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607",
            ),
            (
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above"
                    .to_string(),
                "d71de856f81a8acc65e6fc851a38d4d7ec216fd0796d0a6827a3ad6ed5511a3\
                 0fa280f12eb2e47ed2ac03b5c462a0358d18d69fe4f985ec81778c1b370b652a8",
            ),
        ];

        for (phrase, expected) in cases {
            let m = Mnemonic::from_phrase(&phrase).unwrap();
            assert_eq!(hex::encode(*m.to_seed("TREZOR")), expected);
        }
    }

    #[test]
    fn test_generated_and_reimported_agree() {
        // The seed must be a function of the phrase alone, whichever
        // constructor produced the mnemonic
        let generated = Mnemonic::generate(Strength::Bits128).unwrap();
        let reimported = Mnemonic::from_phrase(generated.phrase()).unwrap();
        assert_eq!(*generated.to_seed(""), *reimported.to_seed(""));
        assert_eq!(generated.word_count(), reimported.word_count());
    }

    #[test]
    fn test_seed_is_deterministic_and_passphrase_sensitive() {
        let m = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        assert_eq!(*m.to_seed("x"), *m.to_seed("x"));
        assert_ne!(*m.to_seed(""), *m.to_seed("x"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        // Replacing any word with a non-wordlist token must fail
        // validation. (Swapping in another valid word can by chance keep
        // the checksum intact, so the deterministic tests cover that case
        // with fixed vectors instead.)
        #[test]
        fn prop_corrupted_word_rejected(pos in 0usize..12) {
            let m = Mnemonic::generate(Strength::Bits128).unwrap();
            let mut words: Vec<&str> = m.phrase().split_whitespace().collect();
            words[pos] = "qqqq";
            prop_assert!(!Mnemonic::validate(&words.join(" ")));
        }
    }

    #[test]
    fn test_debug_redacts_phrase() {
        let m = Mnemonic::from_phrase(VECTOR_PHRASE).unwrap();
        let rendered = format!("{:?}", m);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("abandon"));
    }
}
