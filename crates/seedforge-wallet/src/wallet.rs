//! HD wallet facade: mnemonic in, Bitcoin key pairs and addresses out.

use crate::address;
use crate::error::WalletError;
use crate::extended_key::ExtendedPrivateKey;
use crate::path::{ChildNumber, DerivationPath};
use seedforge_crypto::{Mnemonic, Secp256k1Curve, Strength};

/// Account-level derivation path for Bitcoin external-chain keys; the leaf
/// index is appended per call.
pub const BITCOIN_ACCOUNT_PATH: &str = "m/44'/0'/0'/0";

/// Seed phrase sizes supported for wallet creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPhraseSize {
    Twelve,
    TwentyFour,
}

impl SeedPhraseSize {
    pub const fn word_count(self) -> usize {
        match self {
            SeedPhraseSize::Twelve => 12,
            SeedPhraseSize::TwentyFour => 24,
        }
    }

    const fn strength(self) -> Strength {
        match self {
            SeedPhraseSize::Twelve => Strength::Bits128,
            SeedPhraseSize::TwentyFour => Strength::Bits256,
        }
    }
}

/// Output record of one Bitcoin child derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitcoinWallet {
    /// 64-char hex of the private scalar
    pub private_key: String,
    /// 66-char hex of the compressed public key
    pub public_key: String,
    /// Legacy address
    pub p2pkh_address: String,
    /// Native segwit v0 address
    pub p2wpkh_address: String,
}

/// An HD wallet rooted in a BIP-39 mnemonic.
///
/// Holds the mnemonic and the master key in its Base58 form; each child
/// derivation rehydrates the master key through the codec. Stateless
/// across calls otherwise.
pub struct HdWallet {
    mnemonic: Mnemonic,
    master_xprv: String,
    curve: Secp256k1Curve,
}

impl std::fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdWallet")
            .field("mnemonic", &self.mnemonic)
            .field("master_xprv", &"<redacted>")
            .finish()
    }
}

impl HdWallet {
    /// Create a wallet with a freshly generated mnemonic.
    pub fn generate(size: SeedPhraseSize) -> Result<Self, WalletError> {
        Self::with_phrase(size, None)
    }

    /// Create a wallet, optionally from a caller-supplied phrase.
    ///
    /// The override is accepted only when it passes BIP-39 validation and
    /// its word count matches `size`. Otherwise a fresh mnemonic is
    /// generated instead — deliberately, matching the behavior of the tool
    /// this library grew out of; the rejection is logged, never an error.
    /// Callers that need override-or-fail should validate with
    /// [`Mnemonic::from_phrase`] first.
    pub fn with_phrase(size: SeedPhraseSize, phrase: Option<&str>) -> Result<Self, WalletError> {
        let mnemonic = match phrase {
            Some(supplied) => match Mnemonic::from_phrase(supplied) {
                Ok(m) if m.word_count() == size.word_count() => m,
                Ok(m) => {
                    tracing::warn!(
                        expected = size.word_count(),
                        got = m.word_count(),
                        "supplied phrase has the wrong word count, generating a fresh mnemonic"
                    );
                    Mnemonic::generate(size.strength())?
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "supplied phrase failed validation, generating a fresh mnemonic"
                    );
                    Mnemonic::generate(size.strength())?
                }
            },
            None => Mnemonic::generate(size.strength())?,
        };

        let curve = Secp256k1Curve::new();
        let seed = mnemonic.to_seed("");
        let master = ExtendedPrivateKey::from_seed(&curve, &seed[..])?;

        Ok(Self {
            mnemonic,
            master_xprv: master.to_base58(),
            curve,
        })
    }

    /// The wallet's mnemonic.
    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    /// The master extended private key, Base58-serialized.
    pub fn master_xprv(&self) -> &str {
        &self.master_xprv
    }

    /// Derive the Bitcoin key pair and addresses at
    /// `m/44'/0'/0'/0/<index>`.
    pub fn derive_bitcoin(&self, index: u32) -> Result<BitcoinWallet, WalletError> {
        let master = ExtendedPrivateKey::from_base58(&self.curve, &self.master_xprv)?;

        let mut path: DerivationPath = BITCOIN_ACCOUNT_PATH
            .parse()
            .map_err(WalletError::from)?;
        path.push(ChildNumber::normal(index)?);

        let leaf = master.derive_path(&self.curve, &path)?;
        let pair = leaf.key_pair(&self.curve)?;
        tracing::debug!(%path, "derived bitcoin child wallet");

        Ok(BitcoinWallet {
            private_key: pair.secret_hex(),
            public_key: pair.public_hex(),
            p2pkh_address: address::p2pkh(pair.public_bytes(), address::P2PKH_VERSION_MAINNET)?,
            p2wpkh_address: address::p2wpkh(pair.public_bytes(), address::SEGWIT_HRP_MAINNET)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR_PHRASE: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    #[test]
    fn test_end_to_end_vector() {
        let wallet = HdWallet::with_phrase(SeedPhraseSize::Twelve, Some(VECTOR_PHRASE)).unwrap();
        assert_eq!(wallet.mnemonic().phrase(), VECTOR_PHRASE);
        assert_eq!(
            wallet.master_xprv(),
            "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu"
        );

        let child = wallet.derive_bitcoin(0).unwrap();
        assert_eq!(
            child.private_key,
            "e284129cc0922579a535bbf4d1a3b25773090d28c909bc0fed73b5e0222cc372"
        );
        assert_eq!(
            child.public_key,
            "03aaeb52dd7494c361049de67cc680e83ebcbbbdbeb13637d92cd845f70308af5e"
        );
        assert_eq!(child.p2pkh_address, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
        assert_eq!(
            child.p2wpkh_address,
            "bc1qmxrw6qdh5g3ztfcwm0et5l8mvws4eva24kmp8m"
        );
    }

    #[test]
    fn test_generate_sizes() {
        let w12 = HdWallet::generate(SeedPhraseSize::Twelve).unwrap();
        assert_eq!(w12.mnemonic().word_count(), 12);

        let w24 = HdWallet::generate(SeedPhraseSize::TwentyFour).unwrap();
        assert_eq!(w24.mnemonic().word_count(), 24);
        assert!(w24.master_xprv().starts_with("xprv"));
    }

    #[test]
    fn test_override_fallback_on_invalid_phrase() {
        let wallet =
            HdWallet::with_phrase(SeedPhraseSize::Twelve, Some("definitely not a mnemonic"))
                .unwrap();
        // Fell back to a fresh 12-word mnemonic
        assert_eq!(wallet.mnemonic().word_count(), 12);
        assert_ne!(wallet.mnemonic().phrase(), "definitely not a mnemonic");
    }

    #[test]
    fn test_override_fallback_on_size_mismatch() {
        // Valid 12-word phrase supplied where 24 words were requested
        let wallet =
            HdWallet::with_phrase(SeedPhraseSize::TwentyFour, Some(VECTOR_PHRASE)).unwrap();
        assert_eq!(wallet.mnemonic().word_count(), 24);
        assert_ne!(wallet.mnemonic().phrase(), VECTOR_PHRASE);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let wallet = HdWallet::with_phrase(SeedPhraseSize::Twelve, Some(VECTOR_PHRASE)).unwrap();
        let printed = format!("{:?}", wallet);
        assert!(!printed.contains("abandon"));
        assert!(!printed.contains("xprv9s21ZrQH143K"));
    }

    #[test]
    fn test_multi_address_indices_differ() {
        let wallet = HdWallet::with_phrase(SeedPhraseSize::Twelve, Some(VECTOR_PHRASE)).unwrap();
        let first = wallet.derive_bitcoin(0).unwrap();
        let second = wallet.derive_bitcoin(1).unwrap();

        assert_ne!(first.private_key, second.private_key);
        assert_ne!(first.p2pkh_address, second.p2pkh_address);
        assert_ne!(first.p2wpkh_address, second.p2wpkh_address);

        // Same index is reproducible
        assert_eq!(wallet.derive_bitcoin(0).unwrap(), first);
    }
}
