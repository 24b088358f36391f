//! BIP-32 extended keys: master-from-seed, child derivation, Base58 codec.
//!
//! Private and public extended keys are distinct types. A private key can
//! always produce its public counterpart; hardened children exist only on
//! the private side. Curve arithmetic is supplied by the caller through the
//! [`Curve`] capability, so derivation logic is independent of the backend.

use crate::error::Bip32Error;
use crate::path::{ChildNumber, DerivationPath};
use seedforge_crypto::{hash160, hmac_sha512, Curve, CryptoError};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Mainnet version bytes for serialized extended private keys (xprv).
pub const VERSION_MAINNET_PRIVATE: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
/// Mainnet version bytes for serialized extended public keys (xpub).
pub const VERSION_MAINNET_PUBLIC: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// HMAC key for master key derivation, per BIP-32.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// An extended private key: a secret scalar plus chain code and the
/// metadata needed for serialization. Secret material is zeroized on drop.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
    chain_code: [u8; 32],
    key: [u8; 32],
}

/// An extended public key: a compressed point plus chain code. Supports
/// normal (non-hardened) child derivation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: ChildNumber,
    chain_code: [u8; 32],
    key: [u8; 33],
}

/// Terminal artifact of a derivation path: one secp256k1 key pair.
/// The secret half is zeroized on drop.
pub struct KeyPair {
    secret: [u8; 32],
    public: [u8; 33],
}

impl ExtendedPrivateKey {
    /// Derive the master key from a BIP-39 seed (16 to 64 bytes).
    ///
    /// HMAC-SHA512 keyed with "Bitcoin seed"; the left half must be a valid
    /// scalar. An out-of-range left half is a fatal [`Bip32Error::InvalidMasterKey`]
    /// (probability ~2^-127, not worth a retry loop).
    pub fn from_seed<C: Curve>(curve: &C, seed: &[u8]) -> Result<Self, Bip32Error> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(Bip32Error::InvalidSeedLength(seed.len()));
        }

        let mut i = hmac_sha512(MASTER_HMAC_KEY, seed);
        let mut key = [0u8; 32];
        key.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        if !curve.is_valid_scalar(&key) {
            key.zeroize();
            return Err(Bip32Error::InvalidMasterKey);
        }

        Ok(Self {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber::from_bits(0),
            chain_code,
            key,
        })
    }

    /// Compressed public key for this node.
    pub fn public_key<C: Curve>(&self, curve: &C) -> Result<[u8; 33], Bip32Error> {
        Ok(curve.public_from_scalar(&self.key)?)
    }

    /// First four bytes of HASH160 of the compressed public key.
    pub fn fingerprint<C: Curve>(&self, curve: &C) -> Result<[u8; 4], Bip32Error> {
        let hash = hash160(&self.public_key(curve)?);
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&hash[..4]);
        Ok(fp)
    }

    /// The public extended key for this node.
    pub fn to_public<C: Curve>(&self, curve: &C) -> Result<ExtendedPublicKey, Bip32Error> {
        Ok(ExtendedPublicKey {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
            key: self.public_key(curve)?,
        })
    }

    /// Derive one child key (CKDpriv).
    ///
    /// Hardened children commit to the parent private key, normal children
    /// to the parent public key. When the HMAC left half falls outside the
    /// curve order or the child scalar is zero, the index is unusable and a
    /// distinct [`Bip32Error::DerivationRetry`] is returned; per BIP-32 the
    /// caller may proceed to the next index. No retry happens internally.
    pub fn derive_child<C: Curve>(
        &self,
        curve: &C,
        child: ChildNumber,
    ) -> Result<Self, Bip32Error> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(Bip32Error::DepthOverflow)?;

        let mut data = Zeroizing::new(Vec::with_capacity(37));
        if child.is_hardened() {
            data.push(0u8);
            data.extend_from_slice(&self.key);
        } else {
            data.extend_from_slice(&self.public_key(curve)?);
        }
        data.extend_from_slice(&child.to_bits().to_be_bytes());

        let mut i = hmac_sha512(&self.chain_code, &data);
        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let key = curve.scalar_tweak_add(&self.key, &il).map_err(|e| match e {
            CryptoError::TweakOutOfRange => Bip32Error::DerivationRetry {
                index: child.index(),
            },
            other => Bip32Error::Crypto(other),
        });
        il.zeroize();

        Ok(Self {
            depth,
            parent_fingerprint: self.fingerprint(curve)?,
            child_number: child,
            chain_code,
            key: key?,
        })
    }

    /// Fold [`Self::derive_child`] over a path, left to right.
    ///
    /// Fails on the first bad segment, wrapping the cause with the segment
    /// position so callers can tell which step broke.
    pub fn derive_path<C: Curve>(
        &self,
        curve: &C,
        path: &DerivationPath,
    ) -> Result<Self, Bip32Error> {
        let mut node = self.clone();
        for (segment, child) in path.into_iter().enumerate() {
            node = node
                .derive_child(curve, *child)
                .map_err(|e| Bip32Error::Segment {
                    segment,
                    source: Box::new(e),
                })?;
        }
        Ok(node)
    }

    /// Extract the terminal key pair.
    pub fn key_pair<C: Curve>(&self, curve: &C) -> Result<KeyPair, Bip32Error> {
        Ok(KeyPair {
            secret: self.key,
            public: self.public_key(curve)?,
        })
    }

    /// Serialize to the 78-byte BIP-32 layout plus Base58Check.
    pub fn to_base58(&self) -> String {
        let mut key_data = [0u8; 33];
        key_data[1..].copy_from_slice(&self.key);
        let encoded = encode_extended(
            VERSION_MAINNET_PRIVATE,
            self.depth,
            self.parent_fingerprint,
            self.child_number.to_bits(),
            &self.chain_code,
            &key_data,
        );
        key_data.zeroize();
        encoded
    }

    /// Parse a mainnet xprv string, verifying checksum, version, length,
    /// key-data validity and root-node consistency.
    pub fn from_base58<C: Curve>(curve: &C, s: &str) -> Result<Self, Bip32Error> {
        let data = decode_extended(s)?;
        if data[0..4] != VERSION_MAINNET_PRIVATE {
            return Err(Bip32Error::UnknownVersion(hex::encode(&data[0..4])));
        }

        let (depth, parent_fingerprint, child_number, chain_code) = parse_metadata(&data)?;

        // Private key data is 0x00 followed by the 32-byte scalar
        if data[45] != 0 {
            return Err(Bip32Error::InvalidKeyData);
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&data[46..78]);
        if !curve.is_valid_scalar(&key) {
            key.zeroize();
            return Err(Bip32Error::InvalidKeyData);
        }

        Ok(Self {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            key,
        })
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Raw secret scalar. Handle with care.
    #[inline]
    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl Drop for ExtendedPrivateKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.chain_code.zeroize();
    }
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl ExtendedPublicKey {
    /// Derive one normal child key (CKDpub): child point = parent + IL·G.
    ///
    /// Hardened derivation needs the parent private key and fails here with
    /// [`Bip32Error::HardenedFromPublic`]. An out-of-range HMAC left half
    /// surfaces as [`Bip32Error::DerivationRetry`], same as on the private side.
    pub fn derive_child<C: Curve>(
        &self,
        curve: &C,
        child: ChildNumber,
    ) -> Result<Self, Bip32Error> {
        if child.is_hardened() {
            return Err(Bip32Error::HardenedFromPublic);
        }
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(Bip32Error::DepthOverflow)?;

        let mut data = Vec::with_capacity(37);
        data.extend_from_slice(&self.key);
        data.extend_from_slice(&child.to_bits().to_be_bytes());

        let i = hmac_sha512(&self.chain_code, &data);
        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        let key = curve.point_tweak_add(&self.key, &il).map_err(|e| match e {
            CryptoError::TweakOutOfRange => Bip32Error::DerivationRetry {
                index: child.index(),
            },
            other => Bip32Error::Crypto(other),
        })?;

        Ok(Self {
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
            chain_code,
            key,
        })
    }

    /// Fold [`Self::derive_child`] over a path of normal segments.
    pub fn derive_path<C: Curve>(
        &self,
        curve: &C,
        path: &DerivationPath,
    ) -> Result<Self, Bip32Error> {
        let mut node = self.clone();
        for (segment, child) in path.into_iter().enumerate() {
            node = node
                .derive_child(curve, *child)
                .map_err(|e| Bip32Error::Segment {
                    segment,
                    source: Box::new(e),
                })?;
        }
        Ok(node)
    }

    /// First four bytes of HASH160 of the compressed public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = hash160(&self.key);
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&hash[..4]);
        fp
    }

    /// Serialize to the 78-byte BIP-32 layout plus Base58Check.
    pub fn to_base58(&self) -> String {
        encode_extended(
            VERSION_MAINNET_PUBLIC,
            self.depth,
            self.parent_fingerprint,
            self.child_number.to_bits(),
            &self.chain_code,
            &self.key,
        )
    }

    /// Parse a mainnet xpub string, verifying checksum, version, length,
    /// point validity and root-node consistency.
    pub fn from_base58<C: Curve>(curve: &C, s: &str) -> Result<Self, Bip32Error> {
        let data = decode_extended(s)?;
        if data[0..4] != VERSION_MAINNET_PUBLIC {
            return Err(Bip32Error::UnknownVersion(hex::encode(&data[0..4])));
        }

        let (depth, parent_fingerprint, child_number, chain_code) = parse_metadata(&data)?;

        let mut key = [0u8; 33];
        key.copy_from_slice(&data[45..78]);
        if !curve.is_valid_point(&key) {
            return Err(Bip32Error::InvalidKeyData);
        }

        Ok(Self {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            key,
        })
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    #[inline]
    pub fn public_bytes(&self) -> &[u8; 33] {
        &self.key
    }
}

impl KeyPair {
    #[inline]
    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    #[inline]
    pub fn public_bytes(&self) -> &[u8; 33] {
        &self.public
    }

    /// 64-char lowercase hex of the secret scalar.
    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret)
    }

    /// 66-char lowercase hex of the compressed public key.
    pub fn public_hex(&self) -> String {
        hex::encode(self.public)
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public_hex())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// 78-byte layout: version(4) ‖ depth(1) ‖ fingerprint(4) ‖ child(4,BE)
/// ‖ chain code(32) ‖ key data(33), followed by a 4-byte double-SHA256
/// checksum, Base58-encoded.
fn encode_extended(
    version: [u8; 4],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_bits: u32,
    chain_code: &[u8; 32],
    key_data: &[u8; 33],
) -> String {
    let mut payload = Zeroizing::new(Vec::with_capacity(78));
    payload.extend_from_slice(&version);
    payload.push(depth);
    payload.extend_from_slice(&parent_fingerprint);
    payload.extend_from_slice(&child_bits.to_be_bytes());
    payload.extend_from_slice(chain_code);
    payload.extend_from_slice(key_data);
    bs58::encode(payload.as_slice()).with_check().into_string()
}

fn decode_extended(s: &str) -> Result<Vec<u8>, Bip32Error> {
    let data = bs58::decode(s)
        .with_check(None)
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidChecksum { .. } => Bip32Error::BadChecksum,
            other => Bip32Error::InvalidBase58(other.to_string()),
        })?;
    if data.len() != 78 {
        return Err(Bip32Error::InvalidLength(data.len()));
    }
    Ok(data)
}

/// Common metadata fields; rejects a root-depth key carrying a parent
/// fingerprint or child number.
fn parse_metadata(data: &[u8]) -> Result<(u8, [u8; 4], ChildNumber, [u8; 32]), Bip32Error> {
    let depth = data[4];
    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&data[5..9]);
    let child_bits = u32::from_be_bytes([data[9], data[10], data[11], data[12]]);

    if depth == 0 && (parent_fingerprint != [0u8; 4] || child_bits != 0) {
        return Err(Bip32Error::InvalidKeyData);
    }

    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&data[13..45]);

    Ok((
        depth,
        parent_fingerprint,
        ChildNumber::from_bits(child_bits),
        chain_code,
    ))
}
