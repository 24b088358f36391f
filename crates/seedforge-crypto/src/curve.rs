//! Pluggable secp256k1 curve capability.
//!
//! Child-key tweaking in BIP-32 needs exactly four operations: scalar
//! validity, scalar multiplication by the generator, scalar addition mod n
//! and point-plus-tweak addition. They are exposed behind the [`Curve`]
//! trait so key-derivation logic can be driven by a deterministic stub
//! backend in tests, while production code uses [`Secp256k1Curve`].

use crate::error::CryptoError;
use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};

/// Elliptic-curve operations over secp256k1 required for key derivation.
///
/// Keys cross this boundary as raw bytes: 32-byte big-endian scalars and
/// 33-byte compressed points. Implementations must be constant time with
/// respect to secret scalar bits.
pub trait Curve {
    /// Compressed public point `k·G` for the scalar `k`.
    fn public_from_scalar(&self, scalar: &[u8; 32]) -> Result<[u8; 33], CryptoError>;

    /// `(scalar + tweak) mod n`.
    ///
    /// Fails with [`CryptoError::TweakOutOfRange`] when `tweak >= n` or the
    /// sum is zero, both invalid as private keys.
    fn scalar_tweak_add(
        &self,
        scalar: &[u8; 32],
        tweak: &[u8; 32],
    ) -> Result<[u8; 32], CryptoError>;

    /// `P + tweak·G`, compressed.
    ///
    /// Fails with [`CryptoError::TweakOutOfRange`] when `tweak >= n` or the
    /// result is the point at infinity.
    fn point_tweak_add(
        &self,
        point: &[u8; 33],
        tweak: &[u8; 32],
    ) -> Result<[u8; 33], CryptoError>;

    /// Whether `1 <= k < n`.
    fn is_valid_scalar(&self, scalar: &[u8; 32]) -> bool;

    /// Whether the bytes encode a valid compressed curve point.
    fn is_valid_point(&self, point: &[u8; 33]) -> bool;
}

/// Production backend over the secp256k1 library.
pub struct Secp256k1Curve {
    secp: Secp256k1<secp256k1::All>,
}

impl Secp256k1Curve {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for Secp256k1Curve {
    fn default() -> Self {
        Self::new()
    }
}

impl Curve for Secp256k1Curve {
    fn public_from_scalar(&self, scalar: &[u8; 32]) -> Result<[u8; 33], CryptoError> {
        let sk = SecretKey::from_slice(scalar).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(PublicKey::from_secret_key(&self.secp, &sk).serialize())
    }

    fn scalar_tweak_add(
        &self,
        scalar: &[u8; 32],
        tweak: &[u8; 32],
    ) -> Result<[u8; 32], CryptoError> {
        let sk = SecretKey::from_slice(scalar).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let tweak =
            Scalar::from_be_bytes(*tweak).map_err(|_| CryptoError::TweakOutOfRange)?;
        // add_tweak fails only when the sum is zero mod n
        let child = sk
            .add_tweak(&tweak)
            .map_err(|_| CryptoError::TweakOutOfRange)?;
        Ok(child.secret_bytes())
    }

    fn point_tweak_add(
        &self,
        point: &[u8; 33],
        tweak: &[u8; 32],
    ) -> Result<[u8; 33], CryptoError> {
        let pk = PublicKey::from_slice(point).map_err(|_| CryptoError::InvalidPublicKey)?;
        let tweak =
            Scalar::from_be_bytes(*tweak).map_err(|_| CryptoError::TweakOutOfRange)?;
        let child = pk
            .add_exp_tweak(&self.secp, &tweak)
            .map_err(|_| CryptoError::TweakOutOfRange)?;
        Ok(child.serialize())
    }

    fn is_valid_scalar(&self, scalar: &[u8; 32]) -> bool {
        SecretKey::from_slice(scalar).is_ok()
    }

    fn is_valid_point(&self, point: &[u8; 33]) -> bool {
        PublicKey::from_slice(point).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// secp256k1 group order n, big-endian
    const ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    fn scalar(n: u8) -> [u8; 32] {
        let mut s = [0u8; 32];
        s[31] = n;
        s
    }

    #[test]
    fn test_public_from_scalar_generator() {
        let curve = Secp256k1Curve::new();
        let pk = curve.public_from_scalar(&scalar(1)).unwrap();
        assert_eq!(
            hex::encode(pk),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_scalar_tweak_add() {
        let curve = Secp256k1Curve::new();
        let two = curve.scalar_tweak_add(&scalar(1), &scalar(1)).unwrap();
        assert_eq!(two, scalar(2));

        assert_eq!(
            hex::encode(curve.public_from_scalar(&two).unwrap()),
            "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
    }

    #[test]
    fn test_point_tweak_add_matches_scalar_path() {
        let curve = Secp256k1Curve::new();
        let p1 = curve.public_from_scalar(&scalar(1)).unwrap();
        let p2 = curve.point_tweak_add(&p1, &scalar(1)).unwrap();
        assert_eq!(p2, curve.public_from_scalar(&scalar(2)).unwrap());
    }

    #[test]
    fn test_tweak_out_of_range() {
        let curve = Secp256k1Curve::new();
        let order: [u8; 32] = hex::decode(ORDER).unwrap().try_into().unwrap();

        assert_eq!(
            curve.scalar_tweak_add(&scalar(1), &order).unwrap_err(),
            CryptoError::TweakOutOfRange
        );
        let p1 = curve.public_from_scalar(&scalar(1)).unwrap();
        assert_eq!(
            curve.point_tweak_add(&p1, &order).unwrap_err(),
            CryptoError::TweakOutOfRange
        );
    }

    #[test]
    fn test_scalar_validity_bounds() {
        let curve = Secp256k1Curve::new();
        let order: [u8; 32] = hex::decode(ORDER).unwrap().try_into().unwrap();
        let mut order_minus_one = order;
        order_minus_one[31] -= 1;

        assert!(!curve.is_valid_scalar(&scalar(0)));
        assert!(curve.is_valid_scalar(&scalar(1)));
        assert!(curve.is_valid_scalar(&order_minus_one));
        assert!(!curve.is_valid_scalar(&order));
    }

    #[test]
    fn test_invalid_point_rejected() {
        let curve = Secp256k1Curve::new();
        let mut not_a_point = [0u8; 33];
        not_a_point[0] = 0x02;
        assert!(!curve.is_valid_point(&not_a_point));
        assert_eq!(
            curve.point_tweak_add(&not_a_point, &scalar(1)).unwrap_err(),
            CryptoError::InvalidPublicKey
        );

        let real = curve.public_from_scalar(&scalar(1)).unwrap();
        assert!(curve.is_valid_point(&real));
    }
}
