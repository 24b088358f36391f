//! Bitcoin address encodings of a compressed public key.
//!
//! Both encoders hash the key with HASH160 and are pure functions of their
//! input. Anything other than a 33-byte compressed key (0x02/0x03 prefix)
//! is rejected up front; a 65-byte uncompressed key never slips through.

use crate::error::AddressError;
use bech32::Hrp;
use seedforge_crypto::hash160;

/// Mainnet P2PKH version byte.
pub const P2PKH_VERSION_MAINNET: u8 = 0x00;
/// Mainnet segwit human-readable part.
pub const SEGWIT_HRP_MAINNET: &str = "bc";

fn check_compressed(pubkey: &[u8]) -> Result<(), AddressError> {
    if pubkey.len() != 33 || !matches!(pubkey[0], 0x02 | 0x03) {
        return Err(AddressError::InvalidPublicKey);
    }
    Ok(())
}

/// Legacy pay-to-pubkey-hash address: Base58Check of
/// `version ‖ HASH160(pubkey)`.
pub fn p2pkh(pubkey: &[u8], version: u8) -> Result<String, AddressError> {
    check_compressed(pubkey)?;

    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(&hash160(pubkey));
    Ok(bs58::encode(payload).with_check().into_string())
}

/// Native segwit v0 pay-to-witness-pubkey-hash address: the 20-byte
/// HASH160 witness program in Bech32 per BIP-173.
pub fn p2wpkh(pubkey: &[u8], hrp: &str) -> Result<String, AddressError> {
    check_compressed(pubkey)?;

    let hrp = Hrp::parse(hrp).map_err(|e| AddressError::InvalidHrp(e.to_string()))?;
    bech32::segwit::encode_v0(hrp, &hash160(pubkey))
        .map_err(|e| AddressError::Encoding(e.to_string()))
}
