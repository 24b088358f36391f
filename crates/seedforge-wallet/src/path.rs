//! BIP-32 derivation paths.
//!
//! A path is an ordered sequence of child numbers, each an index below
//! 2^31 plus a hardened flag. Apostrophe notation marks hardened segments:
//! `m/44'/0'/0'/0/0`.

use crate::error::Bip32Error;
use std::fmt;
use std::str::FromStr;

/// Offset separating hardened from normal indices in serialized form.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A single path segment: index in `[0, 2^31)` plus hardened flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNumber {
    index: u32,
    hardened: bool,
}

impl ChildNumber {
    pub fn new(index: u32, hardened: bool) -> Result<Self, Bip32Error> {
        if index >= HARDENED_OFFSET {
            return Err(Bip32Error::InvalidPath(format!(
                "index {} out of range",
                index
            )));
        }
        Ok(Self { index, hardened })
    }

    pub fn normal(index: u32) -> Result<Self, Bip32Error> {
        Self::new(index, false)
    }

    pub fn hardened(index: u32) -> Result<Self, Bip32Error> {
        Self::new(index, true)
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// The 32-bit serialized form: top bit set means hardened.
    #[inline]
    pub fn to_bits(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }

    /// Rebuild from the 32-bit serialized form.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            index: bits & !HARDENED_OFFSET,
            hardened: bits & HARDENED_OFFSET != 0,
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix('\'') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let index: u32 = digits
            .parse()
            .map_err(|_| Bip32Error::InvalidPath(format!("invalid segment {:?}", s)))?;
        Self::new(index, hardened)
    }
}

/// An ordered derivation path, e.g. `m/44'/0'/0'/0/0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn new(segments: Vec<ChildNumber>) -> Self {
        Self(segments)
    }

    pub fn push(&mut self, child: ChildNumber) {
        self.0.push(child);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.0 {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(Bip32Error::InvalidPath(format!(
                "path must start with 'm': {:?}",
                s
            )));
        }
        let segments = parts
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(segments))
    }
}
