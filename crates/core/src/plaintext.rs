// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{CiphertextMetadata, EncodingType};
use num_bigint::BigUint;

/// Numeric representation used to reduce and decode a decryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DecodePath {
    /// Multi-limb, CRT-composed coefficients
    Wide,
    /// Single machine-word coefficients
    Native,
}

/// Raw decrypted coefficients written by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PlaintextElement {
    #[default]
    Unset,
    Wide(Vec<BigUint>),
    Native(Vec<u64>),
}

/// Values produced by the final decode step.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedValues {
    Integers(Vec<i64>),
    Reals(Vec<f64>),
    Text(String),
}

/// Outcome of a decryption that did not hit a hard error.
///
/// `is_valid == false` is a normal return: the plaintext is left unfinished
/// and callers must check the flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecryptResult {
    pub is_valid: bool,
    pub scaling_factor_int: u64,
}

impl DecryptResult {
    pub fn valid(scaling_factor_int: u64) -> Self {
        Self {
            is_valid: true,
            scaling_factor_int,
        }
    }

    pub fn invalid() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plaintext {
    encoding: EncodingType,
    path: DecodePath,
    element: PlaintextElement,
    scaling_factor_int: u64,
    metadata: Option<CiphertextMetadata>,
    values: Option<DecodedValues>,
}

impl Plaintext {
    /// Empty plaintext ready to receive a decryption.
    pub fn for_decrypt(encoding: EncodingType, path: DecodePath) -> Self {
        Self {
            encoding,
            path,
            element: PlaintextElement::Unset,
            scaling_factor_int: 1,
            metadata: None,
            values: None,
        }
    }

    /// Plaintext holding already decoded values, e.g. for a plaintext operand.
    pub fn from_values(encoding: EncodingType, values: DecodedValues) -> Self {
        Self {
            values: Some(values),
            ..Self::for_decrypt(encoding, DecodePath::Native)
        }
    }

    pub fn encoding(&self) -> EncodingType {
        self.encoding
    }

    pub fn path(&self) -> DecodePath {
        self.path
    }

    pub fn element(&self) -> &PlaintextElement {
        &self.element
    }

    pub fn set_element(&mut self, element: PlaintextElement) {
        self.element = element;
    }

    pub fn scaling_factor_int(&self) -> u64 {
        self.scaling_factor_int
    }

    pub fn set_scaling_factor_int(&mut self, value: u64) {
        self.scaling_factor_int = value;
    }

    /// Packed-real metadata copied from the decrypted ciphertext.
    pub fn metadata(&self) -> Option<&CiphertextMetadata> {
        self.metadata.as_ref()
    }

    pub fn set_metadata(&mut self, metadata: CiphertextMetadata) {
        self.metadata = Some(metadata);
    }

    pub fn values(&self) -> Option<&DecodedValues> {
        self.values.as_ref()
    }

    pub fn set_values(&mut self, values: DecodedValues) {
        self.values = Some(values);
    }

    pub fn is_decoded(&self) -> bool {
        self.values.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_plaintext_is_unfinished() {
        let pt = Plaintext::for_decrypt(EncodingType::Packed, DecodePath::Native);
        assert_eq!(pt.element(), &PlaintextElement::Unset);
        assert!(!pt.is_decoded());
        assert!(pt.metadata().is_none());
        assert!(!DecryptResult::invalid().is_valid);
        assert!(DecryptResult::valid(4).is_valid);
    }
}
