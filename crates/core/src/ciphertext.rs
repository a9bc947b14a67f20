// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{ContextId, KeyTag, Provenance};
use hecc_ring::RingElement;
use serde::{Deserialize, Serialize};

/// How a plaintext was packed before encryption.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EncodingType {
    CoefPacked,
    Packed,
    String,
    /// Packed approximate (floating point) encoding
    CkksPacked,
}

impl EncodingType {
    pub fn is_packed_real(&self) -> bool {
        matches!(self, EncodingType::CkksPacked)
    }
}

/// Scheme metadata that drives decoding of packed real plaintexts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CiphertextMetadata {
    pub noise_scale_degree: usize,
    pub level: usize,
    pub scaling_factor: f64,
    pub slots: usize,
}

impl Default for CiphertextMetadata {
    fn default() -> Self {
        Self {
            noise_scale_degree: 1,
            level: 0,
            scaling_factor: 1.0,
            slots: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ciphertext<E> {
    context: ContextId,
    tag: KeyTag,
    encoding: EncodingType,
    elements: Vec<E>,
    metadata: CiphertextMetadata,
}

impl<E> Ciphertext<E> {
    pub fn new(context: ContextId, tag: KeyTag, encoding: EncodingType, elements: Vec<E>) -> Self {
        Self {
            context,
            tag,
            encoding,
            elements,
            metadata: CiphertextMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: CiphertextMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn encoding(&self) -> EncodingType {
        self.encoding
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<E> {
        &mut self.elements
    }

    pub fn metadata(&self) -> &CiphertextMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut CiphertextMetadata {
        &mut self.metadata
    }
}

impl<E: RingElement> Ciphertext<E> {
    /// Number of CRT limbs currently held by the first ring element.
    pub fn limb_count(&self) -> usize {
        self.elements.first().map_or(0, |e| e.limb_count())
    }
}

impl<E> Provenance for Ciphertext<E> {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn key_tag(&self) -> &KeyTag {
        &self.tag
    }
}
