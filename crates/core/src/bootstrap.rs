// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Ciphertext, EvalKeyMap, KeyMaterialMap, SchemeBackend, SecretKey};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Levels consumed by the encoding and decoding linear transforms
    pub level_budget: [u32; 2],
    /// Baby-step dimensions of the two transforms, 0 picks a default
    pub dim1: [u32; 2],
    /// 0 means fully packed
    pub num_slots: u32,
    pub correction_factor: u32,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            level_budget: [5, 4],
            dim1: [0, 0],
            num_slots: 0,
            correction_factor: 0,
        }
    }
}

/// Backends that can refresh ciphertexts.
///
/// Bootstrap keys are rotation keys: the context merges them into the same
/// automorphism store used by `eval_at_index`.
pub trait Bootstrapping: SchemeBackend {
    fn bootstrap_setup(&mut self, config: &BootstrapConfig) -> Result<()>;

    fn bootstrap_key_gen(
        &self,
        sk: &SecretKey<Self::Element>,
        num_slots: u32,
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    fn bootstrap(
        &self,
        ct: &Ciphertext<Self::Element>,
        keys: &EvalKeyMap<Self::KeyMaterial>,
        num_iterations: u32,
        precision: u32,
    ) -> Result<Ciphertext<Self::Element>>;
}
