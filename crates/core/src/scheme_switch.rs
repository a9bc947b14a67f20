// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Ciphertext, EvalKeyMap, KeyMaterialMap, KeyPair, PublicKey, SchemeBackend};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LweSecurityLevel {
    Toy,
    #[default]
    Std128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSetupParams {
    pub security_level: LweSecurityLevel,
    /// Large plaintext space for arbitrary function evaluation
    pub arbitrary_function: bool,
    pub log_q: u32,
    pub dynamic: bool,
    /// 0 means fully packed
    pub num_slots_ckks: u32,
}

impl Default for SwitchSetupParams {
    fn default() -> Self {
        Self {
            security_level: LweSecurityLevel::Std128,
            arbitrary_function: false,
            log_q: 25,
            dynamic: false,
            num_slots_ckks: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchKeyGenParams {
    pub dim1_cf: u32,
    pub dim1_fc: u32,
    pub num_values: u32,
    pub one_hot: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FhewToCkksParams {
    pub prescale: f64,
    pub num_ciphertexts: u32,
    pub num_slots: u32,
    pub plaintext_modulus: u32,
    pub pmin: f64,
    pub pmax: f64,
}

impl Default for FhewToCkksParams {
    fn default() -> Self {
        Self {
            prescale: 1.0,
            num_ciphertexts: 0,
            num_slots: 0,
            plaintext_modulus: 4,
            pmin: 0.0,
            pmax: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompareParams {
    pub num_ciphertexts: u32,
    pub num_slots: u32,
    pub plaintext_modulus: u32,
    pub scale_sign: f64,
}

impl Default for CompareParams {
    fn default() -> Self {
        Self {
            num_ciphertexts: 0,
            num_slots: 0,
            plaintext_modulus: 0,
            scale_sign: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArgminParams {
    pub num_values: u32,
    pub num_slots: u32,
    /// Return the position as a one-hot vector instead of an index
    pub one_hot: bool,
    pub plaintext_modulus: u32,
    pub scale_sign: f64,
}

impl Default for ArgminParams {
    fn default() -> Self {
        Self {
            num_values: 0,
            num_slots: 0,
            one_hot: true,
            plaintext_modulus: 0,
            scale_sign: 1.0,
        }
    }
}

/// Backends that can switch between packed approximate ciphertexts and LWE
/// (FHEW) ciphertexts.
///
/// Every key generation variant returns rotation keys that the context merges
/// into the shared automorphism store.
pub trait SchemeSwitching: SchemeBackend {
    type LweContext: Clone + Debug + Send + Sync;
    type LweSecretKey: Clone + Debug + Send + Sync;
    type LweCiphertext: Clone + Debug + Send + Sync;

    fn ckks_to_fhew_setup(
        &mut self,
        params: &SwitchSetupParams,
    ) -> Result<(Self::LweContext, Self::LweSecretKey)>;

    fn ckks_to_fhew_key_gen(
        &self,
        key_pair: &KeyPair<Self::Element>,
        lwe_sk: &Self::LweSecretKey,
        dim1: u32,
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    fn ckks_to_fhew_precompute(&mut self, scale: f64, dim1: u32) -> Result<()>;

    fn ckks_to_fhew(
        &self,
        ct: &Ciphertext<Self::Element>,
        keys: &EvalKeyMap<Self::KeyMaterial>,
        num_ciphertexts: u32,
    ) -> Result<Vec<Self::LweCiphertext>>;

    fn fhew_to_ckks_setup(
        &mut self,
        lwe_context: &Self::LweContext,
        num_slots_ckks: u32,
        log_q: u32,
    ) -> Result<()>;

    fn fhew_to_ckks_key_gen(
        &self,
        key_pair: &KeyPair<Self::Element>,
        lwe_sk: &Self::LweSecretKey,
        num_slots: u32,
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    fn fhew_to_ckks(
        &self,
        lwe_cts: &[Self::LweCiphertext],
        keys: &EvalKeyMap<Self::KeyMaterial>,
        params: &FhewToCkksParams,
    ) -> Result<Ciphertext<Self::Element>>;

    fn scheme_switching_setup(
        &mut self,
        params: &SwitchSetupParams,
    ) -> Result<(Self::LweContext, Self::LweSecretKey)>;

    fn scheme_switching_key_gen(
        &self,
        key_pair: &KeyPair<Self::Element>,
        lwe_sk: &Self::LweSecretKey,
        params: &SwitchKeyGenParams,
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    fn compare_precompute(
        &mut self,
        plaintext_modulus: u32,
        init_level: u32,
        scale_sign: f64,
    ) -> Result<()>;

    fn compare(
        &self,
        ct1: &Ciphertext<Self::Element>,
        ct2: &Ciphertext<Self::Element>,
        keys: &EvalKeyMap<Self::KeyMaterial>,
        params: &CompareParams,
    ) -> Result<Ciphertext<Self::Element>>;

    /// Minimum and its position.
    fn argmin(
        &self,
        ct: &Ciphertext<Self::Element>,
        pk: &PublicKey<Self::Element>,
        keys: &EvalKeyMap<Self::KeyMaterial>,
        params: &ArgminParams,
    ) -> Result<Vec<Ciphertext<Self::Element>>>;

    /// Maximum and its position.
    fn argmax(
        &self,
        ct: &Ciphertext<Self::Element>,
        pk: &PublicKey<Self::Element>,
        keys: &EvalKeyMap<Self::KeyMaterial>,
        params: &ArgminParams,
    ) -> Result<Vec<Ciphertext<Self::Element>>>;
}
