// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    Ciphertext, DecodePath, DecryptResult, EvalKey, EvalKeyMap, KeySwitchTechnique,
    PackedDecodeParams, Plaintext, PlaintextElement, PublicKey, SecretKey, SharedRng,
};
use anyhow::Result;
use hecc_ring::RingElement;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// What a backend supports, queried instead of inspecting its concrete type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// Backend works on RNS parameter sets and accepts a key-switch technique
    pub rns: bool,
}

/// Raw key material by automorphism index, before it is stamped with provenance.
pub type KeyMaterialMap<K> = BTreeMap<u32, K>;

/// The homomorphic arithmetic of one scheme.
///
/// Implementations do the math only. Provenance checks, key caching and
/// decode-path selection happen in the crypto context before any of these
/// methods is reached.
pub trait SchemeBackend: Send + Sync {
    type Element: RingElement;
    type KeyMaterial: Debug + Send + Sync;

    fn capabilities(&self) -> BackendCapabilities;

    fn set_key_switch_technique(&mut self, technique: KeySwitchTechnique) -> Result<()>;

    /// Secret element and public key elements of a fresh key pair.
    fn key_gen(&self, rng: &SharedRng) -> Result<(Self::Element, Vec<Self::Element>)>;

    // Key generation

    fn eval_mult_key_gen(&self, sk: &SecretKey<Self::Element>) -> Result<Self::KeyMaterial>;

    fn eval_mult_keys_gen(&self, sk: &SecretKey<Self::Element>) -> Result<Vec<Self::KeyMaterial>>;

    fn eval_sum_key_gen(
        &self,
        sk: &SecretKey<Self::Element>,
        pk: Option<&PublicKey<Self::Element>>,
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    fn eval_sum_rows_key_gen(
        &self,
        sk: &SecretKey<Self::Element>,
        pk: Option<&PublicKey<Self::Element>>,
        row_size: u32,
        subring_dim: u32,
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    fn eval_sum_cols_key_gen(
        &self,
        sk: &SecretKey<Self::Element>,
        pk: Option<&PublicKey<Self::Element>>,
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    fn eval_at_index_key_gen(
        &self,
        sk: &SecretKey<Self::Element>,
        pk: Option<&PublicKey<Self::Element>>,
        indices: &[i32],
    ) -> Result<KeyMaterialMap<Self::KeyMaterial>>;

    // Evaluation

    fn eval_sum(
        &self,
        ct: &Ciphertext<Self::Element>,
        batch_size: u32,
        keys: &EvalKeyMap<Self::KeyMaterial>,
    ) -> Result<Ciphertext<Self::Element>>;

    fn eval_sum_rows(
        &self,
        ct: &Ciphertext<Self::Element>,
        row_size: u32,
        keys: &EvalKeyMap<Self::KeyMaterial>,
        subring_dim: u32,
    ) -> Result<Ciphertext<Self::Element>>;

    fn eval_sum_cols(
        &self,
        ct: &Ciphertext<Self::Element>,
        row_size: u32,
        keys: &EvalKeyMap<Self::KeyMaterial>,
        right_keys: &EvalKeyMap<Self::KeyMaterial>,
    ) -> Result<Ciphertext<Self::Element>>;

    fn eval_at_index(
        &self,
        ct: &Ciphertext<Self::Element>,
        index: i32,
        keys: &EvalKeyMap<Self::KeyMaterial>,
    ) -> Result<Ciphertext<Self::Element>>;

    fn eval_merge(
        &self,
        cts: &[Ciphertext<Self::Element>],
        keys: &EvalKeyMap<Self::KeyMaterial>,
    ) -> Result<Ciphertext<Self::Element>>;

    fn eval_inner_product(
        &self,
        ct1: &Ciphertext<Self::Element>,
        ct2: &Ciphertext<Self::Element>,
        batch_size: u32,
        sum_keys: &EvalKeyMap<Self::KeyMaterial>,
        mult_key: &EvalKey<Self::KeyMaterial>,
    ) -> Result<Ciphertext<Self::Element>>;

    fn eval_inner_product_plain(
        &self,
        ct: &Ciphertext<Self::Element>,
        pt: &Plaintext,
        batch_size: u32,
        sum_keys: &EvalKeyMap<Self::KeyMaterial>,
    ) -> Result<Ciphertext<Self::Element>>;

    /// Evaluates `sum c_i T_i(x)` with `x` mapped from `[a, b]` to `[-1, 1]`.
    fn eval_chebyshev_series(
        &self,
        ct: &Ciphertext<Self::Element>,
        coefficients: &[f64],
        a: f64,
        b: f64,
    ) -> Result<Ciphertext<Self::Element>>;

    // Decryption

    fn decrypt(
        &self,
        ct: &Ciphertext<Self::Element>,
        sk: &SecretKey<Self::Element>,
        path: DecodePath,
    ) -> Result<(DecryptResult, PlaintextElement)>;

    fn multiparty_decrypt_fusion(
        &self,
        shares: &[Ciphertext<Self::Element>],
        path: DecodePath,
    ) -> Result<(DecryptResult, PlaintextElement)>;

    /// Plain decode of non packed-real encodings.
    fn decode(&self, pt: &mut Plaintext) -> Result<()>;

    fn decode_packed(&self, pt: &mut Plaintext, params: &PackedDecodeParams) -> Result<()>;
}
