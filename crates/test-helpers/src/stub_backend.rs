// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, bail, Result};
use fhe_math::rq::{self, Context, Poly};
use hecc_core::{
    lock_rng, ArgminParams, BackendCapabilities, BootstrapConfig, Bootstrapping, Ciphertext,
    CompareParams, DecodePath, DecodedValues, DecryptResult, EncodingType, EvalKey, EvalKeyMap,
    FhewToCkksParams, KeyMaterialMap, KeyPair, KeySwitchTechnique, PackedDecodeParams, Plaintext,
    PlaintextElement, Provenance, PublicKey, SchemeBackend, SchemeSwitching, SecretKey,
    SharedRng, SwitchKeyGenParams, SwitchSetupParams,
};
use hecc_ring::{Representation, RingElement};
use num_bigint::BigUint;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Scaling factor reported by every valid stub decryption.
pub const STUB_SCALING_FACTOR: u64 = 65537;

/// Key material of the stub: what produced it and for which index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StubKey {
    pub kind: &'static str,
    pub index: u32,
}

/// Backend that does no homomorphic math. Evaluations hand back a copy of
/// their input, decryption reads the first limb of the first element.
///
/// Every trait method except `capabilities` is counted by name so tests can
/// assert that rejected inputs never reached the backend.
pub struct StubBackend {
    ring: Arc<Context>,
    degree: usize,
    rns: bool,
    calls: Mutex<HashMap<&'static str, usize>>,
    decrypt_valid: AtomicBool,
    last_packed_params: Mutex<Option<PackedDecodeParams>>,
    last_chebyshev: Mutex<Vec<f64>>,
    key_switch_technique: Option<KeySwitchTechnique>,
}

impl StubBackend {
    pub fn new(ring: Arc<Context>) -> Self {
        let degree = RingElement::degree(&Poly::zero(&ring, rq::Representation::PowerBasis));
        Self {
            ring,
            degree,
            rns: false,
            calls: Mutex::new(HashMap::new()),
            decrypt_valid: AtomicBool::new(true),
            last_packed_params: Mutex::new(None),
            last_chebyshev: Mutex::new(Vec::new()),
            key_switch_technique: None,
        }
    }

    /// Stub that reports the RNS capability.
    pub fn rns(ring: Arc<Context>) -> Self {
        Self {
            rns: true,
            ..Self::new(ring)
        }
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(name).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.values().sum())
            .unwrap_or(0)
    }

    /// Makes the following decryptions report an invalid result.
    pub fn set_decrypt_valid(&self, valid: bool) {
        self.decrypt_valid.store(valid, Ordering::SeqCst);
    }

    pub fn last_packed_params(&self) -> Option<PackedDecodeParams> {
        self.last_packed_params.lock().ok().and_then(|p| p.clone())
    }

    pub fn last_chebyshev_coefficients(&self) -> Vec<f64> {
        self.last_chebyshev
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn key_switch_technique(&self) -> Option<KeySwitchTechnique> {
        self.key_switch_technique
    }

    fn record(&self, name: &'static str) -> Result<()> {
        trace!(call = name, "stub backend");
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| anyhow!("call counter poisoned"))?;
        *calls.entry(name).or_default() += 1;
        Ok(())
    }

    /// Automorphism index of a rotation by `shift` slots.
    fn automorphism_index(&self, shift: i32) -> u32 {
        shift.rem_euclid(2 * self.degree as i32) as u32
    }

    fn rotation_keys(
        &self,
        kind: &'static str,
        shifts: impl IntoIterator<Item = i32>,
    ) -> KeyMaterialMap<StubKey> {
        shifts
            .into_iter()
            .map(|shift| {
                let index = self.automorphism_index(shift);
                (index, StubKey { kind, index })
            })
            .collect()
    }

    fn powers_of_two_below(limit: u32) -> impl Iterator<Item = i32> {
        (0..31)
            .map(|k| 1i64 << k)
            .take_while(move |&shift| shift < i64::from(limit.max(2)))
            .map(|shift| shift as i32)
    }

    fn require_key(&self, keys: &EvalKeyMap<StubKey>, shift: i32) -> Result<()> {
        let index = self.automorphism_index(shift);
        if !keys.contains_key(&index) {
            bail!("no rotation key for index {index}");
        }
        Ok(())
    }

    fn element_for(&self, ct: &Ciphertext<Poly>, path: DecodePath) -> Result<PlaintextElement> {
        let Some(first) = ct.elements().first() else {
            bail!("ciphertext without elements");
        };
        let coefficients = first
            .clone()
            .into_representation(Representation::Coefficient)
            .limb(0)?;
        Ok(match path {
            DecodePath::Native => PlaintextElement::Native(coefficients),
            DecodePath::Wide => {
                PlaintextElement::Wide(coefficients.into_iter().map(BigUint::from).collect())
            }
        })
    }

    fn decrypt_result(&self, ct: &Ciphertext<Poly>, path: DecodePath) -> Result<(DecryptResult, PlaintextElement)> {
        if !self.decrypt_valid.load(Ordering::SeqCst) {
            return Ok((DecryptResult::invalid(), PlaintextElement::Unset));
        }
        Ok((DecryptResult::valid(STUB_SCALING_FACTOR), self.element_for(ct, path)?))
    }
}

fn raw_values(pt: &Plaintext) -> Vec<u64> {
    match pt.element() {
        PlaintextElement::Unset => Vec::new(),
        PlaintextElement::Native(values) => values.clone(),
        PlaintextElement::Wide(values) => values
            .iter()
            .map(|v| v.to_u64_digits().first().copied().unwrap_or(0))
            .collect(),
    }
}

impl SchemeBackend for StubBackend {
    type Element = Poly;
    type KeyMaterial = StubKey;

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities { rns: self.rns }
    }

    fn set_key_switch_technique(&mut self, technique: KeySwitchTechnique) -> Result<()> {
        self.record("set_key_switch_technique")?;
        self.key_switch_technique = Some(technique);
        Ok(())
    }

    fn key_gen(&self, rng: &SharedRng) -> Result<(Poly, Vec<Poly>)> {
        self.record("key_gen")?;
        let mut rng = lock_rng(rng)?;
        let secret = Poly::random(&self.ring, rq::Representation::Ntt, &mut *rng);
        let public = (0..2)
            .map(|_| Poly::random(&self.ring, rq::Representation::Ntt, &mut *rng))
            .collect();
        Ok((secret, public))
    }

    fn eval_mult_key_gen(&self, _sk: &SecretKey<Poly>) -> Result<StubKey> {
        self.record("eval_mult_key_gen")?;
        Ok(StubKey {
            kind: "mult",
            index: 0,
        })
    }

    fn eval_mult_keys_gen(&self, _sk: &SecretKey<Poly>) -> Result<Vec<StubKey>> {
        self.record("eval_mult_keys_gen")?;
        Ok((0..2).map(|index| StubKey { kind: "mult", index }).collect())
    }

    fn eval_sum_key_gen(
        &self,
        _sk: &SecretKey<Poly>,
        _pk: Option<&PublicKey<Poly>>,
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("eval_sum_key_gen")?;
        let slots = self.degree as u32 / 2;
        Ok(self.rotation_keys("sum", Self::powers_of_two_below(slots)))
    }

    fn eval_sum_rows_key_gen(
        &self,
        _sk: &SecretKey<Poly>,
        _pk: Option<&PublicKey<Poly>>,
        row_size: u32,
        _subring_dim: u32,
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("eval_sum_rows_key_gen")?;
        let slots = self.degree as u32 / 2;
        Ok(self.rotation_keys(
            "sum_rows",
            Self::powers_of_two_below(slots).map(|s| s * row_size.max(1) as i32),
        ))
    }

    fn eval_sum_cols_key_gen(
        &self,
        _sk: &SecretKey<Poly>,
        _pk: Option<&PublicKey<Poly>>,
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("eval_sum_cols_key_gen")?;
        Ok(self.rotation_keys("sum_cols", [-1]))
    }

    fn eval_at_index_key_gen(
        &self,
        _sk: &SecretKey<Poly>,
        _pk: Option<&PublicKey<Poly>>,
        indices: &[i32],
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("eval_at_index_key_gen")?;
        Ok(self.rotation_keys("rotation", indices.iter().copied()))
    }

    fn eval_sum(
        &self,
        ct: &Ciphertext<Poly>,
        _batch_size: u32,
        keys: &EvalKeyMap<StubKey>,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_sum")?;
        self.require_key(keys, 1)?;
        Ok(ct.clone())
    }

    fn eval_sum_rows(
        &self,
        ct: &Ciphertext<Poly>,
        _row_size: u32,
        keys: &EvalKeyMap<StubKey>,
        _subring_dim: u32,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_sum_rows")?;
        if keys.is_empty() {
            bail!("no row keys");
        }
        Ok(ct.clone())
    }

    fn eval_sum_cols(
        &self,
        ct: &Ciphertext<Poly>,
        _row_size: u32,
        keys: &EvalKeyMap<StubKey>,
        right_keys: &EvalKeyMap<StubKey>,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_sum_cols")?;
        self.require_key(keys, 1)?;
        self.require_key(right_keys, -1)?;
        Ok(ct.clone())
    }

    fn eval_at_index(
        &self,
        ct: &Ciphertext<Poly>,
        index: i32,
        keys: &EvalKeyMap<StubKey>,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_at_index")?;
        self.require_key(keys, index)?;
        Ok(ct.clone())
    }

    fn eval_merge(
        &self,
        cts: &[Ciphertext<Poly>],
        keys: &EvalKeyMap<StubKey>,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_merge")?;
        for shift in 1..cts.len() as i32 {
            self.require_key(keys, -shift)?;
        }
        cts.first()
            .cloned()
            .ok_or_else(|| anyhow!("nothing to merge"))
    }

    fn eval_inner_product(
        &self,
        ct1: &Ciphertext<Poly>,
        _ct2: &Ciphertext<Poly>,
        _batch_size: u32,
        sum_keys: &EvalKeyMap<StubKey>,
        mult_key: &EvalKey<StubKey>,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_inner_product")?;
        self.require_key(sum_keys, 1)?;
        if mult_key.material().kind != "mult" {
            bail!("expected a relinearization key");
        }
        Ok(ct1.clone())
    }

    fn eval_inner_product_plain(
        &self,
        ct: &Ciphertext<Poly>,
        _pt: &Plaintext,
        _batch_size: u32,
        sum_keys: &EvalKeyMap<StubKey>,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_inner_product_plain")?;
        self.require_key(sum_keys, 1)?;
        Ok(ct.clone())
    }

    fn eval_chebyshev_series(
        &self,
        ct: &Ciphertext<Poly>,
        coefficients: &[f64],
        _a: f64,
        _b: f64,
    ) -> Result<Ciphertext<Poly>> {
        self.record("eval_chebyshev_series")?;
        *self
            .last_chebyshev
            .lock()
            .map_err(|_| anyhow!("coefficient slot poisoned"))? = coefficients.to_vec();
        Ok(ct.clone())
    }

    fn decrypt(
        &self,
        ct: &Ciphertext<Poly>,
        _sk: &SecretKey<Poly>,
        path: DecodePath,
    ) -> Result<(DecryptResult, PlaintextElement)> {
        self.record("decrypt")?;
        self.decrypt_result(ct, path)
    }

    fn multiparty_decrypt_fusion(
        &self,
        shares: &[Ciphertext<Poly>],
        path: DecodePath,
    ) -> Result<(DecryptResult, PlaintextElement)> {
        self.record("multiparty_decrypt_fusion")?;
        let Some(first) = shares.first() else {
            bail!("no partial decryptions");
        };
        self.decrypt_result(first, path)
    }

    fn decode(&self, pt: &mut Plaintext) -> Result<()> {
        self.record("decode")?;
        let values = raw_values(pt);
        let decoded = match pt.encoding() {
            EncodingType::String => DecodedValues::Text(
                values
                    .iter()
                    .map(|v| char::from((v % 128) as u8))
                    .collect(),
            ),
            _ => DecodedValues::Integers(values.iter().map(|&v| v as i64).collect()),
        };
        pt.set_values(decoded);
        Ok(())
    }

    fn decode_packed(&self, pt: &mut Plaintext, params: &PackedDecodeParams) -> Result<()> {
        self.record("decode_packed")?;
        *self
            .last_packed_params
            .lock()
            .map_err(|_| anyhow!("parameter slot poisoned"))? = Some(params.clone());
        let reals = raw_values(pt)
            .into_iter()
            .map(|v| v as f64 / params.scaling_factor)
            .collect();
        pt.set_values(DecodedValues::Reals(reals));
        Ok(())
    }
}

impl Bootstrapping for StubBackend {
    fn bootstrap_setup(&mut self, _config: &BootstrapConfig) -> Result<()> {
        self.record("bootstrap_setup")
    }

    fn bootstrap_key_gen(
        &self,
        _sk: &SecretKey<Poly>,
        num_slots: u32,
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("bootstrap_key_gen")?;
        Ok(self.rotation_keys("bootstrap", Self::powers_of_two_below(num_slots)))
    }

    fn bootstrap(
        &self,
        ct: &Ciphertext<Poly>,
        keys: &EvalKeyMap<StubKey>,
        _num_iterations: u32,
        _precision: u32,
    ) -> Result<Ciphertext<Poly>> {
        self.record("bootstrap")?;
        self.require_key(keys, 1)?;
        Ok(ct.clone())
    }
}

impl SchemeSwitching for StubBackend {
    type LweContext = String;
    type LweSecretKey = u64;
    type LweCiphertext = u64;

    fn ckks_to_fhew_setup(&mut self, params: &SwitchSetupParams) -> Result<(String, u64)> {
        self.record("ckks_to_fhew_setup")?;
        Ok((format!("lwe-q{}", params.log_q), 7))
    }

    fn ckks_to_fhew_key_gen(
        &self,
        _key_pair: &KeyPair<Poly>,
        _lwe_sk: &u64,
        _dim1: u32,
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("ckks_to_fhew_key_gen")?;
        Ok(self.rotation_keys("ckks_to_fhew", [1, 2, 4, -1]))
    }

    fn ckks_to_fhew_precompute(&mut self, _scale: f64, _dim1: u32) -> Result<()> {
        self.record("ckks_to_fhew_precompute")
    }

    fn ckks_to_fhew(
        &self,
        _ct: &Ciphertext<Poly>,
        keys: &EvalKeyMap<StubKey>,
        num_ciphertexts: u32,
    ) -> Result<Vec<u64>> {
        self.record("ckks_to_fhew")?;
        self.require_key(keys, 1)?;
        Ok((0..u64::from(num_ciphertexts)).collect())
    }

    fn fhew_to_ckks_setup(&mut self, _lwe_context: &String, _num_slots_ckks: u32, _log_q: u32) -> Result<()> {
        self.record("fhew_to_ckks_setup")
    }

    fn fhew_to_ckks_key_gen(
        &self,
        _key_pair: &KeyPair<Poly>,
        _lwe_sk: &u64,
        num_slots: u32,
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("fhew_to_ckks_key_gen")?;
        Ok(self.rotation_keys("fhew_to_ckks", Self::powers_of_two_below(num_slots)))
    }

    /// The result takes its provenance from the switching keys.
    fn fhew_to_ckks(
        &self,
        _lwe_cts: &[u64],
        keys: &EvalKeyMap<StubKey>,
        _params: &FhewToCkksParams,
    ) -> Result<Ciphertext<Poly>> {
        self.record("fhew_to_ckks")?;
        let key = keys
            .values()
            .next()
            .ok_or_else(|| anyhow!("no switching keys"))?;
        let zero = Poly::zero(&self.ring, rq::Representation::Ntt);
        Ok(Ciphertext::new(
            key.context_id(),
            key.key_tag().clone(),
            EncodingType::CkksPacked,
            vec![zero.clone(), zero],
        ))
    }

    fn scheme_switching_setup(&mut self, params: &SwitchSetupParams) -> Result<(String, u64)> {
        self.record("scheme_switching_setup")?;
        Ok((format!("lwe-q{}", params.log_q), 11))
    }

    fn scheme_switching_key_gen(
        &self,
        _key_pair: &KeyPair<Poly>,
        _lwe_sk: &u64,
        _params: &SwitchKeyGenParams,
    ) -> Result<KeyMaterialMap<StubKey>> {
        self.record("scheme_switching_key_gen")?;
        Ok(self.rotation_keys("scheme_switching", [1, 2, 3, 4, -1]))
    }

    fn compare_precompute(&mut self, _plaintext_modulus: u32, _init_level: u32, _scale_sign: f64) -> Result<()> {
        self.record("compare_precompute")
    }

    fn compare(
        &self,
        ct1: &Ciphertext<Poly>,
        _ct2: &Ciphertext<Poly>,
        keys: &EvalKeyMap<StubKey>,
        _params: &CompareParams,
    ) -> Result<Ciphertext<Poly>> {
        self.record("compare")?;
        self.require_key(keys, 1)?;
        Ok(ct1.clone())
    }

    fn argmin(
        &self,
        ct: &Ciphertext<Poly>,
        _pk: &PublicKey<Poly>,
        keys: &EvalKeyMap<StubKey>,
        _params: &ArgminParams,
    ) -> Result<Vec<Ciphertext<Poly>>> {
        self.record("argmin")?;
        self.require_key(keys, 1)?;
        Ok(vec![ct.clone(), ct.clone()])
    }

    fn argmax(
        &self,
        ct: &Ciphertext<Poly>,
        _pk: &PublicKey<Poly>,
        keys: &EvalKeyMap<StubKey>,
        _params: &ArgminParams,
    ) -> Result<Vec<Ciphertext<Poly>>> {
        self.record("argmax")?;
        self.require_key(keys, 1)?;
        Ok(vec![ct.clone(), ct.clone()])
    }
}
