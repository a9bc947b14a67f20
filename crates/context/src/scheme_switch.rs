// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::Elem;
use crate::CryptoContext;
use hecc_core::{
    ArgminParams, Ciphertext, CompareParams, CryptoError, FhewToCkksParams, KeyPair, KeyTag,
    Provenance, PublicKey, Result, SchemeSwitching, SwitchKeyGenParams, SwitchSetupParams,
};
use tracing::{info, warn};

type LweContext<B> = <B as SchemeSwitching>::LweContext;
type LweSecretKey<B> = <B as SchemeSwitching>::LweSecretKey;
type LweCiphertext<B> = <B as SchemeSwitching>::LweCiphertext;

impl<B: SchemeSwitching> CryptoContext<B> {
    pub fn eval_ckks_to_fhew_setup(
        &mut self,
        params: &SwitchSetupParams,
    ) -> Result<(LweContext<B>, LweSecretKey<B>)> {
        let setup = self.backend.ckks_to_fhew_setup(params)?;
        info!(context = %self.id, security = ?params.security_level, "CKKS to FHEW switching set up");
        Ok(setup)
    }

    pub fn eval_ckks_to_fhew_key_gen(
        &mut self,
        key_pair: &KeyPair<Elem<B>>,
        lwe_sk: &LweSecretKey<B>,
        dim1: u32,
    ) -> Result<()> {
        self.ensure_key_pair("EvalCKKStoFHEWKeyGen", key_pair)?;
        let materials = self.backend.ckks_to_fhew_key_gen(key_pair, lwe_sk, dim1)?;
        self.merge_rotation_keys("EvalCKKStoFHEWKeyGen", key_pair.secret_key.key_tag(), materials);
        Ok(())
    }

    pub fn eval_ckks_to_fhew_precompute(&mut self, scale: f64, dim1: u32) -> Result<()> {
        Ok(self.backend.ckks_to_fhew_precompute(scale, dim1)?)
    }

    pub fn eval_ckks_to_fhew(
        &self,
        ct: &Ciphertext<Elem<B>>,
        num_ciphertexts: u32,
    ) -> Result<Vec<LweCiphertext<B>>> {
        self.ensure_owned("EvalCKKStoFHEW", "ciphertext", ct)?;
        let keys = self.registry.automorphism_keys(ct.key_tag())?;
        Ok(self.backend.ckks_to_fhew(ct, keys, num_ciphertexts)?)
    }

    pub fn eval_fhew_to_ckks_setup(
        &mut self,
        lwe_context: &LweContext<B>,
        num_slots_ckks: u32,
        log_q: u32,
    ) -> Result<()> {
        Ok(self
            .backend
            .fhew_to_ckks_setup(lwe_context, num_slots_ckks, log_q)?)
    }

    pub fn eval_fhew_to_ckks_key_gen(
        &mut self,
        key_pair: &KeyPair<Elem<B>>,
        lwe_sk: &LweSecretKey<B>,
        num_slots: u32,
    ) -> Result<()> {
        self.ensure_key_pair("EvalFHEWtoCKKSKeyGen", key_pair)?;
        let materials = self.backend.fhew_to_ckks_key_gen(key_pair, lwe_sk, num_slots)?;
        self.merge_rotation_keys("EvalFHEWtoCKKSKeyGen", key_pair.secret_key.key_tag(), materials);
        Ok(())
    }

    /// LWE ciphertexts carry no tag, so the caller names the key set to
    /// switch back under.
    pub fn eval_fhew_to_ckks(
        &self,
        lwe_cts: &[LweCiphertext<B>],
        tag: &KeyTag,
        params: &FhewToCkksParams,
    ) -> Result<Ciphertext<Elem<B>>> {
        if lwe_cts.is_empty() {
            return Err(CryptoError::config("EvalFHEWtoCKKS: empty input ciphertext vector"));
        }
        let keys = self.registry.automorphism_keys(tag)?;
        Ok(self.backend.fhew_to_ckks(lwe_cts, keys, params)?)
    }

    pub fn eval_scheme_switching_setup(
        &mut self,
        params: &SwitchSetupParams,
    ) -> Result<(LweContext<B>, LweSecretKey<B>)> {
        let setup = self.backend.scheme_switching_setup(params)?;
        info!(context = %self.id, security = ?params.security_level, "Bidirectional scheme switching set up");
        Ok(setup)
    }

    pub fn eval_scheme_switching_key_gen(
        &mut self,
        key_pair: &KeyPair<Elem<B>>,
        lwe_sk: &LweSecretKey<B>,
        params: &SwitchKeyGenParams,
    ) -> Result<()> {
        self.ensure_key_pair("EvalSchemeSwitchingKeyGen", key_pair)?;
        let materials = self
            .backend
            .scheme_switching_key_gen(key_pair, lwe_sk, params)?;
        self.merge_rotation_keys(
            "EvalSchemeSwitchingKeyGen",
            key_pair.secret_key.key_tag(),
            materials,
        );
        Ok(())
    }

    pub fn eval_compare_switch_precompute(
        &mut self,
        plaintext_modulus: u32,
        init_level: u32,
        scale_sign: f64,
    ) -> Result<()> {
        Ok(self
            .backend
            .compare_precompute(plaintext_modulus, init_level, scale_sign)?)
    }

    /// Sign of `ct1 - ct2` slot by slot, computed through LWE.
    pub fn eval_compare_scheme_switching(
        &self,
        ct1: &Ciphertext<Elem<B>>,
        ct2: &Ciphertext<Elem<B>>,
        params: &CompareParams,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalCompareSchemeSwitching", "first ciphertext", ct1)?;
        self.ensure_owned("EvalCompareSchemeSwitching", "second ciphertext", ct2)?;
        if ct1.key_tag() != ct2.key_tag() {
            return Err(CryptoError::config(
                "EvalCompareSchemeSwitching: ciphertexts were not encrypted with the same key",
            ));
        }
        let keys = self.registry.automorphism_keys(ct1.key_tag())?;
        Ok(self.backend.compare(ct1, ct2, keys, params)?)
    }

    pub fn eval_min_scheme_switching(
        &self,
        ct: &Ciphertext<Elem<B>>,
        pk: &PublicKey<Elem<B>>,
        params: &ArgminParams,
    ) -> Result<Vec<Ciphertext<Elem<B>>>> {
        self.ensure_extremum_inputs("EvalMinSchemeSwitching", ct, pk)?;
        let keys = self.registry.automorphism_keys(ct.key_tag())?;
        Ok(self.backend.argmin(ct, pk, keys, params)?)
    }

    pub fn eval_max_scheme_switching(
        &self,
        ct: &Ciphertext<Elem<B>>,
        pk: &PublicKey<Elem<B>>,
        params: &ArgminParams,
    ) -> Result<Vec<Ciphertext<Elem<B>>>> {
        self.ensure_extremum_inputs("EvalMaxSchemeSwitching", ct, pk)?;
        let keys = self.registry.automorphism_keys(ct.key_tag())?;
        Ok(self.backend.argmax(ct, pk, keys, params)?)
    }

    fn ensure_key_pair(&self, operation: &'static str, key_pair: &KeyPair<Elem<B>>) -> Result<()> {
        self.ensure_owned(operation, "private key", &key_pair.secret_key)?;
        self.ensure_matching_public_key(operation, &key_pair.secret_key, Some(&key_pair.public_key))
    }

    fn ensure_extremum_inputs(
        &self,
        operation: &'static str,
        ct: &Ciphertext<Elem<B>>,
        pk: &PublicKey<Elem<B>>,
    ) -> Result<()> {
        self.ensure_owned(operation, "ciphertext", ct)?;
        self.ensure_owned(operation, "public key", pk)?;
        if ct.key_tag() != pk.key_tag() {
            warn!(operation, ct_tag = %ct.key_tag(), pk_tag = %pk.key_tag(), "Key tag mismatch");
            return Err(CryptoError::config(format!(
                "{operation}: public key does not match the ciphertext key"
            )));
        }
        Ok(())
    }
}
