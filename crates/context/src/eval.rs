// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::{Elem, Material};
use crate::CryptoContext;
use hecc_core::{
    Ciphertext, CryptoError, EvalKeyMap, Plaintext, Provenance, Result, SchemeBackend,
};
use tracing::{debug, warn};

impl<B: SchemeBackend> CryptoContext<B> {
    /// Sums the first `batch_size` slots with the cached sum keys of the
    /// ciphertext's tag.
    pub fn eval_sum(&self, ct: &Ciphertext<Elem<B>>, batch_size: u32) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalSum", "ciphertext", ct)?;
        let keys = self.registry.sum_keys(ct.key_tag())?;
        debug!(tag = %ct.key_tag(), batch_size, "EvalSum");
        Ok(self.backend.eval_sum(ct, batch_size, keys)?)
    }

    /// Row sums with caller-held keys from
    /// [`CryptoContext::eval_sum_rows_key_gen`].
    pub fn eval_sum_rows(
        &self,
        ct: &Ciphertext<Elem<B>>,
        row_size: u32,
        keys: &EvalKeyMap<Material<B>>,
        subring_dim: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalSumRows", "ciphertext", ct)?;
        Ok(self.backend.eval_sum_rows(ct, row_size, keys, subring_dim)?)
    }

    /// Column sums. Needs both the cached sum keys of the tag and the
    /// caller-held right keys from [`CryptoContext::eval_sum_cols_key_gen`].
    pub fn eval_sum_cols(
        &self,
        ct: &Ciphertext<Elem<B>>,
        row_size: u32,
        right_keys: &EvalKeyMap<Material<B>>,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalSumCols", "ciphertext", ct)?;
        let keys = self.registry.sum_keys(ct.key_tag())?;
        Ok(self.backend.eval_sum_cols(ct, row_size, keys, right_keys)?)
    }

    /// Rotates by `index` slots. Index 0 is a plain copy and needs no keys.
    pub fn eval_at_index(&self, ct: &Ciphertext<Elem<B>>, index: i32) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalAtIndex", "ciphertext", ct)?;
        if index == 0 {
            return Ok(ct.clone());
        }
        let keys = self.registry.automorphism_keys(ct.key_tag())?;
        debug!(tag = %ct.key_tag(), index, "EvalAtIndex");
        Ok(self.backend.eval_at_index(ct, index, keys)?)
    }

    /// Packs the first slot of each ciphertext into one ciphertext, using the
    /// rotation keys of the first ciphertext's tag.
    pub fn eval_merge(&self, cts: &[Ciphertext<Elem<B>>]) -> Result<Ciphertext<Elem<B>>> {
        let Some(first) = cts.first() else {
            return Err(CryptoError::config("EvalMerge: empty input ciphertext vector"));
        };
        self.ensure_owned("EvalMerge", "ciphertext", first)?;
        let keys = self.registry.automorphism_keys(first.key_tag())?;
        debug!(tag = %first.key_tag(), count = cts.len(), "EvalMerge");
        Ok(self.backend.eval_merge(cts, keys)?)
    }

    pub fn eval_inner_product(
        &self,
        ct1: &Ciphertext<Elem<B>>,
        ct2: &Ciphertext<Elem<B>>,
        batch_size: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalInnerProduct", "first ciphertext", ct1)?;
        self.ensure_owned("EvalInnerProduct", "second ciphertext", ct2)?;
        if ct1.key_tag() != ct2.key_tag() {
            warn!(left = %ct1.key_tag(), right = %ct2.key_tag(), "EvalInnerProduct tag mismatch");
            return Err(CryptoError::config(
                "EvalInnerProduct: ciphertexts were not encrypted with the same key",
            ));
        }

        let sum_keys = self.registry.sum_keys(ct1.key_tag())?;
        let mult_key = self
            .registry
            .mult_keys(ct1.key_tag())?
            .first()
            .ok_or_else(|| CryptoError::NotFound("EvalMult keys".to_string()))?;
        Ok(self
            .backend
            .eval_inner_product(ct1, ct2, batch_size, sum_keys, mult_key)?)
    }

    /// Inner product against a plaintext operand; only sum keys are needed.
    pub fn eval_inner_product_plain(
        &self,
        ct: &Ciphertext<Elem<B>>,
        pt: &Plaintext,
        batch_size: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalInnerProduct", "ciphertext", ct)?;
        let sum_keys = self.registry.sum_keys(ct.key_tag())?;
        Ok(self
            .backend
            .eval_inner_product_plain(ct, pt, batch_size, sum_keys)?)
    }
}
