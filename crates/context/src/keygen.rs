// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::{Elem, Material};
use crate::CryptoContext;
use hecc_core::{
    stamp_key_map, stamp_key_vec, ContextId, EvalKeyMap, EvalKeyVec, KeyMaterialMap, KeyTag,
    Provenance, PublicKey, Result, SchemeBackend, SecretKey,
};
use std::collections::HashMap;
use tracing::info;

impl<B: SchemeBackend> CryptoContext<B> {
    /// Generates one relinearization key and stores it as the whole sequence
    /// for the key's tag.
    pub fn eval_mult_key_gen(&mut self, sk: &SecretKey<Elem<B>>) -> Result<()> {
        self.ensure_owned("EvalMultKeyGen", "private key", sk)?;
        let material = self.backend.eval_mult_key_gen(sk)?;
        let keys = stamp_key_vec(self.id, sk.key_tag(), vec![material]);
        self.registry.set_mult_keys(sk.key_tag().clone(), keys);
        info!(context = %self.id, tag = %sk.key_tag(), "Generated EvalMult key");
        Ok(())
    }

    /// Generates the relinearization keys for every ciphertext degree the
    /// backend supports, replacing the cached sequence.
    pub fn eval_mult_keys_gen(&mut self, sk: &SecretKey<Elem<B>>) -> Result<()> {
        self.ensure_owned("EvalMultKeysGen", "private key", sk)?;
        let materials = self.backend.eval_mult_keys_gen(sk)?;
        let keys = stamp_key_vec(self.id, sk.key_tag(), materials);
        info!(context = %self.id, tag = %sk.key_tag(), count = keys.len(), "Generated EvalMult key chain");
        self.registry.set_mult_keys(sk.key_tag().clone(), keys);
        Ok(())
    }

    pub fn eval_sum_key_gen(
        &mut self,
        sk: &SecretKey<Elem<B>>,
        pk: Option<&PublicKey<Elem<B>>>,
    ) -> Result<()> {
        self.ensure_owned("EvalSumKeyGen", "private key", sk)?;
        self.ensure_matching_public_key("EvalSumKeyGen", sk, pk)?;
        let materials = self.backend.eval_sum_key_gen(sk, pk)?;
        let keys = stamp_key_map(self.id, sk.key_tag(), materials);
        info!(context = %self.id, tag = %sk.key_tag(), count = keys.len(), "Generated EvalSum keys");
        self.registry.set_sum_keys(sk.key_tag().clone(), keys);
        Ok(())
    }

    /// Keys for [`CryptoContext::eval_sum_rows`]. Returned to the caller, not
    /// cached.
    pub fn eval_sum_rows_key_gen(
        &self,
        sk: &SecretKey<Elem<B>>,
        pk: Option<&PublicKey<Elem<B>>>,
        row_size: u32,
        subring_dim: u32,
    ) -> Result<EvalKeyMap<Material<B>>> {
        self.ensure_owned("EvalSumRowsKeyGen", "private key", sk)?;
        self.ensure_matching_public_key("EvalSumRowsKeyGen", sk, pk)?;
        let materials = self
            .backend
            .eval_sum_rows_key_gen(sk, pk, row_size, subring_dim)?;
        Ok(stamp_key_map(self.id, sk.key_tag(), materials))
    }

    /// Right-hand keys for [`CryptoContext::eval_sum_cols`]. Returned to the
    /// caller, not cached.
    pub fn eval_sum_cols_key_gen(
        &self,
        sk: &SecretKey<Elem<B>>,
        pk: Option<&PublicKey<Elem<B>>>,
    ) -> Result<EvalKeyMap<Material<B>>> {
        self.ensure_owned("EvalSumColsKeyGen", "private key", sk)?;
        self.ensure_matching_public_key("EvalSumColsKeyGen", sk, pk)?;
        let materials = self.backend.eval_sum_cols_key_gen(sk, pk)?;
        Ok(stamp_key_map(self.id, sk.key_tag(), materials))
    }

    /// Generates rotation keys for `indices` and merges them into the
    /// automorphism cache. Indices already cached for the tag keep their key.
    pub fn eval_at_index_key_gen(
        &mut self,
        sk: &SecretKey<Elem<B>>,
        indices: &[i32],
        pk: Option<&PublicKey<Elem<B>>>,
    ) -> Result<()> {
        self.ensure_owned("EvalAtIndexKeyGen", "private key", sk)?;
        self.ensure_matching_public_key("EvalAtIndexKeyGen", sk, pk)?;
        let materials = self.backend.eval_at_index_key_gen(sk, pk, indices)?;
        self.merge_rotation_keys("EvalAtIndexKeyGen", sk.key_tag(), materials);
        Ok(())
    }

    /// Stamps backend rotation keys and merges them into the shared
    /// automorphism store.
    pub(crate) fn merge_rotation_keys(
        &mut self,
        operation: &'static str,
        tag: &KeyTag,
        materials: KeyMaterialMap<Material<B>>,
    ) -> Vec<u32> {
        let generated = materials.len();
        let keys = stamp_key_map(self.id, tag, materials);
        let inserted = self.registry.merge_automorphism_keys(tag, keys);
        info!(
            operation,
            context = %self.id,
            tag = %tag,
            generated,
            inserted = inserted.len(),
            "Merged rotation keys"
        );
        inserted
    }

    pub fn eval_mult_keys(&self, tag: &KeyTag) -> Result<&EvalKeyVec<Material<B>>> {
        self.registry.mult_keys(tag)
    }

    pub fn eval_sum_keys(&self, tag: &KeyTag) -> Result<&EvalKeyMap<Material<B>>> {
        self.registry.sum_keys(tag)
    }

    pub fn eval_automorphism_keys(&self, tag: &KeyTag) -> Result<&EvalKeyMap<Material<B>>> {
        self.registry.automorphism_keys(tag)
    }

    pub fn all_mult_keys(&self) -> &HashMap<KeyTag, EvalKeyVec<Material<B>>> {
        self.registry.all_mult_keys()
    }

    pub fn all_sum_keys(&self) -> &HashMap<KeyTag, EvalKeyMap<Material<B>>> {
        self.registry.all_sum_keys()
    }

    pub fn all_automorphism_keys(&self) -> &HashMap<KeyTag, EvalKeyMap<Material<B>>> {
        self.registry.all_automorphism_keys()
    }

    /// Bulk load, e.g. after deserialization.
    pub fn insert_eval_mult_keys(&mut self, keys: EvalKeyVec<Material<B>>) -> Result<()> {
        self.registry.insert_mult_keys(keys)
    }

    pub fn insert_eval_sum_keys(&mut self, keys: EvalKeyMap<Material<B>>) -> Result<()> {
        self.registry.insert_sum_keys(keys)
    }

    pub fn insert_eval_automorphism_keys(&mut self, keys: EvalKeyMap<Material<B>>) -> Result<()> {
        self.registry.insert_automorphism_keys(keys)
    }

    pub fn clear_eval_keys_for_tag(&mut self, tag: &KeyTag) {
        self.registry.clear_tag(tag);
    }

    /// Drops the cached keys produced by `context`.
    pub fn clear_eval_keys_for_context(&mut self, context: ContextId) {
        self.registry.clear_context(context);
    }

    pub fn clear_eval_keys(&mut self) {
        self.registry.clear();
    }
}
