// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use hecc_core::{
    ContextId, CryptoError, EvalKey, EvalKeyMap, EvalKeyVec, KeyTag, Provenance, Result,
};
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

/// The three evaluation key caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum KeyClass {
    #[strum(to_string = "EvalMult keys")]
    Mult,
    #[strum(to_string = "EvalSum keys")]
    Sum,
    #[strum(to_string = "EvalAutomorphism keys")]
    Automorphism,
}

/// Per-context evaluation key caches keyed by [`KeyTag`].
///
/// Multiplication and summation entries are replaced wholesale on
/// regeneration. Automorphism entries only grow: an index already cached for
/// a tag is never overwritten.
#[derive(Debug)]
pub struct EvalKeyRegistry<K> {
    mult_keys: HashMap<KeyTag, EvalKeyVec<K>>,
    sum_keys: HashMap<KeyTag, EvalKeyMap<K>>,
    automorphism_keys: HashMap<KeyTag, EvalKeyMap<K>>,
}

impl<K> Default for EvalKeyRegistry<K> {
    fn default() -> Self {
        Self {
            mult_keys: HashMap::new(),
            sum_keys: HashMap::new(),
            automorphism_keys: HashMap::new(),
        }
    }
}

fn common_tag<'a, K: 'a>(
    class: KeyClass,
    mut keys: impl Iterator<Item = &'a Arc<EvalKey<K>>>,
) -> Result<Option<KeyTag>> {
    let Some(first) = keys.next() else {
        return Ok(None);
    };
    let tag = first.key_tag().clone();
    if keys.any(|k| k.key_tag() != &tag) {
        return Err(CryptoError::config(format!(
            "{class} to insert carry more than one key tag"
        )));
    }
    Ok(Some(tag))
}

fn first_context<K>(keys: impl IntoIterator<Item = Arc<EvalKey<K>>>) -> Option<ContextId> {
    keys.into_iter().next().map(|k| k.context_id())
}

impl<K> EvalKeyRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `keys` under `tag`, replacing any previous sequence.
    pub fn set_mult_keys(&mut self, tag: KeyTag, keys: EvalKeyVec<K>) {
        debug!(tag = %tag, count = keys.len(), "Storing EvalMult keys");
        self.mult_keys.insert(tag, keys);
    }

    /// Stores `keys` under `tag`, replacing any previous map.
    pub fn set_sum_keys(&mut self, tag: KeyTag, keys: EvalKeyMap<K>) {
        debug!(tag = %tag, count = keys.len(), "Storing EvalSum keys");
        self.sum_keys.insert(tag, keys);
    }

    /// Inserts the candidates whose index is not cached yet for `tag` and
    /// returns those indices. Candidates for cached indices are dropped.
    ///
    /// The tag gets an entry even when `candidates` is empty, so a later
    /// lookup returns an empty map rather than NotFound.
    pub fn merge_automorphism_keys(&mut self, tag: &KeyTag, mut candidates: EvalKeyMap<K>) -> Vec<u32> {
        let target = self.automorphism_keys.entry(tag.clone()).or_default();

        let fresh: Vec<u32> = candidates
            .keys()
            .filter(|index| !target.contains_key(index))
            .copied()
            .collect();

        for index in &fresh {
            if let Some(key) = candidates.remove(index) {
                target.insert(*index, key);
            }
        }

        debug!(
            tag = %tag,
            inserted = fresh.len(),
            discarded = candidates.len(),
            "Merged EvalAutomorphism keys"
        );
        fresh
    }

    /// Bulk load of a relinearization key sequence, keyed by the tag of its
    /// first key. An empty sequence is ignored.
    pub fn insert_mult_keys(&mut self, keys: EvalKeyVec<K>) -> Result<()> {
        match common_tag(KeyClass::Mult, keys.iter())? {
            Some(tag) => self.set_mult_keys(tag, keys),
            None => warn!("Ignoring empty EvalMult key vector"),
        }
        Ok(())
    }

    pub fn insert_sum_keys(&mut self, keys: EvalKeyMap<K>) -> Result<()> {
        match common_tag(KeyClass::Sum, keys.values())? {
            Some(tag) => self.set_sum_keys(tag, keys),
            None => warn!("Ignoring empty EvalSum key map"),
        }
        Ok(())
    }

    /// Replaces the automorphism map of the tag carried by `keys`.
    pub fn insert_automorphism_keys(&mut self, keys: EvalKeyMap<K>) -> Result<()> {
        match common_tag(KeyClass::Automorphism, keys.values())? {
            Some(tag) => {
                debug!(tag = %tag, count = keys.len(), "Storing EvalAutomorphism keys");
                self.automorphism_keys.insert(tag, keys);
            }
            None => warn!("Ignoring empty EvalAutomorphism key map"),
        }
        Ok(())
    }

    pub fn mult_keys(&self, tag: &KeyTag) -> Result<&EvalKeyVec<K>> {
        self.mult_keys
            .get(tag)
            .ok_or_else(|| CryptoError::NotFound(KeyClass::Mult.to_string()))
    }

    pub fn sum_keys(&self, tag: &KeyTag) -> Result<&EvalKeyMap<K>> {
        self.sum_keys
            .get(tag)
            .ok_or_else(|| CryptoError::NotFound(KeyClass::Sum.to_string()))
    }

    pub fn automorphism_keys(&self, tag: &KeyTag) -> Result<&EvalKeyMap<K>> {
        self.automorphism_keys
            .get(tag)
            .ok_or_else(|| CryptoError::NotFound(KeyClass::Automorphism.to_string()))
    }

    pub fn all_mult_keys(&self) -> &HashMap<KeyTag, EvalKeyVec<K>> {
        &self.mult_keys
    }

    pub fn all_sum_keys(&self) -> &HashMap<KeyTag, EvalKeyMap<K>> {
        &self.sum_keys
    }

    pub fn all_automorphism_keys(&self) -> &HashMap<KeyTag, EvalKeyMap<K>> {
        &self.automorphism_keys
    }

    pub fn contains(&self, class: KeyClass, tag: &KeyTag) -> bool {
        match class {
            KeyClass::Mult => self.mult_keys.contains_key(tag),
            KeyClass::Sum => self.sum_keys.contains_key(tag),
            KeyClass::Automorphism => self.automorphism_keys.contains_key(tag),
        }
    }

    pub fn clear_class(&mut self, class: KeyClass) {
        match class {
            KeyClass::Mult => self.mult_keys.clear(),
            KeyClass::Sum => self.sum_keys.clear(),
            KeyClass::Automorphism => self.automorphism_keys.clear(),
        }
        debug!(class = %class, "Cleared key cache");
    }

    pub fn clear_class_tag(&mut self, class: KeyClass, tag: &KeyTag) {
        let removed = match class {
            KeyClass::Mult => self.mult_keys.remove(tag).is_some(),
            KeyClass::Sum => self.sum_keys.remove(tag).is_some(),
            KeyClass::Automorphism => self.automorphism_keys.remove(tag).is_some(),
        };
        debug!(class = %class, tag = %tag, removed, "Cleared key tag");
    }

    /// Drops every entry whose first key was produced by `context`. Entries
    /// are assumed to come from a single context.
    pub fn clear_class_context(&mut self, class: KeyClass, context: ContextId) {
        let before = self.len(class);
        match class {
            KeyClass::Mult => self
                .mult_keys
                .retain(|_, keys| first_context(keys.iter().cloned()) != Some(context)),
            KeyClass::Sum => self
                .sum_keys
                .retain(|_, keys| first_context(keys.values().cloned()) != Some(context)),
            KeyClass::Automorphism => self
                .automorphism_keys
                .retain(|_, keys| first_context(keys.values().cloned()) != Some(context)),
        }
        debug!(
            class = %class,
            context = %context,
            removed = before - self.len(class),
            "Cleared keys of context"
        );
    }

    pub fn clear_tag(&mut self, tag: &KeyTag) {
        KeyClass::iter().for_each(|class| self.clear_class_tag(class, tag));
    }

    pub fn clear_context(&mut self, context: ContextId) {
        KeyClass::iter().for_each(|class| self.clear_class_context(class, context));
    }

    pub fn clear(&mut self) {
        KeyClass::iter().for_each(|class| self.clear_class(class));
        info!("Cleared all evaluation key caches");
    }

    /// Number of tags cached for `class`.
    pub fn len(&self, class: KeyClass) -> usize {
        match class {
            KeyClass::Mult => self.mult_keys.len(),
            KeyClass::Sum => self.sum_keys.len(),
            KeyClass::Automorphism => self.automorphism_keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        KeyClass::iter().all(|class| self.len(class) == 0)
    }
}
