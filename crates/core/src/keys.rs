// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{ContextId, KeyTag};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Anything stamped with the context that produced it and a key tag.
pub trait Provenance {
    fn context_id(&self) -> ContextId;
    fn key_tag(&self) -> &KeyTag;

    fn is_owned_by(&self, context: ContextId) -> bool {
        self.context_id() == context
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SecretKey<E> {
    context: ContextId,
    tag: KeyTag,
    element: E,
}

impl<E> SecretKey<E> {
    pub fn new(context: ContextId, tag: KeyTag, element: E) -> Self {
        Self {
            context,
            tag,
            element,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Installs a new secret element, e.g. after threshold recovery.
    pub fn set_element(&mut self, element: E) {
        self.element = element;
    }
}

impl<E> Provenance for SecretKey<E> {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn key_tag(&self) -> &KeyTag {
        &self.tag
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey<E> {
    context: ContextId,
    tag: KeyTag,
    elements: Vec<E>,
}

impl<E> PublicKey<E> {
    pub fn new(context: ContextId, tag: KeyTag, elements: Vec<E>) -> Self {
        Self {
            context,
            tag,
            elements,
        }
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }
}

impl<E> Provenance for PublicKey<E> {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn key_tag(&self) -> &KeyTag {
        &self.tag
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyPair<E> {
    pub public_key: PublicKey<E>,
    pub secret_key: SecretKey<E>,
}

/// Relinearization or rotation key. Immutable once created; only cache
/// membership changes.
#[derive(Debug)]
pub struct EvalKey<K> {
    context: ContextId,
    tag: KeyTag,
    material: K,
}

impl<K> EvalKey<K> {
    pub fn new(context: ContextId, tag: KeyTag, material: K) -> Self {
        Self {
            context,
            tag,
            material,
        }
    }

    /// Backend-specific key material.
    pub fn material(&self) -> &K {
        &self.material
    }
}

impl<K> Provenance for EvalKey<K> {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn key_tag(&self) -> &KeyTag {
        &self.tag
    }
}

/// Ordered relinearization keys; index `i` relinearizes degree `i + 2`.
pub type EvalKeyVec<K> = Vec<Arc<EvalKey<K>>>;

/// Keys by automorphism index.
pub type EvalKeyMap<K> = BTreeMap<u32, Arc<EvalKey<K>>>;

/// Stamps raw backend material with the producing context and tag.
pub fn stamp_key_map<K>(
    context: ContextId,
    tag: &KeyTag,
    materials: BTreeMap<u32, K>,
) -> EvalKeyMap<K> {
    materials
        .into_iter()
        .map(|(index, material)| (index, Arc::new(EvalKey::new(context, tag.clone(), material))))
        .collect()
}

pub fn stamp_key_vec<K>(context: ContextId, tag: &KeyTag, materials: Vec<K>) -> EvalKeyVec<K> {
    materials
        .into_iter()
        .map(|material| Arc::new(EvalKey::new(context, tag.clone(), material)))
        .collect()
}
