// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use hecc_core::{
    lock_rng, ContextId, CryptoError, CryptoParameters, KeyPair, KeyTag, Provenance, PublicKey,
    Result, SchemeBackend, SecretKey, SharedRng,
};
use hecc_registry::EvalKeyRegistry;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

pub(crate) type Elem<B> = <B as SchemeBackend>::Element;
pub(crate) type Material<B> = <B as SchemeBackend>::KeyMaterial;

/// A context shared between threads. Writers (key generation, clearing) take
/// the write lock, so no reader observes a half-merged key map.
pub type SharedCryptoContext<B> = Arc<RwLock<CryptoContext<B>>>;

pub struct CryptoContext<B: SchemeBackend> {
    pub(crate) id: ContextId,
    pub(crate) params: CryptoParameters,
    pub(crate) backend: B,
    pub(crate) registry: EvalKeyRegistry<Material<B>>,
    pub(crate) rng: SharedRng,
}

impl<B: SchemeBackend> CryptoContext<B> {
    /// Creates a context around `backend`.
    ///
    /// A backend reporting the RNS capability receives the configured
    /// key-switch technique, which requires RNS parameters.
    pub fn new(params: CryptoParameters, mut backend: B, rng: SharedRng) -> Result<Self> {
        if backend.capabilities().rns {
            let Some(rns) = params.rns_parameters() else {
                warn!("RNS backend given a parameter object without RNS settings");
                return Err(CryptoError::type_error(
                    "Cannot set KeySwitchingTechnique as the parameter object is not RNS-based",
                ));
            };
            backend.set_key_switch_technique(rns.key_switch_technique)?;
        }

        let id = ContextId::fresh();
        info!(context = %id, rns = params.is_rns(), "Created crypto context");
        Ok(Self {
            id,
            params,
            backend,
            registry: EvalKeyRegistry::new(),
            rng,
        })
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn params(&self) -> &CryptoParameters {
        &self.params
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &EvalKeyRegistry<Material<B>> {
        &self.registry
    }

    pub fn into_shared(self) -> SharedCryptoContext<B> {
        Arc::new(RwLock::new(self))
    }

    /// Fresh key pair under a random tag.
    pub fn key_gen(&self) -> Result<KeyPair<Elem<B>>> {
        let tag = KeyTag::random(&mut *lock_rng(&self.rng)?);
        let (secret, public) = self.backend.key_gen(&self.rng)?;
        info!(context = %self.id, tag = %tag, "Generated key pair");
        Ok(KeyPair {
            public_key: PublicKey::new(self.id, tag.clone(), public),
            secret_key: SecretKey::new(self.id, tag, secret),
        })
    }

    pub(crate) fn ensure_owned<T: Provenance>(
        &self,
        operation: &'static str,
        subject: &'static str,
        item: &T,
    ) -> Result<()> {
        if item.is_owned_by(self.id) {
            return Ok(());
        }
        warn!(
            operation,
            subject,
            context = %self.id,
            owner = %item.context_id(),
            "Rejected input from another crypto context"
        );
        Err(CryptoError::Provenance { operation, subject })
    }

    /// Requires an optional public key to come from the same key generation
    /// as `sk`.
    pub(crate) fn ensure_matching_public_key(
        &self,
        operation: &'static str,
        sk: &SecretKey<Elem<B>>,
        pk: Option<&PublicKey<Elem<B>>>,
    ) -> Result<()> {
        match pk {
            Some(pk) if pk.key_tag() != sk.key_tag() => {
                warn!(operation, sk_tag = %sk.key_tag(), pk_tag = %pk.key_tag(), "Key tag mismatch");
                Err(CryptoError::config(format!(
                    "Public key passed to {operation} does not match private key"
                )))
            }
            _ => Ok(()),
        }
    }
}
