// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::StubBackend;
use anyhow::Result;
use fhe_math::rq::{self, Context, Poly};
use hecc_core::{
    create_shared_rng_from_u64, lock_rng, Ciphertext, ContextId, EncodingType, Provenance,
    PublicKey, SharedRng,
};
use std::sync::Arc;

/// Three NTT-friendly limbs for degree 16; the first one is small enough to
/// exercise modulus bounds.
pub const DEFAULT_MODULI: [u64; 3] = [1153, 4611686018326724609, 4611686018309947393];
pub const DEFAULT_DEGREE: usize = 16;

/// Seeded ring and rng shared by a test and the contexts it builds.
pub struct TestSetup {
    pub ring: Arc<Context>,
    pub rng: SharedRng,
}

impl TestSetup {
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_moduli(seed, &DEFAULT_MODULI, DEFAULT_DEGREE)
    }

    pub fn with_moduli(seed: u64, moduli: &[u64], degree: usize) -> Result<Self> {
        Ok(Self {
            ring: Context::new_arc(moduli, degree)?,
            rng: create_shared_rng_from_u64(seed),
        })
    }

    pub fn backend(&self) -> StubBackend {
        StubBackend::new(self.ring.clone())
    }

    pub fn random_poly(&self, representation: rq::Representation) -> Poly {
        let mut rng = lock_rng(&self.rng).unwrap();
        Poly::random(&self.ring, representation, &mut *rng)
    }

    /// Ciphertext of `elements` random polynomials stamped with `context` and
    /// the tag of `pk`.
    pub fn ciphertext(
        &self,
        context: ContextId,
        pk: &PublicKey<Poly>,
        encoding: EncodingType,
        elements: usize,
    ) -> Ciphertext<Poly> {
        let elements = (0..elements)
            .map(|_| self.random_poly(rq::Representation::Ntt))
            .collect();
        Ciphertext::new(context, pk.key_tag().clone(), encoding, elements)
    }
}
