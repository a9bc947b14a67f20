// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{LimbModulus, RingError};
use rand::{CryptoRng, RngCore};
use std::fmt::Debug;

/// Domain a ring element is currently held in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Polynomial coefficients (power basis)
    Coefficient,
    /// Evaluation / NTT domain. Homomorphic operations require this form.
    Transform,
}

/// A polynomial of a cyclotomic ring split into CRT limbs.
///
/// Ring dimension and limb moduli are fixed by the parameter set the element
/// was created under. Every limb `k` holds `degree()` slots reduced modulo
/// `moduli()[k]`.
pub trait RingElement: Clone + Debug + PartialEq + Send + Sync + Sized {
    /// Limb moduli, one per CRT limb.
    fn moduli(&self) -> &[u64];

    /// Ring dimension.
    fn degree(&self) -> usize;

    fn limb_count(&self) -> usize {
        self.moduli().len()
    }

    fn representation(&self) -> Representation;

    /// Converts the element in place. Converting to the current representation is a no-op.
    fn set_representation(&mut self, representation: Representation);

    /// Copy of the slots of limb `index`.
    fn limb(&self, index: usize) -> Result<Vec<u64>, RingError>;

    /// Replaces limb `index`. The representation is left untouched.
    fn set_limb(&mut self, index: usize, values: &[u64]) -> Result<(), RingError>;

    /// Zero element over the same parameters.
    fn zero_like(&self, representation: Representation) -> Self;

    /// Uniformly random element over the same parameters.
    fn random_like<R: RngCore + CryptoRng>(&self, representation: Representation, rng: &mut R)
        -> Self;

    fn try_add(&self, other: &Self) -> Result<Self, RingError>;

    fn try_sub(&self, other: &Self) -> Result<Self, RingError>;

    /// Multiplies every slot of limb `k` by `scalars[k]` modulo `moduli()[k]`.
    ///
    /// A scalar broadcast is the same operation in both representations, so the
    /// element keeps its current one.
    fn scale_limbs(&self, scalars: &[u64]) -> Result<Self, RingError> {
        if scalars.len() != self.limb_count() {
            return Err(RingError::ScalarCountMismatch {
                scalars: scalars.len(),
                limbs: self.limb_count(),
            });
        }

        let mut scaled = self.clone();
        for (k, (&q, &scalar)) in self.moduli().iter().zip(scalars).enumerate() {
            let modulus = LimbModulus::new(q)?;
            let scalar = modulus.reduce(scalar);
            let limb = self
                .limb(k)?
                .into_iter()
                .map(|value| modulus.mul(value, scalar))
                .collect::<Vec<_>>();
            scaled.set_limb(k, &limb)?;
        }
        Ok(scaled)
    }

    /// Consumes the element and returns it in the requested representation.
    fn into_representation(mut self, representation: Representation) -> Self {
        self.set_representation(representation);
        self
    }
}
