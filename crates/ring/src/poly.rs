// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! [`RingElement`] for RNS polynomials from `fhe-math`.

use crate::{RingElement, Representation, RingError};
use fhe_math::rq::{self, traits::TryConvertFrom, Poly};
use ndarray::ArrayView1;
use rand::{CryptoRng, RngCore};

fn to_rq(representation: Representation) -> rq::Representation {
    match representation {
        Representation::Coefficient => rq::Representation::PowerBasis,
        Representation::Transform => rq::Representation::Ntt,
    }
}

fn from_rq(representation: &rq::Representation) -> Representation {
    match representation {
        rq::Representation::PowerBasis => Representation::Coefficient,
        rq::Representation::Ntt | rq::Representation::NttShoup => Representation::Transform,
    }
}

/// Shoup precomputation is dropped so that `+`/`-` accept the operand.
fn arithmetic_ready(poly: &Poly) -> Poly {
    let mut poly = poly.clone();
    if *poly.representation() == rq::Representation::NttShoup {
        poly.change_representation(rq::Representation::Ntt);
    }
    poly
}

impl RingElement for Poly {
    fn moduli(&self) -> &[u64] {
        self.ctx().moduli()
    }

    fn degree(&self) -> usize {
        self.coefficients().ncols()
    }

    fn representation(&self) -> Representation {
        from_rq(Poly::representation(self))
    }

    fn set_representation(&mut self, representation: Representation) {
        if RingElement::representation(self) != representation {
            self.change_representation(to_rq(representation));
        }
    }

    fn limb(&self, index: usize) -> Result<Vec<u64>, RingError> {
        let coefficients = self.coefficients();
        if index >= coefficients.nrows() {
            return Err(RingError::LimbOutOfRange {
                index,
                limbs: coefficients.nrows(),
            });
        }
        Ok(coefficients.row(index).to_vec())
    }

    fn set_limb(&mut self, index: usize, values: &[u64]) -> Result<(), RingError> {
        let limbs = self.limb_count();
        if index >= limbs {
            return Err(RingError::LimbOutOfRange { index, limbs });
        }
        let degree = RingElement::degree(self);
        if values.len() != degree {
            return Err(RingError::DegreeMismatch {
                len: values.len(),
                degree,
            });
        }
        let modulus = RingElement::moduli(self)[index];
        if let Some(&value) = values.iter().find(|&&v| v >= modulus) {
            return Err(RingError::Unreduced { value, modulus });
        }

        let current = *Poly::representation(self);
        let current = if current == rq::Representation::NttShoup {
            rq::Representation::Ntt
        } else {
            current
        };
        let mut coefficients = self.coefficients().to_owned();
        coefficients.row_mut(index).assign(&ArrayView1::from(values));
        *self = Poly::try_convert_from(coefficients, self.ctx(), false, current)?;
        Ok(())
    }

    fn zero_like(&self, representation: Representation) -> Self {
        Poly::zero(self.ctx(), to_rq(representation))
    }

    fn random_like<R: RngCore + CryptoRng>(
        &self,
        representation: Representation,
        rng: &mut R,
    ) -> Self {
        Poly::random(self.ctx(), to_rq(representation), rng)
    }

    fn try_add(&self, other: &Self) -> Result<Self, RingError> {
        check_operands(self, other)?;
        Ok(&arithmetic_ready(self) + &arithmetic_ready(other))
    }

    fn try_sub(&self, other: &Self) -> Result<Self, RingError> {
        check_operands(self, other)?;
        Ok(&arithmetic_ready(self) - &arithmetic_ready(other))
    }
}

fn check_operands(left: &Poly, right: &Poly) -> Result<(), RingError> {
    if left.ctx() != right.ctx() {
        return Err(RingError::ContextMismatch);
    }
    let (l, r) = (
        RingElement::representation(left),
        RingElement::representation(right),
    );
    if l != r {
        return Err(RingError::RepresentationMismatch { left: l, right: r });
    }
    Ok(())
}
