// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{PartyId, PartyShare};
use hecc_core::{CryptoError, Result};
use hecc_ring::{LimbModulus, Representation, RingElement, RingError};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Coefficients of a random degree `threshold - 1` polynomial with `secret`
/// as constant term, all in coefficient representation.
pub(crate) fn sharing_polynomial<E, R>(secret: &E, threshold: usize, rng: &mut R) -> Vec<E>
where
    E: RingElement,
    R: RngCore + CryptoRng,
{
    let mut coefficients = Vec::with_capacity(threshold);
    coefficients.push(secret.clone().into_representation(Representation::Coefficient));
    for _ in 1..threshold {
        coefficients.push(secret.random_like(Representation::Coefficient, rng));
    }
    coefficients
}

/// Evaluates the polynomial at the scalar `point`, limb by limb. Every slot of
/// a limb is multiplied by the same power of `point`.
pub(crate) fn evaluate<E: RingElement>(coefficients: &[E], point: PartyId) -> Result<E> {
    let Some(constant) = coefficients.first() else {
        return Err(CryptoError::config("sharing polynomial has no coefficients"));
    };

    let mut value = constant.zero_like(Representation::Coefficient);
    for (k, &q) in constant.moduli().iter().enumerate() {
        let modulus = LimbModulus::new(q)?;
        let x = modulus.reduce(point as u64);
        let mut acc = Zeroizing::new(constant.limb(k)?);
        let mut power = modulus.reduce(1);
        for coefficient in &coefficients[1..] {
            power = modulus.mul(power, x);
            let limb = Zeroizing::new(coefficient.limb(k)?);
            for (slot, &c) in acc.iter_mut().zip(limb.iter()) {
                *slot = modulus.add(*slot, modulus.mul(power, c));
            }
        }
        value.set_limb(k, &acc)?;
    }
    Ok(value)
}

/// Lagrange weight at point 0 of every index, one scalar per limb:
/// `L_j = prod_{i != j} i * (i - j)^-1 mod q_k`.
pub(crate) fn lagrange_weights(indices: &[PartyId], moduli: &[u64]) -> Result<Vec<Vec<u64>>> {
    let limb_moduli = moduli
        .iter()
        .map(|&q| LimbModulus::new(q))
        .collect::<std::result::Result<Vec<_>, RingError>>()?;

    indices
        .iter()
        .map(|&j| {
            limb_moduli
                .iter()
                .map(|modulus| {
                    let mut weight = modulus.reduce(1);
                    for &i in indices.iter().filter(|&&i| i != j) {
                        let difference = modulus.reduce_signed(i as i64 - j as i64);
                        let inverse = modulus.inverse(difference).ok_or_else(|| {
                            CryptoError::math(format!(
                                "{} - {} is not invertible modulo {}",
                                i,
                                j,
                                modulus.value()
                            ))
                        })?;
                        weight = modulus.mul(weight, modulus.mul(modulus.reduce(i as u64), inverse));
                    }
                    Ok(weight)
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

/// Interpolates the shares at point 0. The result is in transform
/// representation.
pub(crate) fn interpolate<E: RingElement>(shares: &[&PartyShare<E>]) -> Result<E> {
    let Some(first) = shares.first() else {
        return Err(CryptoError::config("no shares to interpolate"));
    };
    let indices: Vec<PartyId> = shares.iter().map(|s| s.party).collect();
    let weights = lagrange_weights(&indices, first.element.moduli())?;

    let mut secret = first.element.zero_like(Representation::Coefficient);
    for (share, weight) in shares.iter().zip(weights) {
        let term = share
            .element
            .clone()
            .into_representation(Representation::Coefficient)
            .scale_limbs(&weight)?;
        secret = secret.try_add(&term)?;
    }
    Ok(secret.into_representation(Representation::Transform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use fhe_math::rq::{self, Context, Poly};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_lagrange_weights_small_modulus() -> Result<()> {
        let weights = lagrange_weights(&[1, 2, 3], &[17])?;
        assert_eq!(weights, vec![vec![3], vec![14], vec![1]]);
        Ok(())
    }

    #[test]
    fn test_lagrange_weights_sum_to_one_per_limb() -> Result<()> {
        let moduli = [1153, 4611686018326724609, 4611686018309947393];
        let weights = lagrange_weights(&[2, 4, 5], &moduli)?;
        for (k, &q) in moduli.iter().enumerate() {
            let m = LimbModulus::new(q)?;
            let sum = weights.iter().fold(0, |acc, w| m.add(acc, w[k]));
            assert_eq!(sum, 1);
        }
        Ok(())
    }

    #[test]
    fn test_evaluate_at_known_point() -> Result<()> {
        // f(x) = 2 + 3x + 5x^2 over Z_17 in every slot, f(2) = 28 = 11 mod 17
        let ctx = Context::new_arc(&[17], 8)?;
        let constant = |v: u64| -> Result<Poly> {
            let mut p = Poly::zero(&ctx, rq::Representation::PowerBasis);
            p.set_limb(0, &[v; 8])?;
            Ok(p)
        };
        let coefficients = vec![constant(2)?, constant(3)?, constant(5)?];
        let value = evaluate(&coefficients, 2)?;
        assert_eq!(value.limb(0)?, vec![11; 8]);
        Ok(())
    }

    #[test]
    fn test_interpolation_recovers_constant_term() -> Result<()> {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let ctx = Context::new_arc(&[1153, 4611686018326724609], 16)?;
        let secret = Poly::random(&ctx, rq::Representation::Ntt, &mut rng);

        let polynomial = sharing_polynomial(&secret, 3, &mut rng);
        let shares = [1, 3, 4]
            .into_iter()
            .map(|i| Ok(PartyShare::new(i, evaluate(&polynomial, i)?)))
            .collect::<hecc_core::Result<Vec<_>>>()?;
        let refs: Vec<_> = shares.iter().collect();

        assert_eq!(interpolate(&refs)?, secret);
        Ok(())
    }
}
