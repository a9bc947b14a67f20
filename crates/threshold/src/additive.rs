// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use hecc_ring::{Representation, RingElement, RingError};
use rand::{CryptoRng, RngCore};

/// Splits `secret` into `count` transform-domain elements summing to it.
/// All but the last are uniformly random.
pub(crate) fn split<E, R>(secret: &E, count: usize, rng: &mut R) -> Result<Vec<E>, RingError>
where
    E: RingElement,
    R: RngCore + CryptoRng,
{
    let secret = secret.clone().into_representation(Representation::Transform);
    let mut shares = Vec::with_capacity(count);
    let mut sum = secret.zero_like(Representation::Transform);
    for _ in 1..count {
        let share = secret.random_like(Representation::Transform, rng);
        sum = sum.try_add(&share)?;
        shares.push(share);
    }
    shares.push(secret.try_sub(&sum)?);
    Ok(shares)
}

/// Sum of `shares` in the transform domain.
pub(crate) fn combine<'a, E, I>(first: &E, rest: I) -> Result<E, RingError>
where
    E: RingElement + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut sum = first.clone().into_representation(Representation::Transform);
    for share in rest {
        sum = sum.try_add(&share.clone().into_representation(Representation::Transform))?;
    }
    Ok(sum)
}
