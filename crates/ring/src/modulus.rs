// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::RingError;
use fhe_math::zq::Modulus;
use num_integer::Integer;

/// Arithmetic modulo a single CRT limb modulus.
#[derive(Clone, Debug)]
pub struct LimbModulus {
    inner: Modulus,
    value: u64,
}

impl LimbModulus {
    pub fn new(value: u64) -> Result<Self, RingError> {
        Ok(Self {
            inner: Modulus::new(value)?,
            value,
        })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn reduce(&self, a: u64) -> u64 {
        self.inner.reduce(a)
    }

    /// Maps a signed value into `[0, q)`. Negative inputs wrap around the modulus.
    pub fn reduce_signed(&self, a: i64) -> u64 {
        let q = self.value as i128;
        (a as i128).rem_euclid(q) as u64
    }

    pub fn add(&self, a: u64, b: u64) -> u64 {
        self.inner.add(self.reduce(a), self.reduce(b))
    }

    pub fn mul(&self, a: u64, b: u64) -> u64 {
        self.inner.mul(self.reduce(a), self.reduce(b))
    }

    /// Multiplicative inverse of `a`, or `None` when `a` shares a factor with `q`.
    pub fn inverse(&self, a: u64) -> Option<u64> {
        let a = self.reduce(a) as i128;
        let q = self.value as i128;
        let egcd = a.extended_gcd(&q);
        if egcd.gcd != 1 {
            return None;
        }
        Some(egcd.x.rem_euclid(q) as u64)
    }
}
