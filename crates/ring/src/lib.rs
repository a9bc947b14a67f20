// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Ring elements
//!
//! The narrow contract the crypto-context core needs from a cyclotomic ring
//! element split into CRT limbs:
//!
//! - per-limb read and replace,
//! - switching between coefficient and transform (NTT) representation,
//! - limb-wise addition, subtraction and scalar multiplication.
//!
//! [`fhe_math::rq::Poly`] implements the contract out of the box, so production
//! code and tests run on real RNS polynomials.

mod element;
mod errors;
mod modulus;
mod poly;

pub use element::{RingElement, Representation};
pub use errors::RingError;
pub use modulus::LimbModulus;
