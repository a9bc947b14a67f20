// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for ring element operations.

use crate::Representation;
use thiserror::Error;

/// Errors that can occur while reading, replacing or combining limbs.
#[derive(Debug, Error)]
pub enum RingError {
    /// Limb index does not exist in this element
    #[error("limb index {index} out of range for element with {limbs} limbs")]
    LimbOutOfRange { index: usize, limbs: usize },

    /// Replacement limb has the wrong number of slots
    #[error("limb length ({len}) must match ring dimension ({degree})")]
    DegreeMismatch { len: usize, degree: usize },

    /// A slot value is not reduced modulo its limb modulus
    #[error("value {value} is not reduced modulo {modulus}")]
    Unreduced { value: u64, modulus: u64 },

    /// One scalar per limb is required
    #[error("scalar count ({scalars}) must match limb count ({limbs})")]
    ScalarCountMismatch { scalars: usize, limbs: usize },

    /// Operands are held in different representations
    #[error("representation mismatch: {left:?} vs {right:?}")]
    RepresentationMismatch {
        left: Representation,
        right: Representation,
    },

    /// Operands belong to different parameter sets
    #[error("elements belong to different ring parameters")]
    ContextMismatch,

    /// Error raised by fhe-math
    #[error("Math error: {0}")]
    Math(#[from] fhe_math::Error),
}
