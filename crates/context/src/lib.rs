// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Crypto context
//!
//! [`CryptoContext`] owns one scheme backend and the evaluation key caches of
//! every key generated through it. Each operation validates that its inputs
//! were produced by this context, fetches the keys it needs from the cache and
//! delegates the arithmetic to the backend.
//!
//! The context has no interior locking. Mutating operations (key generation,
//! setup, clearing) take `&mut self`; wrap the context in a
//! [`SharedCryptoContext`] to share it across threads.

mod bootstrap;
mod chebyshev;
mod context;
mod decrypt;
mod eval;
mod keygen;
mod scheme_switch;
mod threshold;

pub use chebyshev::eval_chebyshev_coefficients;
pub use context::*;
pub use decrypt::select_decode_path;
