// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{CryptoError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedRng = Arc<Mutex<ChaCha20Rng>>;

pub fn create_shared_rng_from_u64(value: u64) -> SharedRng {
    Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(value)))
}

/// Locks the shared rng, mapping poisoning to a [`CryptoError`].
pub fn lock_rng(rng: &SharedRng) -> Result<MutexGuard<'_, ChaCha20Rng>> {
    rng.lock().map_err(|_| CryptoError::RngPoisoned)
}
