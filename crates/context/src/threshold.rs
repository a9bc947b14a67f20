// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::Elem;
use crate::CryptoContext;
use hecc_core::{lock_rng, Provenance, Result, SchemeBackend, SecretKey};
use hecc_threshold::{PartyId, PartyShare, PartyShareMap, ShareManager, ShareMode};

impl<B: SchemeBackend> CryptoContext<B> {
    /// Splits the secret element of `sk` into shares for every party except
    /// `index`, using the context rng.
    pub fn share_keys(
        &self,
        sk: &SecretKey<Elem<B>>,
        num_parties: u32,
        threshold: u32,
        index: PartyId,
        mode: ShareMode,
    ) -> Result<PartyShareMap<Elem<B>>> {
        self.ensure_owned("ShareKeys", "private key", sk)?;
        let manager = ShareManager::new(num_parties, threshold)?;
        let mut rng = lock_rng(&self.rng)?;
        manager.share(sk.element(), index, mode, &mut *rng)
    }

    /// Reconstructs a secret element from `shares` and installs it into `sk`.
    /// `sk` keeps its context and tag.
    pub fn recover_shared_key(
        &self,
        sk: &mut SecretKey<Elem<B>>,
        shares: &[PartyShare<Elem<B>>],
        num_parties: u32,
        threshold: u32,
        mode: ShareMode,
    ) -> Result<()> {
        self.ensure_owned("RecoverSharedKey", "private key", sk)?;
        let manager = ShareManager::new(num_parties, threshold)?;
        let element = manager.recover(shares, mode)?;
        sk.set_element(element);
        Ok(())
    }
}
