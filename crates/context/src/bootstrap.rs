// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::Elem;
use crate::CryptoContext;
use hecc_core::{BootstrapConfig, Bootstrapping, Ciphertext, Provenance, Result, SecretKey};
use tracing::info;

impl<B: Bootstrapping> CryptoContext<B> {
    pub fn eval_bootstrap_setup(&mut self, config: &BootstrapConfig) -> Result<()> {
        self.backend.bootstrap_setup(config)?;
        info!(
            context = %self.id,
            level_budget = ?config.level_budget,
            num_slots = config.num_slots,
            "Bootstrapping precomputed"
        );
        Ok(())
    }

    /// Generates the rotation keys bootstrapping needs and merges them into
    /// the automorphism store.
    pub fn eval_bootstrap_key_gen(&mut self, sk: &SecretKey<Elem<B>>, num_slots: u32) -> Result<()> {
        self.ensure_owned("EvalBootstrapKeyGen", "private key", sk)?;
        let materials = self.backend.bootstrap_key_gen(sk, num_slots)?;
        self.merge_rotation_keys("EvalBootstrapKeyGen", sk.key_tag(), materials);
        Ok(())
    }

    pub fn eval_bootstrap(
        &self,
        ct: &Ciphertext<Elem<B>>,
        num_iterations: u32,
        precision: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.ensure_owned("EvalBootstrap", "ciphertext", ct)?;
        let keys = self.registry.automorphism_keys(ct.key_tag())?;
        Ok(self
            .backend
            .bootstrap(ct, keys, num_iterations, precision)?)
    }
}
