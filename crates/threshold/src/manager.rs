// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{additive, shamir, PartyId, PartyShare, PartyShareMap, ShareMode};
use hecc_core::{CryptoError, Result};
use hecc_ring::RingElement;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

/// Splits and reconstructs secrets for `N` parties under threshold `t`.
///
/// Requires `N >= 2` and a strict majority `t > N / 2`. Sharing and recovery
/// further require `N` to be smaller than every limb modulus so that party
/// indices are distinct non-zero residues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareManager {
    num_parties: u32,
    threshold: u32,
}

impl ShareManager {
    pub fn new(num_parties: u32, threshold: u32) -> Result<Self> {
        if num_parties < 2 {
            return Err(CryptoError::config(format!(
                "Number of parties needs to be at least 2, got {num_parties}"
            )));
        }
        if threshold <= num_parties / 2 {
            return Err(CryptoError::config(format!(
                "Threshold required to be majority (more than N/2), got t={threshold} for N={num_parties}"
            )));
        }
        Ok(Self {
            num_parties,
            threshold,
        })
    }

    pub fn num_parties(&self) -> u32 {
        self.num_parties
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    fn check_moduli(&self, moduli: &[u64]) -> Result<()> {
        if let Some(q) = moduli.iter().find(|&&q| u64::from(self.num_parties) >= q) {
            return Err(CryptoError::math(format!(
                "Number of parties N={} needs to be less than every limb modulus, found {q}",
                self.num_parties
            )));
        }
        Ok(())
    }

    /// Shares `secret` for every party except `sharer`.
    ///
    /// Additive shares are in transform representation, Shamir shares in
    /// coefficient representation.
    pub fn share<E, R>(
        &self,
        secret: &E,
        sharer: PartyId,
        mode: ShareMode,
        rng: &mut R,
    ) -> Result<PartyShareMap<E>>
    where
        E: RingElement,
        R: RngCore + CryptoRng,
    {
        self.check_moduli(secret.moduli())?;
        if sharer == 0 || sharer > self.num_parties {
            return Err(CryptoError::config(format!(
                "Sharer index {sharer} outside 1..={}",
                self.num_parties
            )));
        }

        let recipients = (1..=self.num_parties).filter(|&party| party != sharer);
        let shares = match mode {
            ShareMode::Additive => {
                let elements = additive::split(secret, self.num_parties as usize - 1, rng)?;
                recipients.zip(elements).collect::<PartyShareMap<E>>()
            }
            ShareMode::Shamir => {
                let polynomial = shamir::sharing_polynomial(secret, self.threshold as usize, rng);
                recipients
                    .map(|party| Ok((party, shamir::evaluate(&polynomial, party)?)))
                    .collect::<Result<PartyShareMap<E>>>()?
            }
        };

        info!(
            parties = self.num_parties,
            threshold = self.threshold,
            sharer,
            mode = %mode,
            shares = shares.len(),
            "Shared secret element"
        );
        Ok(shares)
    }

    /// Reconstructs the secret element from at least `t` shares. The result is
    /// in transform representation.
    ///
    /// Shares with an index outside `1..=N` are ignored and for a repeated index
    /// only the first share counts. Additive recovery sums the first `t` shares
    /// in ascending index order, which reproduces the secret only when
    /// `t == N - 1`.
    pub fn recover<E: RingElement>(&self, shares: &[PartyShare<E>], mode: ShareMode) -> Result<E> {
        let threshold = self.threshold as usize;
        if shares.len() < threshold {
            return Err(CryptoError::config(format!(
                "Number of shares available ({}) less than threshold of the sharing scheme ({threshold})",
                shares.len()
            )));
        }
        self.check_moduli(shares[0].element.moduli())?;

        let mut known: Vec<&PartyShare<E>> = shares
            .iter()
            .filter(|s| (1..=self.num_parties).contains(&s.party))
            .collect();
        known.sort_by_key(|s| s.party);
        let before = known.len();
        known.dedup_by_key(|s| s.party);
        let has_duplicates = known.len() != before;

        if has_duplicates && shares.len() == threshold {
            warn!(shares = shares.len(), threshold, "Duplicate share indices");
            return Err(CryptoError::config(
                "Not enough shares to recover the secret",
            ));
        }
        if known.len() < threshold {
            warn!(distinct = known.len(), threshold, "Too few distinct shares");
            return Err(CryptoError::config(format!(
                "Only {} distinct shares, threshold is {threshold}",
                known.len()
            )));
        }

        debug!(mode = %mode, distinct = known.len(), threshold, "Recovering secret element");
        match mode {
            ShareMode::Additive => Ok(additive::combine(
                &known[0].element,
                known[1..threshold].iter().map(|s| &s.element),
            )?),
            ShareMode::Shamir => shamir::interpolate(&known),
        }
    }
}
