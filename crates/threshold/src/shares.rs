// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::collections::BTreeMap;
use std::ops::Deref;

/// Party index, `1..=N`.
pub type PartyId = u32;

/// One party's share as handed to reconstruction.
#[derive(Clone, Debug, PartialEq)]
pub struct PartyShare<E> {
    pub party: PartyId,
    pub element: E,
}

impl<E> PartyShare<E> {
    pub fn new(party: PartyId, element: E) -> Self {
        Self { party, element }
    }
}

/// Shares produced by one sharing, by recipient index.
#[derive(Clone, Debug, PartialEq)]
pub struct PartyShareMap<E>(BTreeMap<PartyId, E>);

impl<E> Default for PartyShareMap<E> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<E> Deref for PartyShareMap<E> {
    type Target = BTreeMap<PartyId, E>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> PartyShareMap<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, party: PartyId, element: E) -> Option<E> {
        self.0.insert(party, element)
    }

    pub fn remove(&mut self, party: PartyId) -> Option<E> {
        self.0.remove(&party)
    }

    /// Shares in ascending party order.
    pub fn into_shares(self) -> Vec<PartyShare<E>> {
        self.0
            .into_iter()
            .map(|(party, element)| PartyShare::new(party, element))
            .collect()
    }
}

impl<E: Clone> PartyShareMap<E> {
    /// Copies of the shares held by `parties`, skipping unknown indices.
    pub fn select(&self, parties: &[PartyId]) -> Vec<PartyShare<E>> {
        parties
            .iter()
            .filter_map(|party| {
                self.0
                    .get(party)
                    .map(|element| PartyShare::new(*party, element.clone()))
            })
            .collect()
    }
}

impl<E> FromIterator<(PartyId, E)> for PartyShareMap<E> {
    fn from_iter<T: IntoIterator<Item = (PartyId, E)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<E> IntoIterator for PartyShareMap<E> {
    type Item = (PartyId, E);
    type IntoIter = std::collections::btree_map::IntoIter<PartyId, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
