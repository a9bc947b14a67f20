// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Threshold sharing of a secret ring element.
//!
//! A secret is split for `N` parties under a threshold `t` with either an
//! additive or a Shamir scheme. Shamir shares are evaluations of a random
//! degree `t - 1` polynomial whose constant term is the secret; all scalar
//! arithmetic runs independently per CRT limb.

mod additive;
mod manager;
mod mode;
mod shamir;
mod shares;

pub use manager::*;
pub use mode::*;
pub use shares::*;
