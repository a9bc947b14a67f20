// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Value objects shared by every HECC crate, the error taxonomy, and the
//! contracts a scheme backend implements to plug into a crypto context.

mod backend;
mod bootstrap;
mod ciphertext;
mod errors;
mod ids;
mod keys;
mod params;
mod plaintext;
mod rng;
mod scheme_switch;

pub use backend::*;
pub use bootstrap::*;
pub use ciphertext::*;
pub use errors::*;
pub use ids::*;
pub use keys::*;
pub use params::*;
pub use plaintext::*;
pub use rng::*;
pub use scheme_switch::*;
