// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::AppConfig;
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use std::path::Path;
use tracing::info;

pub const ENV_PREFIX: &str = "HECC_";

/// Loads defaults, then the YAML file at `path` if one is given, then
/// `HECC_` environment variables (`__` separates nested keys, e.g.
/// `HECC_THRESHOLD__NUM_PARTIES`).
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            bail!("Configuration file not found: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }

    let config: AppConfig = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Could not parse configuration")?;

    config
        .threshold
        .validate()
        .context("Invalid threshold configuration")?;

    info!(
        rns = config.scheme.rns,
        parties = config.threshold.num_parties,
        threshold = config.threshold.threshold,
        mode = %config.threshold.mode,
        "Loaded configuration"
    );
    Ok(config)
}
