// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use hecc_core::{
    CryptoParameters, ExecutionMode, KeySwitchTechnique, Result, RnsParameters, ScalingTechnique,
};
use hecc_threshold::{ShareManager, ShareMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    pub scaling_technique: ScalingTechnique,
    pub execution_mode: ExecutionMode,
    pub key_switch_technique: KeySwitchTechnique,
    /// Whether the parameter object is RNS-based
    pub rns: bool,
}

impl SchemeConfig {
    pub fn to_parameters(&self) -> CryptoParameters {
        if !self.rns {
            return CryptoParameters::plain();
        }
        CryptoParameters::rns(RnsParameters {
            scaling_technique: self.scaling_technique,
            execution_mode: self.execution_mode,
            key_switch_technique: self.key_switch_technique,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub num_parties: u32,
    pub threshold: u32,
    pub mode: ShareMode,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            num_parties: 3,
            threshold: 2,
            mode: ShareMode::Shamir,
        }
    }
}

impl ThresholdConfig {
    /// Rejects party counts and thresholds the share manager would refuse.
    pub fn validate(&self) -> Result<ShareManager> {
        ShareManager::new(self.num_parties, self.threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scheme: SchemeConfig,
    pub threshold: ThresholdConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeConfig::default(),
            threshold: ThresholdConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn crypto_parameters(&self) -> CryptoParameters {
        self.scheme.to_parameters()
    }
}
