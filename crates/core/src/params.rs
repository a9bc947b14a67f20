// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};

/// Rescaling strategy of an approximate (CKKS-style) scheme.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScalingTechnique {
    FixedManual,
    FixedAuto,
    #[default]
    FlexibleAuto,
    FlexibleAutoExt,
    NoRescale,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ExecutionMode {
    #[default]
    Evaluation,
    NoiseEstimation,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum KeySwitchTechnique {
    Bv,
    #[default]
    Hybrid,
}

/// Settings that only exist on RNS parameter sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RnsParameters {
    pub scaling_technique: ScalingTechnique,
    pub execution_mode: ExecutionMode,
    pub key_switch_technique: KeySwitchTechnique,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoParameters {
    rns: Option<RnsParameters>,
}

impl CryptoParameters {
    pub fn rns(rns: RnsParameters) -> Self {
        Self { rns: Some(rns) }
    }

    /// Parameter object without RNS settings.
    pub fn plain() -> Self {
        Self { rns: None }
    }

    pub fn rns_parameters(&self) -> Option<&RnsParameters> {
        self.rns.as_ref()
    }

    pub fn is_rns(&self) -> bool {
        self.rns.is_some()
    }

    pub fn scaling_technique(&self) -> ScalingTechnique {
        self.rns
            .as_ref()
            .map_or(ScalingTechnique::FixedManual, |r| r.scaling_technique)
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.rns
            .as_ref()
            .map_or(ExecutionMode::Evaluation, |r| r.execution_mode)
    }
}

/// Inputs of the final numeric decode of a packed real plaintext.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedDecodeParams {
    pub noise_scale_degree: usize,
    pub scaling_factor: f64,
    pub scaling_technique: ScalingTechnique,
    /// Only set for RNS parameter sets.
    pub execution_mode: Option<ExecutionMode>,
}
