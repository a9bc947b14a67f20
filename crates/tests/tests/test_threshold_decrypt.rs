// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use hecc_config::{load_config, AppConfig};
use hecc_context::CryptoContext;
use hecc_core::{
    CiphertextMetadata, DecodePath, DecodedValues, EncodingType, ErrorKind, ExecutionMode,
    KeySwitchTechnique, PlaintextElement, ScalingTechnique,
};
use hecc_logger::{parse_level, setup_tracing, try_setup_tracing};
use hecc_ring::{Representation, RingElement};
use hecc_test_helpers::{StubBackend, TestSetup, STUB_SCALING_FACTOR};
use std::io::Write;
use std::sync::Once;
use tempfile::NamedTempFile;
use tracing::Level;

static TRACING: Once = Once::new();

const CONFIG: &str = r#"
scheme:
  rns: true
  scaling_technique: fixed_auto
  execution_mode: noise_estimation
  key_switch_technique: bv
threshold:
  num_parties: 5
  threshold: 3
  mode: shamir
log_level: debug
"#;

fn config_file() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(CONFIG.as_bytes())?;
    Ok(file)
}

/// Loads the config file and installs the global subscriber at its log level,
/// once per test binary.
fn load(file: &NamedTempFile) -> Result<AppConfig> {
    let config = load_config(Some(file.path()))?;
    let level = parse_level(&config.log_level)?;
    TRACING.call_once(|| setup_tracing(level));
    Ok(config)
}

fn rns_context(setup: &TestSetup, config: &AppConfig) -> Result<CryptoContext<StubBackend>> {
    Ok(CryptoContext::new(
        config.crypto_parameters(),
        StubBackend::rns(setup.ring.clone()),
        setup.rng.clone(),
    )?)
}

#[test]
fn test_configured_technique_reaches_backend() -> Result<()> {
    let file = config_file()?;
    let config = load(&file)?;
    let setup = TestSetup::new(400)?;
    let cc = rns_context(&setup, &config)?;

    assert_eq!(
        cc.backend().key_switch_technique(),
        Some(KeySwitchTechnique::Bv)
    );
    assert_eq!(cc.params().scaling_technique(), ScalingTechnique::FixedAuto);
    Ok(())
}

#[test]
fn test_configured_log_level_drives_global_subscriber() -> Result<()> {
    let file = config_file()?;
    let config = load(&file)?;
    assert_eq!(config.log_level, "debug");

    assert!(tracing::enabled!(Level::DEBUG));
    assert!(!tracing::enabled!(Level::TRACE));
    assert!(try_setup_tracing(Level::INFO).is_err());
    Ok(())
}

#[test]
fn test_rns_backend_with_plain_config_fails() -> Result<()> {
    let setup = TestSetup::new(401)?;
    let err = rns_context(&setup, &AppConfig::default()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Type);
    Ok(())
}

/// Shares the secret, recovers it from a quorum, then fuses partial
/// decryptions with the configured decode settings.
#[test]
fn test_threshold_round_trip_with_configured_context() -> Result<()> {
    let file = config_file()?;
    let config = load(&file)?;
    let threshold = &config.threshold;
    let setup = TestSetup::new(402)?;
    let cc = rns_context(&setup, &config)?;
    let kp = cc.key_gen()?;

    let shares = cc.share_keys(
        &kp.secret_key,
        threshold.num_parties,
        threshold.threshold,
        2,
        threshold.mode,
    )?;
    let mut recovered = kp.secret_key.clone();
    cc.recover_shared_key(
        &mut recovered,
        &shares.select(&[1, 4, 5]),
        threshold.num_parties,
        threshold.threshold,
        threshold.mode,
    )?;
    assert_eq!(
        recovered.element(),
        &kp.secret_key
            .element()
            .clone()
            .into_representation(Representation::Transform)
    );

    let metadata = CiphertextMetadata {
        noise_scale_degree: 1,
        level: 2,
        scaling_factor: 4096.0,
        slots: 8,
    };
    let partials: Vec<_> = (0..threshold.num_parties)
        .map(|_| {
            setup
                .ciphertext(cc.id(), &kp.public_key, EncodingType::CkksPacked, 2)
                .with_metadata(metadata.clone())
        })
        .collect();

    let (pt, result) = cc.multiparty_decrypt_fusion(&partials)?;
    assert!(result.is_valid);
    assert_eq!(result.scaling_factor_int, STUB_SCALING_FACTOR);
    assert_eq!(pt.path(), DecodePath::Wide);
    assert!(matches!(pt.element(), PlaintextElement::Wide(_)));
    assert_eq!(pt.metadata(), Some(&metadata));
    assert!(matches!(pt.values(), Some(DecodedValues::Reals(_))));

    let params = cc.backend().last_packed_params().unwrap();
    assert_eq!(params.scaling_technique, ScalingTechnique::FixedAuto);
    assert_eq!(params.execution_mode, Some(ExecutionMode::NoiseEstimation));
    assert_eq!(params.scaling_factor, 4096.0);
    Ok(())
}

#[test]
fn test_mixed_encoding_fusion_never_reaches_backend() -> Result<()> {
    let setup = TestSetup::new(403)?;
    let cc = CryptoContext::new(
        AppConfig::default().crypto_parameters(),
        setup.backend(),
        setup.rng.clone(),
    )?;
    let kp = cc.key_gen()?;
    let before = cc.backend().total_calls();

    for (first, second) in [
        (EncodingType::Packed, EncodingType::CkksPacked),
        (EncodingType::CkksPacked, EncodingType::String),
        (EncodingType::CoefPacked, EncodingType::Packed),
    ] {
        let shares = vec![
            setup.ciphertext(cc.id(), &kp.public_key, first, 2),
            setup.ciphertext(cc.id(), &kp.public_key, first, 2),
            setup.ciphertext(cc.id(), &kp.public_key, second, 2),
        ];
        let err = cc.multiparty_decrypt_fusion(&shares).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }
    assert_eq!(cc.backend().total_calls(), before);
    Ok(())
}

#[test]
fn test_invalid_fusion_is_not_an_error() -> Result<()> {
    let setup = TestSetup::new(404)?;
    let cc = CryptoContext::new(
        AppConfig::default().crypto_parameters(),
        setup.backend(),
        setup.rng.clone(),
    )?;
    let kp = cc.key_gen()?;
    let partials = vec![
        setup.ciphertext(cc.id(), &kp.public_key, EncodingType::Packed, 2),
        setup.ciphertext(cc.id(), &kp.public_key, EncodingType::Packed, 2),
    ];

    cc.backend().set_decrypt_valid(false);
    let (pt, result) = cc.multiparty_decrypt_fusion(&partials)?;
    assert!(!result.is_valid);
    assert!(!pt.is_decoded());
    assert_eq!(cc.backend().calls("decode"), 0);

    cc.backend().set_decrypt_valid(true);
    let (pt, result) = cc.multiparty_decrypt_fusion(&partials)?;
    assert!(result.is_valid);
    assert!(matches!(pt.values(), Some(DecodedValues::Integers(_))));
    Ok(())
}
