// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use hecc_context::CryptoContext;
use hecc_core::{
    BootstrapConfig, CryptoParameters, DecodedValues, EncodingType, ErrorKind, Plaintext,
    Provenance,
};
use hecc_test_helpers::{StubBackend, TestSetup};
use hecc_threshold::ShareMode;

fn context(setup: &TestSetup) -> Result<CryptoContext<StubBackend>> {
    Ok(CryptoContext::new(
        CryptoParameters::plain(),
        setup.backend(),
        setup.rng.clone(),
    )?)
}

/// A context with every key class generated for one key pair, and a second
/// context whose key pair and ciphertexts must all be rejected.
#[test]
fn test_foreign_inputs_fail_before_any_backend_call() -> Result<()> {
    let setup = TestSetup::new(200)?;
    let mut cc = context(&setup)?;
    let other = context(&setup)?;

    let kp = cc.key_gen()?;
    cc.eval_mult_key_gen(&kp.secret_key)?;
    cc.eval_sum_key_gen(&kp.secret_key, None)?;
    cc.eval_at_index_key_gen(&kp.secret_key, &[1, -1], None)?;
    cc.eval_bootstrap_setup(&BootstrapConfig::default())?;
    cc.eval_bootstrap_key_gen(&kp.secret_key, 8)?;
    let right_keys = cc.eval_sum_cols_key_gen(&kp.secret_key, None)?;

    let foreign_kp = other.key_gen()?;
    let local = setup.ciphertext(cc.id(), &kp.public_key, EncodingType::Packed, 2);
    let foreign = setup.ciphertext(other.id(), &kp.public_key, EncodingType::Packed, 2);
    let pt = Plaintext::from_values(EncodingType::Packed, DecodedValues::Integers(vec![1, 2]));

    let before = cc.backend().total_calls();
    let failures = vec![
        cc.eval_mult_key_gen(&foreign_kp.secret_key).unwrap_err(),
        cc.eval_sum_key_gen(&foreign_kp.secret_key, None).unwrap_err(),
        cc.eval_at_index_key_gen(&foreign_kp.secret_key, &[2], None)
            .unwrap_err(),
        cc.eval_bootstrap_key_gen(&foreign_kp.secret_key, 8)
            .unwrap_err(),
        cc.eval_sum(&foreign, 4).unwrap_err(),
        cc.eval_sum_rows(&foreign, 4, &right_keys, 0).unwrap_err(),
        cc.eval_sum_cols(&foreign, 4, &right_keys).unwrap_err(),
        cc.eval_at_index(&foreign, 0).unwrap_err(),
        cc.eval_at_index(&foreign, 1).unwrap_err(),
        cc.eval_merge(std::slice::from_ref(&foreign)).unwrap_err(),
        cc.eval_inner_product(&local, &foreign, 4).unwrap_err(),
        cc.eval_inner_product_plain(&foreign, &pt, 4).unwrap_err(),
        cc.eval_bootstrap(&foreign, 1, 0).unwrap_err(),
        cc.eval_logistic(&foreign, -4.0, 4.0, 8).unwrap_err(),
        cc.decrypt(&foreign, &kp.secret_key).unwrap_err(),
        cc.decrypt(&local, &foreign_kp.secret_key).unwrap_err(),
        cc.multiparty_decrypt_fusion(&[local.clone(), foreign.clone()])
            .unwrap_err(),
        cc.share_keys(&foreign_kp.secret_key, 5, 3, 1, ShareMode::Shamir)
            .unwrap_err(),
    ];

    for err in failures {
        assert_eq!(err.kind(), ErrorKind::Provenance, "{err}");
        assert!(err.kind().is_config_class());
    }
    assert_eq!(cc.backend().total_calls(), before);
    Ok(())
}

#[test]
fn test_rotation_by_zero_without_keys() -> Result<()> {
    let setup = TestSetup::new(201)?;
    let cc = context(&setup)?;
    let kp = cc.key_gen()?;
    let ct = setup.ciphertext(cc.id(), &kp.public_key, EncodingType::Packed, 3);

    assert!(!cc
        .registry()
        .all_automorphism_keys()
        .contains_key(kp.public_key.key_tag()));
    assert_eq!(cc.eval_at_index(&ct, 0)?, ct);
    Ok(())
}

#[test]
fn test_provenance_error_message_names_the_operation() -> Result<()> {
    let setup = TestSetup::new(202)?;
    let cc = context(&setup)?;
    let other = context(&setup)?;
    let kp = other.key_gen()?;
    let ct = setup.ciphertext(other.id(), &kp.public_key, EncodingType::Packed, 2);

    let err = cc.eval_sum(&ct, 4).unwrap_err();
    assert_eq!(
        err.to_string(),
        "EvalSum: ciphertext was not generated with this crypto context"
    );
    Ok(())
}
