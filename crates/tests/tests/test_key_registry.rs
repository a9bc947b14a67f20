// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use hecc_context::CryptoContext;
use hecc_core::{CryptoParameters, ErrorKind, Provenance};
use hecc_registry::KeyClass;
use hecc_test_helpers::{StubBackend, TestSetup};
use std::sync::Arc;
use strum::IntoEnumIterator;

fn context(setup: &TestSetup) -> Result<CryptoContext<StubBackend>> {
    Ok(CryptoContext::new(
        CryptoParameters::plain(),
        setup.backend(),
        setup.rng.clone(),
    )?)
}

#[test]
fn test_generated_keys_are_returned_by_lookup() -> Result<()> {
    let setup = TestSetup::new(100)?;
    let mut cc = context(&setup)?;
    let kp = cc.key_gen()?;
    let tag = kp.secret_key.key_tag().clone();

    cc.eval_mult_key_gen(&kp.secret_key)?;
    let mult = cc.eval_mult_keys(&tag)?.clone();
    assert!(Arc::ptr_eq(&mult[0], &cc.eval_mult_keys(&tag)?[0]));

    cc.eval_sum_key_gen(&kp.secret_key, Some(&kp.public_key))?;
    let sum = cc.eval_sum_keys(&tag)?;
    assert!(!sum.is_empty());
    assert!(sum.values().all(|k| k.key_tag() == &tag));

    cc.eval_at_index_key_gen(&kp.secret_key, &[3, 5], None)?;
    let rotation = cc.eval_automorphism_keys(&tag)?;
    assert_eq!(rotation.keys().copied().collect::<Vec<_>>(), vec![3, 5]);

    for class in KeyClass::iter() {
        assert!(cc.registry().contains(class, &tag));
        assert_eq!(cc.registry().len(class), 1);
    }
    Ok(())
}

#[test]
fn test_rotation_merge_keeps_existing_key_objects() -> Result<()> {
    let setup = TestSetup::new(101)?;
    let mut cc = context(&setup)?;
    let kp = cc.key_gen()?;
    let tag = kp.secret_key.key_tag().clone();

    cc.eval_at_index_key_gen(&kp.secret_key, &[1, 2], None)?;
    let first = cc.eval_automorphism_keys(&tag)?.clone();
    cc.eval_at_index_key_gen(&kp.secret_key, &[2, 3], None)?;
    let merged = cc.eval_automorphism_keys(&tag)?;

    assert_eq!(merged.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(Arc::ptr_eq(&merged[&1], &first[&1]));
    assert!(Arc::ptr_eq(&merged[&2], &first[&2]));
    Ok(())
}

#[test]
fn test_tags_are_isolated() -> Result<()> {
    let setup = TestSetup::new(102)?;
    let mut cc = context(&setup)?;
    let a = cc.key_gen()?;
    let b = cc.key_gen()?;

    cc.eval_sum_key_gen(&a.secret_key, None)?;
    assert_eq!(
        cc.eval_sum_keys(b.secret_key.key_tag()).unwrap_err().kind(),
        ErrorKind::NotFound
    );

    cc.eval_at_index_key_gen(&b.secret_key, &[7], None)?;
    cc.clear_eval_keys_for_tag(a.secret_key.key_tag());
    assert!(!cc.registry().contains(KeyClass::Sum, a.secret_key.key_tag()));
    assert!(cc
        .registry()
        .contains(KeyClass::Automorphism, b.secret_key.key_tag()));
    Ok(())
}

#[test]
fn test_contexts_do_not_share_caches() -> Result<()> {
    let setup = TestSetup::new(103)?;
    let mut first = context(&setup)?;
    let second = context(&setup)?;
    let kp = first.key_gen()?;
    first.eval_mult_key_gen(&kp.secret_key)?;

    assert!(second.registry().is_empty());
    assert_eq!(
        second.eval_mult_keys(kp.secret_key.key_tag()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    Ok(())
}

#[test]
fn test_raw_insert_of_exported_keys() -> Result<()> {
    let setup = TestSetup::new(104)?;
    let mut source = context(&setup)?;
    let kp = source.key_gen()?;
    let tag = kp.secret_key.key_tag().clone();
    source.eval_mult_keys_gen(&kp.secret_key)?;
    source.eval_sum_key_gen(&kp.secret_key, None)?;

    let mult = source.all_mult_keys()[&tag].clone();
    let sum = source.all_sum_keys()[&tag].clone();
    source.clear_eval_keys();
    assert!(source.registry().is_empty());

    source.insert_eval_mult_keys(mult.clone())?;
    source.insert_eval_sum_keys(sum)?;
    assert_eq!(source.eval_mult_keys(&tag)?.len(), mult.len());
    assert!(source.eval_sum_keys(&tag)?.values().all(|k| k.is_owned_by(source.id())));

    source.insert_eval_mult_keys(Vec::new())?;
    assert_eq!(source.eval_mult_keys(&tag)?.len(), mult.len());
    Ok(())
}
