// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use fhe_math::rq::Poly;
use hecc_context::CryptoContext;
use hecc_core::{CryptoParameters, ErrorKind, SecretKey};
use hecc_ring::{Representation, RingElement};
use hecc_test_helpers::{StubBackend, TestSetup};
use hecc_threshold::{PartyId, PartyShare, ShareMode};

fn context(setup: &TestSetup) -> Result<CryptoContext<StubBackend>> {
    Ok(CryptoContext::new(
        CryptoParameters::plain(),
        setup.backend(),
        setup.rng.clone(),
    )?)
}

fn in_coefficients(element: &Poly) -> Poly {
    element
        .clone()
        .into_representation(Representation::Coefficient)
}

/// All `k`-element subsets of `items`, in lexicographic order.
fn subsets(items: &[PartyId], k: usize) -> Vec<Vec<PartyId>> {
    if k == 0 {
        return vec![vec![]];
    }
    let mut out = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        for mut rest in subsets(&items[i + 1..], k - 1) {
            rest.insert(0, first);
            out.push(rest);
        }
    }
    out
}

#[test]
fn test_additive_shares_sum_to_secret_for_every_sharer() -> Result<()> {
    let setup = TestSetup::new(300)?;
    let cc = context(&setup)?;
    let kp = cc.key_gen()?;
    let secret = kp
        .secret_key
        .element()
        .clone()
        .into_representation(Representation::Transform);

    for sharer in 1..=5 {
        let shares = cc.share_keys(&kp.secret_key, 5, 4, sharer, ShareMode::Additive)?;
        assert_eq!(shares.len(), 4);
        let mut sum = secret.zero_like(Representation::Transform);
        for share in shares.values() {
            sum = sum.try_add(share)?;
        }
        assert_eq!(sum, secret);
    }
    Ok(())
}

#[test]
fn test_shamir_any_three_of_four_recover_the_secret() -> Result<()> {
    let setup = TestSetup::new(301)?;
    let cc = context(&setup)?;
    let kp = cc.key_gen()?;
    let expected = in_coefficients(kp.secret_key.element());

    for sharer in [1, 3, 5] {
        let shares = cc.share_keys(&kp.secret_key, 5, 3, sharer, ShareMode::Shamir)?;
        let holders: Vec<PartyId> = shares.keys().copied().collect();
        for subset in subsets(&holders, 3) {
            let mut sk = kp.secret_key.clone();
            cc.recover_shared_key(&mut sk, &shares.select(&subset), 5, 3, ShareMode::Shamir)?;
            assert_eq!(in_coefficients(sk.element()), expected, "subset {subset:?}");
            for k in 0..expected.limb_count() {
                assert_eq!(in_coefficients(sk.element()).limb(k)?, expected.limb(k)?);
            }
        }
    }
    Ok(())
}

#[test]
fn test_duplicate_shares_at_threshold_fail() -> Result<()> {
    let setup = TestSetup::new(302)?;
    let cc = context(&setup)?;
    let kp = cc.key_gen()?;
    let shares = cc.share_keys(&kp.secret_key, 5, 3, 1, ShareMode::Shamir)?;

    let two = shares.select(&[2, 3]);
    let duplicated: Vec<PartyShare<Poly>> = vec![two[0].clone(), two[1].clone(), two[0].clone()];
    for mode in [ShareMode::Shamir, ShareMode::Additive] {
        let mut sk: SecretKey<Poly> = kp.secret_key.clone();
        let err = cc
            .recover_shared_key(&mut sk, &duplicated, 5, 3, mode)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        let err = cc
            .recover_shared_key(&mut sk, &two, 5, 3, mode)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
    Ok(())
}

#[test]
fn test_party_bounds_for_every_mode() -> Result<()> {
    let setup = TestSetup::new(303)?;
    let cc = context(&setup)?;
    let kp = cc.key_gen()?;

    let small = TestSetup::with_moduli(304, &[17], 8)?;
    let small_cc = context(&small)?;
    let small_kp = small_cc.key_gen()?;

    for mode in [ShareMode::Additive, ShareMode::Shamir] {
        for (n, t) in [(4, 2), (5, 2), (6, 3), (1, 1)] {
            let err = cc.share_keys(&kp.secret_key, n, t, 1, mode).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "N={n} t={t}");
            let mut sk = kp.secret_key.clone();
            let err = cc
                .recover_shared_key(&mut sk, &[], n, t, mode)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "N={n} t={t}");
        }

        for n in [17, 20] {
            let t = n / 2 + 1;
            let err = small_cc
                .share_keys(&small_kp.secret_key, n, t, 1, mode)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Math, "N={n}");

            let shares: Vec<_> = (1..=t)
                .map(|party| PartyShare::new(party, small_kp.secret_key.element().clone()))
                .collect();
            let mut sk = small_kp.secret_key.clone();
            let err = small_cc
                .recover_shared_key(&mut sk, &shares, n, t, mode)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Math, "N={n}");
        }
    }
    Ok(())
}
