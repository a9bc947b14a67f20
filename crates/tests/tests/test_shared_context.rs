// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, Result};
use hecc_context::{CryptoContext, SharedCryptoContext};
use hecc_core::{CryptoParameters, EncodingType, Provenance};
use hecc_logger::parse_level;
use hecc_test_helpers::{StubBackend, TestSetup};
use std::thread;
use tracing_subscriber::{fmt, EnvFilter};

fn shared_context(setup: &TestSetup) -> Result<SharedCryptoContext<StubBackend>> {
    Ok(CryptoContext::new(CryptoParameters::plain(), setup.backend(), setup.rng.clone())?
        .into_shared())
}

#[test]
fn test_concurrent_key_generation_and_rotation() -> Result<()> {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new(parse_level("info")?.to_string()))
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let setup = TestSetup::new(500)?;
    let cc = shared_context(&setup)?;
    let kp = cc
        .read()
        .map_err(|_| anyhow!("context lock poisoned"))?
        .key_gen()?;
    let ct = {
        let guard = cc.read().map_err(|_| anyhow!("context lock poisoned"))?;
        setup.ciphertext(guard.id(), &kp.public_key, EncodingType::Packed, 2)
    };

    let writers: Vec<_> = (1..=4)
        .map(|shift: i32| {
            let cc = cc.clone();
            let sk = kp.secret_key.clone();
            thread::spawn(move || -> Result<()> {
                let mut guard = cc.write().map_err(|_| anyhow!("context lock poisoned"))?;
                guard.eval_at_index_key_gen(&sk, &[shift, -shift], None)?;
                Ok(())
            })
        })
        .collect();
    for writer in writers {
        writer.join().map_err(|_| anyhow!("writer panicked"))??;
    }

    let readers: Vec<_> = (1..=4)
        .map(|shift: i32| {
            let cc = cc.clone();
            let ct = ct.clone();
            thread::spawn(move || -> Result<()> {
                let guard = cc.read().map_err(|_| anyhow!("context lock poisoned"))?;
                guard.eval_at_index(&ct, shift)?;
                guard.eval_at_index(&ct, -shift)?;
                Ok(())
            })
        })
        .collect();
    for reader in readers {
        reader.join().map_err(|_| anyhow!("reader panicked"))??;
    }

    let guard = cc.read().map_err(|_| anyhow!("context lock poisoned"))?;
    let keys = guard.eval_automorphism_keys(kp.secret_key.key_tag())?;
    assert_eq!(keys.len(), 8);
    assert_eq!(guard.backend().calls("eval_at_index"), 8);
    Ok(())
}
