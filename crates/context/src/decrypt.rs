// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::Elem;
use crate::CryptoContext;
use hecc_core::{
    Ciphertext, CryptoError, DecodePath, DecryptResult, EncodingType, PackedDecodeParams,
    Plaintext, Provenance, Result, SchemeBackend, SecretKey,
};
use tracing::{debug, warn};

/// Wide arithmetic is needed as soon as the ciphertext still holds more than
/// one CRT limb. This holds for every encoding, integer ones included.
pub fn select_decode_path(limbs: usize) -> DecodePath {
    if limbs > 1 {
        DecodePath::Wide
    } else {
        DecodePath::Native
    }
}

impl<B: SchemeBackend> CryptoContext<B> {
    /// Decrypts and decodes `ct`.
    ///
    /// A decryption the backend flags as invalid is returned as is, with the
    /// plaintext left undecoded.
    pub fn decrypt(
        &self,
        ct: &Ciphertext<Elem<B>>,
        sk: &SecretKey<Elem<B>>,
    ) -> Result<(Plaintext, DecryptResult)> {
        self.ensure_owned("Decrypt", "ciphertext", ct)?;
        self.ensure_owned("Decrypt", "private key", sk)?;
        if ct.elements().is_empty() {
            return Err(CryptoError::config("Decrypt: ciphertext has no elements"));
        }

        let path = select_decode_path(ct.limb_count());
        let mut pt = Plaintext::for_decrypt(ct.encoding(), path);
        let (result, element) = self.backend.decrypt(ct, sk, path)?;
        pt.set_element(element);
        debug!(tag = %ct.key_tag(), path = %path, valid = result.is_valid, "Decrypted");

        self.finish_decode(ct, &mut pt, result)?;
        Ok((pt, result))
    }

    /// Fuses partial decryptions from every party into one plaintext.
    ///
    /// All shares must come from this context and agree on the encoding. An
    /// empty share list yields an invalid result.
    pub fn multiparty_decrypt_fusion(
        &self,
        shares: &[Ciphertext<Elem<B>>],
    ) -> Result<(Plaintext, DecryptResult)> {
        let Some(first) = shares.first() else {
            warn!("MultipartyDecryptFusion called without partial decryptions");
            return Ok((
                Plaintext::for_decrypt(EncodingType::Packed, DecodePath::Native),
                DecryptResult::invalid(),
            ));
        };

        let encoding = first.encoding();
        for share in shares {
            self.ensure_owned("MultipartyDecryptFusion", "partial decryption", share)?;
            if share.encoding() != encoding {
                return Err(CryptoError::type_error(format!(
                    "MultipartyDecryptFusion: encoding {} does not match {}",
                    share.encoding(),
                    encoding
                )));
            }
        }

        let path = select_decode_path(first.limb_count());
        let mut pt = Plaintext::for_decrypt(encoding, path);
        let (result, element) = self.backend.multiparty_decrypt_fusion(shares, path)?;
        pt.set_element(element);
        debug!(shares = shares.len(), path = %path, valid = result.is_valid, "Fused partial decryptions");

        self.finish_decode(first, &mut pt, result)?;
        Ok((pt, result))
    }

    fn finish_decode(
        &self,
        ct: &Ciphertext<Elem<B>>,
        pt: &mut Plaintext,
        result: DecryptResult,
    ) -> Result<()> {
        if !result.is_valid {
            return Ok(());
        }
        pt.set_scaling_factor_int(result.scaling_factor_int);

        if ct.encoding().is_packed_real() {
            let metadata = ct.metadata().clone();
            let params = PackedDecodeParams {
                noise_scale_degree: metadata.noise_scale_degree,
                scaling_factor: metadata.scaling_factor,
                scaling_technique: self.params.scaling_technique(),
                execution_mode: self
                    .params
                    .is_rns()
                    .then(|| self.params.execution_mode()),
            };
            pt.set_metadata(metadata);
            self.backend.decode_packed(pt, &params)?;
        } else {
            self.backend.decode(pt)?;
        }
        Ok(())
    }
}
