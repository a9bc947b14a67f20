// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::Elem;
use crate::CryptoContext;
use hecc_core::{Ciphertext, CryptoError, Result, SchemeBackend};
use std::f64::consts::PI;
use tracing::debug;

/// Chebyshev interpolation coefficients of `f` over `[a, b]`, sampled at the
/// `degree + 1` Chebyshev nodes.
pub fn eval_chebyshev_coefficients<F>(f: F, a: f64, b: f64, degree: u32) -> Result<Vec<f64>>
where
    F: Fn(f64) -> f64,
{
    if degree == 0 {
        return Err(CryptoError::config(
            "Chebyshev interpolation requires a degree of at least 1",
        ));
    }

    let total = degree as usize + 1;
    let step = PI / total as f64;
    let half_width = 0.5 * (b - a);
    let midpoint = 0.5 * (b + a);

    let samples: Vec<f64> = (0..total)
        .map(|i| f((step * (i as f64 + 0.5)).cos() * half_width + midpoint))
        .collect();

    let scale = 2.0 / total as f64;
    Ok((0..total)
        .map(|i| {
            let sum: f64 = samples
                .iter()
                .enumerate()
                .map(|(j, value)| value * (step * i as f64 * (j as f64 + 0.5)).cos())
                .sum();
            scale * sum
        })
        .collect())
}

impl<B: SchemeBackend> CryptoContext<B> {
    /// Approximates `f` on `[a, b]` by a Chebyshev series of `degree` and
    /// evaluates it homomorphically.
    pub fn eval_chebyshev_function<F>(
        &self,
        f: F,
        ct: &Ciphertext<Elem<B>>,
        a: f64,
        b: f64,
        degree: u32,
    ) -> Result<Ciphertext<Elem<B>>>
    where
        F: Fn(f64) -> f64,
    {
        self.ensure_owned("EvalChebyshevFunction", "ciphertext", ct)?;
        let coefficients = eval_chebyshev_coefficients(f, a, b, degree)?;
        debug!(a, b, degree, "Evaluating Chebyshev series");
        Ok(self.backend.eval_chebyshev_series(ct, &coefficients, a, b)?)
    }

    pub fn eval_sin(
        &self,
        ct: &Ciphertext<Elem<B>>,
        a: f64,
        b: f64,
        degree: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.eval_chebyshev_function(f64::sin, ct, a, b, degree)
    }

    pub fn eval_cos(
        &self,
        ct: &Ciphertext<Elem<B>>,
        a: f64,
        b: f64,
        degree: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.eval_chebyshev_function(f64::cos, ct, a, b, degree)
    }

    /// Logistic function `1 / (1 + e^-x)`.
    pub fn eval_logistic(
        &self,
        ct: &Ciphertext<Elem<B>>,
        a: f64,
        b: f64,
        degree: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.eval_chebyshev_function(|x| 1.0 / (1.0 + (-x).exp()), ct, a, b, degree)
    }

    /// Reciprocal `1 / x`; `[a, b]` must not contain 0.
    pub fn eval_divide(
        &self,
        ct: &Ciphertext<Elem<B>>,
        a: f64,
        b: f64,
        degree: u32,
    ) -> Result<Ciphertext<Elem<B>>> {
        self.eval_chebyshev_function(|x| 1.0 / x, ct, a, b, degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::context;
    use anyhow::Result;
    use hecc_core::{EncodingType, ErrorKind};
    use hecc_test_helpers::TestSetup;

    /// Sum of `c_0 / 2 + sum c_i T_i(y)` with `y` mapped into `[-1, 1]`.
    fn series(coefficients: &[f64], a: f64, b: f64, x: f64) -> f64 {
        let y = (2.0 * x - a - b) / (b - a);
        let theta = y.acos();
        coefficients
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let t = (i as f64 * theta).cos();
                if i == 0 {
                    c * 0.5
                } else {
                    c * t
                }
            })
            .sum()
    }

    #[test]
    fn test_constant_function() -> Result<()> {
        let coefficients = eval_chebyshev_coefficients(|_| 3.0, -1.0, 1.0, 4)?;
        assert_eq!(coefficients.len(), 5);
        assert!((coefficients[0] - 6.0).abs() < 1e-12);
        assert!(coefficients[1..].iter().all(|c| c.abs() < 1e-12));
        Ok(())
    }

    #[test]
    fn test_linear_function_on_shifted_interval() -> Result<()> {
        // x on [0, 4] is 2 + 2y for y in [-1, 1]
        let coefficients = eval_chebyshev_coefficients(|x| x, 0.0, 4.0, 3)?;
        assert!((coefficients[0] - 4.0).abs() < 1e-12);
        assert!((coefficients[1] - 2.0).abs() < 1e-12);
        assert!(coefficients[2..].iter().all(|c| c.abs() < 1e-12));
        Ok(())
    }

    #[test]
    fn test_logistic_approximation() -> Result<()> {
        let logistic = |x: f64| 1.0 / (1.0 + (-x).exp());
        let coefficients = eval_chebyshev_coefficients(logistic, -4.0, 4.0, 20)?;
        for x in [-3.5, -1.0, 0.0, 0.5, 3.0] {
            assert!((series(&coefficients, -4.0, 4.0, x) - logistic(x)).abs() < 1e-4);
        }
        Ok(())
    }

    #[test]
    fn test_zero_degree_is_rejected() {
        let err = eval_chebyshev_coefficients(f64::sin, 0.0, 1.0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_named_functions_dispatch_series() -> Result<()> {
        let setup = TestSetup::new(5)?;
        let cc = context(&setup)?;
        let kp = cc.key_gen()?;
        let ct = setup.ciphertext(cc.id(), &kp.public_key, EncodingType::CkksPacked, 2);

        cc.eval_sin(&ct, -1.0, 1.0, 8)?;
        cc.eval_cos(&ct, -1.0, 1.0, 8)?;
        cc.eval_logistic(&ct, -4.0, 4.0, 16)?;
        cc.eval_divide(&ct, 1.0, 10.0, 32)?;
        assert_eq!(cc.backend().calls("eval_chebyshev_series"), 4);
        assert_eq!(cc.backend().last_chebyshev_coefficients().len(), 33);
        Ok(())
    }

    #[test]
    fn test_foreign_ciphertext_is_rejected() -> Result<()> {
        let setup = TestSetup::new(5)?;
        let cc = context(&setup)?;
        let other = context(&setup)?;
        let kp = other.key_gen()?;
        let ct = setup.ciphertext(other.id(), &kp.public_key, EncodingType::CkksPacked, 2);
        assert_eq!(
            cc.eval_sin(&ct, -1.0, 1.0, 8).unwrap_err().kind(),
            ErrorKind::Provenance
        );
        assert_eq!(cc.backend().calls("eval_chebyshev_series"), 0);
        Ok(())
    }
}
