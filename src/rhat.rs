use crate::error::DiagnosticError;
use crate::utils::{as_three_dim, discard_warmup, split_chains};
use log::{debug, warn};
use ndarray::{Array1, Array2, Array3, ArrayBase, Axis, Data, Dimension};
use std::sync::Once;

/// R hat of a chain ensemble: one value for `(chains, samples)` input, one
/// value per parameter for `(chains, samples, parameters)` input.
#[derive(Debug, Clone, PartialEq)]
pub enum Rhat {
    Scalar(f64),
    PerParameter(Array1<f64>),
}

impl Rhat {
    /// The value for two dimensional input, `None` otherwise.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Rhat::Scalar(r) => Some(*r),
            Rhat::PerParameter(_) => None,
        }
    }

    /// The per-parameter values for three dimensional input, `None` otherwise.
    pub fn as_array(&self) -> Option<&Array1<f64>> {
        match self {
            Rhat::Scalar(_) => None,
            Rhat::PerParameter(r) => Some(r),
        }
    }

    /// All values, one per parameter.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Rhat::Scalar(r) => vec![*r],
            Rhat::PerParameter(r) => r.to_vec(),
        }
    }

    /// Number of parameters the values cover.
    pub fn len(&self) -> usize {
        match self {
            Rhat::Scalar(_) => 1,
            Rhat::PerParameter(r) => r.len(),
        }
    }

    /// True for a three dimensional ensemble with no parameters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Arguments of [`rhat_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RhatOptions {
    /// Number of samples discarded from the start of every chain.
    pub warmup_iter: usize,
}

impl RhatOptions {
    /// Options discarding `warmup_iter` samples per chain.
    pub fn with_warmup(warmup_iter: usize) -> Self {
        Self { warmup_iter }
    }
}

/// Mean within-chain variance `W` per parameter of `(chains, samples,
/// parameters)` draws, using Bessel's correction for each chain.
fn within(chains: &Array3<f64>) -> Result<Array1<f64>, DiagnosticError> {
    let within_chain_var: Array2<f64> = chains.var_axis(Axis(1), 1.0);
    within_chain_var
        .mean_axis(Axis(0))
        .ok_or(DiagnosticError::EmptyChain)
}

/// Between-chain variance `B` per parameter: the Bessel-corrected variance of
/// the chain means, scaled by the number of samples per chain.
fn between(chains: &Array3<f64>) -> Result<Array1<f64>, DiagnosticError> {
    let n = chains.len_of(Axis(1)) as f64;
    let within_chain_mean = chains
        .mean_axis(Axis(1))
        .ok_or(DiagnosticError::EmptyChain)?;
    Ok(within_chain_mean.var_axis(Axis(0), 1.0) * n)
}

/// Computes the split potential scale reduction (R hat) of `chains`
/// after discarding `warmup_iter` samples from the start of every chain.
///
/// See [`rhat_with`].
pub fn rhat<S, D>(chains: &ArrayBase<S, D>, warmup_iter: usize) -> Result<Rhat, DiagnosticError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    rhat_with(chains, RhatOptions::with_warmup(warmup_iter))
}

/// Computes the split potential scale reduction (R hat) for one or several
/// parameters, following Gelman et al., "Bayesian Data Analysis", 3rd
/// edition, section 11.4.
///
/// `chains` is either `(m, n)`, giving [`Rhat::Scalar`], or `(m, n, p)`,
/// giving [`Rhat::PerParameter`] of length `p`. After the warm-up is dropped,
/// every chain is split in half so that `2m` chains of length `n' = n / 2`
/// remain; when `n` is odd the middle draw is ignored. With the mean
/// within-chain variance `W` and the between-chain variance `B` of the split
/// chains,
///
/// ```text
/// R hat = sqrt((n' - 1) / n' + B / (W n'))
/// ```
///
/// Values close to 1 indicate well mixed, stationary chains. Constant chains
/// have `W = 0`: they give `NaN` when all chains sit at the same value
/// (`B = 0`) and `inf` otherwise. Degenerate values are returned as they are
/// rather than treated as errors.
///
/// The input is only read, never modified.
///
/// # Errors
///
/// * [`DiagnosticError::Shape`] if `chains` is not 2 or 3 dimensional.
/// * [`DiagnosticError::InsufficientChains`] for fewer than 2 chains.
/// * [`DiagnosticError::InvalidWarmup`] if the warm-up exceeds the chain length.
/// * [`DiagnosticError::InsufficientSamples`] if fewer than 2 samples per
///   split chain remain.
pub fn rhat_with<S, D>(chains: &ArrayBase<S, D>, options: RhatOptions) -> Result<Rhat, DiagnosticError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let scalar = chains.ndim() == 2;
    let chains = as_three_dim(chains)?;
    let n_chains = chains.len_of(Axis(0));
    if n_chains < 2 {
        return Err(DiagnosticError::InsufficientChains { n_chains });
    }

    let chains = discard_warmup(chains, options.warmup_iter)?;
    let half = chains.len_of(Axis(1)) / 2;
    if half < 2 {
        return Err(DiagnosticError::InsufficientSamples { n_samples: half });
    }
    let split = split_chains(chains)?;
    debug!(
        "computing R hat over {} chains of {} samples ({} parameters, {} warm-up)",
        split.len_of(Axis(0)),
        half,
        split.len_of(Axis(2)),
        options.warmup_iter
    );

    let w = within(&split)?;
    let b = between(&split)?;
    let n = half as f64;
    let rhat = (&b / &(&w * n)).mapv(|ratio| ((n - 1.0) / n + ratio).sqrt());
    if rhat.iter().any(|r| !r.is_finite()) {
        warn!("R hat is not finite; at least one parameter has zero within-chain variance");
    }

    if scalar {
        Ok(Rhat::Scalar(rhat[0]))
    } else {
        Ok(Rhat::PerParameter(rhat))
    }
}

static RHAT_ALL_PARAMS_DEPRECATION: Once = Once::new();

/// Deprecated alias of [`rhat`] without warm-up.
///
/// Logs a deprecation warning the first time it is called.
#[deprecated(since = "0.2.0", note = "use `rhat` instead")]
pub fn rhat_all_params<S, D>(chains: &ArrayBase<S, D>) -> Result<Rhat, DiagnosticError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    RHAT_ALL_PARAMS_DEPRECATION.call_once(|| {
        warn!("`rhat_all_params` is deprecated; use `rhat` instead");
    });
    rhat(chains, 0)
}
