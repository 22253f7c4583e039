use crate::error::DiagnosticError;
use ndarray::{s, Array3, ArrayBase, ArrayView3, Axis, Data, Dimension, Ix3};

/// Views a `(chains, samples)` or `(chains, samples, parameters)` array as
/// three dimensional. Two dimensional input gains a trailing axis of length 1.
pub fn as_three_dim<S, D>(chains: &ArrayBase<S, D>) -> Result<ArrayView3<'_, f64>, DiagnosticError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let ndim = chains.ndim();
    let view = chains.view().into_dyn();
    let view = match ndim {
        2 => view.insert_axis(Axis(2)),
        3 => view,
        _ => return Err(DiagnosticError::Shape { ndim }),
    };
    view.into_dimensionality::<Ix3>()
        .map_err(|_| DiagnosticError::Shape { ndim })
}

/// Drops the first `warmup_iter` samples of every chain. The result borrows
/// from `chains`; nothing is copied.
pub fn discard_warmup(
    chains: ArrayView3<'_, f64>,
    warmup_iter: usize,
) -> Result<ArrayView3<'_, f64>, DiagnosticError> {
    let n_samples = chains.len_of(Axis(1));
    if warmup_iter > n_samples {
        return Err(DiagnosticError::InvalidWarmup {
            warmup_iter,
            n_samples,
        });
    }
    Ok(chains.slice_move(s![.., warmup_iter.., ..]))
}

/// Splits each chain into two chains of equal length.  When the
/// number of draws N is odd, the (N+1)/2th draw is ignored.
///
/// `m` chains of length `n` become `2m` chains of length `n / 2`: the first
/// halves of all chains in their original order, followed by the second halves.
///
/// See more details in Stan reference manual section
/// ["Effective Sample Size"](http://mc-stan.org/users/documentation).
pub fn split_chains(chains: ArrayView3<'_, f64>) -> Result<Array3<f64>, DiagnosticError> {
    let (m, n, p) = chains.dim();
    let half = n / 2;
    if half < 1 {
        return Err(DiagnosticError::InsufficientSamples { n_samples: half });
    }
    let mut split = Array3::zeros((2 * m, half, p));
    split
        .slice_mut(s![..m, .., ..])
        .assign(&chains.slice(s![.., ..half, ..]));
    split
        .slice_mut(s![m.., .., ..])
        .assign(&chains.slice(s![.., n - half.., ..]));
    Ok(split)
}
