//! Error types for the convergence diagnostics and the parameter transforms.
use thiserror::Error;

/// Errors raised by the R hat diagnostics when the chain ensemble does not
/// satisfy their input contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticError {
    /// The chain array is neither `(chains, samples)` nor
    /// `(chains, samples, parameters)`.
    #[error(
        "dimension of chains is {ndim}; R hat accepts only 2 dimensional \
         (chains, samples) or 3 dimensional (chains, samples, parameters) arrays"
    )]
    Shape { ndim: usize },

    /// More warm-up iterations were requested than there are samples.
    #[error(
        "warm-up iterations ({warmup_iter}) must not exceed the number of \
         samples per chain ({n_samples})"
    )]
    InvalidWarmup { warmup_iter: usize, n_samples: usize },

    /// Too few samples per chain remain after warm-up removal and splitting.
    #[error(
        "number of samples per chain after warm-up and chain splitting is \
         {n_samples}; too few to estimate the within-chain variance"
    )]
    InsufficientSamples { n_samples: usize },

    /// Fewer than two chains were supplied.
    #[error("at least 2 chains are needed to compute R hat, got {n_chains}")]
    InsufficientChains { n_chains: usize },

    /// A summary statistic was asked of an empty chain.
    #[error("can't summarize an empty chain")]
    EmptyChain,
}

impl DiagnosticError {
    /// True for errors caused by the dimensionality of the chain array.
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        matches!(self, Self::Shape { .. })
    }

    /// True for errors caused by argument values inconsistent with the
    /// minimum sample or chain counts.
    #[must_use]
    pub const fn is_value_error(&self) -> bool {
        !self.is_shape_error()
    }
}

/// Errors raised by [`Transform`](crate::transform::Transform) implementations
/// and their consumers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The transform does not provide an optional capability.
    #[error("transform does not implement `{capability}`")]
    NotImplemented { capability: &'static str },

    /// A point does not have the dimension the transform is defined over.
    #[error("expected a point with {expected} parameters, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
}
