//! A Rust library implementing MCMC convergence diagnostics and parameter
//! transformations.
//!
//! [`rhat`](rhat::rhat) computes the split Gelman Rubin potential scale
//! reduction factor over an ensemble of chains stored as a `(chains,
//! samples)` or `(chains, samples, parameters)` [`ndarray`] array.
//! [`Transform`](transform::Transform) maps parameters between a model
//! space and an unconstrained search space and supplies the log-Jacobian
//! correction needed to evaluate densities in the search space.
//!
//! This crate is sampler agnostic and intended to work with the outputs of any MCMC sampler.
#[cfg(test)]
#[macro_use]
extern crate approx;

/// Error types for diagnostics and transforms
pub mod error;
/// Gelman-Rubin split potential scale reduction (Rhat)
pub mod rhat;
/// Transformations between model and search parameter spaces
pub mod transform;
/// Chain array helpers like warm-up removal and chain splitting
pub mod utils;

pub use error::{DiagnosticError, TransformError};
#[allow(deprecated)]
pub use rhat::rhat_all_params;
pub use rhat::{rhat, rhat_with, Rhat, RhatOptions};
pub use transform::{
    search_space_log_density, IdentityTransform, LogTransform, LogitTransform, Transform,
};
