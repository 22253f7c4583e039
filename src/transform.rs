use crate::error::TransformError;

/// A fixed bijection between a model parameter space and a search space of
/// the same dimension.
///
/// If `t` implements `Transform`, a model space point `p` maps to the search
/// space with `x = t.to_search(&p)` and back with `p = t.to_model(&x)`. The
/// two maps must be inverse to each other on the transform's domain, up to
/// floating point error. Points outside the domain are the caller's
/// responsibility and typically produce `NaN`.
///
/// Samplers that evaluate a log-density in the search space need the
/// optional [`log_jacobian`](Transform::log_jacobian) correction; transforms
/// only ever applied to error measures may leave it out. The capability is
/// declared separately: an implementation that overrides `log_jacobian`
/// must also override [`has_log_jacobian`](Transform::has_log_jacobian) to
/// return `true`, otherwise consumers such as [`search_space_log_density`]
/// treat it as missing.
pub trait Transform {
    /// Dimension of the parameter space this transform is defined over.
    fn n_parameters(&self) -> usize;

    /// Forward map from the model space point `p` to the search space.
    fn to_search(&self, p: &[f64]) -> Vec<f64>;

    /// Inverse map from the search space point `x` to the model space.
    fn to_model(&self, x: &[f64]) -> Vec<f64>;

    /// Whether [`log_jacobian`](Transform::log_jacobian) is implemented.
    fn has_log_jacobian(&self) -> bool {
        false
    }

    /// Natural logarithm of the absolute value of the Jacobian determinant
    /// of [`to_search`](Transform::to_search) at the model space point `p`.
    fn log_jacobian(&self, _p: &[f64]) -> Result<f64, TransformError> {
        Err(TransformError::NotImplemented {
            capability: "log_jacobian",
        })
    }
}

/// Evaluates a model space log-density at the search space point `x`.
///
/// With `p = to_model(x)` the density of `x` is the density of `p` divided
/// by the absolute Jacobian determinant of the forward map, so the result is
/// `log_density(p) - log_jacobian(p)`.
///
/// # Errors
///
/// * [`TransformError::DimensionMismatch`] if `x` does not have
///   `n_parameters()` entries.
/// * [`TransformError::NotImplemented`] if the transform does not declare
///   a log-Jacobian through `has_log_jacobian`.
pub fn search_space_log_density<T, F>(
    transform: &T,
    x: &[f64],
    log_density: F,
) -> Result<f64, TransformError>
where
    T: Transform + ?Sized,
    F: Fn(&[f64]) -> f64,
{
    let expected = transform.n_parameters();
    if x.len() != expected {
        return Err(TransformError::DimensionMismatch {
            expected,
            found: x.len(),
        });
    }
    if !transform.has_log_jacobian() {
        return Err(TransformError::NotImplemented {
            capability: "log_jacobian",
        });
    }
    let p = transform.to_model(x);
    let log_jacobian = transform.log_jacobian(&p)?;
    Ok(log_density(&p) - log_jacobian)
}

/// Leaves every parameter unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTransform {
    n_parameters: usize,
}

impl IdentityTransform {
    /// A transform over `n_parameters` independent parameters.
    pub fn new(n_parameters: usize) -> Self {
        Self { n_parameters }
    }
}

impl Transform for IdentityTransform {
    fn n_parameters(&self) -> usize {
        self.n_parameters
    }

    fn to_search(&self, p: &[f64]) -> Vec<f64> {
        p.to_vec()
    }

    fn to_model(&self, x: &[f64]) -> Vec<f64> {
        x.to_vec()
    }

    fn has_log_jacobian(&self) -> bool {
        true
    }

    fn log_jacobian(&self, _p: &[f64]) -> Result<f64, TransformError> {
        Ok(0.0)
    }
}

/// Maps positive parameters to the real line with `x = ln(p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTransform {
    n_parameters: usize,
}

impl LogTransform {
    /// A transform over `n_parameters` independent parameters.
    pub fn new(n_parameters: usize) -> Self {
        Self { n_parameters }
    }
}

impl Transform for LogTransform {
    fn n_parameters(&self) -> usize {
        self.n_parameters
    }

    fn to_search(&self, p: &[f64]) -> Vec<f64> {
        p.iter().map(|p| p.ln()).collect()
    }

    fn to_model(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|x| x.exp()).collect()
    }

    fn has_log_jacobian(&self) -> bool {
        true
    }

    // d/dp ln(p) = 1 / p
    fn log_jacobian(&self, p: &[f64]) -> Result<f64, TransformError> {
        Ok(-p.iter().map(|p| p.ln()).sum::<f64>())
    }
}

/// Maps parameters in `(0, 1)` to the real line with the log-odds
/// `x = ln(p / (1 - p))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogitTransform {
    n_parameters: usize,
}

impl LogitTransform {
    /// A transform over `n_parameters` independent parameters.
    pub fn new(n_parameters: usize) -> Self {
        Self { n_parameters }
    }
}

fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl Transform for LogitTransform {
    fn n_parameters(&self) -> usize {
        self.n_parameters
    }

    fn to_search(&self, p: &[f64]) -> Vec<f64> {
        p.iter().map(|p| p.ln() - (-p).ln_1p()).collect()
    }

    fn to_model(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&x| logistic(x)).collect()
    }

    fn has_log_jacobian(&self) -> bool {
        true
    }

    // d/dp logit(p) = 1 / (p (1 - p))
    fn log_jacobian(&self, p: &[f64]) -> Result<f64, TransformError> {
        Ok(-p.iter().map(|p| p.ln() + (-p).ln_1p()).sum::<f64>())
    }
}
