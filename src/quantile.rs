use statrs::distribution::{ContinuousCDF, Normal};
use crate::error::ScwError;

/// Inverse cumulative distribution function consumed by the classifier
/// to derive its confidence constant. Implementors must reject probabilities
/// outside the open interval (0,1) instead of returning a sentinel value.
pub trait Quantile {

    fn quantile(&self, p : f64) -> Result<f64, ScwError>;

}

/// Standard normal distribution N(0, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormal;

impl Quantile for StandardNormal {

    fn quantile(&self, p : f64) -> Result<f64, ScwError> {
        norminv(p, 0.0, 1.0)
    }

}

/// Quantile of the standard normal at p, for p strictly within (0,1).
/// quantile(0.5) is exactly zero.
pub fn quantile(p : f64) -> Result<f64, ScwError> {
    StandardNormal.quantile(p)
}

/// Quantile of the normal distribution with the informed location and scale
/// (std_dev * z + mean, where z is the standard normal quantile).
pub fn norminv(p : f64, mean : f64, std_dev : f64) -> Result<f64, ScwError> {
    // Negated comparison also catches NaN.
    if !(p > 0.0 && p < 1.0) {
        return Err(ScwError::QuantileDomain(p));
    }
    let normal = Normal::new(mean, std_dev)
        .map_err(|_| ScwError::InvalidHyperparameter { name : "std_dev", value : std_dev })?;
    Ok(normal.inverse_cdf(p))
}
