use nalgebra::*;
use num_traits::clamp;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};
use crate::error::ScwError;
use crate::linalg::*;
use crate::quantile::{Quantile, StandardNormal};
use crate::sample::{Example, Label};
use super::*;

/// Aggressiveness bound c and confidence level eta of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {

    pub c : f64,

    pub eta : f64

}

impl Hyperparameters {

    pub fn new(c : f64, eta : f64) -> Self {
        Self { c, eta }
    }

    /// Parses a JSON object such as {"c" : 1.0, "eta" : 0.9}.
    pub fn from_json(s : &str) -> Result<Self, ScwError> {
        let hyper : Self = serde_json::from_str(s)
            .map_err(|e| ScwError::Data(format!("{}", e)) )?;
        hyper.validate()?;
        Ok(hyper)
    }

    /// Verifies c is finite and strictly positive and eta lies strictly within (0,1).
    pub fn validate(&self) -> Result<(), ScwError> {
        if !(self.c > 0.0 && self.c.is_finite()) {
            return Err(ScwError::InvalidHyperparameter { name : "c", value : self.c });
        }
        if !(self.eta > 0.0 && self.eta < 1.0) {
            return Err(ScwError::InvalidHyperparameter { name : "eta", value : self.eta });
        }
        Ok(())
    }

}

/// Per-example quantities calculated by a training step. When the step
/// does not update the distribution, alpha and beta are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {

    /// x^T sigma x
    pub variance : f64,

    /// y (mu . x)
    pub margin : f64,

    pub loss : f64,

    pub alpha : f64,

    pub beta : f64

}

impl Step {

    pub fn updated(&self) -> bool {
        self.loss > 0.0
    }

}

// Weight distribution, allocated when the dimension is known.
#[derive(Debug, Clone)]
struct Gaussian {

    mu : DVector<f64>,

    sigma : DMatrix<f64>,

    // sigma x, overwritten at every update.
    sigma_x : DVector<f64>,

    n_seen : usize,

    n_updates : usize

}

impl Gaussian {

    fn new(dim : usize) -> Self {
        Self {
            mu : zero_vector(dim),
            sigma : identity(dim, dim),
            sigma_x : zero_vector(dim),
            n_seen : 0,
            n_updates : 0
        }
    }

    fn dim(&self) -> usize {
        self.mu.nrows()
    }

}

/// Soft confidence-weighted linear classifier. The weight vector w is modelled
/// as w ~ N(mu, sigma); every labelled example (x, y) that violates the
/// probabilistic margin constraint P(y w.x >= 0) >= eta moves the distribution
/// to the closest (in KL divergence) Gaussian satisfying it, with the mean step
/// bounded by the aggressiveness parameter c. The constraint is expressed via
/// phi, the standard normal quantile at eta, which (together with vphi = 1 + phi^2/2)
/// is calculated once at construction.
///
/// The dimension of the weight vector is unknown until the first example is
/// seen, at which point mu = 0 and sigma = I. All subsequent examples and
/// predictions must have the same dimension. Training is sequential: each
/// step depends on the distribution left by the previous one, so presenting
/// the same examples in a different order in general yields different weights.
#[derive(Debug, Clone)]
pub struct Scw {

    c : f64,

    eta : f64,

    phi : f64,

    vphi : f64,

    state : Option<Gaussian>

}

impl Scw {

    pub fn new(c : f64, eta : f64) -> Result<Self, ScwError> {
        Self::with_quantile(c, eta, &StandardNormal)
    }

    pub fn from_config(hyper : &Hyperparameters) -> Result<Self, ScwError> {
        Self::new(hyper.c, hyper.eta)
    }

    /// Builds the classifier deriving phi from the informed quantile function.
    pub fn with_quantile<Q>(c : f64, eta : f64, quantile : &Q) -> Result<Self, ScwError>
        where Q : Quantile + ?Sized
    {
        Hyperparameters::new(c, eta).validate()?;
        let phi = quantile.quantile(eta)?;
        let vphi = 1. + phi.powi(2) / 2.;
        Ok(Self { c, eta, phi, vphi, state : None })
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn vphi(&self) -> f64 {
        self.vphi
    }

    /// Whether the dimension is known and the weight distribution initialized.
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn dim(&self) -> Option<usize> {
        self.state.as_ref().map(|g| g.dim() )
    }

    pub fn mean(&self) -> Option<&DVector<f64>> {
        self.state.as_ref().map(|g| &g.mu )
    }

    pub fn covariance(&self) -> Option<&DMatrix<f64>> {
        self.state.as_ref().map(|g| &g.sigma )
    }

    pub fn examples_seen(&self) -> usize {
        self.state.as_ref().map(|g| g.n_seen ).unwrap_or(0)
    }

    pub fn updates(&self) -> usize {
        self.state.as_ref().map(|g| g.n_updates ).unwrap_or(0)
    }

    fn ensure_ready(&mut self, dim : usize) -> Result<&mut Gaussian, ScwError> {
        if let Some(g) = &self.state {
            if g.dim() != dim {
                return Err(ScwError::mismatch(g.dim(), dim));
            }
        }
        Ok(self.state.get_or_insert_with(|| Gaussian::new(dim) ))
    }

    pub fn train(&mut self, examples : &[Example]) -> Result<(), ScwError> {
        self.train_with(examples, &mut Silent)
    }

    /// Steps over the examples in the informed order, notifying the observer at each
    /// update. The first example fixes the dimension if the classifier is not ready yet.
    /// The dimension of all examples is verified before any step is applied, so a
    /// failed call leaves the distribution untouched.
    pub fn train_with<O>(&mut self, examples : &[Example], observer : &mut O) -> Result<(), ScwError>
        where O : UpdateObserver + ?Sized
    {
        let first = examples.first().ok_or(ScwError::EmptyDataset)?;
        let dim = self.dim().unwrap_or(first.dim());
        if let Some((ix, ex)) = examples.iter().enumerate().find(|(_, ex)| ex.dim() != dim ) {
            warn!(index = ix, expected = dim, found = ex.dim(), "example with mismatched dimension");
            return Err(ScwError::mismatch(dim, ex.dim()));
        }
        let prev_updates = self.updates();
        for ex in examples {
            self.step_with(&ex.x, ex.y, observer)?;
        }
        info!(
            examples = examples.len(),
            updates = self.updates() - prev_updates,
            dim,
            "training pass finished"
        );
        Ok(())
    }

    pub fn step(&mut self, x : &DVector<f64>, y : Label) -> Result<Step, ScwError> {
        self.step_with(x, y, &mut Silent)
    }

    /// Applies the closed-form update for a single example:
    ///
    /// v = x^T sigma x, m = y (mu . x), loss = max(0, phi sqrt(v) - m).
    ///
    /// If loss > 0:
    ///
    /// alpha = min(c, max(0, (-m vphi + sqrt(m^2 phi^4 / 4 + v phi^2 gamma)) / (v gamma))), gamma = 1 + phi^2
    ///
    /// beta = alpha phi / (sqrt(u) + v alpha phi), u = (-alpha v phi + sqrt(alpha^2 v^2 phi^2 + 4 v))^2 / 4
    ///
    /// mu <- mu + alpha y sigma x; sigma <- sigma - beta (sigma x)(sigma x)^T
    ///
    /// The observer is notified (after the update) only when loss > 0; otherwise mu and sigma
    /// are left exactly as they were.
    pub fn step_with<O>(
        &mut self,
        x : &DVector<f64>,
        y : Label,
        observer : &mut O
    ) -> Result<Step, ScwError>
        where O : UpdateObserver + ?Sized
    {
        let (c, phi, vphi) = (self.c, self.phi, self.vphi);
        let g = self.ensure_ready(x.nrows())?;
        let index = g.n_seen;
        let y = y.value();
        let v = dot(&vec_mat(x, &g.sigma)?, x)?;
        let m = y * dot(&g.mu, x)?;
        let loss = (phi * v.sqrt() - m).max(0.0);
        g.n_seen += 1;
        if !(loss > 0.0) {
            return Ok(Step { variance : v, margin : m, loss, alpha : 0.0, beta : 0.0 });
        }

        let gamma = 1. + phi.powi(2);
        let alpha = (-m * vphi + (m.powi(2) * phi.powi(4) / 4. + v * phi.powi(2) * gamma).sqrt()) / (v * gamma);
        let alpha = clamp(alpha, 0.0, c);
        let t = alpha * v * phi;
        let u = (-t + (t.powi(2) + 4. * v).sqrt()).powi(2) / 4.;
        let beta = (alpha * phi) / (u.sqrt() + v * alpha * phi);

        // Both updates use sigma before the downdate.
        mat_vec_into(&g.sigma, x, &mut g.sigma_x)?;
        g.mu = vector_add(&g.mu, &scale(&g.sigma_x, alpha * y))?;
        let sx = &g.sigma_x;
        let sigma = &mut g.sigma;
        let d = sx.nrows();
        for j in 0..d {
            for i in 0..d {
                // sx[i]*sx[j] is computed before scaling so entries (i,j) and (j,i) stay equal.
                sigma[(i,j)] -= beta * (sx[i] * sx[j]);
            }
        }
        g.n_updates += 1;

        debug!(index, loss, alpha, beta, "weight distribution updated");
        observer.on_update(&Update { index, loss, alpha, beta, mu : &g.mu });
        Ok(Step { variance : v, margin : m, loss, alpha, beta })
    }

    /// Sign of mu . x: -1, 0 or +1. Zero is returned when x lies exactly on the decision boundary.
    pub fn predict(&self, x : &DVector<f64>) -> Result<i8, ScwError> {
        let g = self.state.as_ref().ok_or(ScwError::NotReady)?;
        let s = dot(&g.mu, x)?;
        if s < 0.0 {
            Ok(-1)
        } else if s == 0.0 {
            Ok(0)
        } else {
            Ok(1)
        }
    }

    /// Counts the examples for which the prediction differs from the label.
    pub fn test(&self, examples : &[Example]) -> Result<Evaluation, ScwError> {
        if !self.is_ready() {
            return Err(ScwError::NotReady);
        }
        let mut eval = Evaluation { mismatches : 0, total : examples.len() };
        for ex in examples {
            if self.predict(&ex.x)? != ex.y.sign() {
                eval.mismatches += 1;
            }
        }
        info!(mismatches = eval.mismatches, total = eval.total, "evaluation finished");
        Ok(eval)
    }

}
