use nalgebra::*;
use std::fmt;

/// Soft confidence-weighted classifier: Online estimation of a full-covariance
/// Gaussian distribution over the weights of a linear binary classifier.
pub mod scw;

pub use scw::*;

/// Snapshot delivered to an UpdateObserver every time a training step changes
/// the weight distribution. The mean vector is borrowed from the classifier
/// and already reflects the update.
#[derive(Debug, Clone, Copy)]
pub struct Update<'a> {

    /// Position of the example among all examples stepped by this classifier.
    pub index : usize,

    pub loss : f64,

    pub alpha : f64,

    pub beta : f64,

    pub mu : &'a DVector<f64>

}

/// Receives notifications about updates to the weight distribution. Steps that
/// leave the distribution unchanged (zero loss) are never notified. Any
/// FnMut(&Update) closure is an observer.
pub trait UpdateObserver {

    fn on_update(&mut self, update : &Update<'_>);

}

impl<F> UpdateObserver for F
    where F : FnMut(&Update<'_>)
{

    fn on_update(&mut self, update : &Update<'_>) {
        self(update)
    }

}

/// Observer that ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl UpdateObserver for Silent {

    fn on_update(&mut self, _update : &Update<'_>) { }

}

/// Result of evaluating a classifier over a labelled sample: The number of
/// examples for which the predicted sign differs from the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {

    pub mismatches : usize,

    pub total : usize

}

impl Evaluation {

    /// Fraction of mismatched examples; None when nothing was evaluated.
    pub fn rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.mismatches as f64 / self.total as f64)
        }
    }

}

impl fmt::Display for Evaluation {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error rate = {} / {}", self.mismatches, self.total)
    }

}
