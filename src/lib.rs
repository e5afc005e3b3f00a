/// Error conditions shared by all modules.
pub mod error;

/// Dimension-checked dense vector and matrix arithmetic over nalgebra containers.
pub mod linalg;

/// Standard normal quantile function (inverse cumulative distribution function).
pub mod quantile;

/// Labelled observations consumed by the classifier.
pub mod sample;

/// Loading of labelled datasets stored as transposed CSV text.
pub mod table;

/// Online estimation of confidence-weighted linear classifiers.
pub mod fit;

pub use error::ScwError;

pub use fit::{Scw, Hyperparameters, Step, Update, UpdateObserver, Evaluation};

pub use sample::{Example, Label};
