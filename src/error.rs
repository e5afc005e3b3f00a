use thiserror::Error;

/// Failure conditions raised by the classifier, its linear algebra
/// primitives, the quantile function and the dataset loader. All of them
/// are fatal to the operation that raised them.
#[derive(Debug, Error)]
pub enum ScwError {

    #[error("Invalid hyperparameter {name} = {value}")]
    InvalidHyperparameter { name : &'static str, value : f64 },

    #[error("Dimension mismatch (expected {expected}, found {found})")]
    DimensionMismatch { expected : usize, found : usize },

    #[error("Training requires at least one example")]
    EmptyDataset,

    #[error("Quantile function evaluated outside (0,1) at p = {0}")]
    QuantileDomain(f64),

    #[error("Classifier has not been trained yet")]
    NotReady,

    #[error("Invalid dataset: {0}")]
    Data(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error)

}

impl ScwError {

    pub(crate) fn mismatch(expected : usize, found : usize) -> Self {
        ScwError::DimensionMismatch { expected, found }
    }

}
