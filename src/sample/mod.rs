use nalgebra::*;
use std::convert::TryFrom;
use std::fmt;
use crate::error::ScwError;

/// Binary class label. Labels enter the update rule as the signed scalar y = -1 or y = +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Negative,
    Positive
}

impl Label {

    /// Signed integer value of the label (-1 or +1).
    pub fn sign(&self) -> i8 {
        match self {
            Label::Negative => -1,
            Label::Positive => 1
        }
    }

    pub fn value(&self) -> f64 {
        self.sign() as f64
    }

}

impl TryFrom<i64> for Label {

    type Error = ScwError;

    fn try_from(v : i64) -> Result<Self, ScwError> {
        match v {
            -1 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(ScwError::Data(format!("Label {} outside {{-1, +1}}", other)))
        }
    }

}

impl fmt::Display for Label {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }

}

/// A single labelled observation: the feature vector x and its class y.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {

    pub x : DVector<f64>,

    pub y : Label

}

impl Example {

    pub fn new(x : DVector<f64>, y : Label) -> Self {
        Self { x, y }
    }

    /// Builds an example from a feature slice and a signed integer label.
    pub fn from_slice(x : &[f64], y : i64) -> Result<Self, ScwError> {
        Ok(Self { x : DVector::from_column_slice(x), y : Label::try_from(y)? })
    }

    pub fn dim(&self) -> usize {
        self.x.nrows()
    }

}
