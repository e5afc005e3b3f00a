use nalgebra::*;
use std::convert::TryFrom;
use std::path::Path;
use std::str::FromStr;
use crate::error::ScwError;
use crate::sample::{Example, Label};

pub mod csv;

/// Labelled dataset read from the transposed text format: The first line holds
/// one comma-separated integer label per example; every following line holds one
/// feature dimension across all examples. Features are kept as a column-major
/// matrix with one column per example, so that each example is a contiguous
/// column slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {

    labels : Vec<Label>,

    // d x n: rows are feature dimensions, columns are examples.
    data : DMatrix<f64>

}

impl Table {

    pub fn open<P>(path : P) -> Result<Self, ScwError>
        where P : AsRef<Path>
    {
        let content = csv::load_content_from_file(path)?;
        content.parse()
    }

    pub fn new(labels : Vec<Label>, data : DMatrix<f64>) -> Result<Self, ScwError> {
        if data.ncols() != labels.len() {
            return Err(ScwError::mismatch(labels.len(), data.ncols()));
        }
        Ok(Self { labels, data })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Feature dimension shared by all examples.
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels[..]
    }

    /// Feature vector of the i-th example.
    pub fn features(&self, ix : usize) -> Option<DVector<f64>> {
        if ix < self.data.ncols() {
            Some(self.data.column(ix).clone_owned())
        } else {
            None
        }
    }

    /// Transposes the feature lines into the per-example sequence, preserving file order.
    pub fn examples(&self) -> Vec<Example> {
        self.data.column_iter()
            .zip(self.labels.iter())
            .map(|(x, y)| Example::new(x.clone_owned(), *y) )
            .collect()
    }

}

impl FromStr for Table {

    type Err = ScwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = csv::parse_csv_as_text_rows(s)?;
        let (label_row, feature_rows) = rows.split_first()
            .ok_or_else(|| ScwError::Data("Missing label line".into()) )?;
        let labels = csv::parse_row::<i64>(label_row, 1)?
            .into_iter()
            .map(Label::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        if feature_rows.is_empty() {
            return Err(ScwError::Data("No feature lines after the label line".into()));
        }
        let n = labels.len();
        let mut data = DMatrix::zeros(feature_rows.len(), n);
        for (i, row) in feature_rows.iter().enumerate() {
            if row.len() != n {
                return Err(ScwError::mismatch(n, row.len()));
            }
            let values = csv::parse_row::<f64>(row, i + 2)?;
            data.row_mut(i).copy_from_slice(&values[..]);
        }
        Ok(Self { labels, data })
    }

}
