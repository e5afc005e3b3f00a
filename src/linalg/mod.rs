use nalgebra::*;
use crate::error::ScwError;

/*
Checked dense arithmetic over nalgebra's dynamically-sized containers. Vectors are always
column vectors (DVector); matrices are indexed as m[(row, col)]. nalgebra panics
when operand shapes disagree, so every binary operation here verifies shapes first
and returns ScwError::DimensionMismatch instead.
*/

/// n x m matrix of zeros.
pub fn zeros(n : usize, m : usize) -> DMatrix<f64> {
    DMatrix::zeros(n, m)
}

pub fn zero_vector(n : usize) -> DVector<f64> {
    DVector::zeros(n)
}

/// n x m matrix of zeros with ones over the first min(n, m) diagonal entries.
pub fn identity(n : usize, m : usize) -> DMatrix<f64> {
    let mut ident = zeros(n, m);
    for i in 0..n.min(m) {
        ident[(i,i)] = 1.0;
    }
    ident
}

fn check_len(expected : usize, found : usize) -> Result<(), ScwError> {
    if expected == found {
        Ok(())
    } else {
        Err(ScwError::mismatch(expected, found))
    }
}

/// Elementwise a - b; both matrices must have the same shape.
pub fn subtract(a : &DMatrix<f64>, b : &DMatrix<f64>) -> Result<DMatrix<f64>, ScwError> {
    check_len(a.nrows(), b.nrows())?;
    check_len(a.ncols(), b.ncols())?;
    Ok(a - b)
}

/// Matrix product of a (n x p) by b (p x m), yielding a n x m matrix.
pub fn matmul(a : &DMatrix<f64>, b : &DMatrix<f64>) -> Result<DMatrix<f64>, ScwError> {
    check_len(a.ncols(), b.nrows())?;
    Ok(a * b)
}

pub fn scale(v : &DVector<f64>, k : f64) -> DVector<f64> {
    v.map(|e| e * k )
}

/// Adds the scalar k to every entry of v.
pub fn add(v : &DVector<f64>, k : f64) -> DVector<f64> {
    v.map(|e| e + k )
}

pub fn vector_add(a : &DVector<f64>, b : &DVector<f64>) -> Result<DVector<f64>, ScwError> {
    check_len(a.nrows(), b.nrows())?;
    Ok(a + b)
}

/// Outer product a b^T, with m[(i,j)] = a[i]*b[j]. Any pair of lengths is valid.
pub fn outer(a : &DVector<f64>, b : &DVector<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), b.nrows(), |i, j| a[i] * b[j] )
}

pub fn dot(a : &DVector<f64>, b : &DVector<f64>) -> Result<f64, ScwError> {
    check_len(a.nrows(), b.nrows())?;
    Ok(a.dot(b))
}

/// Right-multiplication m v of a n x p matrix by a length-p vector.
pub fn mat_vec(m : &DMatrix<f64>, v : &DVector<f64>) -> Result<DVector<f64>, ScwError> {
    check_len(m.ncols(), v.nrows())?;
    Ok(m * v)
}

/// Left-multiplication v^T m of a p x n matrix by a length-p row vector, returned
/// as a length-n column vector: r[i] = sum_j v[j] * m[(j,i)].
pub fn vec_mat(v : &DVector<f64>, m : &DMatrix<f64>) -> Result<DVector<f64>, ScwError> {
    check_len(m.nrows(), v.nrows())?;
    Ok(m.tr_mul(v))
}

/// Writes m v into the informed buffer, which must already have m.nrows() entries.
pub(crate) fn mat_vec_into(
    m : &DMatrix<f64>,
    v : &DVector<f64>,
    out : &mut DVector<f64>
) -> Result<(), ScwError> {
    check_len(m.ncols(), v.nrows())?;
    check_len(m.nrows(), out.nrows())?;
    out.gemv(1.0, m, v, 0.0);
    Ok(())
}

/// Whether m is square and |m[(i,j)] - m[(j,i)]| <= tol for all entries.
pub fn is_symmetric(m : &DMatrix<f64>, tol : f64) -> bool {
    if !m.is_square() {
        return false;
    }
    for i in 0..m.nrows() {
        for j in (i+1)..m.ncols() {
            if (m[(i,j)] - m[(j,i)]).abs() > tol {
                return false;
            }
        }
    }
    true
}

/// Comma-joined representation of the vector entries (e.g. "0.5,-1,2").
pub fn format_vector(v : &DVector<f64>) -> String {
    let entries : Vec<String> = v.iter().map(|e| e.to_string() ).collect();
    entries.join(",")
}
