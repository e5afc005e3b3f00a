use ::csv;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use crate::error::ScwError;

/// Read from a text file, returning its contents as a String.
pub fn load_content_from_file<P>(path : P) -> Result<String, ScwError>
    where P : AsRef<Path>
{
    let mut f = File::open(path)?;
    let mut content = String::new();
    f.read_to_string(&mut content)?;
    if content.trim().is_empty() {
        return Err(ScwError::Data("Empty file content".into()));
    }
    Ok(content)
}

/// Splits a header-less, comma-separated content into its text records.
/// Records may have different lengths; blank lines are skipped and fields
/// are trimmed of surrounding whitespace.
pub fn parse_csv_as_text_rows(content : &str) -> Result<Vec<Vec<String>>, ScwError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut rows : Vec<Vec<String>> = Vec::new();
    for row_record in csv_reader.records() {
        let row = row_record?;
        rows.push(row.iter().map(|e| e.to_string() ).collect());
    }
    Ok(rows)
}

/// Parses every field of a text row as T, reporting the line (1-based) of the first failure.
pub fn parse_row<T>(row : &[String], line : usize) -> Result<Vec<T>, ScwError>
    where T : FromStr
{
    row.iter().enumerate().map(|(i, e)| {
        e.parse::<T>().map_err(|_| {
            ScwError::Data(format!("Unable to parse entry '{}' (Line {}, Column {})", e, line, i + 1))
        })
    }).collect()
}
