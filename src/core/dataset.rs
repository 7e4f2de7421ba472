use crate::core::error::ModelError;
use crate::core::record::Record;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind};
use std::path::Path;

const MISSING_TOKEN: &str = "?";

/// A named, ordered collection of records sharing one attribute count.
///
/// Attribute domains are never declared up front; they are discovered by the
/// classifiers during training from the values actually observed.
#[derive(Clone, Debug)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
    num_attributes: usize,
}

impl Dataset {
    pub fn from_records(name: impl Into<String>, records: Vec<Record>) -> Result<Dataset, ModelError> {
        let num_attributes = records.first().map(|r| r.num_attributes()).unwrap_or(0);
        for (index, record) in records.iter().enumerate() {
            if record.num_attributes() != num_attributes {
                return Err(ModelError::IrregularRecord {
                    index,
                    expected: num_attributes,
                    actual: record.num_attributes(),
                });
            }
        }
        Ok(Dataset {
            name: name.into(),
            records,
            num_attributes,
        })
    }

    /// Loads comma-separated rows where the last field is the class label.
    ///
    /// Preprocessing replaces `?` tokens with a random value drawn from the
    /// same column and rewrites fully numeric columns into `bins` equal-width
    /// bucket tokens.
    pub fn from_csv_file(path: &Path, bins: usize, rng: &mut StdRng) -> Result<Dataset, Error> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let reader = BufReader::new(File::open(path)?);
        let mut rows: Vec<Vec<String>> = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
            if fields.len() < 2 {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("row '{}' has no attributes", line.trim()),
                ));
            }
            if let Some(first) = rows.first()
                && first.len() != fields.len()
            {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!(
                        "row '{}' has {} fields, expected {}",
                        line.trim(),
                        fields.len(),
                        first.len()
                    ),
                ));
            }
            rows.push(fields);
        }

        impute_missing(&mut rows, rng);
        discretize_numeric(&mut rows, bins);

        let records = rows
            .into_iter()
            .map(|mut fields| {
                let label = fields.pop().unwrap_or_default();
                Record::new(fields, label)
            })
            .collect();

        Dataset::from_records(name, records)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn num_attributes(&self) -> usize {
        self.num_attributes
    }
}

/// Replaces `?` attribute tokens with a random non-missing value from the
/// same column. The label column is left untouched; a column that is missing
/// everywhere keeps the literal token.
fn impute_missing(rows: &mut [Vec<String>], rng: &mut StdRng) {
    let Some(first) = rows.first() else { return };
    let attribute_columns = first.len().saturating_sub(1);

    for col in 0..attribute_columns {
        let observed: Vec<String> = rows
            .iter()
            .map(|row| row[col].clone())
            .filter(|value| value != MISSING_TOKEN)
            .collect();
        if observed.is_empty() {
            continue;
        }
        for row in rows.iter_mut() {
            if row[col] == MISSING_TOKEN
                && let Some(value) = observed.choose(rng)
            {
                row[col] = value.clone();
            }
        }
    }
}

/// Rewrites columns whose values all parse as finite floats into equal-width
/// bucket tokens `b0..b{bins-1}` over the observed range.
fn discretize_numeric(rows: &mut [Vec<String>], bins: usize) {
    let Some(first) = rows.first() else { return };
    if bins == 0 {
        return;
    }
    let attribute_columns = first.len().saturating_sub(1);

    for col in 0..attribute_columns {
        let mut parsed = Vec::with_capacity(rows.len());
        let mut numeric = true;
        for row in rows.iter() {
            match row[col].parse::<f64>() {
                Ok(value) if value.is_finite() => parsed.push(value),
                _ => {
                    numeric = false;
                    break;
                }
            }
        }
        if !numeric {
            continue;
        }

        let min = parsed.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = parsed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / bins as f64;
        for (row, value) in rows.iter_mut().zip(&parsed) {
            let bucket = if width > 0.0 {
                (((value - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            row[col] = format!("b{bucket}");
        }
    }
}
