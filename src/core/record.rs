use std::fmt;

/// One labeled data row: categorical attribute tokens plus a class label.
///
/// Records are immutable once produced by preprocessing; classifiers read
/// them but never mutate them.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Record {
    values: Vec<String>,
    label: String,
}

impl Record {
    pub fn new(values: Vec<String>, label: impl Into<String>) -> Record {
        Record {
            values,
            label: label.into(),
        }
    }

    pub fn from_strs(values: &[&str], label: &str) -> Record {
        Record {
            values: values.iter().map(|v| v.to_string()).collect(),
            label: label.to_string(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn num_attributes(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("values", &self.values)
            .field("label", &self.label)
            .finish()
    }
}
