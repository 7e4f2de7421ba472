use crate::classifiers::Classifier;
use crate::core::{ModelError, Record};

/// Ignores training and answers every query with one fixed label.
pub struct ConstantClassifier {
    label: String,
}

impl ConstantClassifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Classifier for ConstantClassifier {
    fn name(&self) -> String {
        "Constant".to_string()
    }

    fn train(&mut self, _records: &[Record]) -> Result<(), ModelError> {
        Ok(())
    }

    fn classify(&self, _point: &[String]) -> Result<String, ModelError> {
        Ok(self.label.clone())
    }
}
