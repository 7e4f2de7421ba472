use std::collections::HashMap;

use crate::classifiers::Classifier;
use crate::core::{ModelError, Record};

/// Memorizes the training set and echoes the memorized label for any exact
/// attribute vector; unknown vectors get an empty label.
#[derive(Default)]
pub struct OracleClassifier {
    memory: HashMap<Vec<String>, String>,
}

impl Classifier for OracleClassifier {
    fn name(&self) -> String {
        "Oracle".to_string()
    }

    fn train(&mut self, records: &[Record]) -> Result<(), ModelError> {
        self.memory.clear();
        for record in records {
            self.memory
                .insert(record.values().to_vec(), record.label().to_string());
        }
        Ok(())
    }

    fn classify(&self, point: &[String]) -> Result<String, ModelError> {
        Ok(self.memory.get(point).cloned().unwrap_or_default())
    }
}
