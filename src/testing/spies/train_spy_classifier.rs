use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::classifiers::Classifier;
use crate::core::{ModelError, Record};

/// Counts `train` invocations through a shared handle; classification always
/// answers with a fixed label.
pub struct TrainSpyClassifier {
    label: String,
    calls: Arc<AtomicUsize>,
}

pub struct TrainSpyHandle {
    calls: Arc<AtomicUsize>,
}

impl TrainSpyHandle {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TrainSpyClassifier {
    pub fn new(label: impl Into<String>) -> (Self, TrainSpyHandle) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                label: label.into(),
                calls: Arc::clone(&calls),
            },
            TrainSpyHandle { calls },
        )
    }
}

impl Classifier for TrainSpyClassifier {
    fn name(&self) -> String {
        "TrainSpy".to_string()
    }

    fn train(&mut self, _records: &[Record]) -> Result<(), ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn classify(&self, _point: &[String]) -> Result<String, ModelError> {
        Ok(self.label.clone())
    }
}
