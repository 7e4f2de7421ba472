mod vdm;

pub use vdm::ValueDifferenceMetric;

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::classifiers::Classifier;
use crate::core::{ModelError, Record};

/// k-Nearest-Neighbors over the Value Difference Metric.
///
/// Training stores the records and precomputes the metric's class-occurrence
/// statistics. Classification ranks every stored record by distance (stable
/// sort, so training order breaks distance ties deterministically) and lets
/// the k nearest vote; vote ties are broken uniformly at random.
pub struct KNearestNeighbors {
    k: usize,
    data: Vec<Record>,
    metric: Option<ValueDifferenceMetric>,
    rng: RefCell<StdRng>,
}

impl KNearestNeighbors {
    pub fn new(k: usize) -> Self {
        Self::from_rng(k, StdRng::from_os_rng())
    }

    pub fn with_seed(k: usize, seed: u64) -> Self {
        Self::from_rng(k, StdRng::seed_from_u64(seed))
    }

    fn from_rng(k: usize, rng: StdRng) -> Self {
        Self {
            k: k.max(1),
            data: Vec::new(),
            metric: None,
            rng: RefCell::new(rng),
        }
    }

    fn vote(&self, neighbors: &[(f64, &Record)]) -> String {
        let mut votes: Vec<(&str, usize)> = Vec::new();
        for (_, record) in neighbors.iter().take(self.k) {
            match votes.iter_mut().find(|(label, _)| *label == record.label()) {
                Some((_, count)) => *count += 1,
                None => votes.push((record.label(), 1)),
            }
        }

        let max = votes.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let tied: Vec<&str> = votes
            .iter()
            .filter(|(_, count)| *count == max)
            .map(|(label, _)| *label)
            .collect();
        let mut rng = self.rng.borrow_mut();
        tied.choose(&mut *rng)
            .map(|label| label.to_string())
            .unwrap_or_default()
    }
}

impl Classifier for KNearestNeighbors {
    fn name(&self) -> String {
        format!("kNN-{}", self.k)
    }

    fn train(&mut self, records: &[Record]) -> Result<(), ModelError> {
        self.data = records.to_vec();
        self.metric = if records.is_empty() {
            None
        } else {
            Some(ValueDifferenceMetric::new(records))
        };
        Ok(())
    }

    fn classify(&self, point: &[String]) -> Result<String, ModelError> {
        let metric = self.metric.as_ref().ok_or(ModelError::NotTrained)?;
        let expected = self.data[0].num_attributes();
        if point.len() != expected {
            return Err(ModelError::AttributeCountMismatch {
                expected,
                actual: point.len(),
            });
        }

        let mut neighbors: Vec<(f64, &Record)> = self
            .data
            .iter()
            .map(|record| (metric.distance(record.values(), point), record))
            .collect();
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(self.vote(&neighbors))
    }
}
