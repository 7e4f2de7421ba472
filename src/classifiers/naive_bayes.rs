use std::collections::HashMap;

use crate::classifiers::Classifier;
use crate::core::{ModelError, Record};

/* Smoothing constants: assume some rate of unobserved points per class and a
   rate of occurrence of any attribute value in those points. */
const MISSING_POINT_RATE: f64 = 0.1;
const ATTRIBUTE_OCCURRENCE_RATE: f64 = 0.05;

/// Naive Bayes over categorical attributes with additive smoothing.
///
/// Training counts class occurrences and per-class attribute-value
/// occurrences; classification multiplies the class prior with one smoothed
/// conditional factor per attribute. Classes are scored in first-seen order
/// and a strictly-greater comparison keeps the first maximum, so prediction
/// is deterministic.
pub struct NaiveBayes {
    classes: Vec<String>,
    class_counts: HashMap<String, usize>,
    attribute_counts: HashMap<String, Vec<HashMap<String, usize>>>,
    num_points: usize,
    num_attributes: usize,
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            class_counts: HashMap::new(),
            attribute_counts: HashMap::new(),
            num_points: 0,
            num_attributes: 0,
        }
    }

    fn ensure_class(&mut self, label: &str) {
        if self.class_counts.contains_key(label) {
            return;
        }
        self.classes.push(label.to_string());
        self.class_counts.insert(label.to_string(), 0);
        self.attribute_counts
            .insert(label.to_string(), vec![HashMap::new(); self.num_attributes]);
    }

    fn count_record(&mut self, record: &Record) {
        let label = record.label();
        self.ensure_class(label);

        if let Some(count) = self.class_counts.get_mut(label) {
            *count += 1;
        }
        if let Some(per_attribute) = self.attribute_counts.get_mut(label) {
            for (attr, value) in record.values().iter().enumerate() {
                *per_attribute[attr].entry(value.clone()).or_insert(0) += 1;
            }
        }
    }

    fn attribute_count(&self, class: &str, attr: usize, value: &str) -> usize {
        self.attribute_counts
            .get(class)
            .and_then(|per_attribute| per_attribute.get(attr))
            .and_then(|counts| counts.get(value))
            .copied()
            .unwrap_or(0)
    }
}

impl Classifier for NaiveBayes {
    fn name(&self) -> String {
        "NaiveBayes".to_string()
    }

    fn train(&mut self, records: &[Record]) -> Result<(), ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        self.classes.clear();
        self.class_counts.clear();
        self.attribute_counts.clear();
        self.num_points = records.len();
        self.num_attributes = records[0].num_attributes();

        for record in records {
            self.count_record(record);
        }
        Ok(())
    }

    fn classify(&self, point: &[String]) -> Result<String, ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::NotTrained);
        }
        if point.len() != self.num_attributes {
            return Err(ModelError::AttributeCountMismatch {
                expected: self.num_attributes,
                actual: point.len(),
            });
        }

        let mut best_label: Option<&str> = None;
        let mut best_score = 0.0;
        for class in &self.classes {
            let class_points = self.class_counts.get(class).copied().unwrap_or(0) as f64;
            let unseen = class_points * MISSING_POINT_RATE;

            let mut score = class_points / self.num_points as f64;
            for (attr, value) in point.iter().enumerate() {
                let count = self.attribute_count(class, attr, value) as f64;
                score *= (count + unseen * ATTRIBUTE_OCCURRENCE_RATE) / (class_points + unseen);
            }

            if best_label.is_none() || score > best_score {
                best_score = score;
                best_label = Some(class);
            }
        }

        best_label
            .map(|label| label.to_string())
            .ok_or(ModelError::NotTrained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(values: &[&str], label: &str) -> Record {
        Record::from_strs(values, label)
    }

    #[test]
    fn single_class_dataset_always_predicts_that_class() {
        let mut nb = NaiveBayes::new();
        nb.train(&[
            labeled(&["a", "x"], "only"),
            labeled(&["b", "y"], "only"),
            labeled(&["c", "z"], "only"),
        ])
        .unwrap();

        for point in [["a", "x"], ["c", "y"], ["q", "q"]] {
            let point: Vec<String> = point.iter().map(|v| v.to_string()).collect();
            assert_eq!(nb.classify(&point).unwrap(), "only");
        }
    }

    #[test]
    fn two_record_dataset_recovers_the_matching_class() {
        let mut nb = NaiveBayes::new();
        nb.train(&[labeled(&["a", "x"], "C1"), labeled(&["b", "y"], "C2")])
            .unwrap();

        let point = vec!["a".to_string(), "x".to_string()];
        assert_eq!(nb.classify(&point).unwrap(), "C1");
        let point = vec!["b".to_string(), "y".to_string()];
        assert_eq!(nb.classify(&point).unwrap(), "C2");
    }

    #[test]
    fn unseen_values_fall_back_to_the_smoothed_floor() {
        let mut nb = NaiveBayes::new();
        nb.train(&[
            labeled(&["a"], "C1"),
            labeled(&["a"], "C1"),
            labeled(&["a"], "C1"),
            labeled(&["b"], "C2"),
        ])
        .unwrap();

        // "z" was never observed; the prior should dominate.
        let point = vec!["z".to_string()];
        assert_eq!(nb.classify(&point).unwrap(), "C1");
    }

    #[test]
    fn symmetric_counts_keep_the_first_seen_class() {
        let mut nb = NaiveBayes::new();
        nb.train(&[labeled(&["v"], "first"), labeled(&["v"], "second")])
            .unwrap();

        let point = vec!["v".to_string()];
        assert_eq!(nb.classify(&point).unwrap(), "first");
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let mut nb = NaiveBayes::new();
        assert_eq!(nb.train(&[]).unwrap_err(), ModelError::EmptyTrainingSet);
    }

    #[test]
    fn classify_before_training_fails() {
        let nb = NaiveBayes::new();
        let point = vec!["a".to_string()];
        assert_eq!(nb.classify(&point).unwrap_err(), ModelError::NotTrained);
    }

    #[test]
    fn classify_rejects_wrong_arity() {
        let mut nb = NaiveBayes::new();
        nb.train(&[labeled(&["a", "x"], "C1")]).unwrap();

        let point = vec!["a".to_string()];
        assert_eq!(
            nb.classify(&point).unwrap_err(),
            ModelError::AttributeCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn retraining_replaces_prior_state() {
        let mut nb = NaiveBayes::new();
        nb.train(&[labeled(&["a"], "old")]).unwrap();
        nb.train(&[labeled(&["a"], "new")]).unwrap();

        let point = vec!["a".to_string()];
        assert_eq!(nb.classify(&point).unwrap(), "new");
    }
}
