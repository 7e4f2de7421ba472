mod counts;
mod spanning_tree;

use crate::classifiers::Classifier;
use crate::core::{ModelError, Record};
use counts::CooccurrenceCounts;
use spanning_tree::maximum_spanning_tree;

/* Smoothing constants: assume some rate of unobserved points per class and a
   rate of occurrence of any attribute value in those points. */
const MISSING_POINT_RATE: f64 = 0.1;
const ATTRIBUTE_OCCURRENCE_RATE: f64 = 0.03;

/// Tree-Augmented Naive Bayes.
///
/// Relaxes the naive independence assumption by conditioning each attribute
/// on at most one parent attribute. The parent structure is a maximum
/// spanning tree over the pairwise conditional mutual information between
/// attributes, rooted at attribute 0 and rebuilt on every train call.
pub struct TreeAugmentedNaiveBayes {
    counts: Option<CooccurrenceCounts>,
    parents: Vec<Option<usize>>,
}

impl TreeAugmentedNaiveBayes {
    pub fn new() -> Self {
        Self {
            counts: None,
            parents: Vec::new(),
        }
    }

    /// Smoothed log P(attribute value | class).
    fn log_attribute_term(counts: &CooccurrenceCounts, attr: usize, value: &str, class: &str) -> f64 {
        let class_points = counts.class_count(class) as f64;
        let unseen = class_points * MISSING_POINT_RATE;
        let attr_count = counts.attribute_count(attr, value, class) as f64;
        libm::log((attr_count + unseen * ATTRIBUTE_OCCURRENCE_RATE) / (class_points + unseen))
    }

    /// Smoothed log P(attribute value | parent value, class), falling back to
    /// the unconditioned term when the pair was never observed with `class`.
    fn log_conditional_term(
        counts: &CooccurrenceCounts,
        attr: usize,
        value: &str,
        parent: usize,
        parent_value: &str,
        class: &str,
    ) -> f64 {
        let pair_count = counts.pair_count(attr, value, parent, parent_value, class);
        if pair_count == 0 {
            return Self::log_attribute_term(counts, attr, value, class);
        }

        let class_points = counts.class_count(class) as f64;
        let unseen = class_points * MISSING_POINT_RATE;
        let parent_count = counts.attribute_count(parent, parent_value, class) as f64;
        libm::log((pair_count as f64 + unseen * ATTRIBUTE_OCCURRENCE_RATE) / (parent_count + unseen))
    }
}

impl Classifier for TreeAugmentedNaiveBayes {
    fn name(&self) -> String {
        "TreeAugmentedNaiveBayes".to_string()
    }

    fn train(&mut self, records: &[Record]) -> Result<(), ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let num_attributes = records[0].num_attributes();
        let mut counts = CooccurrenceCounts::new(num_attributes);
        for record in records {
            counts.count_record(record);
        }

        self.parents = maximum_spanning_tree(num_attributes, |i, j| {
            counts.conditional_mutual_information(i, j)
        });
        self.counts = Some(counts);
        Ok(())
    }

    fn classify(&self, point: &[String]) -> Result<String, ModelError> {
        let counts = self.counts.as_ref().ok_or(ModelError::NotTrained)?;
        if point.len() != counts.num_attributes() {
            return Err(ModelError::AttributeCountMismatch {
                expected: counts.num_attributes(),
                actual: point.len(),
            });
        }

        let mut best: Option<(f64, &str)> = None;
        for class in counts.classes() {
            let class_points = counts.class_count(class) as f64;
            let mut log_prob = libm::log(class_points / counts.num_points() as f64);

            for (attr, value) in point.iter().enumerate() {
                log_prob += match self.parents[attr] {
                    None => Self::log_attribute_term(counts, attr, value, class),
                    Some(parent) => Self::log_conditional_term(
                        counts,
                        attr,
                        value,
                        parent,
                        &point[parent],
                        class,
                    ),
                };
            }

            if best.is_none_or(|(best_prob, _)| log_prob > best_prob) {
                best = Some((log_prob, class));
            }
        }

        best.map(|(_, class)| class.to_string())
            .ok_or(ModelError::NotTrained)
    }
}
