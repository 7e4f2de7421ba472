use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::Record;

/* Power parameter of the per-attribute difference. */
const Q: f64 = 1.0;

/// Value Difference Metric: distance between two categorical values based on
/// how differently they distribute across the class labels observed in a
/// training set.
///
/// Per-pair distances are static once the counts are built, so they are
/// cached under the lexicographically ordered value pair.
pub struct ValueDifferenceMetric {
    attribute_counts: Vec<HashMap<String, usize>>,
    attribute_class_counts: Vec<HashMap<String, HashMap<String, usize>>>,
    distance_cache: RefCell<Vec<HashMap<(String, String), f64>>>,
    classes: Vec<String>,
}

impl ValueDifferenceMetric {
    pub fn new(records: &[Record]) -> Self {
        let num_attributes = records.first().map(|r| r.num_attributes()).unwrap_or(0);
        let mut metric = Self {
            attribute_counts: vec![HashMap::new(); num_attributes],
            attribute_class_counts: vec![HashMap::new(); num_attributes],
            distance_cache: RefCell::new(vec![HashMap::new(); num_attributes]),
            classes: Vec::new(),
        };

        for record in records {
            let label = record.label();
            if !metric.classes.iter().any(|c| c == label) {
                metric.classes.push(label.to_string());
            }
            for (attr, value) in record.values().iter().enumerate() {
                *metric.attribute_counts[attr]
                    .entry(value.clone())
                    .or_insert(0) += 1;
                *metric.attribute_class_counts[attr]
                    .entry(value.clone())
                    .or_default()
                    .entry(label.to_string())
                    .or_insert(0) += 1;
            }
        }
        metric
    }

    /// Euclidean combination of the per-attribute value differences.
    pub fn distance(&self, point_a: &[String], point_b: &[String]) -> f64 {
        let mut sum = 0.0;
        for (attr, (value_a, value_b)) in point_a.iter().zip(point_b).enumerate() {
            let d = self.attribute_difference(attr, value_a, value_b);
            sum += d * d;
        }
        sum.sqrt()
    }

    /// Manhattan distance between the class-occurrence proportion vectors of
    /// two values at one attribute position.
    pub fn attribute_difference(&self, attribute: usize, value_a: &str, value_b: &str) -> f64 {
        let (value_a, value_b) = if value_a > value_b {
            (value_b, value_a)
        } else {
            (value_a, value_b)
        };
        let key = (value_a.to_string(), value_b.to_string());
        if let Some(cached) = self.distance_cache.borrow()[attribute].get(&key) {
            return *cached;
        }

        let mut sum = 0.0;
        for class in &self.classes {
            let diff = self.proportion(attribute, value_a, class)
                - self.proportion(attribute, value_b, class);
            sum += diff.abs().powf(Q);
        }
        let distance = sum.powf(1.0 / Q);

        self.distance_cache.borrow_mut()[attribute].insert(key, distance);
        distance
    }

    /// P(class | value) at one attribute position; a value never seen during
    /// training has all-zero proportions.
    fn proportion(&self, attribute: usize, value: &str, class: &str) -> f64 {
        let Some(total) = self.attribute_counts[attribute].get(value) else {
            return 0.0;
        };
        let count = self.attribute_class_counts[attribute]
            .get(value)
            .and_then(|per_class| per_class.get(class))
            .copied()
            .unwrap_or(0);
        count as f64 / *total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn identical_values_are_at_distance_zero() {
        let metric = ValueDifferenceMetric::new(&[
            Record::from_strs(&["a"], "pos"),
            Record::from_strs(&["b"], "neg"),
        ]);
        assert_eq!(metric.attribute_difference(0, "a", "a"), 0.0);
        assert_eq!(metric.distance(&point(&["a"]), &point(&["a"])), 0.0);
    }

    #[test]
    fn perfectly_opposed_values_are_at_distance_two() {
        // "a" always occurs with pos, "b" always with neg, so the proportion
        // vectors differ by 1 in both class components.
        let metric = ValueDifferenceMetric::new(&[
            Record::from_strs(&["a"], "pos"),
            Record::from_strs(&["a"], "pos"),
            Record::from_strs(&["b"], "neg"),
            Record::from_strs(&["b"], "neg"),
        ]);
        assert!((metric.attribute_difference(0, "a", "b") - 2.0).abs() < 1e-12);
        assert!((metric.distance(&point(&["a"]), &point(&["b"])) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_values_give_intermediate_distance() {
        let metric = ValueDifferenceMetric::new(&[
            Record::from_strs(&["a"], "pos"),
            Record::from_strs(&["a"], "neg"),
            Record::from_strs(&["b"], "neg"),
        ]);
        // P(pos|a)=0.5, P(neg|a)=0.5; P(pos|b)=0, P(neg|b)=1.
        assert!((metric.attribute_difference(0, "a", "b") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn difference_is_symmetric_and_cached() {
        let metric = ValueDifferenceMetric::new(&[
            Record::from_strs(&["a"], "pos"),
            Record::from_strs(&["b"], "neg"),
        ]);
        let forward = metric.attribute_difference(0, "a", "b");
        let backward = metric.attribute_difference(0, "b", "a");
        assert_eq!(forward, backward);
        assert_eq!(metric.distance_cache.borrow()[0].len(), 1);
    }

    #[test]
    fn unseen_value_has_zero_proportions() {
        let metric = ValueDifferenceMetric::new(&[
            Record::from_strs(&["a"], "pos"),
            Record::from_strs(&["a"], "neg"),
        ]);
        // proportions of "z" are all zero, so the difference to "a" is the
        // mass of "a"'s own proportion vector.
        assert!((metric.attribute_difference(0, "a", "z") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn point_distance_combines_attributes_euclidean() {
        let metric = ValueDifferenceMetric::new(&[
            Record::from_strs(&["a", "x"], "pos"),
            Record::from_strs(&["b", "y"], "neg"),
        ]);
        // Both attributes contribute a difference of 2.
        let d = metric.distance(&point(&["a", "x"]), &point(&["b", "y"]));
        assert!((d - (8.0f64).sqrt()).abs() < 1e-12);
    }
}
