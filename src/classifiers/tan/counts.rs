use std::collections::HashMap;

use crate::core::Record;

type AttrKey = (usize, String, String);
type PairKey = (usize, usize, String, String, String);

/// Occurrence counters for classes, single attribute values and unordered
/// attribute-value pairs, all conditioned on the class label.
///
/// Pair keys are normalized so the lower attribute index comes first, with
/// the two values swapped alongside the indices. Class labels and attribute
/// values are remembered in first-seen order so that every iteration over
/// them is deterministic.
pub(super) struct CooccurrenceCounts {
    class_counts: HashMap<String, usize>,
    attribute_counts: HashMap<AttrKey, usize>,
    pair_counts: HashMap<PairKey, usize>,
    classes: Vec<String>,
    attribute_values: Vec<Vec<String>>,
    num_points: usize,
    num_attributes: usize,
}

impl CooccurrenceCounts {
    pub(super) fn new(num_attributes: usize) -> Self {
        Self {
            class_counts: HashMap::new(),
            attribute_counts: HashMap::new(),
            pair_counts: HashMap::new(),
            classes: Vec::new(),
            attribute_values: vec![Vec::new(); num_attributes],
            num_points: 0,
            num_attributes,
        }
    }

    pub(super) fn count_record(&mut self, record: &Record) {
        let label = record.label();
        if !self.class_counts.contains_key(label) {
            self.classes.push(label.to_string());
        }
        *self.class_counts.entry(label.to_string()).or_insert(0) += 1;
        self.num_points += 1;

        let values = record.values();
        for i in 0..self.num_attributes {
            if !self.attribute_values[i].contains(&values[i]) {
                self.attribute_values[i].push(values[i].clone());
            }
            *self
                .attribute_counts
                .entry((i, values[i].clone(), label.to_string()))
                .or_insert(0) += 1;

            for j in (i + 1)..self.num_attributes {
                *self
                    .pair_counts
                    .entry((i, j, values[i].clone(), values[j].clone(), label.to_string()))
                    .or_insert(0) += 1;
            }
        }
    }

    pub(super) fn num_points(&self) -> usize {
        self.num_points
    }

    pub(super) fn num_attributes(&self) -> usize {
        self.num_attributes
    }

    pub(super) fn classes(&self) -> &[String] {
        &self.classes
    }

    pub(super) fn class_count(&self, class: &str) -> usize {
        self.class_counts.get(class).copied().unwrap_or(0)
    }

    pub(super) fn attribute_count(&self, attr: usize, value: &str, class: &str) -> usize {
        self.attribute_counts
            .get(&(attr, value.to_string(), class.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub(super) fn pair_count<'a>(
        &self,
        mut attr_i: usize,
        mut value_i: &'a str,
        mut attr_j: usize,
        mut value_j: &'a str,
        class: &str,
    ) -> usize {
        if attr_i > attr_j {
            std::mem::swap(&mut attr_i, &mut attr_j);
            std::mem::swap(&mut value_i, &mut value_j);
        }
        self.pair_counts
            .get(&(
                attr_i,
                attr_j,
                value_i.to_string(),
                value_j.to_string(),
                class.to_string(),
            ))
            .copied()
            .unwrap_or(0)
    }

    /// Conditional mutual information between two attributes given the class,
    /// summed over the observed (value, value, class) combinations only.
    pub(super) fn conditional_mutual_information(&self, attr_i: usize, attr_j: usize) -> f64 {
        let mut sum = 0.0;
        for class in &self.classes {
            let class_count = self.class_count(class);
            if class_count == 0 {
                continue;
            }
            let class_count = class_count as f64;

            for value_i in &self.attribute_values[attr_i] {
                for value_j in &self.attribute_values[attr_j] {
                    let pair = self.pair_count(attr_i, value_i, attr_j, value_j, class);
                    if pair == 0 {
                        continue;
                    }
                    let pair = pair as f64;
                    let count_i = self.attribute_count(attr_i, value_i, class) as f64;
                    let count_j = self.attribute_count(attr_j, value_j, class) as f64;

                    let joint = pair / self.num_points as f64;
                    sum += joint
                        * (libm::log(pair / class_count)
                            - libm::log(count_i / class_count)
                            - libm::log(count_j / class_count));
                }
            }
        }
        sum
    }
}
