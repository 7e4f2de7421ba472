mod tree;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::classifiers::Classifier;
use crate::core::{ModelError, Record};
use tree::{DecisionTree, Node, NodeId};

const TRAINING_FRACTION: f64 = 0.6;

/// ID3-style decision tree with reduced-error pruning.
///
/// Training shuffles the input, holds out 40% as a validation partition,
/// grows a binary tree on the rest by minimizing weighted entropy over
/// (attribute, value) equality splits, and then prunes any split whose
/// collapse strictly lowers validation misclassifications.
pub struct Id3 {
    tree: DecisionTree,
    num_attributes: usize,
    rng: StdRng,
}

impl Id3 {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            tree: DecisionTree::new(),
            num_attributes: 0,
            rng,
        }
    }
}

impl Classifier for Id3 {
    fn name(&self) -> String {
        "ID3".to_string()
    }

    fn train(&mut self, records: &[Record]) -> Result<(), ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        self.num_attributes = records[0].num_attributes();

        let mut shuffled: Vec<&Record> = records.iter().collect();
        shuffled.shuffle(&mut self.rng);
        // The training partition is never left empty for nonempty input.
        let split = ((TRAINING_FRACTION * shuffled.len() as f64) as usize).max(1);
        let (training, validation) = shuffled.split_at(split);

        let mut tree = DecisionTree::new();
        let root = construct_tree(training, &mut tree, &mut self.rng);
        tree.set_root(root);
        tree.prune(validation);

        self.tree = tree;
        Ok(())
    }

    fn classify(&self, point: &[String]) -> Result<String, ModelError> {
        if self.tree.is_empty() {
            return Err(ModelError::NotTrained);
        }
        if point.len() != self.num_attributes {
            return Err(ModelError::AttributeCountMismatch {
                expected: self.num_attributes,
                actual: point.len(),
            });
        }
        Ok(self.tree.classify(point).to_string())
    }
}

/// Recursively grows the tree over `records`, returning the id of the
/// subtree root. `records` must be nonempty.
///
/// Zero-gain splits are still taken as long as they separate the records:
/// parity-style attribute interactions only show their gain one level deeper.
/// Recursion stops at pure partitions, or with a majority leaf when no
/// (attribute, value) pair separates the records.
fn construct_tree(records: &[&Record], tree: &mut DecisionTree, rng: &mut StdRng) -> NodeId {
    debug_assert!(!records.is_empty());

    if let Some(label) = single_class(records) {
        let label = label.to_string();
        return tree.push(Node::Leaf { label });
    }

    let Some((attribute, value)) = best_split(records) else {
        let label = majority_class(records, rng);
        return tree.push(Node::Leaf { label });
    };

    let (pos_records, neg_records) = partition(records, attribute, &value);
    let majority = majority_class(records, rng);
    let id = tree.push(Node::Split {
        attribute,
        value,
        majority,
        pos: 0,
        neg: 0,
    });
    let pos = construct_tree(&pos_records, tree, rng);
    let neg = construct_tree(&neg_records, tree, rng);
    tree.set_children(id, pos, neg);
    id
}

fn single_class<'a>(records: &[&'a Record]) -> Option<&'a str> {
    let first = records.first()?.label();
    if records.iter().all(|record| record.label() == first) {
        Some(first)
    } else {
        None
    }
}

/// The (attribute, value) equality split with the lowest weighted entropy,
/// evaluated over every value observed at every attribute position.
/// Candidates that put every record on one side are skipped; `None` means no
/// split separates the records at all.
fn best_split(records: &[&Record]) -> Option<(usize, String)> {
    let num_attributes = records.first()?.num_attributes();
    let total = records.len() as f64;

    let mut best: Option<(usize, String, f64)> = None;
    for attribute in 0..num_attributes {
        let mut seen: Vec<&str> = Vec::new();
        for record in records {
            let value = record.values()[attribute].as_str();
            if seen.contains(&value) {
                continue;
            }
            seen.push(value);

            let (pos, neg) = partition(records, attribute, value);
            if pos.is_empty() || neg.is_empty() {
                continue;
            }
            let weighted = (pos.len() as f64 / total) * entropy(&pos)
                + (neg.len() as f64 / total) * entropy(&neg);
            if best.as_ref().is_none_or(|(_, _, b)| weighted < *b) {
                best = Some((attribute, value.to_string(), weighted));
            }
        }
    }
    best.map(|(attribute, value, _)| (attribute, value))
}

fn partition<'a>(
    records: &[&'a Record],
    attribute: usize,
    value: &str,
) -> (Vec<&'a Record>, Vec<&'a Record>) {
    let mut pos = Vec::new();
    let mut neg = Vec::new();
    for record in records {
        if record.values()[attribute] == value {
            pos.push(*record);
        } else {
            neg.push(*record);
        }
    }
    (pos, neg)
}

/// Class impurity −Σ p·ln(p) over the class proportions in `records`.
fn entropy(records: &[&Record]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let counts = class_counts(records);
    let total = records.len() as f64;
    -counts
        .iter()
        .map(|(_, count)| {
            let p = *count as f64 / total;
            p * libm::log(p)
        })
        .sum::<f64>()
}

/// Most common class label, ties broken uniformly at random.
fn majority_class(records: &[&Record], rng: &mut StdRng) -> String {
    let counts = class_counts(records);
    let max = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let tied: Vec<&str> = counts
        .iter()
        .filter(|(_, count)| *count == max)
        .map(|(label, _)| *label)
        .collect();
    tied.choose(rng)
        .map(|label| label.to_string())
        .unwrap_or_default()
}

/// Per-class occurrence counts in first-seen order.
fn class_counts<'a>(records: &[&'a Record]) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(label, _)| *label == record.label()) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.label(), 1)),
        }
    }
    counts
}
