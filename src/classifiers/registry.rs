use std::str::FromStr;

use anyhow::{Result, anyhow};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::classifiers::{Classifier, Id3, KNearestNeighbors, NaiveBayes, TreeAugmentedNaiveBayes};

/// Parameterless classifier kinds. `knn<k>` specs carry their own neighbor
/// count and are parsed separately by [`build_classifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ClassifierKind {
    NaiveBayes,
    TreeNaiveBayes,
    Id3,
}

/// Builds a classifier from its CLI spec, e.g. `naive-bayes` or `knn5`.
/// The seed, when present, makes the instance's shuffles and tie-breaks
/// reproducible.
pub fn build_classifier(spec: &str, seed: Option<u64>) -> Result<Box<dyn Classifier>> {
    if let Some(suffix) = spec.strip_prefix("knn") {
        let k: usize = suffix
            .parse()
            .map_err(|_| anyhow!("invalid neighbor count in '{spec}'"))?;
        return Ok(Box::new(match seed {
            Some(seed) => KNearestNeighbors::with_seed(k, seed),
            None => KNearestNeighbors::new(k),
        }));
    }

    let kind = ClassifierKind::from_str(spec)
        .map_err(|_| anyhow!("classifier '{spec}' isn't registered"))?;
    Ok(match kind {
        ClassifierKind::NaiveBayes => Box::new(NaiveBayes::new()),
        ClassifierKind::TreeNaiveBayes => Box::new(TreeAugmentedNaiveBayes::new()),
        ClassifierKind::Id3 => Box::new(match seed {
            Some(seed) => Id3::with_seed(seed),
            None => Id3::new(),
        }),
    })
}

/// The full registry: every parameterless kind plus kNN for odd k in 1..=15.
pub fn default_classifier_specs() -> Vec<String> {
    let mut specs: Vec<String> = ClassifierKind::iter().map(|kind| kind.to_string()).collect();
    specs.extend((1..=15).step_by(2).map(|k| format!("knn{k}")));
    specs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_specs_resolve_to_their_classifier() {
        assert_eq!(
            build_classifier("naive-bayes", None).unwrap().name(),
            "NaiveBayes"
        );
        assert_eq!(
            build_classifier("tree-naive-bayes", None).unwrap().name(),
            "TreeAugmentedNaiveBayes"
        );
        assert_eq!(build_classifier("id3", Some(1)).unwrap().name(), "ID3");
        assert_eq!(build_classifier("knn7", Some(1)).unwrap().name(), "kNN-7");
    }

    #[test]
    fn unknown_specs_are_rejected() {
        assert!(build_classifier("perceptron", None).is_err());
        assert!(build_classifier("knnx", None).is_err());
    }

    #[test]
    fn default_registry_covers_all_kinds_and_odd_neighbor_counts() {
        let specs = default_classifier_specs();
        assert_eq!(specs.len(), 3 + 8);
        assert!(specs.contains(&"naive-bayes".to_string()));
        assert!(specs.contains(&"knn1".to_string()));
        assert!(specs.contains(&"knn15".to_string()));
        for spec in &specs {
            assert!(build_classifier(spec, Some(9)).is_ok(), "spec {spec}");
        }
    }
}
