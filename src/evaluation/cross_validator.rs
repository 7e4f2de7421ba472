use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::classifiers::Classifier;
use crate::core::{Dataset, ModelError, Record};
use crate::evaluation::Evaluation;

/// Runs k-fold cross-validation for one classifier over one dataset.
///
/// The folds are fixed at construction time; `evaluate` retrains the
/// borrowed classifier once per fold, so any prior training state is
/// replaced round by round.
pub struct CrossValidator<'a> {
    classifier: &'a mut dyn Classifier,
    folds: Vec<Vec<Record>>,
}

impl std::fmt::Debug for CrossValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossValidator")
            .field("folds", &self.folds)
            .finish_non_exhaustive()
    }
}

impl<'a> CrossValidator<'a> {
    pub fn new(
        classifier: &'a mut dyn Classifier,
        dataset: &Dataset,
        num_folds: usize,
        rng: &mut StdRng,
    ) -> Result<Self, ModelError> {
        if num_folds < 2 || num_folds > dataset.len() {
            return Err(ModelError::InvalidFoldCount {
                folds: num_folds,
                records: dataset.len(),
            });
        }
        Ok(Self {
            classifier,
            folds: Self::create_folds(dataset.records(), num_folds, rng),
        })
    }

    /// Shuffles a copy of `records` and slices it into `num_folds` blocks of
    /// ⌊n/k⌋ records; the remainder goes one record each to folds 0, 1, …,
    /// so fold sizes differ by at most one.
    pub fn create_folds(records: &[Record], num_folds: usize, rng: &mut StdRng) -> Vec<Vec<Record>> {
        let mut shuffled = records.to_vec();
        shuffled.shuffle(rng);

        let base = shuffled.len() / num_folds;
        let remainder = shuffled.len() % num_folds;

        let mut folds = Vec::with_capacity(num_folds);
        let mut start = 0;
        for fold in 0..num_folds {
            let size = base + usize::from(fold < remainder);
            folds.push(shuffled[start..start + size].to_vec());
            start += size;
        }
        folds
    }

    /// Trains on the union of k − 1 folds and scores the held-out fold, once
    /// per fold, then aggregates the per-fold accuracies.
    pub fn evaluate(&mut self) -> Result<Evaluation, ModelError> {
        let mut fold_accuracies = Vec::with_capacity(self.folds.len());

        for held_out in 0..self.folds.len() {
            let training: Vec<Record> = self
                .folds
                .iter()
                .enumerate()
                .filter(|(fold, _)| *fold != held_out)
                .flat_map(|(_, fold)| fold.iter().cloned())
                .collect();
            self.classifier.train(&training)?;

            let fold = &self.folds[held_out];
            let mut correct = 0usize;
            for record in fold {
                if self.classifier.classify(record.values())? == record.label() {
                    correct += 1;
                }
            }
            fold_accuracies.push(correct as f64 / fold.len() as f64);
        }

        Ok(Evaluation::from_fold_accuracies(fold_accuracies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{Id3, NaiveBayes};
    use crate::testing::{ConstantClassifier, OracleClassifier, TrainSpyClassifier};
    use crate::utils::rng::rng_from_seed;
    use std::collections::HashMap;

    fn numbered_records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::from_strs(&[&i.to_string()], &format!("c{}", i % 2)))
            .collect()
    }

    fn dataset(records: Vec<Record>) -> Dataset {
        Dataset::from_records("test", records).unwrap()
    }

    #[test]
    fn folds_partition_the_records_with_sizes_differing_by_at_most_one() {
        let records = numbered_records(13);
        for num_folds in [2, 3, 5, 13] {
            let mut rng = rng_from_seed(Some(17));
            let folds = CrossValidator::create_folds(&records, num_folds, &mut rng);

            assert_eq!(folds.len(), num_folds);
            let sizes: Vec<usize> = folds.iter().map(|fold| fold.len()).collect();
            let min = sizes.iter().min().unwrap();
            let max = sizes.iter().max().unwrap();
            assert!(max - min <= 1, "sizes {sizes:?}");

            let mut expected: HashMap<&Record, usize> = HashMap::new();
            for record in &records {
                *expected.entry(record).or_insert(0) += 1;
            }
            let mut actual: HashMap<&Record, usize> = HashMap::new();
            for record in folds.iter().flatten() {
                *actual.entry(record).or_insert(0) += 1;
            }
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn remainder_records_go_to_the_leading_folds() {
        let records = numbered_records(11);
        let mut rng = rng_from_seed(Some(2));
        let folds = CrossValidator::create_folds(&records, 3, &mut rng);
        let sizes: Vec<usize> = folds.iter().map(|fold| fold.len()).collect();
        assert_eq!(sizes, vec![4, 4, 3]);
    }

    #[test]
    fn folds_are_shuffled() {
        let records = numbered_records(32);
        let mut rng = rng_from_seed(Some(5));
        let folds = CrossValidator::create_folds(&records, 32, &mut rng);
        let in_order = folds
            .iter()
            .flatten()
            .zip(&records)
            .all(|(a, b)| a == b);
        assert!(!in_order);
    }

    #[test]
    fn degenerate_fold_counts_are_rejected() {
        let data = dataset(numbered_records(4));
        let mut rng = rng_from_seed(Some(1));

        for num_folds in [0, 1, 5] {
            let mut classifier = ConstantClassifier::new("c0");
            let err = CrossValidator::new(&mut classifier, &data, num_folds, &mut rng).unwrap_err();
            assert_eq!(
                err,
                ModelError::InvalidFoldCount {
                    folds: num_folds,
                    records: 4
                }
            );
        }
    }

    #[test]
    fn oracle_classifier_scores_perfectly_on_repeated_records() {
        // Four distinct vectors, five copies each: every held-out record is
        // also present in the training folds, so the oracle never misses.
        let mut records = Vec::new();
        for _ in 0..5 {
            records.push(Record::from_strs(&["a", "x"], "c0"));
            records.push(Record::from_strs(&["a", "y"], "c1"));
            records.push(Record::from_strs(&["b", "x"], "c1"));
            records.push(Record::from_strs(&["b", "y"], "c0"));
        }
        let data = dataset(records);

        let mut oracle = OracleClassifier::default();
        let mut rng = rng_from_seed(Some(23));
        let evaluation = CrossValidator::new(&mut oracle, &data, 5, &mut rng)
            .unwrap()
            .evaluate()
            .unwrap();

        assert_eq!(evaluation.fold_accuracies.len(), 5);
        assert!((evaluation.mean - 1.0).abs() < 1e-12);
        assert_eq!(evaluation.half_width, 0.0);
    }

    #[test]
    fn constant_classifier_matches_the_label_distribution() {
        // 6 of 12 records carry the constant's label, so the mean accuracy
        // over all folds is exactly 0.5 when folds are evenly sized.
        let records: Vec<Record> = (0..12)
            .map(|i| Record::from_strs(&[&i.to_string()], if i % 2 == 0 { "c0" } else { "c1" }))
            .collect();
        let data = dataset(records);

        let mut constant = ConstantClassifier::new("c0");
        let mut rng = rng_from_seed(Some(3));
        let evaluation = CrossValidator::new(&mut constant, &data, 2, &mut rng)
            .unwrap()
            .evaluate()
            .unwrap();

        assert!(evaluation.mean >= 0.0 && evaluation.mean <= 1.0);
        assert!(evaluation.half_width >= 0.0);
        let total_correct: f64 = evaluation
            .fold_accuracies
            .iter()
            .map(|accuracy| accuracy * 6.0)
            .sum();
        assert!((total_correct - 6.0).abs() < 1e-9);
    }

    #[test]
    fn classifier_is_retrained_once_per_fold() {
        let data = dataset(numbered_records(10));
        let (mut spy, handle) = TrainSpyClassifier::new("c0");
        let mut rng = rng_from_seed(Some(7));

        CrossValidator::new(&mut spy, &data, 5, &mut rng)
            .unwrap()
            .evaluate()
            .unwrap();

        assert_eq!(handle.count(), 5);
    }

    #[test]
    fn naive_bayes_mean_accuracy_stays_in_bounds() {
        let records: Vec<Record> = (0..20)
            .map(|i| {
                let value = if i % 2 == 0 { "a" } else { "b" };
                let label = if i % 4 < 2 { "c0" } else { "c1" };
                Record::from_strs(&[value], label)
            })
            .collect();
        let data = dataset(records);

        let mut nb = NaiveBayes::new();
        let mut rng = rng_from_seed(Some(13));
        let evaluation = CrossValidator::new(&mut nb, &data, 4, &mut rng)
            .unwrap()
            .evaluate()
            .unwrap();

        assert!(evaluation.mean >= 0.0 && evaluation.mean <= 1.0);
        assert!(evaluation.half_width >= 0.0);
    }

    #[test]
    fn id3_learns_xor_end_to_end() {
        let mut records = Vec::new();
        for _ in 0..10 {
            records.push(Record::from_strs(&["0", "0"], "F"));
            records.push(Record::from_strs(&["0", "1"], "T"));
            records.push(Record::from_strs(&["1", "0"], "T"));
            records.push(Record::from_strs(&["1", "1"], "F"));
        }
        let data = dataset(records);

        let mut id3 = Id3::with_seed(41);
        let mut rng = rng_from_seed(Some(41));
        let evaluation = CrossValidator::new(&mut id3, &data, 5, &mut rng)
            .unwrap()
            .evaluate()
            .unwrap();

        assert!(
            evaluation.mean >= 0.8,
            "expected XOR accuracy >= 0.8, got {}",
            evaluation.mean
        );
    }
}
