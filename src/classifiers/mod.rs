pub mod classifier;
pub mod id3;
pub mod knn;
pub mod naive_bayes;
mod registry;
pub mod tan;

pub use classifier::Classifier;
pub use id3::Id3;
pub use knn::{KNearestNeighbors, ValueDifferenceMetric};
pub use naive_bayes::NaiveBayes;
pub use registry::{ClassifierKind, build_classifier, default_classifier_specs};
pub use tan::TreeAugmentedNaiveBayes;
