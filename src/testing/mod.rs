mod dummies;
mod spies;
mod stubs;

pub use dummies::ConstantClassifier;
pub use spies::{TrainSpyClassifier, TrainSpyHandle};
pub use stubs::OracleClassifier;
