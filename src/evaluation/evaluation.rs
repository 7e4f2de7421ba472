use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

const CONFIDENCE_Z: f64 = 1.96;

/// Aggregated outcome of one cross-validation run.
///
/// `half_width` is `1.96 · sqrt(Σ(xᵢ − mean)²) / sqrt(k)` over the per-fold
/// accuracies. The spread term is the root of the raw sum of squared
/// deviations, without a 1/(k−1) normalization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Evaluation {
    pub mean: f64,
    pub half_width: f64,
    pub fold_accuracies: Vec<f64>,
}

impl Evaluation {
    pub fn from_fold_accuracies(fold_accuracies: Vec<f64>) -> Evaluation {
        let k = fold_accuracies.len() as f64;
        if k == 0.0 {
            return Evaluation {
                mean: f64::NAN,
                half_width: f64::NAN,
                fold_accuracies,
            };
        }

        let mean = fold_accuracies.iter().sum::<f64>() / k;
        let spread = fold_accuracies
            .iter()
            .map(|x| (x - mean) * (x - mean))
            .sum::<f64>()
            .sqrt();
        Evaluation {
            mean,
            half_width: CONFIDENCE_Z * spread / k.sqrt(),
            fold_accuracies,
        }
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:.4} ± {:.4}", self.mean, self.half_width)
    }
}
