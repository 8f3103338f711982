// Cross-validation results

use crate::locale::Locale;
use serde::Serialize;
use std::fmt;
use trueno::Vector;

/// Outcome of one train/test split
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldOutcome {
    /// Zero-based fold index (also the index of the held-out fragment)
    pub fold: usize,

    /// Characters of training text fed to the fold's profile
    pub train_chars: usize,

    /// Characters in the held-out fragment
    pub test_chars: usize,

    /// Probability the classifier assigned to the true language
    pub probability: f64,

    /// Whether the true language appeared in the classifier output at all
    pub matched: bool,
}

/// Per-fold and aggregate results of a validation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub language: Locale,
    pub k: usize,

    /// Fragments the sample was cut into (at least `k`)
    pub fragment_count: usize,

    pub folds: Vec<FoldOutcome>,

    /// Mean probability over the folds; the headline metric
    pub average: f64,

    /// Standard deviation of the fold probabilities
    pub spread: f64,
}

impl ValidationReport {
    pub(crate) fn new(
        language: Locale,
        k: usize,
        fragment_count: usize,
        folds: Vec<FoldOutcome>,
    ) -> Self {
        let average = if folds.is_empty() {
            0.0
        } else {
            folds.iter().map(|f| f.probability).sum::<f64>() / folds.len() as f64
        };

        // trueno computes population statistics in f32
        let probabilities: Vec<f32> = folds.iter().map(|f| f.probability as f32).collect();
        let spread = Vector::from_slice(&probabilities)
            .stddev()
            .map(f64::from)
            .unwrap_or(0.0);

        Self {
            language,
            k,
            fragment_count,
            folds,
            average,
            spread,
        }
    }

    /// Folds in which the true language was absent from the result
    pub fn misses(&self) -> usize {
        self.folds.iter().filter(|f| !f.matched).count()
    }

    /// Fold with the lowest probability
    pub fn worst_fold(&self) -> Option<&FoldOutcome> {
        self.folds
            .iter()
            .min_by(|a, b| a.probability.total_cmp(&b.probability))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}-fold cross-validation for '{}' ({} fragments)",
            self.k, self.language, self.fragment_count
        )?;
        writeln!(
            f,
            "{:>6} {:>10} {:>10} {:>12}",
            "fold", "train", "test", "probability"
        )?;
        for fold in &self.folds {
            let marker = if fold.matched { "" } else { "  (no match)" };
            writeln!(
                f,
                "{:>6} {:>10} {:>10} {:>12.5}{}",
                fold.fold + 1,
                fold.train_chars,
                fold.test_chars,
                fold.probability,
                marker
            )?;
        }
        write!(
            f,
            "average probability: {:.5} (stddev {:.5})",
            self.average, self.spread
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(fold: usize, probability: f64) -> FoldOutcome {
        FoldOutcome {
            fold,
            train_chars: 100,
            test_chars: 50,
            probability,
            matched: probability > 0.0,
        }
    }

    fn report(probabilities: &[f64]) -> ValidationReport {
        let folds = probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| fold(i, p))
            .collect();
        ValidationReport::new(
            Locale::parse("de").unwrap(),
            probabilities.len(),
            probabilities.len(),
            folds,
        )
    }

    #[test]
    fn test_average_and_spread() {
        let report = report(&[1.0, 0.5, 0.0]);
        assert!((report.average - 0.5).abs() < 1e-12);
        // population stddev of [1, 0.5, 0] = sqrt(1/6)
        assert!((report.spread - (1.0f64 / 6.0).sqrt()).abs() < 1e-5);
        assert_eq!(report.misses(), 1);
        assert_eq!(report.worst_fold().unwrap().fold, 2);
    }

    #[test]
    fn test_identical_folds_have_no_spread() {
        let report = report(&[0.8, 0.8, 0.8]);
        assert!((report.average - 0.8).abs() < 1e-12);
        assert!(report.spread.abs() < 1e-6);
        assert_eq!(report.misses(), 0);
    }

    #[test]
    fn test_text_rendering() {
        let text = report(&[0.9, 0.0, 0.6]).to_string();
        assert!(text.starts_with("3-fold cross-validation for 'de' (3 fragments)"));
        assert!(text.contains("(no match)"));
        assert!(text.contains("0.90000"));
        assert!(text.ends_with("average probability: 0.50000 (stddev 0.37417)"));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(report(&[0.5, 0.5, 0.5])).unwrap();
        assert_eq!(json["language"], "de");
        assert_eq!(json["k"], 3);
        assert_eq!(json["folds"].as_array().unwrap().len(), 3);
        assert_eq!(json["folds"][0]["matched"], true);
    }
}
