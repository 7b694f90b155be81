use std::fmt;

use crate::{Float, LogitError, Result};

fn check_lengths(y_true: &[usize], y_pred: &[usize]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(LogitError::ShapeMismatch {
            expected: format!("Expected {} predictions", y_true.len()),
            got: format!("Got {}", y_pred.len()),
        });
    }
    if y_true.is_empty() {
        return Err(LogitError::EmptyTrainingData);
    }
    Ok(())
}

/// Fraction of predictions equal to the true label.
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> Result<Float> {
    check_lengths(y_true, y_pred)?;
    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(hits as Float / y_true.len() as Float)
}

/// Binary confusion matrix. Class `1` is positive; any non-zero label counts as `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    pub fn from_labels(y_true: &[usize], y_pred: &[usize]) -> Result<Self> {
        check_lengths(y_true, y_pred)?;
        let mut cm = Self::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t != 0, p != 0) {
                (false, false) => cm.true_negative += 1,
                (false, true) => cm.false_positive += 1,
                (true, false) => cm.false_negative += 1,
                (true, true) => cm.true_positive += 1,
            }
        }
        Ok(cm)
    }

    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }

    pub fn accuracy(&self) -> Float {
        ratio(self.true_negative + self.true_positive, self.total())
    }
}

/// Precision, recall, F1 and support for one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: Float,
    pub recall: Float,
    pub f1: Float,
    pub support: usize,
}

impl ClassMetrics {
    fn new(tp: usize, fp: usize, fn_: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
            support: tp + fn_,
        }
    }
}

// Undefined ratios (empty denominator) are reported as 0.
fn ratio(num: usize, den: usize) -> Float {
    if den == 0 {
        0.0
    } else {
        num as Float / den as Float
    }
}

/// Per-class summary of a binary classifier's predictions.
///
/// `Display` renders a plain-text table:
///
/// ```text
///              precision    recall  f1-score   support
///
///            0      0.95      0.90      0.92        20
///            1      0.90      0.95      0.93        20
///
///     accuracy                          0.93        40
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub negative: ClassMetrics,
    pub positive: ClassMetrics,
    pub accuracy: Float,
}

impl ClassificationReport {
    pub fn from_labels(y_true: &[usize], y_pred: &[usize]) -> Result<Self> {
        let cm = ConfusionMatrix::from_labels(y_true, y_pred)?;
        Ok(Self::from_confusion(&cm))
    }

    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        Self {
            negative: ClassMetrics::new(cm.true_negative, cm.false_negative, cm.false_positive),
            positive: ClassMetrics::new(cm.true_positive, cm.false_positive, cm.false_negative),
            accuracy: cm.accuracy(),
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, m) in [("0", &self.negative), ("1", &self.positive)] {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                label, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        write!(
            f,
            "{:>12} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.negative.support + self.positive.support
        )
    }
}
