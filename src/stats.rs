use std::fmt;
use std::io::Write;

use anyhow::Result;
use thiserror::Error;

/// Upper bound on samples held by a [`DataSet`].
pub const MAX_SAMPLES: usize = 50;

/// Variance above this value is classified as high variability.
pub const VARIANCE_THRESHOLD: f64 = 10.5;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("insufficient data for statistical analysis ({count} sample(s), need at least 2)")]
    InsufficientSamples { count: usize },
    #[error("too many samples ({count}, capacity is {MAX_SAMPLES})")]
    TooManySamples { count: usize },
}

#[derive(Debug)]
pub struct DataSet {
    id: u32,
    values: Vec<f64>,
}

impl DataSet {
    pub fn new(id: u32, values: Vec<f64>) -> Result<DataSet, StatsError> {
        if values.len() > MAX_SAMPLES {
            return Err(StatsError::TooManySamples {
                count: values.len(),
            });
        }
        Ok(DataSet { id, values })
    }

    /// The canonical five-value sample used by the demo run.
    pub fn sample() -> DataSet {
        DataSet {
            id: 101,
            values: vec![12.5, 15.2, 9.8, 11.0, 14.5],
        }
    }

    /// Computes mean, then variance, then the classification.
    /// Fewer than two samples is an input error, not a computed value.
    pub fn analyze(&self) -> Result<Analysis, StatsError> {
        if self.values.len() <= 1 {
            return Err(StatsError::InsufficientSamples {
                count: self.values.len(),
            });
        }
        let mean = mean(&self.values);
        let variance = variance(&self.values, mean);
        Ok(Analysis {
            id: self.id,
            mean,
            variance,
            variability: Variability::classify(variance),
        })
    }
}

/// Derived statistics for one dataset. Only constructed via
/// [`DataSet::analyze`], so mean and variance are always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub id: u32,
    pub mean: f64,
    pub variance: f64,
    pub variability: Variability,
}

impl Analysis {
    pub fn write_report(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "Analysis ID: {}", self.id)?;
        writeln!(out, "Computed mean: {:.4}", self.mean)?;
        writeln!(out, "Variance: {:.4}", self.variance)?;
        writeln!(out, "Status: {}", self.variability)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variability {
    High,
    Normal,
}

impl Variability {
    pub fn classify(variance: f64) -> Variability {
        if variance > VARIANCE_THRESHOLD {
            Variability::High
        } else {
            Variability::Normal
        }
    }
}

impl fmt::Display for Variability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variability::High => write!(f, "high variability detected"),
            Variability::Normal => write!(f, "variability within normal range"),
        }
    }
}

/// Arithmetic mean. Callers guarantee a non-empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with Bessel's correction (divisor n - 1).
/// Callers guarantee at least two values.
pub fn variance(values: &[f64], mean: f64) -> f64 {
    values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: [f64; 5] = [12.5, 15.2, 9.8, 11.0, 14.5];

    #[test]
    fn sample_mean_and_variance() {
        let m = mean(&SAMPLE);
        assert!((m - 12.6).abs() < 1e-12);
        // Squared deviations sum to 20.78, divided by 4.
        assert!((variance(&SAMPLE, m) - 5.195).abs() < 1e-12);
    }

    #[test]
    fn sample_analysis_is_normal() {
        let analysis = DataSet::sample().analyze().unwrap();
        assert_eq!(analysis.id, 101);
        assert_eq!(analysis.variability, Variability::Normal);
    }

    #[test]
    fn rejects_insufficient_samples() {
        let single = DataSet::new(7, vec![3.0]).unwrap();
        assert_eq!(
            single.analyze(),
            Err(StatsError::InsufficientSamples { count: 1 })
        );
        let empty = DataSet::new(7, vec![]).unwrap();
        assert_eq!(
            empty.analyze(),
            Err(StatsError::InsufficientSamples { count: 0 })
        );
    }

    #[test]
    fn rejects_over_capacity() {
        let result = DataSet::new(1, vec![0.0; MAX_SAMPLES + 1]);
        assert!(matches!(result, Err(StatsError::TooManySamples { .. })));
        assert!(DataSet::new(1, vec![0.0; MAX_SAMPLES]).is_ok());
    }

    #[test]
    fn classify_threshold() {
        assert_eq!(Variability::classify(10.5), Variability::Normal);
        assert_eq!(Variability::classify(10.5001), Variability::High);
        assert_eq!(Variability::classify(0.0), Variability::Normal);
    }

    #[test]
    fn report_format() {
        let mut out = Vec::new();
        DataSet::sample()
            .analyze()
            .unwrap()
            .write_report(&mut out)
            .unwrap();
        let report = String::from_utf8(out).unwrap();
        assert_eq!(
            report,
            "Analysis ID: 101\n\
             Computed mean: 12.6000\n\
             Variance: 5.1950\n\
             Status: variability within normal range\n"
        );
    }

    proptest! {
        #[test]
        fn analysis_is_deterministic(values in proptest::collection::vec(-1e6f64..1e6, 2..50), id in any::<u32>()) {
            let dataset = DataSet::new(id, values).unwrap();
            let first = dataset.analyze().unwrap();
            let second = dataset.analyze().unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn variance_is_nonnegative(values in proptest::collection::vec(-1e6f64..1e6, 2..50)) {
            let m = mean(&values);
            prop_assert!(variance(&values, m) >= 0.0);
        }

        #[test]
        fn constant_data_has_zero_variance(value in -1e6f64..1e6, n in 2usize..50) {
            let values = vec![value; n];
            let m = mean(&values);
            prop_assert!(variance(&values, m).abs() < 1e-6);
        }
    }
}
