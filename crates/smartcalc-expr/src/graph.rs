//! Graph data sampling
//!
//! Sweeps the free variable across a window centred on its bound value and
//! evaluates the postfix template once per sample.

use crate::evaluator::evaluate_at;
use crate::postfix::Postfix;
use log::{debug, trace};

/// Sampling window around the centre value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphWindow {
    /// Distance from the centre to either edge (default: 5.0)
    pub half_width: f64,
    /// Distance between samples (default: 0.2)
    pub step: f64,
}

impl Default for GraphWindow {
    fn default() -> Self {
        Self {
            half_width: 5.0,
            step: 0.2,
        }
    }
}

impl GraphWindow {
    /// Number of swept samples, both edges included
    pub fn sample_count(&self) -> usize {
        if !(self.step > 0.0) || !(self.half_width >= 0.0) {
            return 0;
        }
        (2.0 * self.half_width / self.step).round() as usize + 1
    }

    /// The swept x values for a window centred on `center`
    pub fn xs(&self, center: f64) -> impl Iterator<Item = f64> + '_ {
        let start = center - self.half_width;
        (0..self.sample_count()).map(move |i| start + i as f64 * self.step)
    }
}

/// Plot points; only successfully evaluated samples are kept
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSeries {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl GraphSeries {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterate `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// Sample `template` across `window` centred on `center`.
///
/// Samples that fail to evaluate, or evaluate to a non-finite value,
/// contribute no point.
pub fn sample(template: &Postfix, center: f64, window: &GraphWindow) -> GraphSeries {
    let mut series = GraphSeries::default();

    for x in window.xs(center) {
        match evaluate_at(template, x) {
            Ok(y) if y.is_finite() => {
                series.xs.push(x);
                series.ys.push(y);
            }
            Ok(y) => trace!("dropping sample x={}: y={}", x, y),
            Err(err) => trace!("dropping sample x={}: {}", x, err.detail()),
        }
    }

    debug!(
        "sampled {} of {} points around x={}",
        series.len(),
        window.sample_count(),
        center
    );
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postfix::to_postfix;

    #[test]
    fn test_default_window_has_51_samples() {
        let window = GraphWindow::default();
        assert_eq!(window.sample_count(), 51);
        let xs: Vec<f64> = window.xs(0.0).collect();
        assert_eq!(xs[0], -5.0);
        assert!((xs[50] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_linear() {
        let template = to_postfix("2 * x + 1").unwrap();
        let series = sample(&template, 10.0, &GraphWindow::default());
        assert_eq!(series.len(), 51);
        assert_eq!(series.xs[0], 5.0);
        assert_eq!(series.ys[0], 11.0);
        for (x, y) in series.points() {
            assert!((y - (2.0 * x + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_failed_samples_are_dropped() {
        // sqrt is undefined for the 25 negative samples
        let template = to_postfix("sqrt(x)").unwrap();
        let series = sample(&template, 0.0, &GraphWindow::default());
        assert_eq!(series.xs.len(), series.ys.len());
        assert_eq!(series.len(), 26);
        assert!(series.xs.iter().all(|x| *x >= -1e-9));
    }

    #[test]
    fn test_division_by_zero_sample_is_dropped() {
        let template = to_postfix("1 / x").unwrap();
        let series = sample(&template, 0.0, &GraphWindow::default());
        assert_eq!(series.len(), 50);
    }

    #[test]
    fn test_constant_template() {
        let template = to_postfix("3").unwrap();
        let series = sample(&template, 0.0, &GraphWindow::default());
        assert_eq!(series.len(), 51);
        assert!(series.ys.iter().all(|y| *y == 3.0));
    }
}
