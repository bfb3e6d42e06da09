//! The zoom schedule of the title intro.
//!
//! The intro holds the unzoomed title for a moment, creeps in slowly over
//! nine small steps, then rushes in with large steps that each last a single
//! tick:
//!
//! | steps | factors                        | lifetime | accelerate |
//! |-------|--------------------------------|----------|------------|
//! | 1     | 1.0                            | 2        | yes        |
//! | 9     | 1.05, 1.10, .., 1.45           | 2        | no         |
//! | 6     | 1.5, 3.0, 4.5, 6.0, 7.5, 9.0   | 1        | yes        |
//!
//! Factors are derived from the step index rather than accumulated, so the
//! step count does not drift with floating point rounding.

use matrixrain_common::error::{MatrixRainError, MatrixRainResult};
use serde::Serialize;

/// One frame to generate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomStep {
    /// Multiplicative zoom; 1.0 is the unscaled source.
    pub factor: f64,
    /// Playback ticks the frame stays current.
    pub lifetime: u32,
    /// Whether the frame asks the rain to speed up when it becomes current.
    pub accelerate: bool,
}

impl ZoomStep {
    pub fn new(factor: f64, lifetime: u32, accelerate: bool) -> Self {
        Self {
            factor,
            lifetime,
            accelerate,
        }
    }
}

/// An ordered, validated list of zoom steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomSchedule {
    steps: Vec<ZoomStep>,
}

impl ZoomSchedule {
    /// Validate and wrap a list of steps.
    ///
    /// Factors must be finite, positive, and strictly increasing; lifetimes
    /// must be at least one tick.
    pub fn new(steps: Vec<ZoomStep>) -> MatrixRainResult<Self> {
        let mut previous: Option<f64> = None;
        for step in &steps {
            if !step.factor.is_finite() || step.factor <= 0.0 {
                return Err(MatrixRainError::invalid_factor(step.factor));
            }
            if step.lifetime == 0 {
                return Err(MatrixRainError::configuration(format!(
                    "zoom step at factor {} has a zero lifetime",
                    step.factor
                )));
            }
            if let Some(prev) = previous {
                if step.factor <= prev {
                    return Err(MatrixRainError::configuration(format!(
                        "zoom factors must increase: {} follows {prev}",
                        step.factor
                    )));
                }
            }
            previous = Some(step.factor);
        }
        Ok(Self { steps })
    }

    /// The 16-step title intro schedule.
    pub fn title_intro() -> Self {
        let mut steps = Vec::with_capacity(16);

        steps.push(ZoomStep::new(1.0, 2, true));

        // slow creep: 1.05 ..= 1.45
        for i in 1..=9 {
            steps.push(ZoomStep::new(1.0 + 0.05 * i as f64, 2, false));
        }

        // rush: 1.5, 3.0, .. while <= 10.0
        let mut i = 1;
        while 1.5 * i as f64 <= 10.0 {
            steps.push(ZoomStep::new(1.5 * i as f64, 1, true));
            i += 1;
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[ZoomStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total playback ticks from the first frame to past-the-end.
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| s.lifetime as u64).sum()
    }
}

impl Default for ZoomSchedule {
    fn default() -> Self {
        Self::title_intro()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_intro_factors() {
        let expected = [
            1.0, 1.05, 1.10, 1.15, 1.20, 1.25, 1.30, 1.35, 1.40, 1.45, 1.5, 3.0, 4.5, 6.0, 7.5,
            9.0,
        ];
        let schedule = ZoomSchedule::title_intro();
        assert_eq!(schedule.len(), expected.len());
        for (step, factor) in schedule.steps().iter().zip(expected) {
            assert!((step.factor - factor).abs() < 1e-9, "{} != {factor}", step.factor);
        }
    }

    #[test]
    fn test_title_intro_lifetimes_and_flags() {
        let schedule = ZoomSchedule::title_intro();
        let steps = schedule.steps();

        assert_eq!((steps[0].lifetime, steps[0].accelerate), (2, true));
        for step in &steps[1..10] {
            assert_eq!((step.lifetime, step.accelerate), (2, false));
        }
        for step in &steps[10..] {
            assert_eq!((step.lifetime, step.accelerate), (1, true));
        }
        assert_eq!(schedule.total_ticks(), 26);
    }

    #[test]
    fn test_title_intro_passes_validation() {
        let schedule = ZoomSchedule::title_intro();
        assert_eq!(ZoomSchedule::new(schedule.steps().to_vec()).unwrap(), schedule);
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        let err = ZoomSchedule::new(vec![ZoomStep::new(0.0, 1, false)]).unwrap_err();
        assert!(matches!(err, MatrixRainError::InvalidFactor { .. }));
    }

    #[test]
    fn test_rejects_decreasing_factors() {
        let steps = vec![ZoomStep::new(2.0, 1, false), ZoomStep::new(1.5, 1, false)];
        assert!(matches!(
            ZoomSchedule::new(steps),
            Err(MatrixRainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_lifetime() {
        let steps = vec![ZoomStep::new(1.0, 0, false)];
        assert!(ZoomSchedule::new(steps).is_err());
    }
}
