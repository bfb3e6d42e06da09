//! Phosphor diffusion contracts.
//!
//! The sequencer does not know how glow is simulated. It hands each crop
//! to a [`Diffuser`] together with two opaque helpers:
//!
//! - a [`PhosphorCloudFactory`], told the current zoom factor before
//!   every call, which shapes the glow cloud around lit pixels
//! - an [`IntersectorFactory`], the geometric coverage test used for
//!   anti-aliasing
//!
//! [`NearestGlowDiffuser`], [`GlowCloudFactory`], and
//! [`SampledCircleIntersector`] are small reference implementations for
//! tools and tests that run without a real phosphor engine.

use matrixrain_bitmap::IndexBitmap;
use matrixrain_common::error::{MatrixRainError, MatrixRainResult};

/// Source of glow clouds for the diffuser.
pub trait PhosphorCloudFactory: Send + Sync {
    /// Record the zoom factor of the frame about to be diffused.
    fn set_current_factor(&mut self, factor: f64);

    /// The last factor recorded.
    fn current_factor(&self) -> f64;

    /// Glow radius, in output pixels, around each lit source pixel.
    fn glow_radius(&self) -> f64;
}

/// Coverage test between a glow circle and an output pixel.
pub trait IntersectorFactory: Send + Sync {
    /// Fraction in `[0, 1]` of the unit pixel whose top-left corner is
    /// `(px, py)` covered by the circle at `(cx, cy)` with `radius`.
    fn coverage(&self, cx: f64, cy: f64, radius: f64, px: f64, py: f64) -> f64;
}

/// Upscales a crop into a finished, glowing frame.
pub trait Diffuser: Send + Sync {
    /// Diffuser name for logging.
    fn name(&self) -> &str;

    /// Scale `source` up by `factor`, spreading phosphor glow.
    fn scale_up(
        &self,
        source: &IndexBitmap,
        clouds: &dyn PhosphorCloudFactory,
        intersector: &dyn IntersectorFactory,
        factor: f64,
        anti_alias: bool,
    ) -> MatrixRainResult<IndexBitmap>;
}

/// Cloud factory whose glow widens with the zoom factor.
#[derive(Debug, Clone)]
pub struct GlowCloudFactory {
    base_radius: f64,
    factor: f64,
}

impl GlowCloudFactory {
    pub fn new(base_radius: f64) -> Self {
        Self {
            base_radius,
            factor: 1.0,
        }
    }
}

impl Default for GlowCloudFactory {
    fn default() -> Self {
        Self::new(0.75)
    }
}

impl PhosphorCloudFactory for GlowCloudFactory {
    fn set_current_factor(&mut self, factor: f64) {
        self.factor = factor;
    }

    fn current_factor(&self) -> f64 {
        self.factor
    }

    fn glow_radius(&self) -> f64 {
        self.base_radius * self.factor
    }
}

/// Estimates circle/pixel coverage on an `n` x `n` subsample grid.
#[derive(Debug, Clone, Copy)]
pub struct SampledCircleIntersector {
    samples: u32,
}

impl SampledCircleIntersector {
    pub fn new(samples: u32) -> Self {
        Self {
            samples: samples.max(1),
        }
    }
}

impl Default for SampledCircleIntersector {
    fn default() -> Self {
        Self::new(4)
    }
}

impl IntersectorFactory for SampledCircleIntersector {
    fn coverage(&self, cx: f64, cy: f64, radius: f64, px: f64, py: f64) -> f64 {
        let n = self.samples;
        let step = 1.0 / n as f64;
        let r2 = radius * radius;
        let mut inside = 0u32;
        for i in 0..n {
            for j in 0..n {
                let sx = px + (i as f64 + 0.5) * step;
                let sy = py + (j as f64 + 0.5) * step;
                if (sx - cx).powi(2) + (sy - cy).powi(2) <= r2 {
                    inside += 1;
                }
            }
        }
        inside as f64 / (n * n) as f64
    }
}

/// Nearest-neighbour upscaler that lets lit pixels glow into dark
/// neighbours.
///
/// Each output pixel takes the index of the source pixel it falls in.
/// With anti-aliasing, a dark output pixel takes the index of the nearest
/// lit source pixel whose glow cloud covers at least half of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestGlowDiffuser;

impl NearestGlowDiffuser {
    fn glow_at(
        source: &IndexBitmap,
        intersector: &dyn IntersectorFactory,
        radius: f64,
        factor: f64,
        ox: usize,
        oy: usize,
    ) -> i32 {
        let sx = (ox as f64 / factor) as usize;
        let sy = (oy as f64 / factor) as usize;
        let mut best: Option<(f64, i32)> = None;

        for ny in sy.saturating_sub(1)..=sy + 1 {
            for nx in sx.saturating_sub(1)..=sx + 1 {
                let Some(value) = source.get(nx, ny).filter(|v| *v != 0) else {
                    continue;
                };
                let cx = (nx as f64 + 0.5) * factor;
                let cy = (ny as f64 + 0.5) * factor;
                let covered = intersector.coverage(cx, cy, radius, ox as f64, oy as f64);
                if covered < 0.5 {
                    continue;
                }
                let dist = (cx - ox as f64 - 0.5).powi(2) + (cy - oy as f64 - 0.5).powi(2);
                if best.map_or(true, |(d, _)| dist < d) {
                    best = Some((dist, value));
                }
            }
        }

        best.map(|(_, v)| v).unwrap_or(0)
    }
}

impl Diffuser for NearestGlowDiffuser {
    fn name(&self) -> &str {
        "nearest-glow"
    }

    fn scale_up(
        &self,
        source: &IndexBitmap,
        clouds: &dyn PhosphorCloudFactory,
        intersector: &dyn IntersectorFactory,
        factor: f64,
        anti_alias: bool,
    ) -> MatrixRainResult<IndexBitmap> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MatrixRainError::invalid_factor(factor));
        }
        if source.is_empty() {
            return Err(MatrixRainError::diffusion("cannot diffuse an empty bitmap"));
        }

        let out_w = ((source.width() as f64 * factor).round() as usize).max(1);
        let out_h = ((source.height() as f64 * factor).round() as usize).max(1);
        let radius = clouds.glow_radius();
        let mut out = IndexBitmap::new(out_w, out_h);

        for oy in 0..out_h {
            let sy = ((oy as f64 / factor) as usize).min(source.height() - 1);
            for ox in 0..out_w {
                let sx = ((ox as f64 / factor) as usize).min(source.width() - 1);
                let mut value = source.get(sx, sy).unwrap_or(0);
                if value == 0 && anti_alias {
                    value = Self::glow_at(source, intersector, radius, factor, ox, oy);
                }
                out.set(ox, oy, value);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_factory_tracks_factor() {
        let mut clouds = GlowCloudFactory::new(1.0);
        clouds.set_current_factor(3.0);
        assert_eq!(clouds.current_factor(), 3.0);
        assert!((clouds.glow_radius() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersector_full_and_empty_coverage() {
        let intersector = SampledCircleIntersector::default();
        assert_eq!(intersector.coverage(0.5, 0.5, 5.0, 0.0, 0.0), 1.0);
        assert_eq!(intersector.coverage(10.0, 10.0, 1.0, 0.0, 0.0), 0.0);
        let partial = intersector.coverage(0.0, 0.5, 0.5, 0.0, 0.0);
        assert!(partial > 0.0 && partial < 1.0);
    }

    #[test]
    fn test_scale_up_dimensions() {
        let source = IndexBitmap::filled(10, 4, 1);
        let out = NearestGlowDiffuser
            .scale_up(
                &source,
                &GlowCloudFactory::default(),
                &SampledCircleIntersector::default(),
                1.5,
                false,
            )
            .unwrap();
        assert_eq!((out.width(), out.height()), (15, 6));
        assert_eq!(out.lit_count(), 15 * 6);
    }

    #[test]
    fn test_anti_alias_spreads_glow() {
        let mut source = IndexBitmap::new(5, 5);
        source.set(2, 2, 9);
        let mut clouds = GlowCloudFactory::new(1.0);
        clouds.set_current_factor(2.0);
        let intersector = SampledCircleIntersector::default();

        let plain = NearestGlowDiffuser
            .scale_up(&source, &clouds, &intersector, 2.0, false)
            .unwrap();
        let glowing = NearestGlowDiffuser
            .scale_up(&source, &clouds, &intersector, 2.0, true)
            .unwrap();

        assert_eq!(plain.lit_count(), 4);
        assert!(glowing.lit_count() > plain.lit_count());
        assert!(glowing.pixels().iter().all(|v| *v == 0 || *v == 9));
    }

    #[test]
    fn test_rejects_bad_input() {
        let clouds = GlowCloudFactory::default();
        let intersector = SampledCircleIntersector::default();
        assert!(NearestGlowDiffuser
            .scale_up(&IndexBitmap::new(0, 0), &clouds, &intersector, 1.0, true)
            .is_err());
        assert!(NearestGlowDiffuser
            .scale_up(&IndexBitmap::new(2, 2), &clouds, &intersector, 0.0, true)
            .is_err());
    }
}
