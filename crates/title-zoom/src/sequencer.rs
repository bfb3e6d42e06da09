//! The zoom frame sequencer.
//!
//! # Generation
//!
//! For every step of the [`ZoomSchedule`]:
//!
//! 1. **Notify** the cloud factory of the step's factor.
//! 2. **Crop** the centered [`CropRect`] out of the source bitmap.
//! 3. **Diffuse** the crop through the [`Diffuser`], anti-aliased, scaling
//!    it back up by the factor.
//! 4. **Append** the result to the sequence with the step's lifetime and
//!    accelerate flag.
//!
//! # Playback
//!
//! The sequence and its cursor sit behind one mutex, so the render loop can
//! tick from any thread while structural edits stay atomic. Playback never
//! fails: an empty or exhausted sequence answers with `None` / `false`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use matrixrain_bitmap::{IndexBitmap, Point, TitleConnectorPosition, TitleGlyphPosition};
use matrixrain_common::error::{MatrixRainError, MatrixRainResult};
use serde::Serialize;

use crate::crop::CropRect;
use crate::diffusion::{
    Diffuser, GlowCloudFactory, IntersectorFactory, NearestGlowDiffuser, PhosphorCloudFactory,
    SampledCircleIntersector,
};
use crate::schedule::ZoomSchedule;
use crate::sequence::{FrameSequence, PlaybackState, TitleFrame};

/// Summary of one generated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameInfo {
    pub index: usize,
    pub factor: f64,
    pub lifetime: u32,
    pub accelerate: bool,
    pub width: usize,
    pub height: usize,
}

/// Generates the zooming title frames and plays them back.
pub struct ZoomFrameSequencer {
    window_width: usize,
    window_height: usize,
    glyph_count: usize,
    original_glyph_positions: Option<Vec<Point>>,
    connector_count: usize,
    original_connector_positions: Option<Vec<Point>>,
    source: Option<IndexBitmap>,
    schedule: ZoomSchedule,
    diffuser: Box<dyn Diffuser>,
    clouds: Box<dyn PhosphorCloudFactory>,
    intersector: Box<dyn IntersectorFactory>,
    sequence: Mutex<FrameSequence>,
}

impl ZoomFrameSequencer {
    /// Create a sequencer around the given diffusion collaborators.
    pub fn new(
        diffuser: impl Diffuser + 'static,
        clouds: impl PhosphorCloudFactory + 'static,
        intersector: impl IntersectorFactory + 'static,
    ) -> Self {
        Self {
            window_width: 0,
            window_height: 0,
            glyph_count: 0,
            original_glyph_positions: None,
            connector_count: 0,
            original_connector_positions: None,
            source: None,
            schedule: ZoomSchedule::title_intro(),
            diffuser: Box::new(diffuser),
            clouds: Box::new(clouds),
            intersector: Box::new(intersector),
            sequence: Mutex::new(FrameSequence::new()),
        }
    }

    /// Create a sequencer using the built-in glow diffuser.
    pub fn with_reference_diffusion() -> Self {
        Self::new(
            NearestGlowDiffuser,
            GlowCloudFactory::default(),
            SampledCircleIntersector::default(),
        )
    }

    pub fn set_window_width(&mut self, value: usize) {
        self.window_width = value;
    }

    pub fn set_window_height(&mut self, value: usize) {
        self.window_height = value;
    }

    pub fn set_glyph_count(&mut self, value: usize) {
        self.glyph_count = value;
    }

    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// Store each glyph's resting point `(x, end_y)`. An empty list clears them.
    pub fn set_original_glyph_positions(&mut self, values: &[TitleGlyphPosition]) {
        self.original_glyph_positions = if values.is_empty() {
            None
        } else {
            Some(values.iter().map(TitleGlyphPosition::anchor).collect())
        };
    }

    pub fn original_glyph_positions(&self) -> Option<&[Point]> {
        self.original_glyph_positions.as_deref()
    }

    pub fn set_connector_count(&mut self, value: usize) {
        self.connector_count = value;
    }

    pub fn connector_count(&self) -> usize {
        self.connector_count
    }

    /// Store each connector's position. An empty list clears them.
    pub fn set_original_connector_positions(&mut self, values: &[TitleConnectorPosition]) {
        self.original_connector_positions = if values.is_empty() {
            None
        } else {
            Some(values.iter().map(|c| c.position).collect())
        };
    }

    pub fn original_connector_positions(&self) -> Option<&[Point]> {
        self.original_connector_positions.as_deref()
    }

    /// Set the unzoomed title bitmap every frame is cut from.
    pub fn set_first_bitmap(&mut self, bitmap: IndexBitmap) {
        self.source = Some(bitmap);
    }

    /// Replace the default title intro schedule.
    pub fn set_schedule(&mut self, schedule: ZoomSchedule) {
        self.schedule = schedule;
    }

    pub fn schedule(&self) -> &ZoomSchedule {
        &self.schedule
    }

    fn source(&self) -> MatrixRainResult<&IndexBitmap> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| MatrixRainError::configuration("source bitmap is not set"))?;
        if source.is_empty() {
            return Err(MatrixRainError::configuration("source bitmap is empty"));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(MatrixRainError::configuration(format!(
                "window size {}x{} must be positive",
                self.window_width, self.window_height
            )));
        }
        Ok(source)
    }

    /// The source rectangle a frame at `factor` is cut from.
    pub fn crop_for(&self, factor: f64) -> MatrixRainResult<CropRect> {
        let source = self.source()?;
        CropRect::centered(
            source.width(),
            source.height(),
            self.window_width,
            self.window_height,
            factor,
        )
    }

    /// Crop and diffuse one frame at `factor`.
    pub fn create_frame_bitmap(&mut self, factor: f64) -> MatrixRainResult<IndexBitmap> {
        let rect = self.crop_for(factor)?;
        self.clouds.set_current_factor(factor);

        let crop = self
            .source()?
            .crop(rect.start_col, rect.start_row, rect.width, rect.height)?;

        let bitmap = self
            .diffuser
            .scale_up(
                &crop,
                self.clouds.as_ref(),
                self.intersector.as_ref(),
                factor,
                true,
            )
            .map_err(|e| {
                let name = self.diffuser.name().to_string();
                MatrixRainError::Other(
                    anyhow::Error::new(e).context(format!("{name} diffusion at factor {factor}")),
                )
            })?;

        tracing::debug!(
            factor,
            crop_width = rect.width,
            crop_height = rect.height,
            width = bitmap.width(),
            height = bitmap.height(),
            "Title frame created"
        );
        Ok(bitmap)
    }

    /// Generate every frame of the schedule, replacing any earlier frames.
    ///
    /// Frames are built off to the side and swapped in only once all of
    /// them succeed; on error the previous sequence is left untouched.
    pub fn create_all_frames(&mut self) -> MatrixRainResult<()> {
        self.source()?;
        let started = Instant::now();
        tracing::info!(
            steps = self.schedule.len(),
            diffuser = self.diffuser.name(),
            "Generating title frames"
        );

        let steps = self.schedule.steps().to_vec();
        let mut sequence = FrameSequence::new();
        for step in steps {
            let bitmap = self.create_frame_bitmap(step.factor)?;
            sequence.push_back(TitleFrame::new(
                bitmap,
                step.factor,
                step.lifetime,
                step.accelerate,
            ));
        }

        let frames = sequence.len();
        *self.lock() = sequence;

        tracing::info!(
            frames,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Title frames generated"
        );
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, FrameSequence> {
        // Playback must keep running even if another holder panicked.
        self.sequence.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-modify-write against the sequence under one lock.
    pub fn with_sequence<R>(&self, f: impl FnOnce(&mut FrameSequence) -> R) -> R {
        f(&mut self.lock())
    }

    /// Metadata for every frame, in playback order.
    pub fn frames(&self) -> Vec<FrameInfo> {
        self.lock()
            .iter()
            .enumerate()
            .map(|(index, (_, frame))| FrameInfo {
                index,
                factor: frame.factor(),
                lifetime: frame.iterations_to_live(),
                accelerate: frame.accelerate(),
                width: frame.bitmap().width(),
                height: frame.bitmap().height(),
            })
            .collect()
    }

    pub fn frame_count(&self) -> usize {
        self.lock().len()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.lock().state()
    }

    pub fn set_current_at_first_frame(&self) {
        self.lock().set_cursor_at_first_frame();
    }

    /// One playback tick.
    pub fn set_current_at_next_frame(&self) {
        self.lock().set_cursor_at_next_frame();
    }

    pub fn is_current_after_last_frame(&self) -> bool {
        self.lock().is_cursor_after_last_frame()
    }

    /// The current frame's bitmap, or `None` once playback is past the end.
    pub fn current_bitmap(&self) -> Option<Arc<IndexBitmap>> {
        self.lock().current().map(|f| Arc::clone(f.bitmap()))
    }

    /// Whether the rain should speed up on this tick.
    pub fn to_accelerate_drops(&self) -> bool {
        self.lock().accelerate_signal()
    }
}

impl std::fmt::Debug for ZoomFrameSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomFrameSequencer")
            .field("window_width", &self.window_width)
            .field("window_height", &self.window_height)
            .field("glyph_count", &self.glyph_count)
            .field("connector_count", &self.connector_count)
            .field("diffuser", &self.diffuser.name())
            .field("frames", &self.frame_count())
            .finish()
    }
}
