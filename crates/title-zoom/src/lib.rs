//! MatrixRain Title Zoom
//!
//! Pre-renders the zooming title intro and plays it back:
//! - **Schedule:** The fixed list of zoom factors, lifetimes, and accelerate flags
//! - **Crop:** Centered crop geometry for each zoom factor
//! - **Diffusion:** Contracts for the phosphor upscaler and its helpers
//! - **Sequence:** Ordered frames with a playback cursor
//! - **Sequencer:** Generation plus the tick-driven playback surface
//!
//! Generation is synchronous and one-shot. Playback is driven by an
//! external render loop that ticks once per display refresh.

pub mod crop;
pub mod diffusion;
pub mod schedule;
pub mod sequence;
pub mod sequencer;

pub use crop::CropRect;
pub use diffusion::{Diffuser, IntersectorFactory, PhosphorCloudFactory};
pub use schedule::{ZoomSchedule, ZoomStep};
pub use sequence::{FrameId, FrameSequence, PlaybackState, TitleFrame};
pub use sequencer::{FrameInfo, ZoomFrameSequencer};
