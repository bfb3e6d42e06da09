pub mod config;
pub mod connectors;
pub mod frames;
pub mod play;

use matrixrain_common::config::AppConfig;
use matrixrain_title_zoom::ZoomFrameSequencer;

use crate::synthetic::render_title;
use crate::IntroArgs;

/// Intro parameters after applying command-line overrides to the config.
#[derive(Debug, Clone)]
pub struct IntroSettings {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl IntroSettings {
    pub fn resolve(config: &AppConfig, args: IntroArgs) -> Self {
        Self {
            title: args.title.unwrap_or_else(|| config.intro.title.clone()),
            width: args.width.unwrap_or(config.intro.window_width) as usize,
            height: args.height.unwrap_or(config.intro.window_height) as usize,
        }
    }

    /// Render the title and generate every intro frame from it.
    pub fn generate(&self) -> anyhow::Result<ZoomFrameSequencer> {
        let title = render_title(&self.title, self.width, self.height)
            .map_err(|e| anyhow::anyhow!("Failed to render title {:?}: {e}", self.title))?;

        let mut sequencer = ZoomFrameSequencer::with_reference_diffusion();
        sequencer.set_window_width(self.width);
        sequencer.set_window_height(self.height);
        sequencer.set_glyph_count(title.glyphs.len());
        sequencer.set_original_glyph_positions(&title.glyphs);
        sequencer.set_connector_count(title.connectors.len());
        sequencer.set_original_connector_positions(&title.connectors);
        sequencer.set_first_bitmap(title.bitmap);

        sequencer
            .create_all_frames()
            .map_err(|e| anyhow::anyhow!("Frame generation failed: {e}"))?;
        Ok(sequencer)
    }
}
