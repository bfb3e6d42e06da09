//! Generate the intro frames and list them.

use super::IntroSettings;

pub fn run(settings: IntroSettings, json: bool) -> anyhow::Result<()> {
    let sequencer = settings.generate()?;
    let frames = sequencer.frames();

    if json {
        println!("{}", serde_json::to_string_pretty(&frames)?);
        return Ok(());
    }

    println!("Title Intro: {:?}", settings.title);
    println!("  Window: {}x{}", settings.width, settings.height);
    println!(
        "  Glyphs: {} / Connectors: {}",
        sequencer.glyph_count(),
        sequencer.connector_count()
    );
    println!(
        "  Frames: {} ({} ticks)",
        frames.len(),
        sequencer.schedule().total_ticks()
    );
    println!();

    for frame in &frames {
        println!(
            "  #{:<2} factor {:>5.2}  {}x{}  lifetime {}{}",
            frame.index,
            frame.factor,
            frame.width,
            frame.height,
            frame.lifetime,
            if frame.accelerate { "  (accelerate)" } else { "" }
        );
    }

    Ok(())
}
