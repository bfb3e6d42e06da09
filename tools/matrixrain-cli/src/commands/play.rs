//! Generate the intro, then play it back at the display tick rate.
//!
//! Generation runs on a blocking worker. Playback runs on its own task,
//! sharing the sequencer through an `Arc`, and stops once the cursor has
//! moved past the last frame.

use std::sync::Arc;

use matrixrain_common::clock::{PlaybackClock, TickPacer};
use matrixrain_title_zoom::ZoomFrameSequencer;
use tokio::time::MissedTickBehavior;

use super::IntroSettings;

pub async fn run(settings: IntroSettings, rate_hz: u32) -> anyhow::Result<()> {
    let sequencer = tokio::task::spawn_blocking(move || settings.generate()).await??;
    let sequencer = Arc::new(sequencer);

    let mut pacer = TickPacer::new(rate_hz);
    tracing::info!(
        frames = sequencer.frame_count(),
        ticks = sequencer.schedule().total_ticks(),
        interval_ms = pacer.interval().as_millis() as u64,
        "Starting title playback"
    );

    let player = {
        let sequencer = Arc::clone(&sequencer);
        tokio::spawn(async move {
            let clock = PlaybackClock::start();
            let mut wakeups = tokio::time::interval(pacer.interval());
            wakeups.set_missed_tick_behavior(MissedTickBehavior::Delay);

            sequencer.set_current_at_first_frame();
            // the first wakeup completes immediately
            wakeups.tick().await;

            while !sequencer.is_current_after_last_frame() {
                wakeups.tick().await;
                let due = pacer.take_due(clock.elapsed());
                if due > 1 {
                    tracing::debug!(due, "Catching up on late ticks");
                }
                for _ in 0..due {
                    advance(&sequencer, pacer.issued());
                    if sequencer.is_current_after_last_frame() {
                        break;
                    }
                }
            }

            (pacer.issued(), clock.elapsed_secs())
        })
    };

    let (ticks, elapsed_secs) = player.await?;
    println!("Title intro finished after {ticks} ticks ({elapsed_secs:.2}s)");
    Ok(())
}

fn advance(sequencer: &ZoomFrameSequencer, tick: u64) {
    sequencer.set_current_at_next_frame();
    if sequencer.to_accelerate_drops() {
        tracing::info!(tick, "Accelerating rain");
    }
    if let Some(bitmap) = sequencer.current_bitmap() {
        tracing::debug!(
            tick,
            width = bitmap.width(),
            height = bitmap.height(),
            lit = bitmap.lit_count(),
            "Showing title frame"
        );
    }
}
