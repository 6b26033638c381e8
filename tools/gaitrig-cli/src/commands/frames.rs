//! Stream per-frame poses as JSON lines.

use std::io::Write;

use gaitrig_common::AppConfig;
use gaitrig_motion_core::playback::Playback;
use gaitrig_motion_core::TraceSet;

use super::{build_actor, ProjectionArgs, SourceArgs};

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &AppConfig,
    source: SourceArgs,
    projection: ProjectionArgs,
    length: Option<usize>,
    from_secs: f64,
    to_secs: Option<f64>,
    trails: Vec<String>,
    trace_len: Option<usize>,
    realtime: bool,
) -> anyhow::Result<()> {
    let actor = build_actor(config, &source, &projection)?;
    let rate = config.playback.frame_rate();

    let traces = if trails.is_empty() {
        TraceSet::default()
    } else {
        actor
            .get_trace(trails.as_slice())
            .map_err(|e| anyhow::anyhow!("Trail lookup failed: {e}"))?
    };

    let (start, end) = match to_secs {
        Some(to_secs) => rate.window(from_secs, to_secs, actor.frame_count()),
        None => rate.span(from_secs, length.unwrap_or(config.playback.length)),
    };
    let playback = Playback::new(actor.coordinates(), end)
        .with_trails(&traces, trace_len.unwrap_or(config.playback.trace_len))
        .with_frame_rate(rate)
        .starting_at(start);

    let interval = config.playback.interval();
    let mut stdout = std::io::stdout().lock();
    let mut written = 0usize;
    for record in playback {
        serde_json::to_writer(&mut stdout, &record)?;
        stdout.write_all(b"\n")?;
        written += 1;
        if realtime {
            stdout.flush()?;
            std::thread::sleep(interval);
        }
    }

    tracing::info!(frames = written, "Streamed frames");
    Ok(())
}
