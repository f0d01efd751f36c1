use std::error::Error;
use std::io::{self, Write};

use clap::Args;
use countdown_core::{DurationSetting, Phase, TimerEngine};

use crate::config::CliConfig;

#[derive(Args)]
pub struct RunArgs {
    /// Duration as MM:SS
    pub duration: DurationSetting,
    /// Skip live rendering and print only the final state snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    if args.duration.is_zero() {
        println!("nothing to count down");
        return Ok(());
    }
    let config = CliConfig::load();
    let engine = TimerEngine::new();
    seed(&engine, args.duration);

    let mut remaining_rx = engine.subscribe_remaining();
    engine.start();
    let max_duration = engine.max_duration();
    remaining_rx.borrow_and_update();

    // Ctrl-C maps to stop(): cancel the countdown and emit the final zero.
    let stopper = engine.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.stop();
        }
    });

    let mut out = io::stdout();
    if !args.json {
        draw(&mut out, engine.remaining(), max_duration, &config)?;
    }
    while engine.phase() == Phase::Countdown {
        if remaining_rx.changed().await.is_err() {
            break;
        }
        let remaining = *remaining_rx.borrow_and_update();
        if !args.json {
            draw(&mut out, remaining, max_duration, &config)?;
        }
    }
    if !args.json {
        writeln!(out)?;
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

/// The engine's edit surface is button-shaped; seed it the way a user
/// would, one press at a time.
fn seed(engine: &TimerEngine, setting: DurationSetting) {
    for _ in 0..setting.minutes() {
        engine.increment_minutes();
    }
    for _ in 0..setting.seconds() {
        engine.increment_seconds();
    }
}

fn draw(out: &mut impl Write, remaining: u64, max_duration: u64, config: &CliConfig) -> io::Result<()> {
    write!(out, "\r{}", format_line(remaining, max_duration, config))?;
    out.flush()
}

/// MM:SS readout plus an elapsed-fraction progress bar.
fn format_line(remaining: u64, max_duration: u64, config: &CliConfig) -> String {
    let minutes = remaining / 60;
    let seconds = remaining % 60;
    if !config.show_bar || config.bar_width == 0 || max_duration == 0 {
        return format!("{minutes:02}:{seconds:02}");
    }
    let elapsed = max_duration.saturating_sub(remaining);
    let filled = (config.bar_width as u64 * elapsed / max_duration) as usize;
    format!(
        "{minutes:02}:{seconds:02} [{}{}]",
        "#".repeat(filled),
        "-".repeat(config.bar_width - filled)
    )
}
