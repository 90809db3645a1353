//! Config mapping, core assembly, and the tick scheduler loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use blinds_config::{Config, PersistedState};
use blinds_core::{ButtonKind, CoverBuilder, CoverRequest, PressMode};
use blinds_traits::{Clock, MonotonicClock, StateSink};
use eyre::{Result, WrapErr};

use crate::cli::{Args, Command};

/// Scheduler cadence for the engine tick loop.
const TICK_PERIOD: Duration = Duration::from_millis(20);

/// Publishes estimates into the log stream.
struct LogSink;

impl StateSink for LogSink {
    fn publish(&mut self, position: f32, tilt: f32) {
        tracing::info!(position, tilt, "cover state");
    }
}

pub fn run(args: &Args, cfg: &Config) -> Result<()> {
    let restored = PersistedState::load(&args.state_file)?;
    if let Some(state) = restored {
        tracing::info!(
            position = state.position,
            tilt = state.tilt,
            "restored persisted state"
        );
    }

    let mut builder = CoverBuilder::new()
        .with_actuator(blinds_hardware::SimulatedActuator::new())
        .with_state_sink(LogSink)
        .with_drive((&cfg.drive).into())
        .with_buttons((&cfg.buttons).into());
    if let Some(state) = restored {
        builder = builder.with_restored_state(state.position, state.tilt);
    }
    let mut cover = builder.try_build().wrap_err("building cover core")?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))
            .wrap_err("installing Ctrl-C handler")?;
    }

    match &args.command {
        Command::Move { position, tilt } => {
            let mut request = CoverRequest::new();
            if let Some(p) = position {
                request = request.with_position(*p);
            }
            if let Some(t) = tilt {
                request = request.with_tilt(*t);
            }
            cover.apply(request);
        }
        Command::Stop => cover.request_stop(),
        Command::Button { kind, press } => {
            cover.on_button(ButtonKind::from(*kind), PressMode::from(*press));
        }
        Command::Calibrate => cover.start_calibration(),
    }

    let clock = MonotonicClock::new();
    while !cover.is_settled() {
        if shutdown.swap(false, Ordering::SeqCst) {
            tracing::info!("interrupted, stopping");
            cover.request_stop();
            break;
        }
        cover.tick();
        clock.sleep(TICK_PERIOD);
    }

    let snapshot = cover.snapshot();
    PersistedState {
        position: snapshot.position,
        tilt: snapshot.tilt,
    }
    .save(&args.state_file)
    .wrap_err("persisting state")?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "position": snapshot.position,
                "tilt": snapshot.tilt,
                "state": snapshot.state.as_str(),
                "assumed": cover.assumed_state(),
            })
        );
    } else {
        println!(
            "settled: position {:.3}, tilt {:.3} ({})",
            snapshot.position, snapshot.tilt, snapshot.state
        );
    }
    Ok(())
}
