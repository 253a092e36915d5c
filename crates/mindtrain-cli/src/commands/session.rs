use std::time::Duration;

use clap::Subcommand;
use mindtrain_core::{
    Config, Event, InMemoryHistory, SessionController, SessionDriver, SessionRecord,
    SessionRecorder, ValidationError,
};
use tokio::time::{sleep_until, Instant};
use tracing::info;

use super::print_json_line;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Fast-forward a session without waiting on the clock
    Simulate {
        /// Seconds to deliver (default: the whole session)
        #[arg(long)]
        ticks: Option<u64>,
        /// Skip the completion pause after each exercise
        #[arg(long)]
        complete_exercises: bool,
    },
    /// Run a session in real time
    Run {
        /// Clock multiplier; 60 plays a minute per second
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
        /// End the session after this many session seconds
        #[arg(long)]
        max_secs: Option<u64>,
    },
}

pub fn run(action: SessionAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Simulate {
            ticks,
            complete_exercises,
        } => simulate(config, ticks, complete_exercises),
        SessionAction::Run { speed, max_secs } => {
            let period = scaled_period(config.tick_interval(), speed)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_realtime(config, period, max_secs))
        }
    }
}

fn simulate(
    config: &Config,
    ticks: Option<u64>,
    complete_exercises: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = SessionController::new(config.session_options());
    let ticks = ticks.unwrap_or(controller.total_secs());

    for event in controller.start()? {
        print_json_line(&event)?;
    }
    for _ in 0..ticks {
        if controller.is_finished() {
            break;
        }
        let mut pending = controller.tick();
        while !pending.is_empty() {
            let mut follow_up = Vec::new();
            for event in pending {
                print_json_line(&event)?;
                if complete_exercises && matches!(event, Event::ExerciseCompleted { .. }) {
                    follow_up.extend(controller.on_exercise_complete()?);
                }
            }
            pending = follow_up;
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}

fn scaled_period(base: Duration, speed: f64) -> Result<Duration, ValidationError> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "speed".into(),
            message: format!("must be a positive number, got {speed}"),
        });
    }
    Ok(base.div_f64(speed).max(Duration::from_millis(1)))
}

async fn run_realtime(
    config: &Config,
    period: Duration,
    max_secs: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = SessionController::new(config.session_options());
    let (mut driver, mut events) = SessionDriver::new(controller, period);
    // Half a period of slack so the last wanted tick lands before the cut.
    let deadline = max_secs.map(|secs| {
        Instant::now() + period.saturating_mul(u32::try_from(secs).unwrap_or(u32::MAX)) + period / 2
    });
    let cutoff = async {
        match deadline {
            Some(at) => sleep_until(at).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(cutoff);

    info!(period_ms = period.as_millis() as u64, "running session");
    driver.start()?;

    loop {
        tokio::select! {
            received = events.recv() => {
                let Some(event) = received else { break };
                emit(config, &event)?;
                if matches!(event, Event::SessionCompleted { .. }) {
                    break;
                }
            }
            _ = &mut cutoff => {
                if let Err(e) = driver.end() {
                    info!(%e, "session already over at cutoff");
                }
                while let Ok(event) = events.try_recv() {
                    emit(config, &event)?;
                }
                break;
            }
        }
    }

    let summary = driver
        .controller()
        .lock()
        .map_err(|_| "session state poisoned")?
        .summary();
    if let Some(record) = summary {
        report(record);
    }
    Ok(())
}

fn emit(config: &Config, event: &Event) -> Result<(), serde_json::Error> {
    print_json_line(event)?;
    if config.notifications.enabled {
        if let Some(toast) = event.toast() {
            eprintln!("{}: {}", toast.title, toast.description);
        }
    }
    Ok(())
}

fn report(record: SessionRecord) {
    let mut history = InMemoryHistory::new();
    let today = record.day();
    eprintln!(
        "session {}: {}% complete, {} exercises",
        record.outcome.as_str(),
        record.completion_pct,
        record.exercises_completed
    );
    history.record(record);
    eprintln!("current streak: {} day(s)", history.current_streak(today));
}
