//! Real-time tick source for a session.
//!
//! The driver owns exactly one tokio task that delivers `tick()` to a shared
//! controller on a fixed period. User commands lock the same mutex, so ticks
//! and commands never interleave inside a transition. The task is aborted by
//! `end()` and on drop; it also stops by itself once the session completes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use super::controller::SessionController;
use super::snapshot::SessionSnapshot;
use crate::error::TransitionError;
use crate::events::Event;

pub type SharedController = Arc<Mutex<SessionController>>;

pub struct SessionDriver {
    controller: SharedController,
    period: Duration,
    events: mpsc::UnboundedSender<Event>,
    ticker: Option<JoinHandle<()>>,
}

impl SessionDriver {
    /// Wrap `controller`; events arrive on the returned receiver.
    pub fn new(
        controller: SessionController,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = Self {
            controller: Arc::new(Mutex::new(controller)),
            period,
            events: tx,
            ticker: None,
        };
        (driver, rx)
    }

    pub fn controller(&self) -> SharedController {
        Arc::clone(&self.controller)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.controller).snapshot()
    }

    /// Whether the tick task is alive.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start the session and its tick task. Must run inside a tokio runtime.
    ///
    /// A rejected start spawns nothing, and a second task is never spawned.
    pub fn start(&mut self) -> Result<(), TransitionError> {
        let emitted = lock(&self.controller).start()?;
        self.publish(emitted);
        if self.ticker.is_none() && !lock(&self.controller).is_finished() {
            self.ticker = Some(spawn_ticker(
                self.controller(),
                self.period,
                self.events.clone(),
            ));
        }
        Ok(())
    }

    pub fn toggle_pause(&self) -> Result<(), TransitionError> {
        let event = lock(&self.controller).toggle_pause()?;
        self.publish(vec![event]);
        Ok(())
    }

    pub fn on_exercise_complete(&self) -> Result<(), TransitionError> {
        let emitted = lock(&self.controller).on_exercise_complete()?;
        self.publish(emitted);
        Ok(())
    }

    /// Cancel the tick task, then end the session.
    pub fn end(&mut self) -> Result<(), TransitionError> {
        self.cancel_ticker();
        let event = lock(&self.controller).end()?;
        self.publish(vec![event]);
        Ok(())
    }

    fn publish(&self, emitted: Vec<Event>) {
        for event in emitted {
            // A dropped receiver only means nobody is listening.
            let _ = self.events.send(event);
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            debug!("session ticker cancelled");
        }
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn lock(controller: &SharedController) -> MutexGuard<'_, SessionController> {
    controller.lock().unwrap_or_else(PoisonError::into_inner)
}

fn spawn_ticker(
    controller: SharedController,
    period: Duration,
    events: mpsc::UnboundedSender<Event>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let (emitted, finished) = {
                let mut c = lock(&controller);
                let emitted = c.tick();
                (emitted, c.is_finished())
            };
            for event in emitted {
                let _ = events.send(event);
            }
            if finished {
                debug!("session finished, ticker exiting");
                break;
            }
        }
    })
}
