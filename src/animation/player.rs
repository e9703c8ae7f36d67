//! Timer-driven playback
//!
//! [`MotionPlayer`] owns one spawned task. The task applies a sample, sleeps
//! for one refresh interval, and repeats until the final sample has been
//! applied. Cancelling (or dropping the player) stops it: cancellation
//! never blocks, and no tick starts once it has been requested. A tick that
//! is already inside the sink on another worker thread still completes.

use crate::{
    animation::{
        motion::{AnimationState, MotionPlan, MovingMarkerAnimator},
        sink::{apply_sample, MarkerSink},
    },
    core::config::AnimationConfig,
    layers::icon::Icon,
    prelude::Arc,
    runtime::{self, AsyncHandle},
    Result,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

pub struct MotionPlayer {
    plan: MotionPlan,
    handle: Box<dyn AsyncHandle>,
    cancelled: Arc<AtomicBool>,
    state_rx: watch::Receiver<AnimationState>,
}

impl MotionPlayer {
    /// Validates `config` and starts ticking.
    ///
    /// The first sample is applied right away; later ones follow every
    /// `config.refresh_interval()`. The ticks sleep on Tokio's timer, so this
    /// must be called from within a Tokio runtime, and any spawner installed
    /// with [`runtime::init_runtime`] must run its tasks on one.
    pub fn start<S>(config: AnimationConfig, icon: Icon, mut sink: S) -> Result<Self>
    where
        S: MarkerSink + 'static,
    {
        let interval = config.refresh_interval();
        let mut animator = MovingMarkerAnimator::new(config).map_err(|err| {
            log::warn!("Refusing to start glide: {err}");
            err
        })?;
        let plan = animator.plan().clone();

        let (state_tx, state_rx) = watch::channel(*animator.state());
        let cancelled = Arc::new(AtomicBool::new(false));
        let task_cancelled = Arc::clone(&cancelled);

        let handle = runtime::spawn(async move {
            loop {
                if task_cancelled.load(Ordering::Acquire) {
                    break;
                }
                let Some(sample) = animator.tick() else {
                    break;
                };
                if let Err(err) = apply_sample(&mut sink, &sample, &icon) {
                    log::warn!("Stopping glide at step {}: {err}", sample.step);
                    break;
                }
                state_tx.send_replace(*animator.state());

                if sample.is_final || task_cancelled.load(Ordering::Acquire) {
                    break;
                }
                tokio::time::sleep(interval).await;
            }
            log::debug!("Glide task exiting at step {}", animator.state().step);
        })?;

        log::debug!(
            "Started glide: {} steps every {:?}",
            plan.total_steps,
            interval
        );

        Ok(Self {
            plan,
            handle,
            cancelled,
            state_rx,
        })
    }

    pub fn plan(&self) -> &MotionPlan {
        &self.plan
    }

    /// Latest published progress
    pub fn state(&self) -> AnimationState {
        *self.state_rx.borrow()
    }

    /// Whether the end point has been applied
    pub fn is_finished(&self) -> bool {
        self.state().finished
    }

    /// Whether the timer task is still alive
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Stops the timer without waiting on the task or the sink. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            log::debug!("Cancelling glide at step {}", self.state().step);
        }
        self.handle.cancel();
    }

    /// Resolves once the run has finished, been cancelled, or stopped on a
    /// sink error. Returns the last published state.
    pub async fn wait(&self) -> AnimationState {
        let mut rx = self.state_rx.clone();
        loop {
            let state = *rx.borrow_and_update();
            if state.finished || self.is_cancelled() {
                return state;
            }
            if rx.changed().await.is_err() {
                // Task is gone
                return *rx.borrow();
            }
        }
    }
}

impl Drop for MotionPlayer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for MotionPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionPlayer")
            .field("plan", &self.plan)
            .field("state", &self.state())
            .field("running", &self.is_running())
            .finish()
    }
}
