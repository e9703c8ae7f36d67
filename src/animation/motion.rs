//! Step-based glide between two points
//!
//! A [`MotionPlan`] is computed once per run: total distance, distance per
//! tick, the number of ticks and the (constant) heading. The
//! [`MovingMarkerAnimator`] then walks the plan one tick at a time.
//!
//! Tick `n` of `total_steps` places the marker at `start + delta * n / total`.
//! Because every tick covers the same distance in the same time, the step
//! fraction and the elapsed-time fraction are the same number.

use crate::{
    core::{config::AnimationConfig, geo::LatLng},
    traits::Lerp,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Fixed quantities of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionPlan {
    pub start: LatLng,
    pub end: LatLng,
    /// Metres between start and end
    pub total_distance: f64,
    /// Metres covered per tick
    pub step_distance: f64,
    pub total_steps: u64,
    /// Displacement from start to end, in degrees
    pub direction: LatLng,
    /// `atan2(Δlng, Δlat)` in degrees
    pub heading_deg: f64,
    /// Heading plus the configured glyph offset
    pub rotation_deg: f64,
}

impl MotionPlan {
    /// Validates `config` and derives the plan.
    ///
    /// Identical start and end points give `total_steps == 0`. A speed so
    /// low that the step count cannot be represented is refused.
    pub fn new(config: &AnimationConfig) -> Result<Self> {
        config.validate()?;

        let total_distance = config.distance.distance(&config.start, &config.end);
        let step_distance = config.step_distance();
        let steps = (total_distance / step_distance).ceil();
        // Past 2^64 the cast would saturate and step arithmetic overflow
        if !steps.is_finite() || steps >= u64::MAX as f64 {
            return Err(MapError::InvalidConfig(format!(
                "{total_distance:.1} m at {step_distance:e} m per tick needs too many steps"
            )));
        }
        let total_steps = steps as u64;
        let heading_deg = config.start.heading_to(&config.end);

        Ok(Self {
            start: config.start,
            end: config.end,
            total_distance,
            step_distance,
            total_steps,
            direction: config.start.delta_to(&config.end),
            heading_deg,
            rotation_deg: heading_deg + config.heading_offset_deg,
        })
    }

    /// Sample for tick `step`; any step at or past the last one is the end point
    pub fn sample(&self, step: u64) -> MotionSample {
        if step >= self.total_steps {
            return MotionSample {
                step: self.total_steps,
                position: self.end,
                rotation_deg: self.rotation_deg,
                is_final: true,
            };
        }

        let progress = step as f64 / self.total_steps as f64;
        MotionSample {
            step,
            position: self.start.lerp(&self.end, progress),
            rotation_deg: self.rotation_deg,
            is_final: false,
        }
    }

    /// Samples a full run emits: one per step plus the final snap to `end`
    pub fn sample_count(&self) -> u64 {
        self.total_steps.saturating_add(1)
    }
}

/// One tick's output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub step: u64,
    pub position: LatLng,
    /// Icon rotation in degrees
    pub rotation_deg: f64,
    /// The snap to the end point; nothing follows it
    pub is_final: bool,
}

/// Progress of a run, as observed between ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    /// Next step to emit, never above `total_steps`
    pub step: u64,
    pub total_steps: u64,
    pub position: LatLng,
    pub rotation_deg: f64,
    pub finished: bool,
}

impl AnimationState {
    fn initial(plan: &MotionPlan) -> Self {
        Self {
            step: 0,
            total_steps: plan.total_steps,
            position: plan.start,
            rotation_deg: plan.rotation_deg,
            finished: false,
        }
    }

    /// Fraction of the run completed, 1.0 once finished
    pub fn progress(&self) -> f64 {
        if self.finished {
            1.0
        } else if self.total_steps == 0 {
            0.0
        } else {
            self.step as f64 / self.total_steps as f64
        }
    }
}

/// Walks a [`MotionPlan`] one tick at a time
#[derive(Debug, Clone)]
pub struct MovingMarkerAnimator {
    plan: MotionPlan,
    state: AnimationState,
}

impl MovingMarkerAnimator {
    pub fn new(config: AnimationConfig) -> Result<Self> {
        let plan = MotionPlan::new(&config)?;
        log::debug!(
            "Planned glide: {:.1} m in {} steps of {:.2} m, heading {:.2}°",
            plan.total_distance,
            plan.total_steps,
            plan.step_distance,
            plan.heading_deg
        );
        Ok(Self::from_plan(plan))
    }

    pub fn from_plan(plan: MotionPlan) -> Self {
        let state = AnimationState::initial(&plan);
        Self { plan, state }
    }

    /// Emits the next sample, or `None` once the end point has been emitted
    pub fn tick(&mut self) -> Option<MotionSample> {
        if self.state.finished {
            return None;
        }

        let sample = self.plan.sample(self.state.step);
        self.state.position = sample.position;
        if sample.is_final {
            self.state.finished = true;
            log::debug!("Glide reached its end after {} steps", self.plan.total_steps);
        } else {
            self.state.step += 1;
        }
        log::trace!(
            "tick {} -> ({:.6}, {:.6})",
            sample.step,
            sample.position.lat,
            sample.position.lng
        );
        Some(sample)
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn plan(&self) -> &MotionPlan {
        &self.plan
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Rewinds to step 0
    pub fn reset(&mut self) {
        self.state = AnimationState::initial(&self.plan);
    }
}

impl Iterator for MovingMarkerAnimator {
    type Item = MotionSample;

    fn next(&mut self) -> Option<Self::Item> {
        self.tick()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.state.finished {
            0
        } else {
            let left = (self.plan.total_steps - self.state.step).saturating_add(1);
            usize::try_from(left).unwrap_or(usize::MAX)
        };
        (remaining, Some(remaining))
    }
}
