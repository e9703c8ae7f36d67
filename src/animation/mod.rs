pub mod motion;
pub mod sink;

#[cfg(feature = "tokio-runtime")]
pub mod player;

// Re-export commonly used types for convenience
pub use motion::{AnimationState, MotionPlan, MotionSample, MovingMarkerAnimator};
pub use sink::{apply_sample, ChannelSink, MarkerSink, MarkerUpdate};

#[cfg(feature = "tokio-runtime")]
pub use player::MotionPlayer;
