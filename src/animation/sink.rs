//! Where animation samples go
//!
//! The animator only ever asks two things of the marker it drives: move to
//! a position, and swap in a (rotated) icon. [`MarkerSink`] is that seam.

use crate::{
    animation::motion::MotionSample,
    core::geo::LatLng,
    layers::{icon::Icon, marker::Marker},
    MapError, Result,
};
use crossbeam_channel::Sender;
use std::sync::{Arc, Mutex};

pub trait MarkerSink: Send {
    fn set_lat_lng(&mut self, position: LatLng) -> Result<()>;

    fn set_icon(&mut self, icon: Icon) -> Result<()>;
}

/// Pushes one sample into a sink.
///
/// Moving samples update position and icon rotation; the final snap to the
/// end point only moves the marker.
pub fn apply_sample<S>(sink: &mut S, sample: &MotionSample, icon: &Icon) -> Result<()>
where
    S: MarkerSink + ?Sized,
{
    sink.set_lat_lng(sample.position)?;
    if !sample.is_final {
        sink.set_icon(icon.rotated(sample.rotation_deg))?;
    }
    Ok(())
}

impl MarkerSink for Marker {
    fn set_lat_lng(&mut self, position: LatLng) -> Result<()> {
        Marker::set_lat_lng(self, position);
        Ok(())
    }

    fn set_icon(&mut self, icon: Icon) -> Result<()> {
        Marker::set_icon(self, icon);
        Ok(())
    }
}

impl<S: MarkerSink> MarkerSink for Arc<Mutex<S>> {
    fn set_lat_lng(&mut self, position: LatLng) -> Result<()> {
        self.lock()
            .map_err(|_| MapError::Animation("marker lock poisoned".to_string()))?
            .set_lat_lng(position)
    }

    fn set_icon(&mut self, icon: Icon) -> Result<()> {
        self.lock()
            .map_err(|_| MapError::Animation("marker lock poisoned".to_string()))?
            .set_icon(icon)
    }
}

/// One change to a marker, as carried over a channel
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerUpdate {
    Position(LatLng),
    Icon(Icon),
}

impl MarkerUpdate {
    pub fn apply_to<S: MarkerSink + ?Sized>(self, sink: &mut S) -> Result<()> {
        match self {
            MarkerUpdate::Position(position) => sink.set_lat_lng(position),
            MarkerUpdate::Icon(icon) => sink.set_icon(icon),
        }
    }
}

/// Forwards updates to another thread, typically the UI thread that owns
/// the map. Fails once the receiving side is gone.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<MarkerUpdate>,
}

impl ChannelSink {
    pub fn new(tx: Sender<MarkerUpdate>) -> Self {
        Self { tx }
    }

    fn send(&self, update: MarkerUpdate) -> Result<()> {
        self.tx
            .send(update)
            .map_err(|_| MapError::Animation("marker update receiver dropped".to_string()))
    }
}

impl MarkerSink for ChannelSink {
    fn set_lat_lng(&mut self, position: LatLng) -> Result<()> {
        self.send(MarkerUpdate::Position(position))
    }

    fn set_icon(&mut self, icon: Icon) -> Result<()> {
        self.send(MarkerUpdate::Icon(icon))
    }
}
