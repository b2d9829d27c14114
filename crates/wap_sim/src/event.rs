//! Simulation events
//!
//! Systems communicate through typed events collected in an [`EventQueue`]
//! during a step and drained by whoever consumes them.

use crate::body::BodyId;
use glam::IVec2;
use std::sync::Arc;
use wap_core::CollisionGrid;

/// A body touched down after falling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingEvent {
    pub body: BodyId,
    /// Downward speed at impact, in px/s
    pub impact_speed: f32,
}

/// A level became active
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLoadedEvent {
    pub name: String,
    /// Player start position in world pixels
    pub start: IVec2,
    pub grid: Arc<CollisionGrid>,
}

/// Every event the simulation emits
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Landed(LandingEvent),
    LevelLoaded(LevelLoadedEvent),
}

impl SimEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::Landed(_) => "Landed",
            SimEvent::LevelLoaded(_) => "LevelLoaded",
        }
    }
}

/// A queue for events of a single type
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Take every event, oldest first, leaving the queue empty
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
