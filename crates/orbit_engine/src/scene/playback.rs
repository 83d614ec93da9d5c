//! # Animation Playback Control
//!
//! Tracks which scene objects are currently playing their keyframe sequences
//! and drives them forward each frame. Playback is a two-state machine per
//! object: `Idle` objects ignore frame time, `Playing` objects advance until
//! their sequence reports a completed cycle and then drop back to `Idle`.

use std::collections::BTreeMap;

use crate::scene::animation::AnimationStatus;
use crate::scene::graph::SceneGraph;
use crate::scene::object::SceneObjectId;

/// Per-object playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Drives keyframe playback for a set of scene objects
///
/// Objects are opted in with [`trigger`]; each [`tick_all`] advances every
/// playing object by the frame delta and retires those whose cycle finished.
/// Triggering an already playing object is a no-op, so a held key or repeated
/// event cannot restart or speed up a running sequence.
///
/// [`trigger`]: AnimationPlayback::trigger
/// [`tick_all`]: AnimationPlayback::tick_all
#[derive(Debug, Default)]
pub struct AnimationPlayback {
    states: BTreeMap<SceneObjectId, PlaybackState>,
}

impl AnimationPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playback for `id` if it is not already playing
    pub fn trigger(&mut self, id: SceneObjectId) {
        let state = self.states.entry(id).or_default();
        if *state == PlaybackState::Idle {
            log::debug!("starting animation playback for {id}");
            *state = PlaybackState::Playing;
        }
    }

    /// Current playback state for `id` (`Idle` if never triggered)
    pub fn state(&self, id: SceneObjectId) -> PlaybackState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn is_playing(&self, id: SceneObjectId) -> bool {
        self.state(id) == PlaybackState::Playing
    }

    /// Advance every playing object by `delta_time` seconds
    ///
    /// Objects whose sequence completes a cycle this frame, or that have no
    /// playable sequence, return to `Idle`. Entries for objects no longer in
    /// the graph are discarded.
    pub fn tick_all(&mut self, graph: &mut SceneGraph, delta_time: f32) {
        let playing: Vec<SceneObjectId> = self
            .states
            .iter()
            .filter(|(_, state)| **state == PlaybackState::Playing)
            .map(|(id, _)| *id)
            .collect();

        for id in playing {
            match graph.tick(id, delta_time) {
                Ok(AnimationStatus::Playing) => {}
                Ok(AnimationStatus::CycleComplete) => {
                    log::debug!("animation cycle complete for {id}");
                    self.states.insert(id, PlaybackState::Idle);
                }
                Ok(AnimationStatus::Inert) => {
                    log::warn!("{id} has no playable animation sequence, returning to idle");
                    self.states.insert(id, PlaybackState::Idle);
                }
                Err(err) => {
                    log::warn!("dropping playback entry: {err}");
                    self.states.remove(&id);
                }
            }
        }
    }
}
