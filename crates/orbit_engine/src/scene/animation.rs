//! Keyframe animation data
//!
//! An [`AnimationSequence`] is an ordered list of timestamped transform
//! samples. Interpolation and the per-tick state machine live on
//! [`Transform`](crate::scene::Transform); this module only owns the data
//! and the interval search.

use crate::foundation::math::Vec3;

/// A single timestamped transform sample used as an interpolation anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationKeyFrame {
    /// Target translation at this keyframe
    pub translation: Vec3,

    /// Target rotation (Euler angles, radians) at this keyframe
    pub rotation: Vec3,

    /// Target scale at this keyframe
    pub scale: Vec3,

    /// Seconds from sequence start; non-decreasing across a sequence
    pub timestamp: f32,
}

/// An ordered sequence of keyframes with a cycle duration
///
/// Sequences with fewer than two keyframes are inert: there is nothing to
/// interpolate between, and [`Transform::advance`](crate::scene::Transform::advance)
/// reports [`AnimationStatus::Inert`] for them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSequence {
    keyframes: Vec<AnimationKeyFrame>,
    duration: f32,
}

impl AnimationSequence {
    /// Create a sequence from keyframes and a cycle duration
    ///
    /// Malformed input is accepted but logged: out-of-order timestamps make
    /// some intervals unreachable, and keyframes past `duration` are never
    /// sampled because elapsed time wraps at `duration` first.
    pub fn new(keyframes: Vec<AnimationKeyFrame>, duration: f32) -> Self {
        for pair in keyframes.windows(2) {
            if pair[1].timestamp < pair[0].timestamp {
                log::warn!(
                    "animation keyframe timestamps not monotonic ({} after {})",
                    pair[1].timestamp,
                    pair[0].timestamp
                );
                break;
            }
        }
        if let Some(last) = keyframes.last() {
            if last.timestamp > duration {
                log::warn!(
                    "animation keyframe at t={} is beyond the {}s duration and unreachable",
                    last.timestamp,
                    duration
                );
            }
        }
        Self {
            keyframes,
            duration,
        }
    }

    /// The keyframes of this sequence, in timestamp order
    pub fn keyframes(&self) -> &[AnimationKeyFrame] {
        &self.keyframes
    }

    /// The cycle duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether this sequence has too few keyframes to interpolate
    pub fn is_inert(&self) -> bool {
        self.keyframes.len() < 2
    }

    /// Find the interval `[i, i + 1]` bracketing `elapsed` and the blend
    /// factor within it.
    ///
    /// The lower bound is inclusive and the upper bound exclusive, so a
    /// sample exactly on `keyframes[i + 1].timestamp` belongs to the next
    /// interval. Returns `None` when `elapsed` falls before the first or on
    /// or after the last keyframe's timestamp.
    pub(crate) fn find_interval(&self, elapsed: f32) -> Option<(usize, f32)> {
        for i in 0..self.keyframes.len().saturating_sub(1) {
            let start = self.keyframes[i].timestamp;
            let end = self.keyframes[i + 1].timestamp;
            if start <= elapsed && elapsed < end {
                let alpha = (elapsed - start) / (end - start);
                return Some((i, alpha));
            }
        }
        None
    }
}

/// Result of advancing an animated transform by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// The animation advanced and remains mid-cycle
    Playing,

    /// Elapsed time passed the sequence duration on this tick; the elapsed
    /// counter was reset to zero. Signaled exactly once per cycle.
    CycleComplete,

    /// No sequence, or fewer than two keyframes; nothing was interpolated
    Inert,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(timestamp: f32) -> AnimationKeyFrame {
        AnimationKeyFrame {
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            timestamp,
        }
    }

    #[test]
    fn test_interval_bounds_inclusive_exclusive() {
        let sequence = AnimationSequence::new(vec![frame(0.0), frame(2.0), frame(4.0)], 4.0);

        // Exactly on a boundary belongs to the interval starting there.
        assert_eq!(sequence.find_interval(0.0), Some((0, 0.0)));
        assert_eq!(sequence.find_interval(2.0), Some((1, 0.0)));

        let (index, alpha) = sequence.find_interval(1.0).unwrap();
        assert_eq!(index, 0);
        assert!((alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_no_interval_outside_keyframe_range() {
        let sequence = AnimationSequence::new(vec![frame(1.0), frame(2.0)], 4.0);
        assert_eq!(sequence.find_interval(0.5), None);
        assert_eq!(sequence.find_interval(2.0), None);
        assert_eq!(sequence.find_interval(3.0), None);
    }

    #[test]
    fn test_single_keyframe_is_inert() {
        let sequence = AnimationSequence::new(vec![frame(0.0)], 4.0);
        assert!(sequence.is_inert());
        assert_eq!(sequence.find_interval(0.0), None);
    }

    #[test]
    fn test_empty_sequence_is_inert() {
        let sequence = AnimationSequence::new(Vec::new(), 0.0);
        assert!(sequence.is_inert());
    }
}
