//! Time-parameterised movement paths
//!
//! A pattern is a polyline traversed at constant speed: each segment gets a
//! share of the total duration proportional to its length. Patterns are built
//! once per level load and shared read-only between enemies.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TIME_EPSILON;

/// How a pattern continues after reaching its last authored vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    /// 1 > 2 > 3, then stop
    Once,
    /// 1 > 2 > 3 > 1 > ...
    Circular,
    /// 1 > 2 > 3 > 2 > 1 > ...
    PingPong,
}

impl TryFrom<u8> for LoopMode {
    type Error = PatternError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(LoopMode::Once),
            2 => Ok(LoopMode::Circular),
            3 => Ok(LoopMode::PingPong),
            other => Err(PatternError::UnknownLoopMode(other)),
        }
    }
}

/// Reasons a pattern cannot be built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("a path needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
    #[error("point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),
    #[error("unknown loop mode code {0} (expected 1, 2 or 3)")]
    UnknownLoopMode(u8),
}

/// An immutable, fully built movement path
#[derive(Debug, Clone, PartialEq)]
pub struct PathPattern {
    loop_mode: LoopMode,
    duration: f32,
    /// Vertices after loop-mode expansion
    points: Vec<Vec2>,
    /// Start time of each segment; `segment_start[0] == 0`
    segment_start: Vec<f32>,
    segment_duration: Vec<f32>,
    length: f32,
}

impl PathPattern {
    /// Build a pattern from authored vertices
    ///
    /// `raw_points` are expanded according to `loop_mode` before timing is
    /// computed, so a circular pattern returns to its first vertex and a
    /// ping-pong pattern retraces its steps within the same `duration`.
    pub fn new(loop_mode: LoopMode, raw_points: &[Vec2], duration: f32) -> Result<Self, PatternError> {
        if raw_points.len() < 2 {
            return Err(PatternError::TooFewPoints(raw_points.len()));
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(PatternError::InvalidDuration(duration));
        }
        if let Some(i) = raw_points.iter().position(|p| !p.is_finite()) {
            return Err(PatternError::NonFinitePoint(i));
        }

        let points = expand(loop_mode, raw_points);
        let lengths: Vec<f32> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        let length: f32 = lengths.iter().sum();
        let segments = lengths.len();

        // Cumulative share of the path covered before each segment
        let mut segment_start = Vec::with_capacity(segments);
        let mut covered = 0.0_f32;
        for (i, seg_len) in lengths.iter().enumerate() {
            let share = if length > 0.0 {
                covered / length
            } else {
                // All vertices coincide; split time evenly
                i as f32 / segments as f32
            };
            segment_start.push(share * duration);
            covered += seg_len;
        }

        let segment_duration = (0..segments)
            .map(|i| {
                let end = segment_start.get(i + 1).copied().unwrap_or(duration);
                (end - segment_start[i]).max(0.0)
            })
            .collect();

        Ok(Self {
            loop_mode,
            duration,
            points,
            segment_start,
            segment_duration,
            length,
        })
    }

    /// Convenience constructor from the level file representation
    pub fn from_axes(
        loop_mode: LoopMode,
        xs: &[f32],
        ys: &[f32],
        duration: f32,
    ) -> Result<Self, PatternError> {
        let points: Vec<Vec2> = xs.iter().zip(ys).map(|(&x, &y)| Vec2::new(x, y)).collect();
        Self::new(loop_mode, &points, duration)
    }

    #[inline]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Vertices after loop-mode expansion
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn segment_starts(&self) -> &[f32] {
        &self.segment_start
    }

    #[inline]
    pub fn segment_durations(&self) -> &[f32] {
        &self.segment_duration
    }

    /// Total path length (one full traversal)
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Traversal speed in units per second
    pub fn speed(&self) -> f32 {
        self.length / self.duration
    }

    /// Offset from the path origin after `elapsed` seconds
    ///
    /// Returns `None` once a `Once` pattern has run past its duration; looping
    /// patterns always return a position.
    pub fn sample(&self, elapsed: f32) -> Option<Vec2> {
        let last = *self.points.last()?;
        if self.loop_mode == LoopMode::Once {
            if elapsed > self.duration {
                return None;
            }
            if elapsed == self.duration {
                return Some(last);
            }
        }
        if self.duration <= 0.0 || !elapsed.is_finite() {
            return Some(self.points[0]);
        }

        let t = elapsed.rem_euclid(self.duration);
        let i = self.segment_at(t);
        let seg_duration = self.segment_duration[i];
        let progress = if seg_duration > TIME_EPSILON {
            ((t - self.segment_start[i]) / seg_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Some(self.points[i].lerp(self.points[i + 1], progress))
    }

    /// Index of the last segment starting at or before `t`
    fn segment_at(&self, t: f32) -> usize {
        self.segment_start
            .partition_point(|&start| start <= t)
            .saturating_sub(1)
            .min(self.segment_start.len() - 1)
    }
}

/// Apply loop-mode expansion to authored vertices
fn expand(loop_mode: LoopMode, raw: &[Vec2]) -> Vec<Vec2> {
    match loop_mode {
        LoopMode::Once => raw.to_vec(),
        LoopMode::Circular => {
            let mut points = Vec::with_capacity(raw.len() + 1);
            points.extend_from_slice(raw);
            points.push(raw[0]);
            points
        }
        LoopMode::PingPong => {
            let mut points = Vec::with_capacity(raw.len() * 2 - 1);
            points.extend_from_slice(raw);
            points.extend(raw[..raw.len() - 1].iter().rev());
            points
        }
    }
}
