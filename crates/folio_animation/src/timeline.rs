//! Timeline composition
//!
//! A timeline places tweens on a shared clock. Each step's start is given
//! relative to the step before it:
//!
//! | Position | Syntax | Start |
//! |---|---|---|
//! | `Sequential` | (empty) | when the previous step ends |
//! | `Relative(d)` | `"+=d"` / `"-=d"` | `d` seconds after the previous step ends |
//! | `WithPrevious(d)` | `"<"` / `"<d"` | `d` seconds after the previous step starts |
//! | `Absolute(t)` | `"t"` | at `t` seconds |
//!
//! Steps never start before the step declared ahead of them, so declaration
//! order is always playback order even when steps overlap.
//!
//! ```rust
//! use folio_animation::{Position, Timeline, Tween};
//!
//! let mut timeline = Timeline::new();
//! let title = timeline.push(Tween::to(".hero-title").duration(1.2), Position::Sequential);
//! let subtitle = timeline.push(Tween::to(".hero-subtitle").duration(2.0), "-=0.5".parse().unwrap());
//! assert!((timeline.start_of(subtitle).unwrap() - 0.7).abs() < 1e-6);
//! assert_eq!(timeline.start_of(title), Some(0.0));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tween::Tween;

/// Where a step starts relative to the step before it
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    #[default]
    Sequential,
    Relative(f32),
    WithPrevious(f32),
    Absolute(f32),
}

/// Error for an unparseable position string
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid timeline position `{0}`")]
pub struct PositionParseError(pub String);

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PositionParseError(s.to_string());
        let s = s.trim();
        let number = |v: &str| v.trim().parse::<f32>().map_err(|_| err());

        if s.is_empty() {
            Ok(Position::Sequential)
        } else if let Some(rest) = s.strip_prefix("+=") {
            Ok(Position::Relative(number(rest)?))
        } else if let Some(rest) = s.strip_prefix("-=") {
            Ok(Position::Relative(-number(rest)?))
        } else if let Some(rest) = s.strip_prefix('<') {
            if rest.trim().is_empty() {
                Ok(Position::WithPrevious(0.0))
            } else {
                Ok(Position::WithPrevious(number(rest)?))
            }
        } else {
            Ok(Position::Absolute(number(s)?))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Position::Sequential => Ok(()),
            Position::Relative(d) if d < 0.0 => write!(f, "-={}", -d),
            Position::Relative(d) => write!(f, "+={d}"),
            Position::WithPrevious(d) if d == 0.0 => f.write_str("<"),
            Position::WithPrevious(d) => write!(f, "<{d}"),
            Position::Absolute(t) => write!(f, "{t}"),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = PositionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

/// Handle to a step within a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEntryId(usize);

impl TimelineEntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One step on a timeline
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEntry {
    pub tween: Tween,
    pub position: Position,
    /// Resolved start, seconds from the timeline's start
    pub start: f32,
}

impl TimelineEntry {
    pub fn end(&self) -> f32 {
        self.start + self.tween.nominal_duration()
    }
}

/// An ordered composition of tweens played as one unit
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    label: Option<String>,
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            entries: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("timeline")
    }

    /// Append a step and return its handle
    pub fn push(&mut self, tween: Tween, position: Position) -> TimelineEntryId {
        let (prev_start, prev_end) = self
            .entries
            .last()
            .map(|e| (e.start, e.end()))
            .unwrap_or((0.0, 0.0));

        let requested = match position {
            Position::Sequential => prev_end,
            Position::Relative(offset) => prev_end + offset,
            Position::WithPrevious(offset) => prev_start + offset,
            Position::Absolute(at) => at,
        };
        let start = requested.max(prev_start).max(0.0);

        self.entries.push(TimelineEntry {
            tween,
            position,
            start,
        });
        TimelineEntryId(self.entries.len() - 1)
    }

    /// Append a step after the previous one (builder pattern)
    pub fn then(mut self, tween: Tween) -> Self {
        self.push(tween, Position::Sequential);
        self
    }

    /// Append a step at `position` (builder pattern)
    pub fn then_at(mut self, tween: Tween, position: Position) -> Self {
        self.push(tween, position);
        self
    }

    pub fn start_of(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id.0).map(|e| e.start)
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TimelineEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End of the latest-finishing step
    pub fn duration(&self) -> f32 {
        self.entries.iter().map(TimelineEntry::end).fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(selector: &str, duration: f32) -> Tween {
        Tween::to(selector).duration(duration)
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!("-=0.5".parse::<Position>(), Ok(Position::Relative(-0.5)));
        assert_eq!("+=1".parse::<Position>(), Ok(Position::Relative(1.0)));
        assert_eq!("<".parse::<Position>(), Ok(Position::WithPrevious(0.0)));
        assert_eq!("<0.25".parse::<Position>(), Ok(Position::WithPrevious(0.25)));
        assert_eq!("2".parse::<Position>(), Ok(Position::Absolute(2.0)));
        assert_eq!("".parse::<Position>(), Ok(Position::Sequential));
        assert!("-=abc".parse::<Position>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for p in ["-=0.5", "+=1", "<", "<0.25", "2", ""] {
            let parsed: Position = p.parse().unwrap();
            assert_eq!(parsed.to_string(), p);
        }
    }

    #[test]
    fn test_negative_offsets_overlap_but_keep_order() {
        let timeline = Timeline::new()
            .then(step(".hero-title", 1.2))
            .then_at(step(".hero-subtitle", 2.0), Position::Relative(-0.5))
            .then_at(step(".hero-description", 0.8), Position::Relative(-0.4))
            .then_at(step(".cta-button", 0.8), Position::Relative(-0.3));

        let starts: Vec<f32> = timeline.entries().iter().map(|e| e.start).collect();
        let expected = [0.0, 0.7, 2.3, 2.8];
        for (s, e) in starts.iter().zip(expected) {
            assert!((s - e).abs() < 1e-5, "{starts:?}");
        }
        assert!((timeline.duration() - 3.6).abs() < 1e-5);

        // Each step starts before its predecessor has finished
        for pair in timeline.entries().windows(2) {
            let overlap = pair[0].end() - pair[1].start;
            assert!(overlap > 0.0);
        }
    }

    #[test]
    fn test_steps_never_start_before_predecessor() {
        let mut timeline = Timeline::new();
        timeline.push(step("a", 1.0), Position::Absolute(2.0));
        let b = timeline.push(step("b", 0.2), Position::Relative(-5.0));
        let c = timeline.push(step("c", 0.2), Position::Absolute(0.5));
        assert_eq!(timeline.start_of(b), Some(2.0));
        assert_eq!(timeline.start_of(c), Some(2.0));
    }

    #[test]
    fn test_with_previous() {
        let mut timeline = Timeline::new();
        timeline.push(step("nav", 1.0), Position::Sequential);
        let logo = timeline.push(step(".path-anim", 2.0), Position::WithPrevious(0.0));
        let title = timeline.push(step(".hero-title", 1.2), "<0.1".parse().unwrap());
        assert_eq!(timeline.start_of(logo), Some(0.0));
        assert!((timeline.start_of(title).unwrap() - 0.1).abs() < 1e-6);
        assert!((timeline.duration() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_delay_counts_toward_end() {
        let mut timeline = Timeline::new();
        timeline.push(step("a", 1.0).delay(0.5), Position::Sequential);
        let b = timeline.push(step("b", 1.0), Position::Sequential);
        assert_eq!(timeline.start_of(b), Some(1.5));
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = Timeline::labeled("entrance");
        assert!(timeline.is_empty());
        assert_eq!(timeline.duration(), 0.0);
        assert_eq!(timeline.label(), "entrance");
    }
}
