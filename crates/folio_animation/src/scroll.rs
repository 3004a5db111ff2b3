//! Scroll-linked triggers
//!
//! A trigger binds an element's passage through the viewport to a tween.
//! Its start and end are [`TriggerPoint`]s such as `"top 80%"`: the scroll
//! offset at which the element's top edge reaches 80% of the way down the
//! viewport. Between start and end the trigger is *active*.
//!
//! In toggle mode, each boundary crossing maps to one of four
//! [`ToggleActions`] (enter, leave, enter-back, leave-back). In scrub mode
//! the tween's playback position follows scroll progress between start and
//! end directly.
//!
//! ```rust
//! use folio_animation::{ScrollEvent, ScrollRange, ToggleAction, ToggleActions, TriggerPoint};
//! use folio_core::{Rect, Size};
//!
//! let start: TriggerPoint = "top 80%".parse().unwrap();
//! let bounds = Rect::new(0.0, 1000.0, 400.0, 300.0);
//! assert_eq!(start.scroll_offset(bounds, Size::new(1280.0, 800.0)), 360.0);
//!
//! let actions: ToggleActions = "play none none reverse".parse().unwrap();
//! assert_eq!(actions.action_for(ScrollEvent::LeaveBack), ToggleAction::Reverse);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use folio_core::{Rect, Size};

use crate::tween::Target;

/// Error for unparseable trigger syntax
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollSyntaxError {
    #[error("invalid trigger anchor `{0}`")]
    Anchor(String),
    #[error("invalid trigger point `{0}` (expected `<element> <viewport>`)")]
    Point(String),
    #[error("invalid toggle action `{0}`")]
    Action(String),
    #[error("invalid toggle actions `{0}` (expected four actions)")]
    Actions(String),
}

// ============================================================================
// Anchors and trigger points
// ============================================================================

/// A reference position along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    /// Fraction of the extent, in percent
    Percent(f32),
    /// Pixels from the top
    Px(f32),
}

impl Anchor {
    /// Distance from the top edge for an extent of `length`
    pub fn offset(self, length: f32) -> f32 {
        match self {
            Anchor::Top => 0.0,
            Anchor::Center => length * 0.5,
            Anchor::Bottom => length,
            Anchor::Percent(p) => length * p / 100.0,
            Anchor::Px(px) => px,
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrollSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ScrollSyntaxError::Anchor(s.to_string());
        match s {
            "top" => Ok(Anchor::Top),
            "center" => Ok(Anchor::Center),
            "bottom" => Ok(Anchor::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    p.parse().map(Anchor::Percent).map_err(|_| err())
                } else {
                    s.strip_suffix("px")
                        .unwrap_or(s)
                        .parse()
                        .map(Anchor::Px)
                        .map_err(|_| err())
                }
            }
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Top => f.write_str("top"),
            Anchor::Center => f.write_str("center"),
            Anchor::Bottom => f.write_str("bottom"),
            Anchor::Percent(p) => write!(f, "{p}%"),
            Anchor::Px(px) => write!(f, "{px}px"),
        }
    }
}

/// "When `element` anchor meets `viewport` anchor"
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerPoint {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPoint {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the two anchors line up
    pub fn scroll_offset(&self, bounds: Rect, viewport: Size) -> f32 {
        bounds.top() + self.element.offset(bounds.height) - self.viewport.offset(viewport.height)
    }
}

impl FromStr for TriggerPoint {
    type Err = ScrollSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Self {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(ScrollSyntaxError::Point(s.to_string())),
        }
    }
}

impl fmt::Display for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

impl TryFrom<String> for TriggerPoint {
    type Error = ScrollSyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerPoint> for String {
    fn from(point: TriggerPoint) -> Self {
        point.to_string()
    }
}

// ============================================================================
// Toggle actions
// ============================================================================

/// What a boundary crossing does to the bound tween
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    /// Play forward from the current position
    Play,
    Pause,
    /// Continue in the last requested direction
    Resume,
    /// Play backward from the current position
    Reverse,
    /// Jump to the start and play forward
    Restart,
    /// Jump to the start and stop
    Reset,
    /// Jump to the end and stop
    Complete,
    #[default]
    None,
}

impl FromStr for ToggleAction {
    type Err = ScrollSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return Err(ScrollSyntaxError::Action(s.to_string())),
        })
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToggleAction::Play => "play",
            ToggleAction::Pause => "pause",
            ToggleAction::Resume => "resume",
            ToggleAction::Reverse => "reverse",
            ToggleAction::Restart => "restart",
            ToggleAction::Reset => "reset",
            ToggleAction::Complete => "complete",
            ToggleAction::None => "none",
        })
    }
}

/// A crossing of a trigger boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEvent {
    /// Crossed start while scrolling down
    Enter,
    /// Crossed end while scrolling down
    Leave,
    /// Crossed end while scrolling up
    EnterBack,
    /// Crossed start while scrolling up
    LeaveBack,
}

/// Actions for enter, leave, enter-back and leave-back, in that order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    /// `play none none none`
    fn default() -> Self {
        Self::play_once()
    }
}

impl ToggleActions {
    /// `play none none none`: reveal once and stay revealed
    pub const fn play_once() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }

    /// `play none none reverse`: reveal on the way down, undo on the way up
    pub const fn play_reverse() -> Self {
        Self {
            on_leave_back: ToggleAction::Reverse,
            ..Self::play_once()
        }
    }

    pub fn action_for(&self, event: ScrollEvent) -> ToggleAction {
        match event {
            ScrollEvent::Enter => self.on_enter,
            ScrollEvent::Leave => self.on_leave,
            ScrollEvent::EnterBack => self.on_enter_back,
            ScrollEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ScrollSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<ToggleAction>, _>>()?;
        match actions[..] {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter,
                on_leave,
                on_enter_back,
                on_leave_back,
            }),
            _ => Err(ScrollSyntaxError::Actions(s.to_string())),
        }
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.on_enter, self.on_leave, self.on_enter_back, self.on_leave_back
        )
    }
}

// ============================================================================
// Trigger definition
// ============================================================================

/// How a trigger drives its tween
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollMode {
    /// Discrete actions on boundary crossings
    Toggle(ToggleActions),
    /// Playback position follows scroll progress between start and end
    Scrub,
}

/// Definition of a scroll-linked trigger
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger {
    /// Element whose position defines start and end
    pub trigger: Target,
    pub start: TriggerPoint,
    pub end: TriggerPoint,
    pub mode: ScrollMode,
}

impl ScrollTrigger {
    /// Toggle trigger from `top bottom` to `bottom top` playing once on enter
    pub fn new(trigger: impl Into<Target>) -> Self {
        Self {
            trigger: trigger.into(),
            start: TriggerPoint::new(Anchor::Top, Anchor::Bottom),
            end: TriggerPoint::new(Anchor::Bottom, Anchor::Top),
            mode: ScrollMode::Toggle(ToggleActions::default()),
        }
    }

    /// One-shot reveal at `start`, undone on the way back up when
    /// `reverse_on_leave` is set
    pub fn reveal(trigger: impl Into<Target>, start: TriggerPoint, reverse_on_leave: bool) -> Self {
        let actions = if reverse_on_leave {
            ToggleActions::play_reverse()
        } else {
            ToggleActions::play_once()
        };
        Self::new(trigger).start(start).toggle_actions(actions)
    }

    pub fn start(mut self, start: TriggerPoint) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: TriggerPoint) -> Self {
        self.end = end;
        self
    }

    pub fn toggle_actions(mut self, actions: ToggleActions) -> Self {
        self.mode = ScrollMode::Toggle(actions);
        self
    }

    pub fn scrub(mut self) -> Self {
        self.mode = ScrollMode::Scrub;
        self
    }

    /// Scroll offsets of start and end for the given layout
    pub fn range(&self, bounds: Rect, viewport: Size) -> ScrollRange {
        ScrollRange::new(
            self.start.scroll_offset(bounds, viewport),
            self.end.scroll_offset(bounds, viewport),
        )
    }
}

// ============================================================================
// Resolved ranges
// ============================================================================

/// Where a scroll offset lies relative to a trigger's range
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    Before,
    Active,
    After,
}

/// A trigger's start and end resolved to scroll offsets
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    /// An end before the start collapses onto the start
    pub fn new(start: f32, end: f32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn region(&self, scroll: f32) -> Region {
        if scroll < self.start {
            Region::Before
        } else if scroll > self.end {
            Region::After
        } else {
            Region::Active
        }
    }

    /// Linear progress through the range, clamped to 0.0..=1.0
    pub fn progress(&self, scroll: f32) -> f32 {
        let length = self.end - self.start;
        if length <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / length).clamp(0.0, 1.0)
    }

    /// Boundary crossings when moving from region `from` to region `to`
    ///
    /// A jump across the whole range reports both crossings in travel order.
    pub fn crossings(from: Region, to: Region) -> SmallVec<[ScrollEvent; 2]> {
        use Region::*;
        use ScrollEvent::*;
        match (from, to) {
            (Before, Active) => SmallVec::from_slice(&[Enter]),
            (Before, After) => SmallVec::from_slice(&[Enter, Leave]),
            (Active, After) => SmallVec::from_slice(&[Leave]),
            (After, Active) => SmallVec::from_slice(&[EnterBack]),
            (After, Before) => SmallVec::from_slice(&[EnterBack, LeaveBack]),
            (Active, Before) => SmallVec::from_slice(&[LeaveBack]),
            _ => SmallVec::new(),
        }
    }
}
