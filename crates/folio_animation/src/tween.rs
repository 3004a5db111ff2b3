//! Tween registration records
//!
//! A [`Tween`] is the declarative description of one animation: what to
//! animate, toward (or from) which values, for how long and with which
//! easing. It is plain data; nothing happens until it is handed to an
//! [`AnimationEngine`](crate::AnimationEngine), which takes ownership.
//!
//! ```rust
//! use folio_animation::{Easing, Tween};
//!
//! let slide_in = Tween::to("nav")
//!     .y(0.0)
//!     .duration(1.0)
//!     .ease(Easing::power3_out());
//! assert_eq!(slide_in.nominal_duration(), 1.0);
//! ```

use indexmap::IndexMap;

use folio_core::{Document, ElementId, Property, PropertyValue};

use crate::easing::Easing;
use crate::motion_path::MotionPath;
use crate::stagger::Stagger;
use crate::text::TextReveal;

/// Default tween length in seconds
pub const DEFAULT_DURATION: f32 = 0.5;

/// Properties to animate, in declaration order
pub type PropertyMap = IndexMap<Property, PropertyValue>;

/// What a tween animates
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    /// Every element matching a selector at registration time
    Selector(String),
    /// One specific element
    Element(ElementId),
}

impl Target {
    /// Elements this target refers to right now
    pub fn resolve(&self, document: &dyn Document) -> Vec<ElementId> {
        match self {
            Target::Selector(selector) => document.query_selector_all(selector),
            Target::Element(id) => {
                // Probe the element so stale handles resolve to nothing
                if document.bounds(*id).is_some() {
                    vec![*id]
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Target::Selector(selector) => selector.clone(),
            Target::Element(id) => format!("{id:?}"),
        }
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Element(id)
    }
}

/// Whether the listed values are the destination or the origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TweenDirection {
    /// Animate from the current values to the listed ones
    #[default]
    To,
    /// Animate from the listed values to the current ones; the listed values
    /// are rendered as soon as the tween is registered
    From,
}

/// A declarative animation registration
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub targets: Target,
    pub properties: PropertyMap,
    /// Seconds per iteration
    pub duration: f32,
    pub easing: Easing,
    /// Seconds before the first iteration starts
    pub delay: f32,
    pub direction: TweenDirection,
    /// Extra iterations after the first
    pub repeat: u32,
    /// Alternate direction on every other iteration
    pub yoyo: bool,
    pub text: Option<TextReveal>,
    pub motion_path: Option<MotionPath>,
    pub stagger: Option<Stagger>,
    pub label: Option<String>,
}

impl Tween {
    fn new(targets: Target, direction: TweenDirection) -> Self {
        Self {
            targets,
            properties: PropertyMap::new(),
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            delay: 0.0,
            direction,
            repeat: 0,
            yoyo: false,
            text: None,
            motion_path: None,
            stagger: None,
            label: None,
        }
    }

    /// Animate `targets` toward the values set on the builder
    pub fn to(targets: impl Into<Target>) -> Self {
        Self::new(targets.into(), TweenDirection::To)
    }

    /// Animate `targets` from the values set on the builder back to their
    /// current values
    pub fn from_values(targets: impl Into<Target>) -> Self {
        Self::new(targets.into(), TweenDirection::From)
    }

    pub fn set(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(property, value.into());
        self
    }

    pub fn opacity(self, opacity: f32) -> Self {
        self.set(Property::Opacity, PropertyValue::Number(opacity))
    }

    pub fn x(self, px: f32) -> Self {
        self.set(Property::X, PropertyValue::Px(px))
    }

    pub fn y(self, px: f32) -> Self {
        self.set(Property::Y, PropertyValue::Px(px))
    }

    pub fn scale(self, scale: f32) -> Self {
        self.set(Property::Scale, PropertyValue::Number(scale))
    }

    pub fn rotation(self, degrees: f32) -> Self {
        self.set(Property::Rotation, PropertyValue::Deg(degrees))
    }

    pub fn blur(self, px: f32) -> Self {
        self.set(Property::Blur, PropertyValue::Px(px))
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn text(mut self, text: TextReveal) -> Self {
        self.text = Some(text);
        self
    }

    pub fn motion_path(mut self, path: MotionPath) -> Self {
        self.motion_path = Some(path);
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label for logs and events, falling back to the target
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.targets.describe())
    }

    /// Length of all iterations, excluding delays
    pub fn active_duration(&self) -> f32 {
        self.duration * (self.repeat as f32 + 1.0)
    }

    /// Delay plus all iterations, ignoring stagger
    pub fn nominal_duration(&self) -> f32 {
        self.delay + self.active_duration()
    }

    /// Delay plus all iterations for the last of `count` staggered targets
    pub fn total_duration(&self, count: usize) -> f32 {
        let stagger = self
            .stagger
            .map(|s| s.max_delay(count))
            .unwrap_or(0.0);
        self.nominal_duration() + stagger
    }

    /// Start delay of the target at `index` out of `count`
    pub fn delay_for_index(&self, index: usize, count: usize) -> f32 {
        self.delay
            + self
                .stagger
                .map(|s| s.delay_for_index(index, count))
                .unwrap_or(0.0)
    }
}
