//! Folio Animation
//!
//! The vocabulary the page orchestration speaks to an animation engine, and a
//! reference engine that implements it.
//!
//! # Features
//!
//! - **Tweens**: Declarative registration records (`to` and `from` tweens)
//! - **Easing**: Named easing curves parsed from identifiers like `power3.out`
//! - **Timelines**: Ordered steps with relative positions (`-=0.5`, `<`)
//! - **Stagger**: Per-index delays across a collection of targets
//! - **Text Reveal**: Character-by-character text substitution
//! - **Motion Paths**: Smooth curves through a list of points
//! - **Scroll Triggers**: Toggle actions on boundary crossings, and scrubbing
//! - **AnimationScheduler**: A deterministic, manually ticked engine
//!
//! Completion of a tween or timeline is reported through a [`Completion`]
//! future, so sequencing is written with `.await` instead of callbacks.

pub mod easing;
pub mod engine;
pub mod motion_path;
pub mod scheduler;
pub mod scroll;
pub mod stagger;
pub mod text;
pub mod timeline;
pub mod tween;
pub mod values;

pub use easing::{EaseMode, Easing, EasingParseError};
pub use engine::{AnimationEngine, Completion, EngineClosed, SharedEngine, TriggerId};
pub use motion_path::MotionPath;
pub use scheduler::{AnimationScheduler, SchedulerEvent, SchedulerHandle, TriggerSnapshot};
pub use scroll::{
    Anchor, Region, ScrollEvent, ScrollMode, ScrollRange, ScrollSyntaxError, ScrollTrigger,
    ToggleAction, ToggleActions, TriggerPoint,
};
pub use stagger::{Stagger, StaggerFrom};
pub use text::{TextDelimiter, TextReveal};
pub use timeline::{Position, PositionParseError, Timeline, TimelineEntry, TimelineEntryId};
pub use tween::{PropertyMap, Target, Tween, TweenDirection};
pub use values::Interpolate;
