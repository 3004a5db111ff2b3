//! Reference animation engine
//!
//! Plays tweens, timelines and scroll triggers against a [`Document`].
//! Nothing runs on its own: the host advances time with
//! [`AnimationScheduler::tick`] and feeds scroll offsets with
//! [`AnimationScheduler::set_scroll`], which makes playback fully
//! deterministic.
//!
//! - One-shot tweens (`animate`) are dropped once they finish.
//! - Timelines start each step when the timeline clock reaches its start.
//! - Trigger-bound tweens live as long as the scheduler and are played,
//!   reversed or scrubbed as the scroll offset moves.
//!
//! `to` tweens read their start values from the document the first time
//! they render. `from` tweens render their listed values as soon as they are
//! registered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tokio::sync::oneshot;

use folio_core::{Document, ElementId, Property, PropertyValue, SharedDocument};

use crate::engine::{AnimationEngine, Completion, TriggerId};
use crate::scroll::{Region, ScrollEvent, ScrollMode, ScrollRange, ScrollTrigger, ToggleAction};
use crate::timeline::Timeline;
use crate::tween::{Tween, TweenDirection};
use crate::values::Interpolate;

new_key_type! {
    /// Handle to a playing one-shot tween
    pub struct TweenId;
    /// Handle to a playing timeline
    pub struct TimelineId;
}

/// Something observable that happened during playback
#[derive(Clone, Debug, PartialEq)]
pub enum SchedulerEvent {
    TweenStarted {
        label: String,
        at: f32,
    },
    TweenCompleted {
        label: String,
        at: f32,
    },
    TimelineEntryStarted {
        timeline: String,
        entry: String,
        index: usize,
        /// Declared start within the timeline
        start: f32,
        at: f32,
    },
    TimelineCompleted {
        timeline: String,
        at: f32,
    },
    TriggerToggled {
        trigger: String,
        event: ScrollEvent,
        action: ToggleAction,
        scroll: f32,
    },
}

/// Read-only view of a registered trigger
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerSnapshot {
    pub label: String,
    pub element: ElementId,
    pub range: ScrollRange,
    pub region: Region,
    /// Start delay of the bound tween
    pub delay: f32,
    pub scrub: bool,
    /// Playhead of the bound tween, 0.0..=1.0
    pub progress: f32,
}

// ============================================================================
// Playback of a single tween
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Playback {
    Idle,
    Forward,
    Backward,
}

struct PropertyTrack {
    property: Property,
    from: PropertyValue,
    to: PropertyValue,
}

/// One resolved target of a tween
struct ElementTrack {
    element: ElementId,
    delay: f32,
    properties: SmallVec<[PropertyTrack; 4]>,
    /// Properties taken over by a later tween
    released: SmallVec<[Property; 2]>,
    original_text: Option<String>,
}

struct TweenPlayer {
    label: String,
    tween: Tween,
    tracks: Vec<ElementTrack>,
    total: f32,
    time: f32,
    playback: Playback,
    last_direction: Playback,
    captured: bool,
    at_end: bool,
}

impl TweenPlayer {
    fn new(tween: Tween, document: &dyn Document) -> Self {
        let elements = tween.targets.resolve(document);
        let count = elements.len();
        let tracks = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| ElementTrack {
                element,
                delay: tween.delay_for_index(index, count),
                properties: SmallVec::new(),
                released: SmallVec::new(),
                original_text: None,
            })
            .collect();

        let mut player = Self {
            label: tween.display_label(),
            total: tween.total_duration(count),
            tween,
            tracks,
            time: 0.0,
            playback: Playback::Idle,
            last_direction: Playback::Forward,
            captured: false,
            at_end: false,
        };
        if player.tween.direction == TweenDirection::From {
            player.render(document);
        }
        player
    }

    fn has_targets(&self) -> bool {
        !self.tracks.is_empty()
    }

    fn progress(&self) -> f32 {
        if self.total <= 0.0 {
            if self.at_end {
                1.0
            } else {
                0.0
            }
        } else {
            self.time / self.total
        }
    }

    fn capture(&mut self, document: &dyn Document) {
        let Self { tween, tracks, .. } = self;
        for track in tracks.iter_mut() {
            track.properties = tween
                .properties
                .iter()
                .filter(|(property, _)| !track.released.contains(*property))
                .map(|(&property, &listed)| {
                    let current = document
                        .property(track.element, property)
                        .unwrap_or_else(|| property.initial());
                    match tween.direction {
                        TweenDirection::To => PropertyTrack {
                            property,
                            from: current,
                            to: listed,
                        },
                        TweenDirection::From => PropertyTrack {
                            property,
                            from: listed,
                            to: current,
                        },
                    }
                })
                .collect();
            if tween.text.is_some() {
                track.original_text = document.text(track.element);
            }
        }
        self.captured = true;
    }

    /// Stop driving `property` on `element`
    fn release(&mut self, element: ElementId, property: Property) {
        for track in self.tracks.iter_mut().filter(|t| t.element == element) {
            track.properties.retain(|p| p.property != property);
            if !track.released.contains(&property) {
                track.released.push(property);
            }
        }
    }

    /// Eased progress of a target whose own clock reads `local`
    fn eased_progress(&self, local: f32) -> f32 {
        let duration = self.tween.duration;
        let raw = if duration <= 0.0 {
            if local > 0.0 || self.at_end {
                1.0
            } else {
                0.0
            }
        } else {
            let active = self.tween.active_duration();
            // A finished tween holds every target at its end
            let t = if self.at_end {
                active
            } else {
                local.clamp(0.0, active)
            };
            let (iteration, within) = if t >= active {
                (self.tween.repeat, 1.0)
            } else {
                let cycles = t / duration;
                let whole = cycles.floor();
                (whole as u32, cycles - whole)
            };
            if self.tween.yoyo && iteration % 2 == 1 {
                1.0 - within
            } else {
                within
            }
        };
        self.tween.easing.apply(raw)
    }

    fn render(&mut self, document: &dyn Document) {
        if !self.captured {
            self.capture(document);
        }
        for track in &self.tracks {
            let progress = self.eased_progress(self.time - track.delay);
            for p in &track.properties {
                document.set_property(track.element, p.property, p.from.lerp(&p.to, progress));
            }
            if let Some(path) = &self.tween.motion_path {
                let point = path.point_at(progress);
                document.set_property(track.element, Property::X, PropertyValue::Px(point.x));
                document.set_property(track.element, Property::Y, PropertyValue::Px(point.y));
                if path.auto_rotate {
                    let angle = path.angle_at(progress);
                    document.set_property(track.element, Property::Rotation, PropertyValue::Deg(angle));
                }
            }
            if let Some(reveal) = &self.tween.text {
                let original = track.original_text.as_deref().unwrap_or("");
                document.set_text(track.element, &reveal.render(original, progress));
            }
        }
    }

    /// Jump the playhead and render
    fn seek(&mut self, time: f32, document: &dyn Document) {
        self.time = time.clamp(0.0, self.total);
        self.at_end = self.time >= self.total;
        self.render(document);
    }

    fn play(&mut self, direction: Playback) {
        self.playback = direction;
        self.last_direction = direction;
    }

    /// Advance by `dt`; true when forward playback reached the end this step
    fn advance(&mut self, dt: f32, document: &dyn Document) -> bool {
        match self.playback {
            Playback::Idle => false,
            Playback::Forward => {
                self.time = (self.time + dt).min(self.total);
                self.at_end = self.time >= self.total;
                self.render(document);
                if self.at_end {
                    self.playback = Playback::Idle;
                }
                self.at_end
            }
            Playback::Backward => {
                self.at_end = false;
                self.time = (self.time - dt).max(0.0);
                self.render(document);
                if self.time <= 0.0 {
                    self.playback = Playback::Idle;
                }
                false
            }
        }
    }

    fn apply(&mut self, action: ToggleAction, document: &dyn Document) {
        match action {
            ToggleAction::Play => self.play(Playback::Forward),
            ToggleAction::Reverse => self.play(Playback::Backward),
            ToggleAction::Pause => self.playback = Playback::Idle,
            ToggleAction::Resume => self.playback = self.last_direction,
            ToggleAction::Restart => {
                self.seek(0.0, document);
                self.play(Playback::Forward);
            }
            ToggleAction::Reset => {
                self.seek(0.0, document);
                self.playback = Playback::Idle;
            }
            ToggleAction::Complete => {
                self.seek(self.total, document);
                self.playback = Playback::Idle;
            }
            ToggleAction::None => {}
        }
    }
}

// ============================================================================
// Registered animations
// ============================================================================

struct ActiveTween {
    player: TweenPlayer,
    completion: Option<oneshot::Sender<()>>,
}

struct TimelineStep {
    start: f32,
    started: bool,
    player: TweenPlayer,
}

struct ActiveTimeline {
    label: String,
    steps: Vec<TimelineStep>,
    time: f32,
    completion: Option<oneshot::Sender<()>>,
}

struct ActiveTrigger {
    label: String,
    definition: ScrollTrigger,
    element: ElementId,
    range: ScrollRange,
    region: Region,
    player: TweenPlayer,
}

impl ActiveTrigger {
    fn update(&mut self, scroll: f32, document: &dyn Document, events: &mut Vec<SchedulerEvent>) {
        let region = self.range.region(scroll);
        match self.definition.mode {
            ScrollMode::Scrub => {
                let target = self.range.progress(scroll) * self.player.total;
                self.player.seek(target, document);
            }
            ScrollMode::Toggle(actions) => {
                for event in ScrollRange::crossings(self.region, region) {
                    let action = actions.action_for(event);
                    tracing::debug!(
                        "trigger {}: {:?} at scroll {} -> {}",
                        self.label,
                        event,
                        scroll,
                        action
                    );
                    self.player.apply(action, document);
                    events.push(SchedulerEvent::TriggerToggled {
                        trigger: self.label.clone(),
                        event,
                        action,
                        scroll,
                    });
                }
            }
        }
        self.region = region;
    }

    fn snapshot(&self) -> TriggerSnapshot {
        TriggerSnapshot {
            label: self.label.clone(),
            element: self.element,
            range: self.range,
            region: self.region,
            delay: self.player.tween.delay,
            scrub: self.definition.mode == ScrollMode::Scrub,
            progress: self.player.progress(),
        }
    }
}

/// Internal state of the scheduler
struct SchedulerInner {
    document: SharedDocument,
    tweens: SlotMap<TweenId, ActiveTween>,
    timelines: SlotMap<TimelineId, ActiveTimeline>,
    triggers: SlotMap<TriggerId, ActiveTrigger>,
    scroll: f32,
    clock: f32,
    events: Vec<SchedulerEvent>,
}

impl SchedulerInner {
    fn animate(&mut self, tween: Tween) -> Completion {
        let player = TweenPlayer::new(tween, self.document.as_ref());
        if !player.has_targets() {
            tracing::debug!("skipping tween {}: no matching elements", player.label);
            return Completion::ready();
        }

        // A newer tween takes over the properties it animates
        for track in &player.tracks {
            for &property in player.tween.properties.keys() {
                for (_, active) in self.tweens.iter_mut() {
                    active.player.release(track.element, property);
                }
            }
        }

        tracing::debug!("tween {} registered ({}s)", player.label, player.total);
        self.events.push(SchedulerEvent::TweenStarted {
            label: player.label.clone(),
            at: self.clock,
        });

        let (tx, completion) = Completion::channel();
        let mut player = player;
        player.play(Playback::Forward);
        self.tweens.insert(ActiveTween {
            player,
            completion: Some(tx),
        });
        completion
    }

    fn play_timeline(&mut self, timeline: Timeline) -> Completion {
        if timeline.is_empty() {
            tracing::debug!("skipping empty timeline {}", timeline.label());
            return Completion::ready();
        }

        let label = timeline.label().to_string();
        let document = self.document.clone();
        let steps = timeline
            .into_entries()
            .into_iter()
            .map(|entry| {
                let player = TweenPlayer::new(entry.tween, document.as_ref());
                if !player.has_targets() {
                    tracing::debug!("timeline {label}: step {} has no matching elements", player.label);
                }
                TimelineStep {
                    start: entry.start,
                    started: false,
                    player,
                }
            })
            .collect();

        tracing::debug!("timeline {label} registered");
        let (tx, completion) = Completion::channel();
        self.timelines.insert(ActiveTimeline {
            label,
            steps,
            time: 0.0,
            completion: Some(tx),
        });
        completion
    }

    fn register_trigger(&mut self, definition: ScrollTrigger, tween: Tween) -> Option<TriggerId> {
        let document = self.document.clone();
        let Some(element) = definition.trigger.resolve(document.as_ref()).first().copied() else {
            tracing::debug!(
                "skipping trigger: no element matches {}",
                definition.trigger.describe()
            );
            return None;
        };

        let player = TweenPlayer::new(tween, document.as_ref());
        if !player.has_targets() {
            tracing::debug!("skipping trigger for {}: no matching elements", player.label);
            return None;
        }

        let bounds = document.bounds(element).unwrap_or_default();
        let range = definition.range(bounds, document.viewport());
        let mut trigger = ActiveTrigger {
            label: player.label.clone(),
            definition,
            element,
            range,
            region: Region::Before,
            player,
        };
        tracing::debug!(
            "trigger {} registered ({}..{})",
            trigger.label,
            range.start,
            range.end
        );

        trigger.update(self.scroll, document.as_ref(), &mut self.events);
        Some(self.triggers.insert(trigger))
    }

    fn set_scroll(&mut self, offset: f32) {
        self.scroll = offset;
        let document = self.document.clone();
        for (_, trigger) in self.triggers.iter_mut() {
            trigger.update(offset, document.as_ref(), &mut self.events);
        }
    }

    fn refresh(&mut self) {
        let document = self.document.clone();
        let viewport = document.viewport();
        for (_, trigger) in self.triggers.iter_mut() {
            if let Some(bounds) = document.bounds(trigger.element) {
                trigger.range = trigger.definition.range(bounds, viewport);
            }
        }
        self.set_scroll(self.scroll);
    }

    fn tick(&mut self, dt: f32) -> bool {
        self.clock += dt;
        let clock = self.clock;
        let document = self.document.clone();
        let doc = document.as_ref();

        let mut finished = Vec::new();
        for (id, active) in self.tweens.iter_mut() {
            if active.player.advance(dt, doc) {
                finished.push(id);
            }
        }
        for id in finished {
            if let Some(mut active) = self.tweens.remove(id) {
                tracing::debug!("tween {} completed", active.player.label);
                self.events.push(SchedulerEvent::TweenCompleted {
                    label: active.player.label,
                    at: clock,
                });
                if let Some(tx) = active.completion.take() {
                    let _ = tx.send(());
                }
            }
        }

        let mut finished = Vec::new();
        for (id, timeline) in self.timelines.iter_mut() {
            timeline.time += dt;
            for (index, step) in timeline.steps.iter_mut().enumerate() {
                if !step.started && timeline.time >= step.start {
                    step.started = true;
                    step.player.play(Playback::Forward);
                    self.events.push(SchedulerEvent::TimelineEntryStarted {
                        timeline: timeline.label.clone(),
                        entry: step.player.label.clone(),
                        index,
                        start: step.start,
                        at: clock,
                    });
                }
                if step.started {
                    step.player.seek(timeline.time - step.start, doc);
                }
            }
            let done = timeline
                .steps
                .iter()
                .all(|s| s.started && s.player.time >= s.player.total);
            if done {
                finished.push(id);
            }
        }
        for id in finished {
            if let Some(mut timeline) = self.timelines.remove(id) {
                tracing::debug!("timeline {} completed", timeline.label);
                self.events.push(SchedulerEvent::TimelineCompleted {
                    timeline: timeline.label,
                    at: clock,
                });
                if let Some(tx) = timeline.completion.take() {
                    let _ = tx.send(());
                }
            }
        }

        for (_, trigger) in self.triggers.iter_mut() {
            if trigger.player.advance(dt, doc) {
                self.events.push(SchedulerEvent::TweenCompleted {
                    label: trigger.label.clone(),
                    at: clock,
                });
            }
        }

        self.has_active()
    }

    fn has_active(&self) -> bool {
        !self.tweens.is_empty()
            || !self.timelines.is_empty()
            || self
                .triggers
                .values()
                .any(|t| t.player.playback != Playback::Idle)
    }
}

// ============================================================================
// Public scheduler
// ============================================================================

/// The reference engine
///
/// Cloning yields another owner of the same scheduler. Hand out a
/// [`SchedulerHandle`] to code that must not keep the scheduler alive.
///
/// ```rust
/// use std::time::Duration;
/// use folio_animation::{AnimationEngine, AnimationScheduler, Tween};
/// use folio_core::{Document, ElementSpec, MemoryDocument, Property, PropertyValue, Size};
///
/// let doc = MemoryDocument::new_shared(Size::new(1280.0, 800.0));
/// let nav = doc.append(doc.root(), ElementSpec::new("nav").property(Property::Y, PropertyValue::Px(-100.0)));
/// let scheduler = AnimationScheduler::new(doc.clone());
///
/// let _done = scheduler.animate(Tween::to("nav").y(0.0).duration(1.0));
/// while scheduler.tick(Duration::from_millis(100)) {}
/// assert_eq!(doc.property(nav, Property::Y), Some(PropertyValue::Px(0.0)));
/// ```
#[derive(Clone)]
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                document,
                tweens: SlotMap::with_key(),
                timelines: SlotMap::with_key(),
                triggers: SlotMap::with_key(),
                scroll: 0.0,
                clock: 0.0,
                events: Vec::new(),
            })),
        }
    }

    /// Get a weak handle for registering animations
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn document(&self) -> SharedDocument {
        self.lock().document.clone()
    }

    /// Advance all animations by `dt`
    ///
    /// Returns true while anything is still playing.
    pub fn tick(&self, dt: Duration) -> bool {
        self.lock().tick(dt.as_secs_f32())
    }

    pub fn has_active_animations(&self) -> bool {
        self.lock().has_active()
    }

    pub fn scroll(&self) -> f32 {
        self.lock().scroll
    }

    /// Recompute trigger ranges after a layout change
    pub fn refresh(&self) {
        self.lock().refresh();
    }

    /// Seconds of playback since creation
    pub fn clock(&self) -> f32 {
        self.lock().clock
    }

    /// Drain the events recorded since the last call
    pub fn take_events(&self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.lock().events)
    }

    /// Number of one-shot tweens still playing
    pub fn tween_count(&self) -> usize {
        self.lock().tweens.len()
    }

    pub fn timeline_count(&self) -> usize {
        self.lock().timelines.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.lock().triggers.len()
    }

    pub fn trigger(&self, id: TriggerId) -> Option<TriggerSnapshot> {
        self.lock().triggers.get(id).map(ActiveTrigger::snapshot)
    }

    /// All triggers in registration order
    pub fn triggers(&self) -> Vec<(TriggerId, TriggerSnapshot)> {
        self.lock()
            .triggers
            .iter()
            .map(|(id, t)| (id, t.snapshot()))
            .collect()
    }
}

impl AnimationEngine for AnimationScheduler {
    fn animate(&self, tween: Tween) -> Completion {
        self.lock().animate(tween)
    }

    fn play_timeline(&self, timeline: Timeline) -> Completion {
        self.lock().play_timeline(timeline)
    }

    fn register_scroll_trigger(&self, trigger: ScrollTrigger, tween: Tween) -> Option<TriggerId> {
        self.lock().register_trigger(trigger, tween)
    }

    fn set_scroll(&self, offset: f32) {
        self.lock().set_scroll(offset);
    }
}

/// A weak handle to the scheduler
///
/// Registrations made after the scheduler is dropped resolve with
/// [`EngineClosed`](crate::EngineClosed).
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    fn with<R>(&self, f: impl FnOnce(&mut SchedulerInner) -> R) -> Option<R> {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl AnimationEngine for SchedulerHandle {
    fn animate(&self, tween: Tween) -> Completion {
        self.with(|inner| inner.animate(tween))
            .unwrap_or_else(Completion::closed)
    }

    fn play_timeline(&self, timeline: Timeline) -> Completion {
        self.with(|inner| inner.play_timeline(timeline))
            .unwrap_or_else(Completion::closed)
    }

    fn register_scroll_trigger(&self, trigger: ScrollTrigger, tween: Tween) -> Option<TriggerId> {
        self.with(|inner| inner.register_trigger(trigger, tween))
            .flatten()
    }

    fn set_scroll(&self, offset: f32) {
        self.with(|inner| inner.set_scroll(offset));
    }
}
