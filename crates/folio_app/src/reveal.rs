//! Scroll-linked reveals
//!
//! Each revealed element gets its own trigger, so sections animate
//! independently of each other and of the entrance timeline. Items of a
//! group share one template and are offset by `index * increment` seconds.

use folio_animation::{
    Easing, ScrollTrigger, SharedEngine, Target, TriggerId, TriggerPoint, Tween,
};
use folio_core::{ElementId, Property, PropertyValue, SharedDocument};

use crate::config::ScrollConfig;
use crate::loader::LoadingComplete;

/// Registers scroll triggers once loading has finished
pub struct ScrollRegistrar {
    engine: SharedEngine,
    document: SharedDocument,
    config: ScrollConfig,
}

impl ScrollRegistrar {
    pub fn new(
        engine: SharedEngine,
        document: SharedDocument,
        config: ScrollConfig,
        _loaded: &LoadingComplete,
    ) -> Self {
        Self {
            engine,
            document,
            config,
        }
    }

    /// Play `tween` when `target` reaches `start`, undoing it on the way
    /// back up when `reverse_on_leave` is set
    pub fn register_scroll_trigger(
        &self,
        target: impl Into<Target>,
        start: TriggerPoint,
        tween: Tween,
        reverse_on_leave: bool,
    ) -> Option<TriggerId> {
        let trigger = ScrollTrigger::reveal(target, start, reverse_on_leave);
        let described = trigger.trigger.describe();
        let id = self.engine.register_scroll_trigger(trigger, tween);
        if id.is_none() {
            tracing::debug!("no scroll trigger for {described}");
        }
        id
    }

    /// Register every element matching `selector` on its own trigger
    ///
    /// `tween` is a template: each element becomes both the trigger and the
    /// sole target of its copy.
    pub fn register_group(
        &self,
        selector: &str,
        tween: &Tween,
        increment: f32,
        reverse_on_leave: bool,
    ) -> Vec<TriggerId> {
        let elements = self.document.query_selector_all(selector);
        self.register_each(&elements, tween, increment, reverse_on_leave)
    }

    /// Like [`register_group`](Self::register_group), restricted to
    /// descendants of `scope`
    pub fn register_group_within(
        &self,
        scope: ElementId,
        selector: &str,
        tween: &Tween,
        increment: f32,
        reverse_on_leave: bool,
    ) -> Vec<TriggerId> {
        let elements = self.document.query_selector_within(scope, selector);
        self.register_each(&elements, tween, increment, reverse_on_leave)
    }

    fn register_each(
        &self,
        elements: &[ElementId],
        template: &Tween,
        increment: f32,
        reverse_on_leave: bool,
    ) -> Vec<TriggerId> {
        elements
            .iter()
            .enumerate()
            .filter_map(|(index, &element)| {
                let tween = Tween {
                    targets: Target::Element(element),
                    delay: index as f32 * increment,
                    ..template.clone()
                };
                self.register_scroll_trigger(element, self.config.start, tween, reverse_on_leave)
            })
            .collect()
    }

    /// Drive `tween` directly from scroll progress between `start` and `end`
    /// of `trigger`
    pub fn register_parallax(
        &self,
        target: impl Into<Target>,
        trigger: impl Into<Target>,
        start: TriggerPoint,
        end: TriggerPoint,
        tween: Tween,
    ) -> Option<TriggerId> {
        let tween = Tween {
            targets: target.into(),
            ..tween
        };
        let trigger = ScrollTrigger::new(trigger).start(start).end(end).scrub();
        self.engine.register_scroll_trigger(trigger, tween)
    }

    /// Wire up every scroll effect of the portfolio page
    pub fn register_site_triggers(&self) -> Vec<TriggerId> {
        let config = &self.config;
        let reverse = config.reverse_on_leave;
        let mut ids = Vec::new();

        let fade_up = |selector: &str, y: f32| {
            Tween::from_values(selector)
                .opacity(0.0)
                .y(y)
                .duration(config.reveal_duration)
                .ease(config.reveal_ease)
        };

        let title = fade_up("h3", 20.0);
        let item = Tween::from_values(".gallery-item")
            .opacity(0.0)
            .scale(0.9)
            .duration(config.reveal_duration)
            .ease(config.reveal_ease);
        for category in self.document.query_selector_all(".gallery-category") {
            if let Some(&heading) = self.document.query_selector_within(category, "h3").first() {
                ids.extend(self.register_each(&[heading], &title, 0.0, reverse));
            }
            ids.extend(self.register_group_within(
                category,
                ".gallery-item",
                &item,
                config.stagger,
                reverse,
            ));
        }

        ids.extend(self.register_parallax(
            ".hero-image",
            ".hero",
            config.parallax_start,
            config.parallax_end,
            Tween::to(".hero-image")
                .set(Property::Y, PropertyValue::Percent(config.parallax_shift))
                .ease(Easing::Linear),
        ));

        ids.extend(self.register_scroll_trigger(
            ".about",
            config.start,
            Tween::from_values(".about-image")
                .opacity(0.0)
                .scale(0.8)
                .rotation(10.0)
                .x(-50.0)
                .duration(config.about_image_duration)
                .ease(config.reveal_ease),
            reverse,
        ));

        ids.extend(self.register_group(
            ".about-text p",
            &fade_up(".about-text p", 20.0),
            config.stagger,
            reverse,
        ));
        ids.extend(self.register_group(
            ".achievement-tab",
            &fade_up(".achievement-tab", 30.0),
            config.stagger,
            reverse,
        ));

        tracing::info!("registered {} scroll triggers", ids.len());
        ids
    }
}
