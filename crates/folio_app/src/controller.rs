//! Ambient interaction handlers
//!
//! [`UiController`] owns the page's interaction state and reacts to the
//! theme toggle, the mobile menu, pointer movement and call-to-action hover.

use folio_animation::{Completion, SharedEngine, Tween};
use folio_core::{ElementId, Point, SharedDocument, SharedStore};

use crate::config::{CursorConfig, HoverConfig, SiteConfig, ThemeConfig};
use crate::loader::LoadingComplete;
use crate::theme::{Theme, ThemePreference};

pub(crate) const THEME_TOGGLE: &str = "#themeToggle";
pub(crate) const MENU_TOGGLE: &str = "#menuToggle";
const MOBILE_MENU: &str = "#mobileMenu";
const CURSOR: &str = ".cursor";
const CURSOR_FOLLOWER: &str = ".cursor-follower";
pub(crate) const CTA: &str = ".cta-button";

const THEME_ATTRIBUTE: &str = "data-theme";
const ACTIVE: &str = "active";

/// Interaction state of one page
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub theme: Theme,
    pub menu_open: bool,
    pub cursor_enabled: bool,
    pub hover_enabled: bool,
    pub pointer: Option<Point>,
}

pub struct UiController {
    document: SharedDocument,
    engine: SharedEngine,
    preference: ThemePreference,
    theme: ThemeConfig,
    cursor: CursorConfig,
    hover: HoverConfig,
    state: UiState,
}

impl UiController {
    /// Apply the stored theme and decide whether cursor effects run
    pub fn new(
        document: SharedDocument,
        engine: SharedEngine,
        store: SharedStore,
        config: &SiteConfig,
    ) -> Self {
        let preference = ThemePreference::new(
            store,
            config.theme.storage_key.clone(),
            config.theme.default,
        );
        let theme = preference.load();
        if let Some(body) = document.body() {
            document.set_attribute(body, THEME_ATTRIBUTE, theme.as_str());
        }

        let viewport = document.viewport();
        let cursor_enabled = viewport.width > config.cursor.min_viewport_width;
        tracing::debug!(
            "ui initialised: theme {theme}, cursor effects {}",
            if cursor_enabled { "on" } else { "off" }
        );

        Self {
            document,
            engine,
            preference,
            theme: config.theme.clone(),
            cursor: config.cursor.clone(),
            hover: config.hover.clone(),
            state: UiState {
                theme,
                cursor_enabled,
                ..UiState::default()
            },
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Flip the theme, persist it and pulse the toggle button
    pub fn toggle_theme(&mut self) -> Completion {
        let current = self
            .document
            .body()
            .and_then(|body| self.document.attribute(body, THEME_ATTRIBUTE))
            .and_then(|value| value.parse::<Theme>().ok())
            .unwrap_or(self.state.theme);
        let next = current.toggled();

        if let Some(body) = self.document.body() {
            self.document.set_attribute(body, THEME_ATTRIBUTE, next.as_str());
        }
        if let Err(err) = self.preference.save(next) {
            tracing::warn!("failed to persist theme {next}: {err}");
        }
        self.state.theme = next;
        tracing::debug!("theme toggled to {next}");

        self.engine.animate(
            Tween::to(THEME_TOGGLE)
                .scale(self.theme.pulse_scale)
                .duration(self.theme.pulse_duration)
                .repeat(1)
                .yoyo(true)
                .ease(self.theme.pulse_ease),
        )
    }

    /// Open or close the mobile menu; returns whether it is now open
    pub fn toggle_menu(&mut self) -> bool {
        if let Some(toggle) = self.document.query_selector(MENU_TOGGLE) {
            self.document.toggle_class(toggle, ACTIVE);
        }
        let open = match self.document.query_selector(MOBILE_MENU) {
            Some(menu) => self.document.toggle_class(menu, ACTIVE),
            None => !self.state.menu_open,
        };

        if let Some(body) = self.document.body() {
            if open {
                self.document.set_style(body, "overflow", "hidden");
            } else {
                self.document.remove_style(body, "overflow");
            }
        }
        self.state.menu_open = open;
        tracing::debug!("mobile menu {}", if open { "opened" } else { "closed" });
        open
    }

    /// Move the custom cursor and its follower toward the pointer
    pub fn pointer_moved(&mut self, position: Point) {
        self.state.pointer = Some(position);
        if !self.state.cursor_enabled {
            return;
        }

        let follow = |selector: &str, offset: f32, duration: f32| {
            Tween::to(selector)
                .x(position.x - offset)
                .y(position.y - offset)
                .duration(duration)
        };
        // Completions are not awaited; newer moves take over older ones
        drop(self.engine.animate(follow(
            CURSOR,
            self.cursor.cursor_offset,
            self.cursor.cursor_duration,
        )));
        drop(self.engine.animate(follow(
            CURSOR_FOLLOWER,
            self.cursor.follower_offset,
            self.cursor.follower_duration,
        )));
    }

    /// Start reacting to call-to-action hover
    pub fn enable_hover(&mut self, _loaded: &LoadingComplete) {
        self.state.hover_enabled = true;
    }

    pub fn pointer_entered(&mut self, element: ElementId) -> Option<Completion> {
        self.hover_to(element, self.hover.scale)
    }

    pub fn pointer_left(&mut self, element: ElementId) -> Option<Completion> {
        self.hover_to(element, 1.0)
    }

    fn hover_to(&self, element: ElementId, scale: f32) -> Option<Completion> {
        if !self.state.hover_enabled || !self.is(element, CTA) {
            return None;
        }
        Some(
            self.engine.animate(
                Tween::to(element)
                    .scale(scale)
                    .duration(self.hover.duration)
                    .ease(self.hover.ease),
            ),
        )
    }

    /// Whether `element` is the one `selector` picks out
    pub(crate) fn is(&self, element: ElementId, selector: &str) -> bool {
        self.document.query_selector(selector) == Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::AnimationScheduler;
    use folio_core::{
        Document, ElementSpec, KeyValueStore, MemoryDocument, MemoryStore, Property, PropertyValue,
        Size, StoreError,
    };
    use std::sync::Arc;
    use std::time::Duration;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage disabled",
            )))
        }
    }

    struct Fixture {
        doc: Arc<MemoryDocument>,
        scheduler: AnimationScheduler,
        controller: UiController,
    }

    fn fixture(width: f32, store: SharedStore) -> Fixture {
        let doc = MemoryDocument::new_shared(Size::new(width, 800.0));
        let root = doc.root();
        for spec in [
            ElementSpec::new("button").id("themeToggle"),
            ElementSpec::new("button").id("menuToggle"),
            ElementSpec::new("div").id("mobileMenu"),
            ElementSpec::new("div").class("cursor"),
            ElementSpec::new("div").class("cursor-follower"),
            ElementSpec::new("a").class("cta-button"),
        ] {
            doc.append(root, spec);
        }
        let scheduler = AnimationScheduler::new(doc.clone());
        let controller = UiController::new(
            doc.clone(),
            Arc::new(scheduler.clone()),
            store,
            &SiteConfig::default(),
        );
        Fixture {
            doc,
            scheduler,
            controller,
        }
    }

    fn body_theme(doc: &MemoryDocument) -> Option<String> {
        doc.attribute(doc.root(), THEME_ATTRIBUTE)
    }

    #[test]
    fn test_absent_theme_starts_dark() {
        let f = fixture(1280.0, Arc::new(MemoryStore::new()));
        assert_eq!(body_theme(&f.doc).as_deref(), Some("dark"));
        assert_eq!(f.controller.state().theme, Theme::Dark);
    }

    #[test]
    fn test_stored_theme_is_applied() {
        let f = fixture(1280.0, Arc::new(MemoryStore::with_entries([("theme", "light")])));
        assert_eq!(body_theme(&f.doc).as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_once_then_twice() {
        let store = Arc::new(MemoryStore::new());
        let mut f = fixture(1280.0, store.clone());

        let _pulse = f.controller.toggle_theme();
        assert_eq!(body_theme(&f.doc).as_deref(), Some("light"));
        assert_eq!(store.get("theme").as_deref(), Some("light"));

        let _pulse = f.controller.toggle_theme();
        assert_eq!(body_theme(&f.doc).as_deref(), Some("dark"));
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_pulses_the_button() {
        let mut f = fixture(1280.0, Arc::new(MemoryStore::new()));
        let toggle = f.doc.query_selector(THEME_TOGGLE).unwrap();
        let _pulse = f.controller.toggle_theme();

        for _ in 0..30 {
            f.scheduler.tick(Duration::from_millis(10));
        }
        let squeezed = f.doc.property(toggle, Property::Scale).unwrap().magnitude();
        assert!(squeezed < 0.96);

        for _ in 0..40 {
            f.scheduler.tick(Duration::from_millis(10));
        }
        assert_eq!(f.doc.property(toggle, Property::Scale), Some(PropertyValue::Number(1.0)));
    }

    #[test]
    fn test_store_failure_still_toggles() {
        let mut f = fixture(1280.0, Arc::new(FailingStore));
        let _pulse = f.controller.toggle_theme();
        assert_eq!(body_theme(&f.doc).as_deref(), Some("light"));
        assert_eq!(f.controller.state().theme, Theme::Light);
    }

    #[test]
    fn test_menu_toggle_locks_scrolling() {
        let mut f = fixture(1280.0, Arc::new(MemoryStore::new()));
        let menu = f.doc.query_selector(MOBILE_MENU).unwrap();
        let toggle = f.doc.query_selector(MENU_TOGGLE).unwrap();

        assert!(f.controller.toggle_menu());
        assert!(f.doc.has_class(menu, ACTIVE));
        assert!(f.doc.has_class(toggle, ACTIVE));
        assert_eq!(f.doc.style(f.doc.root(), "overflow").as_deref(), Some("hidden"));

        assert!(!f.controller.toggle_menu());
        assert!(!f.doc.has_class(menu, ACTIVE));
        assert_eq!(f.doc.style(f.doc.root(), "overflow"), None);
    }

    #[test]
    fn test_cursor_follows_pointer_on_wide_viewports() {
        let mut f = fixture(1280.0, Arc::new(MemoryStore::new()));
        let cursor = f.doc.query_selector(CURSOR).unwrap();
        let follower = f.doc.query_selector(CURSOR_FOLLOWER).unwrap();

        f.controller.pointer_moved(Point::new(300.0, 200.0));
        for _ in 0..25 {
            f.scheduler.tick(Duration::from_millis(10));
        }
        assert_eq!(f.doc.property(cursor, Property::X), Some(PropertyValue::Px(290.0)));
        assert_eq!(f.doc.property(cursor, Property::Y), Some(PropertyValue::Px(190.0)));
        assert_eq!(f.doc.property(follower, Property::X), Some(PropertyValue::Px(280.0)));
        assert_eq!(f.doc.property(follower, Property::Y), Some(PropertyValue::Px(180.0)));
    }

    #[test]
    fn test_cursor_disabled_on_narrow_viewports() {
        let mut f = fixture(768.0, Arc::new(MemoryStore::new()));
        assert!(!f.controller.state().cursor_enabled);
        f.controller.pointer_moved(Point::new(300.0, 200.0));
        assert_eq!(f.scheduler.tween_count(), 0);
        assert_eq!(f.controller.state().pointer, Some(Point::new(300.0, 200.0)));
    }

    #[test]
    fn test_hover_ignored_until_enabled() {
        let mut f = fixture(1280.0, Arc::new(MemoryStore::new()));
        let cta = f.doc.query_selector(CTA).unwrap();
        assert!(f.controller.pointer_entered(cta).is_none());
        assert_eq!(f.scheduler.tween_count(), 0);
    }
}
