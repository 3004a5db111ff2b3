//! Host-facing page
//!
//! Bundles the orchestrator and the interaction controller behind a single
//! event entry point.

use std::sync::{Mutex, MutexGuard, PoisonError};

use folio_animation::SharedEngine;
use folio_core::{ElementId, Point, SharedDocument, SharedStore};

use crate::config::SiteConfig;
use crate::controller::{UiController, UiState, MENU_TOGGLE, THEME_TOGGLE};
use crate::error::Result;
use crate::orchestrator::{Orchestrator, Startup};

/// Input forwarded by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageEvent {
    Click(ElementId),
    PointerMove(Point),
    PointerEnter(ElementId),
    PointerLeave(ElementId),
    /// New vertical scroll offset in pixels
    Scroll(f32),
}

/// A page and its interaction state
///
/// Every method takes `&self`, so events can be dispatched while
/// [`start`](Self::start) is still waiting on the loading sequence.
pub struct Page {
    engine: SharedEngine,
    orchestrator: Orchestrator,
    controller: Mutex<UiController>,
}

impl Page {
    pub fn new(
        document: SharedDocument,
        engine: SharedEngine,
        store: SharedStore,
        config: SiteConfig,
    ) -> Self {
        let controller = UiController::new(document.clone(), engine.clone(), store, &config);
        let orchestrator = Orchestrator::new(engine.clone(), document, config);
        Self {
            engine,
            orchestrator,
            controller: Mutex::new(controller),
        }
    }

    fn controller(&self) -> MutexGuard<'_, UiController> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the startup sequence; see [`Orchestrator::run`]
    pub async fn start(&self) -> Result<Startup> {
        self.orchestrator.run(&self.controller).await
    }

    pub fn dispatch(&self, event: PageEvent) {
        match event {
            PageEvent::Click(element) => {
                let mut controller = self.controller();
                if controller.is(element, THEME_TOGGLE) {
                    // The pulse runs on its own
                    drop(controller.toggle_theme());
                } else if controller.is(element, MENU_TOGGLE) {
                    controller.toggle_menu();
                }
            }
            PageEvent::PointerMove(position) => self.controller().pointer_moved(position),
            PageEvent::PointerEnter(element) => drop(self.controller().pointer_entered(element)),
            PageEvent::PointerLeave(element) => drop(self.controller().pointer_left(element)),
            PageEvent::Scroll(offset) => self.engine.set_scroll(offset),
        }
    }

    /// Snapshot of the interaction state
    pub fn state(&self) -> UiState {
        self.controller().state().clone()
    }

    pub fn config(&self) -> &SiteConfig {
        self.orchestrator.config()
    }
}
