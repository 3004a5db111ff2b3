//! Page-ready orchestration
//!
//! Loading runs first and alone. Its token then unlocks the hover handlers,
//! the scroll triggers and the entrance timeline, registered in that order.

use std::sync::{Mutex, PoisonError};

use folio_animation::{Completion, SharedEngine, TriggerId};
use folio_core::SharedDocument;

use crate::config::SiteConfig;
use crate::controller::UiController;
use crate::entrance::play_entrance;
use crate::error::Result;
use crate::loader::{LoadingComplete, LoadingSequencer};
use crate::reveal::ScrollRegistrar;

/// What a finished startup leaves behind
#[derive(Debug)]
pub struct Startup {
    pub loaded: LoadingComplete,
    /// Resolves when the entrance timeline has played through
    pub entrance: Completion,
    pub triggers: Vec<TriggerId>,
}

pub struct Orchestrator {
    engine: SharedEngine,
    document: SharedDocument,
    config: SiteConfig,
    loader: LoadingSequencer,
}

impl Orchestrator {
    pub fn new(engine: SharedEngine, document: SharedDocument, config: SiteConfig) -> Self {
        let loader = LoadingSequencer::new(engine.clone(), document.clone(), config.loader.clone());
        Self {
            engine,
            document,
            config,
            loader,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run the loading sequence, then register everything that waits on it
    ///
    /// `controller` is only locked once loading has finished, so the host can
    /// keep dispatching to it meanwhile. Returns without waiting for the
    /// entrance timeline.
    pub async fn run(&self, controller: &Mutex<UiController>) -> Result<Startup> {
        let loaded = self.loader.run().await?;

        controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .enable_hover(&loaded);
        let registrar = ScrollRegistrar::new(
            self.engine.clone(),
            self.document.clone(),
            self.config.scroll.clone(),
            &loaded,
        );
        let triggers = registrar.register_site_triggers();
        let entrance = play_entrance(self.engine.as_ref(), &self.config.entrance, &loaded);

        tracing::info!(triggers = triggers.len(), "page ready");
        Ok(Startup {
            loaded,
            entrance,
            triggers,
        })
    }
}
