//! Loading overlay sequence
//!
//! The overlay fades its label in, fills the progress bar and fades itself
//! out, strictly one step after another. Finishing yields the
//! [`LoadingComplete`] token every later registration asks for.

use std::sync::atomic::{AtomicBool, Ordering};

use folio_animation::{SharedEngine, Tween};
use folio_core::{Property, PropertyValue, SharedDocument};

use crate::config::LoaderConfig;
use crate::error::{AppError, Result};

const LABEL: &str = ".loading-text";
const PROGRESS: &str = ".loader-progress";
const OVERLAY: &str = ".loader";

/// Proof that the loading sequence has finished
///
/// Only [`LoadingSequencer::run`] creates one, at most once per sequencer.
#[derive(Debug)]
pub struct LoadingComplete {
    _private: (),
}

/// Runs the loading overlay sequence once
pub struct LoadingSequencer {
    engine: SharedEngine,
    document: SharedDocument,
    config: LoaderConfig,
    started: AtomicBool,
}

impl LoadingSequencer {
    pub fn new(engine: SharedEngine, document: SharedDocument, config: LoaderConfig) -> Self {
        Self {
            engine,
            document,
            config,
            started: AtomicBool::new(false),
        }
    }

    /// The three steps, in playback order
    pub fn steps(&self) -> [Tween; 3] {
        [
            Tween::to(LABEL)
                .opacity(1.0)
                .duration(self.config.label_duration)
                .ease(self.config.label_ease),
            Tween::to(PROGRESS)
                .set(Property::Width, PropertyValue::Percent(100.0))
                .duration(self.config.progress_duration)
                .ease(self.config.progress_ease),
            Tween::to(OVERLAY)
                .opacity(0.0)
                .duration(self.config.overlay_duration)
                .ease(self.config.overlay_ease),
        ]
    }

    /// Play the sequence and hide the overlay
    ///
    /// A second call fails with [`AppError::AlreadyLoaded`].
    pub async fn run(&self) -> Result<LoadingComplete> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(AppError::AlreadyLoaded);
        }

        tracing::info!("loading sequence started");
        for step in self.steps() {
            self.engine.animate(step).await?;
        }

        if let Some(overlay) = self.document.query_selector(OVERLAY) {
            self.document.set_style(overlay, "display", "none");
        }
        tracing::info!("loading sequence complete");
        Ok(LoadingComplete { _private: () })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::{AnimationScheduler, SchedulerEvent};
    use folio_core::{Document, ElementSpec, MemoryDocument, Size};
    use std::sync::Arc;
    use std::time::Duration;

    fn loader_page() -> (Arc<MemoryDocument>, AnimationScheduler) {
        let doc = MemoryDocument::new_shared(Size::new(1280.0, 800.0));
        let overlay = doc.append(doc.root(), ElementSpec::new("div").class("loader"));
        doc.append(overlay, ElementSpec::new("p").class("loading-text").property(Property::Opacity, 0.0));
        doc.append(
            overlay,
            ElementSpec::new("div")
                .class("loader-progress")
                .property(Property::Width, PropertyValue::Percent(0.0)),
        );
        let scheduler = AnimationScheduler::new(doc.clone());
        (doc, scheduler)
    }

    #[tokio::test]
    async fn test_steps_run_in_strict_sequence() {
        let (doc, scheduler) = loader_page();
        let sequencer = LoadingSequencer::new(Arc::new(scheduler.clone()), doc.clone(), LoaderConfig::default());
        let task = tokio::spawn(async move { sequencer.run().await.map(|_| ()) });

        while !task.is_finished() {
            scheduler.tick(Duration::from_millis(10));
            tokio::task::yield_now().await;
        }
        task.await.unwrap().unwrap();

        let completed: Vec<String> = scheduler
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                SchedulerEvent::TweenCompleted { label, .. } => Some(label),
                _ => None,
            })
            .collect();
        assert_eq!(completed, vec![LABEL, PROGRESS, OVERLAY]);

        let overlay = doc.query_selector(OVERLAY).unwrap();
        assert_eq!(doc.style(overlay, "display").as_deref(), Some("none"));
        assert_eq!(doc.property(overlay, Property::Opacity), Some(PropertyValue::Number(0.0)));
        // Strictly sequential: 0.7 + 2.0 + 0.7 seconds
        assert!(scheduler.clock() > 3.39);
    }

    #[tokio::test]
    async fn test_second_run_is_rejected() {
        let doc = MemoryDocument::new_shared(Size::new(1280.0, 800.0));
        let scheduler = AnimationScheduler::new(doc.clone());
        let sequencer = LoadingSequencer::new(Arc::new(scheduler), doc, LoaderConfig::default());

        // Without loader elements every step completes at once
        assert!(sequencer.run().await.is_ok());
        assert!(matches!(sequencer.run().await, Err(AppError::AlreadyLoaded)));
    }

    #[tokio::test]
    async fn test_engine_shutdown_surfaces_as_error() {
        let (doc, scheduler) = loader_page();
        let sequencer = LoadingSequencer::new(Arc::new(scheduler.handle()), doc, LoaderConfig::default());
        drop(scheduler);
        assert!(matches!(sequencer.run().await, Err(AppError::Engine(_))));
    }
}
