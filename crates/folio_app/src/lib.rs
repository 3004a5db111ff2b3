//! Folio Page Orchestration
//!
//! Sequences a portfolio page's animations against any [`AnimationEngine`]:
//! a loading overlay, then a one-shot entrance timeline and independent
//! scroll-linked reveals, plus the ambient handlers for theme, menu, cursor
//! and hover.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use folio_app::prelude::*;
//!
//! let document = demo_page(DemoLayout::default());
//! let scheduler = AnimationScheduler::new(document.clone());
//! let page = Page::new(
//!     document,
//!     Arc::new(scheduler.clone()),
//!     Arc::new(MemoryStore::new()),
//!     SiteConfig::default(),
//! );
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let startup = runtime.block_on(async {
//!     let task = page.start();
//!     tokio::pin!(task);
//!     loop {
//!         tokio::select! {
//!             biased;
//!             result = &mut task => break result,
//!             _ = tokio::task::yield_now() => {
//!                 scheduler.tick(Duration::from_millis(16));
//!             }
//!         }
//!     }
//! });
//! assert!(startup.is_ok());
//! ```
//!
//! [`AnimationEngine`]: folio_animation::AnimationEngine

pub mod config;
pub mod controller;
pub mod demo;
pub mod entrance;
pub mod error;
pub mod loader;
pub mod orchestrator;
pub mod page;
pub mod reveal;
pub mod theme;

#[cfg(test)]
mod tests;

pub use config::{
    CursorConfig, EntranceConfig, HoverConfig, LoaderConfig, ScrollConfig, SiteConfig, ThemeConfig,
};
pub use controller::{UiController, UiState};
pub use demo::{demo_page, max_scroll, DemoLayout};
pub use entrance::{build_entrance_timeline, play_entrance};
pub use error::{AppError, Result};
pub use loader::{LoadingComplete, LoadingSequencer};
pub use orchestrator::{Orchestrator, Startup};
pub use page::{Page, PageEvent};
pub use reveal::ScrollRegistrar;
pub use theme::{Theme, ThemePreference};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::SiteConfig;
    pub use crate::demo::{demo_page, DemoLayout};
    pub use crate::error::{AppError, Result};
    pub use crate::orchestrator::{Orchestrator, Startup};
    pub use crate::page::{Page, PageEvent};
    pub use crate::theme::Theme;

    // Engine types
    pub use folio_animation::{AnimationEngine, AnimationScheduler, Completion, SchedulerEvent};

    // Collaborators
    pub use folio_core::{Document, MemoryDocument, MemoryStore, Point, Size};
}
