//! Headless page preview
//!
//! Builds the demo page, runs the startup sequence against the reference
//! engine and scrolls down and back up, printing every engine event with the
//! simulated time it happened at.

use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use folio_animation::{AnimationScheduler, SchedulerEvent};
use folio_app::{demo_page, max_scroll, DemoLayout, Page, PageEvent, SiteConfig};
use folio_core::{FileStore, MemoryStore, SharedStore};

/// Longest the preview waits for animations to settle
const SETTLE_LIMIT: f32 = 10.0;
const SCROLL_STEPS: usize = 8;
const SCROLL_PAUSE: f32 = 0.5;

pub struct PreviewOptions {
    pub config: SiteConfig,
    pub store: Option<PathBuf>,
    pub categories: usize,
    pub items: usize,
    pub fps: u32,
}

pub fn run(options: PreviewOptions) -> Result<()> {
    if options.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }

    let store: SharedStore = match &options.store {
        Some(path) => Arc::new(
            FileStore::open(path)
                .with_context(|| format!("Failed to open store {}", path.display()))?,
        ),
        None => Arc::new(MemoryStore::new()),
    };

    let layout = DemoLayout {
        categories: options.categories,
        items_per_category: options.items,
        ..Default::default()
    };
    let document = demo_page(layout);
    let scheduler = AnimationScheduler::new(document.clone());
    let page = Page::new(
        document.clone(),
        Arc::new(scheduler.clone()),
        store,
        options.config,
    );

    let clock = Clock {
        scheduler: &scheduler,
        dt: Duration::from_secs_f32(1.0 / options.fps as f32),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        info!(
            "Starting page ({} categories, {} items each)",
            layout.categories, layout.items_per_category
        );
        let startup = clock.drive(page.start()).await?;
        println!("-- page ready: {} scroll triggers", startup.triggers.len());

        clock.drive(startup.entrance).await?;
        println!("-- entrance complete");

        let bottom = max_scroll(&document);
        let offsets: Vec<f32> = (0..=SCROLL_STEPS)
            .map(|step| bottom * step as f32 / SCROLL_STEPS as f32)
            .collect();
        for &offset in offsets.iter().chain(offsets.iter().rev()) {
            println!("-- scroll {offset:.0}");
            page.dispatch(PageEvent::Scroll(offset));
            clock.flush();
            clock.run_for(SCROLL_PAUSE);
        }

        clock.settle();
        println!(
            "-- done at {:.2}s, theme {}",
            scheduler.clock(),
            page.state().theme
        );
        anyhow::Ok(())
    })
}

/// Fixed-step driver that prints events as they occur
struct Clock<'a> {
    scheduler: &'a AnimationScheduler,
    dt: Duration,
}

impl Clock<'_> {
    fn step(&self) -> bool {
        let active = self.scheduler.tick(self.dt);
        self.flush();
        active
    }

    fn flush(&self) {
        for event in self.scheduler.take_events() {
            println!("{}", format_event(&event));
        }
    }

    fn run_for(&self, seconds: f32) {
        let steps = (seconds / self.dt.as_secs_f32()).ceil() as usize;
        for _ in 0..steps {
            self.step();
        }
    }

    /// Tick until nothing is playing
    fn settle(&self) {
        let limit = (SETTLE_LIMIT / self.dt.as_secs_f32()).ceil() as usize;
        for _ in 0..limit {
            if !self.step() {
                return;
            }
        }
        tracing::warn!("animations still running after {SETTLE_LIMIT}s");
    }

    /// Poll `future` to completion, ticking whenever it is pending
    async fn drive<F: Future>(&self, future: F) -> F::Output {
        tokio::pin!(future);
        loop {
            tokio::select! {
                biased;
                output = &mut future => return output,
                _ = tokio::task::yield_now() => {
                    self.step();
                }
            }
        }
    }
}

fn format_event(event: &SchedulerEvent) -> String {
    match event {
        SchedulerEvent::TweenStarted { label, at } => format!("[{at:7.3}s] start    {label}"),
        SchedulerEvent::TweenCompleted { label, at } => format!("[{at:7.3}s] complete {label}"),
        SchedulerEvent::TimelineEntryStarted {
            timeline,
            entry,
            index,
            start,
            at,
        } => format!("[{at:7.3}s] {timeline}[{index}] {entry} (at +{start:.2}s)"),
        SchedulerEvent::TimelineCompleted { timeline, at } => {
            format!("[{at:7.3}s] {timeline} complete")
        }
        SchedulerEvent::TriggerToggled {
            trigger,
            event,
            action,
            scroll,
        } => format!("[scroll {scroll:6.0}] {trigger}: {event:?} -> {action}"),
    }
}
