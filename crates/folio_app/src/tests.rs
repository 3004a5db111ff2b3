//! End-to-end tests for folio_app
//!
//! Each test builds the demo page, starts it against the reference engine and
//! drives the engine with fixed 10 ms ticks.

use crate::prelude::*;
use folio_core::{ElementId, KeyValueStore, Property, PropertyValue};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const STEP: Duration = Duration::from_millis(10);

struct Fixture {
    document: Arc<MemoryDocument>,
    scheduler: AnimationScheduler,
    store: Arc<MemoryStore>,
    page: Page,
}

fn fixture(config: SiteConfig) -> Fixture {
    let document = demo_page(DemoLayout::default());
    let scheduler = AnimationScheduler::new(document.clone());
    let store = Arc::new(MemoryStore::new());
    let page = Page::new(
        document.clone(),
        Arc::new(scheduler.clone()),
        store.clone(),
        config,
    );
    Fixture {
        document,
        scheduler,
        store,
        page,
    }
}

/// Poll `future` to completion, ticking the engine whenever it is pending
async fn drive<F: Future>(scheduler: &AnimationScheduler, future: F) -> F::Output {
    tokio::pin!(future);
    loop {
        tokio::select! {
            biased;
            output = &mut future => return output,
            _ = tokio::task::yield_now() => {
                scheduler.tick(STEP);
            }
        }
    }
}

fn run_for(scheduler: &AnimationScheduler, seconds: f32) {
    let steps = (seconds / STEP.as_secs_f32()).ceil() as usize;
    for _ in 0..steps {
        scheduler.tick(STEP);
    }
}

fn magnitude(document: &MemoryDocument, element: ElementId, property: Property) -> f32 {
    document
        .property(element, property)
        .unwrap_or_else(|| property.initial())
        .magnitude()
}

fn first(document: &MemoryDocument, selector: &str) -> ElementId {
    document.query_selector(selector).unwrap()
}

#[tokio::test]
async fn test_entrance_follows_loading() {
    let Fixture {
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());

    let startup = drive(&scheduler, page.start()).await.unwrap();
    // Three categories of one title and four items, parallax, about image,
    // three paragraphs and four achievement tabs
    assert_eq!(startup.triggers.len(), 24);

    let loaded_at = scheduler.clock();
    let completed: Vec<String> = scheduler
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            SchedulerEvent::TweenCompleted { label, .. } => Some(label),
            _ => None,
        })
        .collect();
    assert_eq!(completed, [".loading-text", ".loader-progress", ".loader"]);

    drive(&scheduler, startup.entrance).await.unwrap();
    let started: Vec<(usize, f32, f32)> = scheduler
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            SchedulerEvent::TimelineEntryStarted {
                index, start, at, ..
            } => Some((index, start, at)),
            _ => None,
        })
        .collect();

    let indices: Vec<usize> = started.iter().map(|s| s.0).collect();
    assert_eq!(indices, [0, 1, 2, 3, 4, 5]);
    assert!(started.windows(2).all(|w| w[0].2 <= w[1].2));
    assert!(started.iter().all(|s| s.2 >= loaded_at));
    assert!((started[5].1 - 2.8).abs() < 1e-4);
}

#[tokio::test]
async fn test_entrance_reveals_hero() {
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());

    let startup = drive(&scheduler, page.start()).await.unwrap();
    drive(&scheduler, startup.entrance).await.unwrap();

    let title = first(&document, ".hero-title");
    assert_eq!(magnitude(&document, title, Property::Opacity), 1.0);
    assert_eq!(magnitude(&document, title, Property::Y), 0.0);
    assert_eq!(magnitude(&document, title, Property::Blur), 0.0);

    let nav = first(&document, "nav");
    assert_eq!(magnitude(&document, nav, Property::Y), 0.0);

    let subtitle = first(&document, ".hero-subtitle");
    assert_eq!(
        document.text(subtitle).as_deref(),
        Some(page.config().entrance.subtitle_text.as_str())
    );

    let overlay = first(&document, ".loader");
    assert_eq!(document.style(overlay, "display").as_deref(), Some("none"));
}

#[tokio::test]
async fn test_hover_waits_for_loading() {
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());
    let cta = first(&document, ".cta-button");

    page.dispatch(PageEvent::PointerEnter(cta));
    run_for(&scheduler, 0.5);
    assert_eq!(document.property(cta, Property::Scale), None);
    assert!(!page.state().hover_enabled);

    let startup = drive(&scheduler, page.start()).await.unwrap();
    drop(startup);
    assert!(page.state().hover_enabled);

    page.dispatch(PageEvent::PointerEnter(cta));
    run_for(&scheduler, 0.5);
    assert!((magnitude(&document, cta, Property::Scale) - 1.05).abs() < 1e-4);

    page.dispatch(PageEvent::PointerLeave(cta));
    run_for(&scheduler, 0.5);
    assert!((magnitude(&document, cta, Property::Scale) - 1.0).abs() < 1e-4);
}

#[tokio::test]
async fn test_scroll_reveal_reverses_on_the_way_up() {
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());
    drop(drive(&scheduler, page.start()).await.unwrap());

    // Top at 880, so the trigger starts at 880 - 80% of 800 = 240
    let item = first(&document, ".gallery-item");
    assert_eq!(magnitude(&document, item, Property::Opacity), 0.0);

    page.dispatch(PageEvent::Scroll(400.0));
    run_for(&scheduler, 3.0);
    assert!((magnitude(&document, item, Property::Opacity) - 1.0).abs() < 1e-4);

    page.dispatch(PageEvent::Scroll(0.0));
    run_for(&scheduler, 3.0);
    assert!(magnitude(&document, item, Property::Opacity).abs() < 1e-4);
}

#[tokio::test]
async fn test_scroll_reveal_without_reverse_stays() {
    let mut config = SiteConfig::default();
    config.scroll.reverse_on_leave = false;
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(config);
    drop(drive(&scheduler, page.start()).await.unwrap());

    let item = first(&document, ".gallery-item");
    page.dispatch(PageEvent::Scroll(400.0));
    run_for(&scheduler, 3.0);
    page.dispatch(PageEvent::Scroll(0.0));
    run_for(&scheduler, 3.0);
    assert!((magnitude(&document, item, Property::Opacity) - 1.0).abs() < 1e-4);
}

#[tokio::test]
async fn test_repeated_crossings_settle_on_final_position() {
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());
    drop(drive(&scheduler, page.start()).await.unwrap());
    let item = first(&document, ".gallery-item");

    for offset in [400.0, 0.0, 400.0] {
        page.dispatch(PageEvent::Scroll(offset));
        run_for(&scheduler, 0.1);
    }
    run_for(&scheduler, 3.0);
    assert!((magnitude(&document, item, Property::Opacity) - 1.0).abs() < 1e-4);

    for offset in [0.0, 400.0, 0.0] {
        page.dispatch(PageEvent::Scroll(offset));
        run_for(&scheduler, 0.1);
    }
    run_for(&scheduler, 3.0);
    assert!(magnitude(&document, item, Property::Opacity).abs() < 1e-4);
}

#[tokio::test]
async fn test_parallax_is_monotonic() {
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());
    drop(drive(&scheduler, page.start()).await.unwrap());
    let image = first(&document, ".hero-image");

    let shifts: Vec<f32> = (0..=16)
        .map(|step| {
            page.dispatch(PageEvent::Scroll(step as f32 * 50.0));
            magnitude(&document, image, Property::Y)
        })
        .collect();

    assert!(shifts[0].abs() < 1e-4);
    assert!(shifts.windows(2).all(|w| w[0] <= w[1] + 1e-5), "{shifts:?}");
    assert!((shifts[16] - 20.0).abs() < 1e-3);
    assert!(matches!(
        document.property(image, Property::Y),
        Some(PropertyValue::Percent(_))
    ));
}

#[tokio::test]
async fn test_click_routes_to_toggles() {
    let Fixture {
        document,
        scheduler,
        store,
        page,
    } = fixture(SiteConfig::default());
    let body = document.root();
    assert_eq!(document.attribute(body, "data-theme").as_deref(), Some("dark"));

    let toggle = first(&document, "#themeToggle");
    page.dispatch(PageEvent::Click(toggle));
    assert_eq!(page.state().theme, Theme::Light);
    assert_eq!(document.attribute(body, "data-theme").as_deref(), Some("light"));
    assert_eq!(store.get("theme").as_deref(), Some("light"));

    page.dispatch(PageEvent::Click(toggle));
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    run_for(&scheduler, 1.0);
    assert!((magnitude(&document, toggle, Property::Scale) - 1.0).abs() < 1e-4);

    let menu = first(&document, "#menuToggle");
    page.dispatch(PageEvent::Click(menu));
    assert!(page.state().menu_open);
    assert_eq!(document.style(body, "overflow").as_deref(), Some("hidden"));
    assert!(document.has_class(first(&document, "#mobileMenu"), "active"));

    // Clicks elsewhere change nothing
    page.dispatch(PageEvent::Click(first(&document, ".hero")));
    assert!(page.state().menu_open);
    assert_eq!(page.state().theme, Theme::Dark);
}

#[tokio::test]
async fn test_pointer_moves_cursor() {
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());
    assert!(page.state().cursor_enabled);

    page.dispatch(PageEvent::PointerMove(Point::new(300.0, 200.0)));
    run_for(&scheduler, 0.5);

    let cursor = first(&document, ".cursor");
    let follower = first(&document, ".cursor-follower");
    assert!((magnitude(&document, cursor, Property::X) - 290.0).abs() < 1e-3);
    assert!((magnitude(&document, follower, Property::Y) - 180.0).abs() < 1e-3);
    assert_eq!(page.state().pointer, Some(Point::new(300.0, 200.0)));
}

#[tokio::test]
async fn test_subtitle_placeholder_is_replaced() {
    let Fixture {
        document,
        scheduler,
        page,
        ..
    } = fixture(SiteConfig::default());
    let subtitle = first(&document, ".hero-subtitle");
    document.set_text(subtitle, &"x".repeat(70));

    let startup = drive(&scheduler, page.start()).await.unwrap();
    drive(&scheduler, startup.entrance).await.unwrap();

    assert_eq!(
        document.text(subtitle).as_deref(),
        Some(page.config().entrance.subtitle_text.as_str())
    );
}

#[tokio::test]
async fn test_toggles_respond_while_loading() {
    let Fixture {
        document,
        scheduler,
        store,
        page,
    } = fixture(SiteConfig::default());
    let theme_toggle = first(&document, "#themeToggle");
    let menu_toggle = first(&document, "#menuToggle");

    let start = page.start();
    tokio::pin!(start);
    let mut clicked = false;
    let startup = loop {
        tokio::select! {
            biased;
            output = &mut start => break output.unwrap(),
            _ = tokio::task::yield_now() => {
                scheduler.tick(STEP);
                if !clicked && scheduler.clock() > 1.0 {
                    clicked = true;
                    page.dispatch(PageEvent::Click(theme_toggle));
                    page.dispatch(PageEvent::Click(menu_toggle));

                    let state = page.state();
                    assert!(!state.hover_enabled);
                    assert_eq!(state.theme, Theme::Light);
                    assert!(state.menu_open);
                    assert_eq!(store.get("theme").as_deref(), Some("light"));
                }
            }
        }
    };

    assert!(clicked);
    assert!(page.state().hover_enabled);
    assert_eq!(startup.triggers.len(), 24);
}
