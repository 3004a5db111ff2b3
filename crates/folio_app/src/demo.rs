//! An in-memory portfolio page
//!
//! Lays out the elements the orchestration expects, with the initial styles a
//! stylesheet would give them: hidden hero text, the navigation bar parked
//! above the viewport, an empty progress bar. Used by the headless preview
//! and by tests.

use std::sync::Arc;

use folio_core::{ElementId, ElementSpec, MemoryDocument, Property, PropertyValue, Rect, Size};

/// Shape of the generated page
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemoLayout {
    pub viewport: Size,
    pub categories: usize,
    pub items_per_category: usize,
    pub about_paragraphs: usize,
    pub achievements: usize,
}

impl Default for DemoLayout {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            categories: 3,
            items_per_category: 4,
            about_paragraphs: 3,
            achievements: 4,
        }
    }
}

/// Appends elements top to bottom, tracking the page height
struct PageBuilder<'a> {
    doc: &'a MemoryDocument,
    width: f32,
    cursor: f32,
}

impl PageBuilder<'_> {
    fn block(&mut self, parent: ElementId, spec: ElementSpec, height: f32) -> ElementId {
        let bounds = Rect::new(0.0, self.cursor, self.width, height);
        self.cursor += height;
        self.doc.append(parent, spec.bounds(bounds))
    }

    /// A container spanning everything appended inside `fill`
    fn section(
        &mut self,
        parent: ElementId,
        spec: ElementSpec,
        fill: impl FnOnce(&mut Self, ElementId),
    ) -> ElementId {
        let top = self.cursor;
        let section = self.doc.append(parent, spec);
        fill(self, section);
        self.doc
            .set_bounds(section, Rect::new(0.0, top, self.width, self.cursor - top));
        section
    }
}

fn hidden(spec: ElementSpec, y: f32) -> ElementSpec {
    spec.property(Property::Opacity, 0.0)
        .property(Property::Blur, PropertyValue::Px(10.0))
        .property(Property::Y, PropertyValue::Px(y))
}

/// Build the page described by `layout`
pub fn demo_page(layout: DemoLayout) -> Arc<MemoryDocument> {
    let doc = MemoryDocument::new_shared(layout.viewport);
    let body = doc.root();
    let Size { width, height } = layout.viewport;

    // Fixed overlays and chrome
    let loader = doc.append(body, ElementSpec::new("div").class("loader"));
    doc.append(
        loader,
        ElementSpec::new("p")
            .class("loading-text")
            .text("Loading")
            .property(Property::Opacity, 0.0),
    );
    doc.append(
        loader,
        ElementSpec::new("div")
            .class("loader-progress")
            .property(Property::Width, PropertyValue::Percent(0.0)),
    );
    doc.append(body, ElementSpec::new("div").class("cursor"));
    doc.append(body, ElementSpec::new("div").class("cursor-follower"));

    let nav = doc.append(
        body,
        ElementSpec::new("nav").property(Property::Y, PropertyValue::Px(-100.0)),
    );
    doc.append(nav, ElementSpec::new("svg").class("logo").class("path-anim"));
    doc.append(nav, ElementSpec::new("button").id("themeToggle"));
    doc.append(nav, ElementSpec::new("button").id("menuToggle"));
    doc.append(body, ElementSpec::new("div").id("mobileMenu"));

    let mut page = PageBuilder {
        doc: &doc,
        width,
        cursor: 0.0,
    };

    page.section(body, ElementSpec::new("section").class("hero"), |page, hero| {
        let text_height = height / 8.0;
        page.block(hero, hidden(ElementSpec::new("h1").class("hero-title"), 50.0), text_height);
        page.block(hero, hidden(ElementSpec::new("p").class("hero-subtitle"), 30.0), text_height);
        page.block(
            hero,
            hidden(ElementSpec::new("p").class("hero-description"), 30.0),
            text_height,
        );
        page.block(hero, hidden(ElementSpec::new("a").class("cta-button"), 30.0), text_height);
        page.block(hero, ElementSpec::new("img").class("hero-image"), height / 2.0);
    });

    page.section(body, ElementSpec::new("section").class("gallery"), |page, gallery| {
        for c in 0..layout.categories {
            page.section(gallery, ElementSpec::new("div").class("gallery-category"), |page, category| {
                page.block(category, ElementSpec::new("h3").text(format!("Series {}", c + 1)), 80.0);
                for _ in 0..layout.items_per_category {
                    page.block(category, ElementSpec::new("div").class("gallery-item"), 320.0);
                }
            });
        }
    });

    page.section(body, ElementSpec::new("section").class("about"), |page, about| {
        page.block(about, ElementSpec::new("img").class("about-image"), 480.0);
        page.section(about, ElementSpec::new("div").class("about-text"), |page, text| {
            for _ in 0..layout.about_paragraphs {
                page.block(text, ElementSpec::new("p"), 120.0);
            }
        });
    });

    page.section(body, ElementSpec::new("section").class("achievements"), |page, section| {
        for _ in 0..layout.achievements {
            page.block(section, ElementSpec::new("div").class("achievement-tab"), 200.0);
        }
    });

    let page_height = page.cursor;
    doc.set_bounds(body, Rect::new(0.0, 0.0, width, page_height));
    doc
}

/// Largest useful scroll offset of a page
pub fn max_scroll(doc: &MemoryDocument) -> f32 {
    use folio_core::Document;
    let viewport = doc.viewport();
    doc.bounds(doc.root())
        .map(|b| (b.height - viewport.height).max(0.0))
        .unwrap_or(0.0)
}
