//! Folio Core
//!
//! The seams every other Folio crate is written against:
//!
//! - **Document**: element lookup by selector, property/text/attribute/class/style
//!   mutation and layout bounds, with an in-memory implementation for hosts
//!   that are not a browser (tests, the CLI preview)
//! - **Storage**: a string key-value store for user preferences
//! - **Values**: the animatable properties and their units
//!
//! Missing elements are never an error: every lookup returns `Option` or an
//! empty list and every mutation on an unknown element is a no-op.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Document, ElementSpec, MemoryDocument, Property, PropertyValue, Rect, Size};
//!
//! let doc = MemoryDocument::new(Size::new(1280.0, 800.0));
//! let body = doc.root();
//! let hero = doc.append(body, ElementSpec::new("section").class("hero").bounds(Rect::new(0.0, 0.0, 1280.0, 800.0)));
//!
//! doc.set_property(hero, Property::Opacity, PropertyValue::Number(0.5));
//! assert_eq!(doc.query_selector(".hero"), Some(hero));
//! assert_eq!(doc.property(hero, Property::Opacity), Some(PropertyValue::Number(0.5)));
//! ```

pub mod document;
pub mod store;
pub mod value;

pub use document::{Document, ElementId, ElementSpec, MemoryDocument, SharedDocument};
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedStore, StoreError};
pub use value::{Point, Property, PropertyValue, Rect, Size};
