//! netex-index – an in-memory, queryable index over public transport network
//! exchange documents.
//!
//! A document is a list of *frames*, each grouping one category of entities
//! (stop places, lines, journeys, calendars, fares, vehicle schedules). Frames
//! may be wrapped in composite frames, nested to any depth. Parsing a document
//! walks that hierarchy, routes every frame to a type-specific extractor and
//! fills a [`index::NetexIndex`] with:
//! * typed entity indexes keyed by id, where stop places and quays keep every
//!   version and answer "latest" by numeric version marker;
//! * relation maps that make explicit what the document only expresses by
//!   nesting (which stop place a quay belongs to, which network a group of
//!   lines belongs to, which day type assignments point at a day type);
//! * the raw frames of every kind, for consumers needing frame level data.
//!
//! ## Modules
//! * [`datatype`] – the [`datatype::Entity`] trait and version ordering.
//! * [`model`] – the typed document tree, deserialized with serde.
//! * [`construct`] – entity indexes, relation maps and one-to-many lookups.
//! * [`index`] – the session index holding all of them.
//! * [`parser`] – the frame walker and the frame extractors.
//! * [`loader`] – documents from files, directories and zip archives.
//! * [`interface`] – snapshot swapping for long running readers.
//! * [`server`] – a small HTTP lookup endpoint.
//!
//! ## Quick Start
//! ```
//! use netex_index::{index::NetexIndex, loader::NetexLoader};
//! let document = r#"{ "dataObjects": [ { "kind": "SiteFrame", "id": "SF",
//!     "stopPlaces": [ { "id": "S1", "version": "1", "name": "Central" } ] } ] }"#;
//! let index = NetexIndex::new();
//! NetexLoader::new(&index).load("inline", document.as_bytes()).unwrap();
//! let latest = index.stop_places.latest_version("S1").unwrap();
//! assert_eq!(latest.name.as_deref(), Some("Central"));
//! ```
//!
//! Indexes tolerate concurrent readers while a document is being committed.
//! Readers that need a consistent view of a whole batch should go through
//! [`interface::SharedIndex`], which swaps in freshly parsed indexes.

pub mod construct;
pub mod datatype;
pub mod error;
pub mod index;
pub mod interface;
pub mod loader;
pub mod model;
pub mod parser;
pub mod server;
pub mod settings;

pub use error::{NetexError, Result};
