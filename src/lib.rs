//! # satchel
//!
//! Build offline docset bundles from a tree of HTML documentation.
//!
//! A build walks the source tree, runs every HTML document through the
//! selector-transform-anchor engine, and writes an enriched copy next to a
//! SQLite search index:
//!
//! - configured CSS selectors pick out the nodes that name symbols;
//! - transforms derive a symbol name and category per match;
//! - every matched location gets a stable fragment anchor;
//! - root-absolute resource links are rewritten for relocation;
//! - documents are re-serialized with extended entity substitution.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use satchel::{BuildOptions, Config, build};
//!
//! let config = Config::from_json(r#"{
//!     "package": "mylib",
//!     "index": "index.html",
//!     "selectors": {"h1.title": "Guide", "dt a": "Command"},
//!     "ignore": ["ABOUT"]
//! }"#).unwrap();
//!
//! let report = build(&config, &BuildOptions {
//!     source: Path::new("docs"),
//!     out_dir: Path::new("."),
//!     config_file: None,
//!     quiet: true,
//! }).unwrap();
//! println!("{} documents, {} references", report.documents, report.references);
//! ```

pub mod bundle;
pub mod config;
pub mod dom;
pub mod engine;
pub mod entities;
pub mod error;
pub mod index;
pub mod walk;

pub use bundle::Bundle;
pub use config::{Config, SelectorRule, Transform};
pub use engine::{Document, Engine, Reference};
pub use error::{Error, Result};
pub use index::SearchIndex;
pub use walk::{BuildOptions, BuildReport, build};
