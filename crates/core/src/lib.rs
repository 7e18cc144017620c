//! Core library for architect
//!
//! This crate implements the **Functional Core** of the architect application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The architect project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`architect_core`** (this crate): Pure transformation functions with zero I/O
//! - **`architect`**: I/O operations and orchestration (the Imperative Shell)
//!
//! Nothing in this crate touches the network, the file system or the clipboard.
//! The shell reads uploads, calls the generation service and serves pages; every
//! decision about *what* those bytes mean lives here.
//!
//! # Module Organization
//!
//! - [`project`]: Uploaded and generated file models
//! - [`preview`]: Inlines local stylesheets and scripts into a previewable `index.html`
//! - [`intake`]: Upload set with name-based deduplication
//! - [`prompt`]: Request validation and prompt composition
//! - [`generation`]: Wire request body, response envelope and project validation
//! - [`i18n`]: Localization context passed explicitly to rendering
//! - [`session`]: Single-flight request state and the project view state
//! - [`page`]: HTML rendering of the web UI
//!
//! # Example Usage
//!
//! ```rust
//! use architect_core::preview::compose_preview;
//! use architect_core::project::ProjectFile;
//!
//! let files = vec![
//!     ProjectFile::new("index.html", r#"<html><head><link rel="stylesheet" href="./style.css"></head></html>"#),
//!     ProjectFile::new("style.css", "body { margin: 0; }"),
//! ];
//!
//! let html = compose_preview(&files).expect("index.html is present");
//! assert!(html.contains("<style>body { margin: 0; }</style>"));
//! ```

pub mod generation;
pub mod i18n;
pub mod intake;
pub mod page;
pub mod preview;
pub mod project;
pub mod prompt;
pub mod session;
