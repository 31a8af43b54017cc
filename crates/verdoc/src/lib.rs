// Copyright 2026 Oxide Computer Company

//! Multi-version documentation builds driven by git branches and tags.
//!
//! Given a local clone, verdoc discovers every remote branch and tag
//! whose tree contains a set of required files (the renderer config by
//! default), renders each one with a pluggable [`DocBuilder`], and
//! assembles the results into a single output directory. The root
//! version's pages sit at the top of the output; every other version
//! gets a stable, filesystem-safe subdirectory derived from its ref
//! name.
//!
//! The data model lives in `verdoc-versions` and the git plumbing in
//! `verdoc-vcs`. This crate adds the renderer integration, the build
//! pipeline, and the `verdoc` command-line tool.
//!
//! # Examples
//!
//! ```no_run
//! use verdoc::{BuildOptions, CommandBuilder};
//!
//! let options = BuildOptions::new("/path/to/clone", "/srv/docs")
//!     .root_ref("master");
//! let builder = CommandBuilder::new("sphinx-build").args(["-b", "html"]);
//!
//! let summary = verdoc::run(&options, &builder).expect("build completed");
//! for version in &summary.versions {
//!     println!("{} at {}", version.name, version.url);
//! }
//! ```

#![deny(missing_docs)]

mod errors;
mod pipeline;
mod renderer;

pub use errors::{RenderError, RunError, VersionError};
pub use pipeline::{
    BuildOptions, BuildSummary, BuiltVersion, VersionFailure, run,
};
pub use renderer::{
    CommandBuilder, DocBuilder, RenderedDocs, root_doc_from_config,
};
