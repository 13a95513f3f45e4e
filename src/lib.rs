//! # findex - Local File-Path Indexer
//!
//! findex walks a set of configured root directories, records every folder
//! and file it finds into a SQLite store, and answers substring or glob
//! queries against that store without touching the filesystem again.
//!
//! ## Architecture
//!
//! - [`index`] - Index building: exclusion rules, directory walker, SQLite store
//! - [`query`] - Search term interpretation and execution
//! - [`config`] - User configuration and store location
//! - [`output`] - Terminal result formatting
//!
//! ## Quick Start
//!
//! ```ignore
//! use findex::config::Config;
//! use findex::index::{rebuild, IndexStore};
//! use findex::query::search;
//! use std::path::Path;
//!
//! let config = Config::load().unwrap();
//! let db = Path::new("/tmp/index.sqlite");
//!
//! // Rebuild the index, then query it
//! rebuild(&config, db).unwrap();
//! let store = IndexStore::open(db).unwrap();
//! for path in search(&store, &["report".into()]).unwrap() {
//!     println!("{path}");
//! }
//! ```
//!
//! The index is a point-in-time snapshot: a rebuild always wipes the previous
//! generation and recrawls from scratch.

pub mod config;
pub mod index;
pub mod output;
pub mod query;
