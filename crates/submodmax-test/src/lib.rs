//! Shared test fixtures for submodmax crates.
//!
//! - [`tutorial`] - the two-element function from the submodularity.org tutorial slides
//! - [`max_cut`] - weighted max-cut objectives, plain and incremental
//! - [`graphs`] - seeded random graphs and brute-force maxima for property loops
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! submodmax-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use submodmax_test::max_cut::{MaxCut, IncrementalMaxCut};
//! use submodmax_test::graphs::{brute_force_max, random_graph};
//! ```

pub mod graphs;
pub mod max_cut;
pub mod tutorial;

pub use graphs::{brute_force_max, random_graph, triangle_graph};
pub use max_cut::{IncrementalMaxCut, MaxCut, MaxCutInfo};
pub use tutorial::{IncrementalTutorialFunction, TutorialFunction};
