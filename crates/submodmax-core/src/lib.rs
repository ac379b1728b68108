//! Core types and traits for submodmax.
//!
//! This crate provides:
//! - [`GroundSet`]: the immutable universe an optimizer searches over
//! - [`ObjectiveFunction`] and [`IncrementalObjective`]: the two evaluation contracts
//! - [`SetDeltaInfo`]: the added/removed/intersection record passed to incremental objectives
//! - [`FuncInfo`]: the value-plus-private-state payload returned by incremental objectives
//! - [`SubmodError`]: the error type shared by every optimizer

pub mod error;
pub mod ground_set;
pub mod objective;
pub mod set_info;

pub use error::{Result, SubmodError};
pub use ground_set::GroundSet;
pub use objective::{FromScratch, FuncInfo, FuncValue, IncrementalObjective, ObjectiveFunction};
pub use set_info::SetDeltaInfo;
