//! # permwalk
//!
//! Building blocks for recursive, chmod-style permission changes:
//!
//! - [`permissions::check_file_permissions`]: does a mode string keep owner read?
//! - [`traversal::traverse_folder`]: stack every descendant of a directory so
//!   that popping visits each directory before its contents
//! - [`plan::ChmodPlan`]: combine the two and apply a mode through a
//!   [`traits::PermissionSetter`]
//!
//! Filesystem access goes through the traits in [`traits`]. [`backends`] ships
//! a local-disk implementation and an in-memory one.

pub mod backends;
pub mod cli;
pub mod error;
pub mod permissions;
pub mod plan;
pub mod traits;
pub mod traversal;

pub use error::{PermwalkError, Result};
pub use plan::{ApplyStats, ChmodPlan};
