//! Core domain entities.
//!
//! Entities are plain data structures. Creation and update inputs are kept
//! in separate structs so each operation can only touch the fields it owns:
//!
//! - [`LinkDraft`] - What a client supplies when creating a link
//! - [`NewLink`] - A fully initialized record handed to the store
//! - [`LinkUpdate`] - Replacement values for an existing link (no counter)
//! - [`NewVisit`] - A visit event before the store assigns its id

pub mod link;
pub mod visit;

pub use link::{Link, LinkDraft, LinkUpdate, NewLink};
pub use visit::{NewVisit, Visit};
