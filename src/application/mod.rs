//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers, the expiry sweeper, and the admin CLI.
//!
//! # Modules
//!
//! - [`services::link_service::LinkService`] - Link lifecycle: create, read,
//!   update, delete, visit, and expiry cleanup
//! - [`expiry_sweeper`] - Recurring background purge of expired links

pub mod expiry_sweeper;
pub mod services;
