//! Domain layer containing business entities and store contracts.
//!
//! Nothing here depends on the infrastructure or API layers.
//!
//! # Architecture
//!
//! - [`entities`] - Link and visit records plus the inputs used to create them
//! - [`repositories`] - Persistence ports implemented by the infrastructure layer
//! - [`cancellation`] - Cancellation signal and deadline carried by every store call
//!
//! Lifecycle rules live in [`crate::application::services::LinkService`].

pub mod cancellation;
pub mod entities;
pub mod repositories;
