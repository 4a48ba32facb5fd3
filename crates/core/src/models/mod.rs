//! Entity rows and DTOs exchanged with the REST backend.
//!
//! Each submodule follows the same layout: the entity as the backend returns
//! it, then create/update DTOs, then any enriched view types.

pub mod catalog;
pub mod client;
pub mod saw;
pub mod sharpening;
pub mod user;
