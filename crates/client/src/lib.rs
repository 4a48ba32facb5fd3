//! Afilado API client and application workflows.
//!
//! Exposes the REST collaborator ([`api::SawShopApi`] and its HTTP
//! implementation), the workflows forms call into, and the session/theme
//! context objects assembled by [`app::App`].

pub mod api;
pub mod app;
pub mod config;
pub mod eligibility;
pub mod envelope;
pub mod error;
pub mod http;
pub mod saws;
pub mod session;
pub mod sharpenings;
pub mod storage;
pub mod theme;
pub mod users;
