//! mnxq: MetaNetX compound explorer.
//!
//! The binary glues the `mnxq-core` pipeline to its outer surfaces. These
//! modules are public so integration tests can drive them directly.
//!
//! # Architecture
//!
//! ```text
//!              ┌──► render (text / JSON) ──► stdout
//! backend ──► Searcher
//!              └──► server (axum) ──► HTTP clients
//! ```

pub mod backend;
pub mod render;
pub mod server;
