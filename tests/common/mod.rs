#![allow(dead_code)]
//! Shared test utilities for mnxq integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Nothing here touches the network: SPARQL traffic goes
//! to [`fake_sparql_api::FakeSparqlApi`] on 127.0.0.1.

pub mod assertions;
pub mod builders;
pub mod fake_sparql_api;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
