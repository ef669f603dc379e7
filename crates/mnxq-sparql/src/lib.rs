//! mnxq-sparql: MetaNetX adapters for mnxq.
//!
//! [`SparqlProvider`] implements [`mnxq_core::LookupProvider`] against a
//! SPARQL endpoint over plain HTTP. The [`links`] module builds URLs for
//! cross-reference identifiers and PubChem structure images.

pub mod client;
pub mod error;
pub mod links;
pub mod query;

pub use client::{Binding, SparqlProvider};
pub use error::SparqlError;
pub use links::{pubchem_image_url, xref_link, XrefLink};
pub use query::MatchMode;
