//! Runtime choice of lookup provider.

use anyhow::Context;
use mnxq_core::{CatalogProvider, LookupError, LookupProvider, MatchRecord, NormalizedName};
use mnxq_sparql::SparqlProvider;
use std::path::Path;

/// The provider selected on the command line: a local JSON catalog when one
/// is given, the SPARQL endpoint otherwise.
#[derive(Debug, Clone)]
pub enum Backend {
    Catalog(CatalogProvider),
    Sparql(SparqlProvider),
}

impl Backend {
    pub fn from_source(catalog: Option<&Path>, endpoint: &str) -> anyhow::Result<Self> {
        match catalog {
            Some(path) => {
                let catalog = CatalogProvider::load(path)
                    .with_context(|| format!("failed to load catalog {}", path.display()))?;
                tracing::debug!(path = %path.display(), records = catalog.len(), "catalog loaded");
                Ok(Backend::Catalog(catalog))
            }
            None => Ok(Backend::Sparql(SparqlProvider::new(endpoint)?)),
        }
    }

    /// The SPARQL provider, if that is what this backend talks to.
    pub fn sparql(&self) -> Option<&SparqlProvider> {
        match self {
            Backend::Sparql(p) => Some(p),
            Backend::Catalog(_) => None,
        }
    }
}

impl LookupProvider for Backend {
    async fn lookup_exact(&self, name: &NormalizedName) -> Result<Vec<MatchRecord>, LookupError> {
        match self {
            Backend::Catalog(p) => p.lookup_exact(name).await,
            Backend::Sparql(p) => p.lookup_exact(name).await,
        }
    }

    async fn lookup_contains(
        &self,
        name: &NormalizedName,
    ) -> Result<Vec<MatchRecord>, LookupError> {
        match self {
            Backend::Catalog(p) => p.lookup_contains(name).await,
            Backend::Sparql(p) => p.lookup_contains(name).await,
        }
    }
}
