//! Provider-backed path resolution.
//!
//! Each strategy knows the conventions of one family of content providers.
//! The resolver tries them in a fixed order and the first path produced wins.
//! A strategy that cannot answer declines, and resolution moves on to the
//! next one.
//!
//! Default order:
//! 1. External storage documents (`primary:<relative>`)
//! 2. Downloads documents (numeric id into public downloads)
//! 3. Media documents (`image|video|audio:<row id>`)
//! 4. Legacy photos provider (last path segment)
//! 5. Generic `_data` lookup with path heuristics

mod downloads;
mod external_storage;
mod generic;
mod media;
mod photos;

use std::path::PathBuf;

use crate::config::BridgeConfig;
use crate::provider::DocumentProvider;
use crate::types::ResolvedPath;
use crate::uri::ResourceUri;

pub use downloads::DownloadsStrategy;
pub use external_storage::ExternalStorageStrategy;
pub use generic::GenericStrategy;
pub use media::MediaStrategy;
pub use photos::LegacyPhotosStrategy;

/// What a strategy can see while resolving.
pub struct ResolveContext<'a> {
    pub provider: &'a dyn DocumentProvider,
    pub config: &'a BridgeConfig,
}

impl ResolveContext<'_> {
    /// Configured root, else whatever the provider reports.
    pub fn external_storage_root(&self) -> Option<PathBuf> {
        self.config
            .external_storage_root
            .clone()
            .or_else(|| self.provider.external_storage_directory())
    }
}

pub trait ResolveStrategy {
    fn name(&self) -> &'static str;

    /// Authorities handled. Empty means any authority.
    fn authorities(&self) -> &[&'static str];

    /// Only consult this strategy for document provider URIs.
    fn requires_document_uri(&self) -> bool {
        false
    }

    fn resolve(&self, uri: &ResourceUri, ctx: &ResolveContext<'_>) -> Option<ResolvedPath>;

    fn handles(&self, authority: Option<&str>) -> bool {
        let authorities = self.authorities();
        authorities.is_empty()
            || authority.is_some_and(|a| authorities.iter().any(|known| *known == a))
    }
}

pub struct PathResolver {
    strategies: Vec<Box<dyn ResolveStrategy + Send + Sync>>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(ExternalStorageStrategy),
            Box::new(DownloadsStrategy),
            Box::new(MediaStrategy),
            Box::new(LegacyPhotosStrategy),
            Box::new(GenericStrategy),
        ])
    }
}

impl PathResolver {
    pub fn with_strategies(strategies: Vec<Box<dyn ResolveStrategy + Send + Sync>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve a provider-backed URI to a filesystem path.
    pub fn resolve(
        &self,
        uri: &ResourceUri,
        provider: &dyn DocumentProvider,
        config: &BridgeConfig,
    ) -> Option<ResolvedPath> {
        let ctx = ResolveContext { provider, config };
        let authority = uri.authority();
        let mut is_document: Option<bool> = None;

        for strategy in &self.strategies {
            if !strategy.handles(authority) {
                continue;
            }
            if strategy.requires_document_uri()
                && !*is_document.get_or_insert_with(|| provider.is_document_uri(uri))
            {
                continue;
            }
            log::debug!("{}", strategy.name());
            if let Some(path) = strategy.resolve(uri, &ctx) {
                return Some(path);
            }
            log::debug!("{} declined {}", strategy.name(), uri);
        }
        None
    }
}

/// Join a relative provider path onto a root, the way the platform builds
/// `<root>/<relative>` strings.
pub(crate) fn join_root(root: &std::path::Path, relative: &str) -> ResolvedPath {
    let root = root.to_string_lossy();
    ResolvedPath::new(format!(
        "{}/{}",
        root.trim_end_matches('/'),
        relative.trim_start_matches('/')
    ))
}
