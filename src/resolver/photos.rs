use super::{ResolveContext, ResolveStrategy};
use crate::types::ResolvedPath;
use crate::uri::ResourceUri;

pub const LEGACY_PHOTOS_AUTHORITY: &str = "com.google.android.apps.photos.content";

/// Old Google Photos content URIs carry the local path as the last segment.
pub struct LegacyPhotosStrategy;

impl ResolveStrategy for LegacyPhotosStrategy {
    fn name(&self) -> &'static str {
        "LegacyPhotosProvider"
    }

    fn authorities(&self) -> &[&'static str] {
        &[LEGACY_PHOTOS_AUTHORITY]
    }

    fn resolve(&self, uri: &ResourceUri, _ctx: &ResolveContext<'_>) -> Option<ResolvedPath> {
        uri.last_path_segment().map(ResolvedPath::from)
    }
}
