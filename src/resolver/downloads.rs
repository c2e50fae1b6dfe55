use super::{ResolveContext, ResolveStrategy};
use crate::provider::query_data_column;
use crate::types::ResolvedPath;
use crate::uri::ResourceUri;

pub const DOWNLOADS_AUTHORITY: &str = "com.android.providers.downloads.documents";
pub const PUBLIC_DOWNLOADS_URI: &str = "content://downloads/public_downloads";

/// `DownloadsProvider` documents. Numeric ids index the public downloads
/// table. Anything else (`raw:/path`, `msf:123`) is looked up on the
/// document URI itself.
pub struct DownloadsStrategy;

impl ResolveStrategy for DownloadsStrategy {
    fn name(&self) -> &'static str {
        "DownloadsProvider"
    }

    fn authorities(&self) -> &[&'static str] {
        &[DOWNLOADS_AUTHORITY]
    }

    fn requires_document_uri(&self) -> bool {
        true
    }

    fn resolve(&self, uri: &ResourceUri, ctx: &ResolveContext<'_>) -> Option<ResolvedPath> {
        let id = uri.document_id()?;
        log::debug!("getDocumentId {}", id);

        let path = match id.parse::<u64>() {
            Ok(numeric) => {
                let content_uri = ResourceUri::parse(PUBLIC_DOWNLOADS_URI)
                    .and_then(|base| base.with_appended_id(numeric))
                    .map_err(|e| log::warn!("{}", e))
                    .ok()?;
                query_data_column(ctx.provider, &content_uri, None)
            }
            Err(_) => query_data_column(ctx.provider, uri, None),
        };
        path.map(ResolvedPath::from)
    }
}
