use super::{join_root, ResolveContext, ResolveStrategy};
use crate::types::ResolvedPath;
use crate::uri::ResourceUri;

pub const EXTERNAL_STORAGE_AUTHORITY: &str = "com.android.externalstorage.documents";

/// `ExternalStorageProvider` documents. Ids look like `primary:Music/song.mp3`.
/// Only the primary volume maps onto the external storage root.
pub struct ExternalStorageStrategy;

impl ResolveStrategy for ExternalStorageStrategy {
    fn name(&self) -> &'static str {
        "ExternalStorageProvider"
    }

    fn authorities(&self) -> &[&'static str] {
        &[EXTERNAL_STORAGE_AUTHORITY]
    }

    fn requires_document_uri(&self) -> bool {
        true
    }

    fn resolve(&self, uri: &ResourceUri, ctx: &ResolveContext<'_>) -> Option<ResolvedPath> {
        let doc_id = uri.document_id()?;
        let (volume, relative) = doc_id.split_once(':')?;
        if !volume.eq_ignore_ascii_case("primary") {
            log::debug!("Volume {} is not primary", volume);
            return None;
        }
        let root = ctx.external_storage_root()?;
        Some(join_root(&root, relative))
    }
}
