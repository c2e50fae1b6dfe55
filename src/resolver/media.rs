use super::{ResolveContext, ResolveStrategy};
use crate::provider::{query_data_column, Selection};
use crate::types::ResolvedPath;
use crate::uri::ResourceUri;

pub const MEDIA_AUTHORITY: &str = "com.android.providers.media.documents";

pub const IMAGES_EXTERNAL_CONTENT_URI: &str = "content://media/external/images/media";
pub const VIDEO_EXTERNAL_CONTENT_URI: &str = "content://media/external/video/media";
pub const AUDIO_EXTERNAL_CONTENT_URI: &str = "content://media/external/audio/media";

/// `MediaProvider` documents. Ids are `<type>:<row id>` into the media store.
pub struct MediaStrategy;

fn content_uri_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image" => Some(IMAGES_EXTERNAL_CONTENT_URI),
        "video" => Some(VIDEO_EXTERNAL_CONTENT_URI),
        "audio" => Some(AUDIO_EXTERNAL_CONTENT_URI),
        _ => None,
    }
}

impl ResolveStrategy for MediaStrategy {
    fn name(&self) -> &'static str {
        "MediaProvider"
    }

    fn authorities(&self) -> &[&'static str] {
        &[MEDIA_AUTHORITY]
    }

    fn requires_document_uri(&self) -> bool {
        true
    }

    fn resolve(&self, uri: &ResourceUri, ctx: &ResolveContext<'_>) -> Option<ResolvedPath> {
        let doc_id = uri.document_id()?;
        let (media_type, row_id) = doc_id.split_once(':')?;
        let Some(base) = content_uri_for(media_type) else {
            log::debug!("Unknown media type {}", media_type);
            return None;
        };
        let content_uri = ResourceUri::parse(base)
            .map_err(|e| log::warn!("{}", e))
            .ok()?;
        let selection = Selection::new("_id=?", vec![row_id.to_string()]);
        query_data_column(ctx.provider, &content_uri, Some(&selection)).map(ResolvedPath::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use crate::provider::testing::MockProvider;

    fn resolve(provider: &MockProvider, doc_id: &str) -> Option<ResolvedPath> {
        let uri = ResourceUri::parse(&format!(
            "content://{}/document/{}",
            MEDIA_AUTHORITY,
            urlencoding::encode(doc_id)
        ))
        .unwrap();
        let config = BridgeConfig::default();
        MediaStrategy.resolve(&uri, &ResolveContext { provider, config: &config })
    }

    #[test]
    fn test_audio_document() {
        let provider = MockProvider::new()
            .with_data(AUDIO_EXTERNAL_CONTENT_URI, "/storage/emulated/0/Music/x.mp3");
        assert_eq!(
            resolve(&provider, "audio:1234"),
            Some(ResolvedPath::new("/storage/emulated/0/Music/x.mp3"))
        );
        let queries = provider.queries.borrow();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].uri, AUDIO_EXTERNAL_CONTENT_URI);
        assert_eq!(
            queries[0].selection,
            Some(Selection::new("_id=?", vec!["1234".to_string()]))
        );
    }

    #[test]
    fn test_type_selects_table() {
        let provider = MockProvider::new();
        resolve(&provider, "image:1");
        resolve(&provider, "video:2");
        assert_eq!(
            provider.queried_uris(),
            vec![IMAGES_EXTERNAL_CONTENT_URI.to_string(), VIDEO_EXTERNAL_CONTENT_URI.to_string()]
        );
    }

    #[test]
    fn test_unknown_type_declines_without_query() {
        let provider = MockProvider::new();
        assert_eq!(resolve(&provider, "document:5"), None);
        assert_eq!(resolve(&provider, "audio"), None);
        assert!(provider.queried_uris().is_empty());
    }
}
