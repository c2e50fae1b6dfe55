use std::path::Path;

use super::{join_root, ResolveContext, ResolveStrategy};
use crate::provider::query_data_column;
use crate::types::ResolvedPath;
use crate::uri::ResourceUri;

const EXTERNAL_STORAGE_ROOT_PREFIX: &str = "/external_storage_root";
const DOCUMENT_PREFIX: &str = "/document/";

/// Any content provider: try `_data`, then rewrite well-known path shapes.
///
/// - `/external_storage_root/<rest>` becomes `<external root>/<rest>`
/// - `/document/<volume>:<rest>` becomes `<mount root>/<volume>/<rest>` if
///   that file exists
///
/// Anything else is forwarded as the bare URI path unless
/// `forward_raw_provider_paths` is turned off.
pub struct GenericStrategy;

impl GenericStrategy {
    fn from_uri_path(path: String, ctx: &ResolveContext<'_>) -> Option<ResolvedPath> {
        if let Some(rest) = path
            .strip_prefix(EXTERNAL_STORAGE_ROOT_PREFIX)
            .filter(|rest| rest.starts_with('/'))
        {
            if let Some(root) = ctx.external_storage_root() {
                return Some(join_root(&root, rest));
            }
        } else if let Some((volume, rest)) = path
            .strip_prefix(DOCUMENT_PREFIX)
            .and_then(|doc| doc.split_once(':'))
        {
            // Plain concatenation: an absolute `rest` (`raw:/...`) stays under the mount root
            let mount_root = ctx.config.storage_mount_root.to_string_lossy();
            let storage_path = format!("{}/{}/{}", mount_root.trim_end_matches('/'), volume, rest);
            if ctx.provider.path_exists(Path::new(&storage_path)) {
                return Some(ResolvedPath::new(storage_path));
            }
            log::debug!("{} does not exist", storage_path);
        }

        if ctx.config.forward_raw_provider_paths {
            Some(ResolvedPath::new(path))
        } else {
            None
        }
    }
}

impl ResolveStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "GenericProvider"
    }

    fn authorities(&self) -> &[&'static str] {
        &[]
    }

    fn resolve(&self, uri: &ResourceUri, ctx: &ResolveContext<'_>) -> Option<ResolvedPath> {
        if let Some(path) = query_data_column(ctx.provider, uri, None) {
            return Some(ResolvedPath::from(path));
        }
        let path = uri.path()?;
        Self::from_uri_path(path, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use crate::provider::testing::MockProvider;
    use crate::provider::DocumentProvider;
    use std::path::PathBuf;

    fn resolve_with(
        provider: &dyn DocumentProvider,
        config: &BridgeConfig,
        uri: &str,
    ) -> Option<String> {
        let uri = ResourceUri::parse(uri).unwrap();
        GenericStrategy
            .resolve(&uri, &ResolveContext { provider, config })
            .map(ResolvedPath::into_string)
    }

    fn resolve(provider: &MockProvider, uri: &str) -> Option<String> {
        resolve_with(provider, &BridgeConfig::default(), uri)
    }

    #[test]
    fn test_data_column_wins() {
        let uri = "content://com.example.files/external_storage_root/Music/a.mp3";
        let provider = MockProvider::new().with_data(uri, "/real/a.mp3");
        assert_eq!(resolve(&provider, uri).as_deref(), Some("/real/a.mp3"));
    }

    #[test]
    fn test_external_storage_root_prefix() {
        let provider = MockProvider::new();
        assert_eq!(
            resolve(&provider, "content://com.example.files/external_storage_root/Music/a.mp3")
                .as_deref(),
            Some("/storage/emulated/0/Music/a.mp3")
        );
    }

    #[test]
    fn test_document_path_rewritten_when_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("1A2B-3C4D/Music")).unwrap();
        std::fs::write(dir.path().join("1A2B-3C4D/Music/a.mp3"), b"ID3").unwrap();

        // Default path_exists goes to the real filesystem
        struct FsProvider;
        impl DocumentProvider for FsProvider {
            fn query(
                &self,
                _: &ResourceUri,
                _: &[&str],
                _: Option<&crate::provider::Selection>,
            ) -> Result<Option<Box<dyn crate::provider::Cursor + '_>>, String> {
                Ok(None)
            }
            fn external_storage_directory(&self) -> Option<PathBuf> {
                None
            }
        }

        let mut config = BridgeConfig::default().with_storage_mount_root(dir.path());
        let expected = dir.path().join("1A2B-3C4D/Music/a.mp3");
        assert_eq!(
            resolve_with(
                &FsProvider,
                &config,
                "content://com.example.files/document/1A2B-3C4D%3AMusic%2Fa.mp3"
            ),
            Some(expected.to_string_lossy().into_owned())
        );

        let missing = "content://com.example.files/document/1A2B-3C4D%3AMusic%2Fmissing.mp3";
        assert_eq!(
            resolve_with(&FsProvider, &config, missing).as_deref(),
            Some("/document/1A2B-3C4D:Music/missing.mp3")
        );
        config.forward_raw_provider_paths = false;
        assert_eq!(resolve_with(&FsProvider, &config, missing), None);
    }

    #[test]
    fn test_absolute_document_rest_stays_under_mount_root() {
        let uri = "content://com.example.files/document/raw%3A%2Fetc%2Fhostname";

        let provider = MockProvider::new().with_existing("/etc/hostname");
        assert_eq!(
            resolve(&provider, uri).as_deref(),
            Some("/document/raw:/etc/hostname")
        );

        let provider = MockProvider::new().with_existing("/storage/raw//etc/hostname");
        assert_eq!(
            resolve(&provider, uri).as_deref(),
            Some("/storage/raw//etc/hostname")
        );
    }

    #[test]
    fn test_raw_path_forwarded_by_default() {
        let provider = MockProvider::new();
        assert_eq!(
            resolve(
                &provider,
                "content://com.ghisler.files/storage/emulated/0/Music/a.mp3"
            )
            .as_deref(),
            Some("/storage/emulated/0/Music/a.mp3")
        );
        assert_eq!(
            resolve(&provider, "content://com.example.files/some/file").as_deref(),
            Some("/some/file")
        );
    }

    #[test]
    fn test_raw_path_forwarding_can_be_disabled() {
        let provider = MockProvider::new();
        let config = BridgeConfig {
            forward_raw_provider_paths: false,
            ..BridgeConfig::default()
        };
        assert_eq!(
            resolve_with(&provider, &config, "content://com.example.files/some/file"),
            None
        );
    }

    #[test]
    fn test_no_path_declines() {
        let provider = MockProvider::new();
        assert_eq!(resolve(&provider, "content://com.example.files"), None);
    }
}
