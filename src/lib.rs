//! Intent bridge: turns Android "view/edit document" intents into filesystem
//! paths for a native application core.
//!
//! Intents can arrive before the core has finished starting. The bridge keeps
//! the most recent one behind a readiness gate until the core reports ready.
//! It then resolves the intent's URI, either straight from a `file://` path or
//! through the content provider conventions in [`resolver`], and hands the
//! result to a [`PathSink`].
//!
//! ```
//! use intent_bridge::{Event, IntentBridge};
//! # use intent_bridge::provider::{Cursor, DocumentProvider, Selection};
//! # use intent_bridge::uri::ResourceUri;
//! # struct NoProvider;
//! # impl DocumentProvider for NoProvider {
//! #     fn query(&self, _: &ResourceUri, _: &[&str], _: Option<&Selection>)
//! #         -> Result<Option<Box<dyn Cursor + '_>>, String> { Ok(None) }
//! #     fn external_storage_directory(&self) -> Option<std::path::PathBuf> { None }
//! # }
//! let (sink, mut paths) = intent_bridge::ChannelSink::channel();
//! let mut bridge = IntentBridge::new(NoProvider, sink);
//!
//! bridge.on_app_launched_with_event(Some(Event::new(
//!     Some("android.intent.action.VIEW"),
//!     Some("file:///sdcard/Music/song.mp3"),
//! )));
//! assert!(paths.try_recv().is_err());
//!
//! bridge.on_core_ready();
//! assert_eq!(paths.try_recv().unwrap().as_str(), "/sdcard/Music/song.mp3");
//! ```

pub mod bridge;
pub mod config;
pub mod gate;
pub mod provider;
pub mod resolver;
pub mod sink;
pub mod types;
pub mod uri;

#[cfg(target_os = "android")]
pub mod android;

pub use bridge::IntentBridge;
pub use config::BridgeConfig;
pub use gate::ReadinessGate;
pub use provider::{Cursor, DocumentProvider, Selection};
pub use resolver::{PathResolver, ResolveStrategy};
pub use sink::{ChannelSink, FnSink, PathSink};
pub use types::{Action, Event, ResolvedPath};
pub use uri::ResourceUri;
