//! Android integration for the intent bridge.
//!
//! This module is only compiled on Android builds (`target_os = "android"`).
//! It provides:
//!
//! - **ContentResolver provider** - `_data` lookups, document URI checks and the
//!   external storage root, all through JNI
//! - **Activity entry points** - `nativeOnCreate`, `nativeOnNewIntent` and
//!   `nativeCheckPendingIntents`, backed by one process-wide bridge
//!
//! ## Flow
//!
//! 1. The activity passes its launch intent to `nativeOnCreate`. The event is
//!    stored and marked pending.
//! 2. The native core installs its sink and calls [`check_pending_intents`].
//! 3. The pending event is resolved and the path handed to the sink.
//! 4. Intents arriving later through `onNewIntent` are handled immediately.

#![cfg(target_os = "android")]

pub mod activity;
pub mod content_resolver;

pub use activity::{check_pending_intents, install_path_sink, set_config, InstalledSink};
pub use content_resolver::ContentResolverProvider;
