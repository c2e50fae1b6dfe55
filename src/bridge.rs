//! The intent bridge.
//!
//! Owns the readiness gate together with the most recent event, and turns
//! that event into a path for the native core once the core is ready.
//!
//! All entry points run on the platform's main thread. Provider queries are
//! synchronous and block that thread until they return.

use crate::config::BridgeConfig;
use crate::gate::ReadinessGate;
use crate::provider::DocumentProvider;
use crate::resolver::PathResolver;
use crate::sink::PathSink;
use crate::types::{Event, ResolvedPath};

pub struct IntentBridge<P, S> {
    gate: ReadinessGate,
    current: Option<Event>,
    resolver: PathResolver,
    provider: P,
    sink: S,
    config: BridgeConfig,
}

impl<P: DocumentProvider, S: PathSink> IntentBridge<P, S> {
    pub fn new(provider: P, sink: S) -> Self {
        Self::with_config(provider, sink, BridgeConfig::default())
    }

    pub fn with_config(provider: P, sink: S, config: BridgeConfig) -> Self {
        Self {
            gate: ReadinessGate::new(),
            current: None,
            resolver: PathResolver::default(),
            provider,
            sink,
            config,
        }
    }

    pub fn with_resolver(mut self, resolver: PathResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// App started, possibly because of an intent. The event is only
    /// remembered here; it is handled once the core reports ready.
    pub fn on_app_launched_with_event(&mut self, event: Option<Event>) {
        log::debug!("onCreate");
        let Some(event) = event else {
            return;
        };
        if let Some(action) = event.action() {
            log::debug!("intent action {}", action);
        }
        self.gate.on_launch(event.has_recognized_action());
        self.current = Some(event);
    }

    /// A new intent arrived while the app is running.
    pub fn on_event_while_running(&mut self, event: Event) {
        log::debug!("onNewIntent");
        self.current = Some(event);
        if self.gate.on_event() {
            self.process_current();
        }
    }

    /// Called by the native core once it can take a path.
    pub fn on_core_ready(&mut self) {
        if self.gate.on_core_ready() {
            log::debug!("process intent");
            self.process_current();
        } else {
            log::debug!("no intent pending");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    pub fn current_event(&self) -> Option<&Event> {
        self.current.as_ref()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Map an event to a filesystem path without forwarding it.
    pub fn resolve(&self, event: &Event) -> Option<ResolvedPath> {
        let action = event.action()?;
        log::debug!("action: {}", action);
        if !action.is_recognized() {
            return None;
        }

        let uri = event.uri()?;
        log::debug!("Intent URI: {}", uri);

        if uri.is_file_scheme() {
            let path = uri.path().unwrap_or_else(|| uri.as_str().to_string());
            Some(ResolvedPath::new(path))
        } else if uri.is_content_scheme() {
            let path = self.resolver.resolve(uri, &self.provider, &self.config);
            match &path {
                Some(path) => log::debug!("Real path: {}", path),
                None => log::info!("Could not resolve a path for {}", uri),
            }
            path
        } else {
            log::info!("Unsupported URI scheme {}", uri.scheme());
            None
        }
    }

    /// Resolve `event` and hand the path to the core. Zero or one call into
    /// the sink.
    pub fn resolve_and_forward(&self, event: &Event) {
        if let Some(path) = self.resolve(event) {
            self.sink.set_file_path_from_intent(path.as_str());
        }
    }

    fn process_current(&self) {
        if let Some(event) = &self.current {
            self.resolve_and_forward(event);
        }
    }
}
