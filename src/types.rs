//! Core data types for the intent bridge
//!
//! - Intent actions and the events that carry them
//! - The resolved filesystem path handed to the native core

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::uri::ResourceUri;

pub const ACTION_VIEW: &str = "android.intent.action.VIEW";
pub const ACTION_EDIT: &str = "android.intent.action.EDIT";

/// Intent action tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Other(String),
}

impl Action {
    /// Accepts the full intent action strings and the short `view` / `edit` tags.
    pub fn parse(action: &str) -> Self {
        match action {
            ACTION_VIEW | "view" => Action::View,
            ACTION_EDIT | "edit" => Action::Edit,
            other => Action::Other(other.to_string()),
        }
    }

    /// Only view and edit requests open a document.
    pub fn is_recognized(&self) -> bool {
        matches!(self, Action::View | Action::Edit)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::View => ACTION_VIEW,
            Action::Edit => ACTION_EDIT,
            Action::Other(s) => s,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request from the platform to open a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    action: Option<Action>,
    uri: Option<ResourceUri>,
}

impl Event {
    /// Build an event from the raw action and data strings of an intent.
    /// Data that does not parse as a URI is treated as absent.
    pub fn new(action: Option<&str>, data: Option<&str>) -> Self {
        let uri = data
            .filter(|d| !d.trim().is_empty())
            .and_then(|d| match ResourceUri::parse(d) {
                Ok(uri) => Some(uri),
                Err(e) => {
                    log::info!("Ignoring intent data: {}", e);
                    None
                }
            });
        Self {
            action: action.map(Action::parse),
            uri,
        }
    }

    pub fn from_parts(action: Option<Action>, uri: Option<ResourceUri>) -> Self {
        Self { action, uri }
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn uri(&self) -> Option<&ResourceUri> {
        self.uri.as_ref()
    }

    pub fn has_recognized_action(&self) -> bool {
        self.action.as_ref().is_some_and(Action::is_recognized)
    }
}

/// A plain filesystem path produced from an event
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ResolvedPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
