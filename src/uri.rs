//! Resource references carried by intents.
//!
//! Only the parts of a URI the resolver needs are parsed: scheme, authority,
//! path and path segments. Query and fragment are kept in the raw text but are
//! otherwise ignored. Path and segments are percent-decoded following the
//! platform `Uri` accessors (`getPath`, `getPathSegments`), which decode each
//! segment separately so an encoded `/` inside a document id survives.

use std::borrow::Cow;
use std::fmt;

/// An opaque resource reference as delivered with an intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceUri {
    raw: String,
    scheme: String,
    authority: Option<String>,
    raw_path: Option<String>,
}

impl ResourceUri {
    /// Parse a URI string. Only a missing or malformed scheme is an error.
    pub fn parse(input: &str) -> Result<Self, String> {
        let raw = input.trim();
        let colon = raw
            .find(':')
            .ok_or_else(|| format!("URI has no scheme: {}", raw))?;
        let scheme = &raw[..colon];
        if !is_valid_scheme(scheme) {
            return Err(format!("Invalid URI scheme: {:?}", scheme));
        }

        let rest = &raw[colon + 1..];
        // Drop query and fragment
        let hier = rest
            .find(|c| c == '?' || c == '#')
            .map(|end| &rest[..end])
            .unwrap_or(rest);

        let (authority, raw_path) = if let Some(after) = hier.strip_prefix("//") {
            match after.find('/') {
                Some(slash) => (Some(&after[..slash]), Some(&after[slash..])),
                None => (Some(after), None),
            }
        } else if hier.starts_with('/') {
            (None, Some(hier))
        } else {
            // Opaque URI such as `file:relative` has no path component
            (None, None)
        };

        Ok(Self {
            raw: raw.to_string(),
            scheme: scheme.to_string(),
            authority: authority.filter(|a| !a.is_empty()).map(str::to_string),
            raw_path: raw_path.filter(|p| !p.is_empty()).map(str::to_string),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// The full textual form, as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Decoded path, or `None` for URIs without a path component.
    pub fn path(&self) -> Option<String> {
        self.raw_path.as_deref().map(|p| decode(p).into_owned())
    }

    /// Decoded, non-empty path segments.
    pub fn path_segments(&self) -> Vec<String> {
        self.raw_path
            .as_deref()
            .unwrap_or("")
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| decode(s).into_owned())
            .collect()
    }

    pub fn last_path_segment(&self) -> Option<String> {
        self.path_segments().pop()
    }

    pub fn is_file_scheme(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("file")
    }

    pub fn is_content_scheme(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("content")
    }

    /// Document id of a document URI: `/document/<id>` or
    /// `/tree/<tree>/document/<id>`.
    pub fn document_id(&self) -> Option<String> {
        let mut segments = self.path_segments();
        match segments.len() {
            2 if segments[0] == "document" => segments.pop(),
            4 if segments[0] == "tree" && segments[2] == "document" => segments.pop(),
            _ => None,
        }
    }

    /// Whether the path has the shape of a document URI. Providers that can
    /// ask the platform should prefer that answer.
    pub fn is_document_shaped(&self) -> bool {
        self.is_content_scheme() && self.document_id().is_some()
    }

    /// Append a numeric id as a new path segment.
    pub fn with_appended_id(&self, id: u64) -> Result<Self, String> {
        let base = match self.raw.find(|c| c == '?' || c == '#') {
            Some(end) => &self.raw[..end],
            None => self.raw.as_str(),
        };
        Self::parse(&format!("{}/{}", base.trim_end_matches('/'), id))
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

fn decode(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or(Cow::Borrowed(s))
}
