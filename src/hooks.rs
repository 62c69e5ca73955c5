//! Caller-supplied URI extension points.
//!
//! Two optional callbacks, passed explicitly into the operations that need
//! them: resolving a URI against the playlist's base URL before a fetch, and
//! formatting a URI on serialization. Without a hook the raw URI passes
//! through unchanged.

/// A URI callback: receives the base URL (if any) and the raw URI, and may
/// return a substitute.
pub type UriHook = Box<dyn Fn(Option<&str>, &str) -> Option<String>>;

#[derive(Default)]
pub struct Hooks {
    resolve_uri: Option<UriHook>,
    format_uri: Option<UriHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolve_uri(
        mut self,
        hook: impl Fn(Option<&str>, &str) -> Option<String> + 'static,
    ) -> Self {
        self.resolve_uri = Some(Box::new(hook));
        self
    }

    pub fn with_format_uri(
        mut self,
        hook: impl Fn(Option<&str>, &str) -> Option<String> + 'static,
    ) -> Self {
        self.format_uri = Some(Box::new(hook));
        self
    }

    /// Runs the resolve-URI hook, falling back to the raw URI.
    pub fn resolve(&self, base_url: Option<&str>, uri: &str) -> String {
        apply(&self.resolve_uri, base_url, uri)
    }

    /// Runs the format-URI hook, falling back to the raw URI.
    pub fn format(&self, base_url: Option<&str>, uri: &str) -> String {
        apply(&self.format_uri, base_url, uri)
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("resolve_uri", &self.resolve_uri.is_some())
            .field("format_uri", &self.format_uri.is_some())
            .finish()
    }
}

fn apply(hook: &Option<UriHook>, base_url: Option<&str>, uri: &str) -> String {
    hook.as_ref()
        .and_then(|h| h(base_url, uri))
        .unwrap_or_else(|| uri.to_owned())
}
