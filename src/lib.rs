//! Pug Runtime - string-rendering primitives for compiled templates
//!
//! Compiled template code builds its output by calling into this crate: it
//! escapes text, renders class lists and inline styles, serializes attributes,
//! merges attribute sets passed through mixins, and attaches source context to
//! errors raised while a template runs.
//!
//! # Example
//!
//! ```rust
//! use pug_runtime::{attrs, merge, AttributeMap};
//!
//! let tag = AttributeMap::new().with("href", "/home").with("class", "nav");
//! let mixin = AttributeMap::new().with("class", "active");
//!
//! let html = attrs(&merge(tag, &mixin), true);
//! assert_eq!(html, r#" class="nav active" href="/home""#);
//! ```

pub mod config;
pub mod error;
pub mod escape;
pub mod merge;
pub mod renderer;
pub mod value;

use std::path::Path;

pub use config::{ConfigError, RuntimeConfig};
pub use error::{rethrow, rethrow_with, TemplateError, Thrown};
pub use escape::{escape, escape_value};
pub use merge::{merge, merge_all, merge_into, merged};
pub use renderer::{attr, attrs, classes, style};
pub use value::{AttributeMap, Map, ToJson, Value};

/// Runtime helpers bound to a [`RuntimeConfig`]
///
/// The free functions take every option as an argument. `Runtime` fixes the
/// doctype (`terse`) and the error-context settings once, which is how a
/// template engine usually drives them.
#[derive(Debug, Clone, Default)]
pub struct Runtime {
    config: RuntimeConfig,
}

impl Runtime {
    /// Create a runtime with the given configuration
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Render a single attribute using the configured doctype
    pub fn attr(&self, key: &str, value: &Value, escaped: bool) -> String {
        attr(key, value, escaped, self.config.terse)
    }

    /// Render an attribute map using the configured doctype
    pub fn attrs(&self, map: &AttributeMap) -> String {
        attrs(map, self.config.terse)
    }

    /// Re-raise `thrown` with context from the template source
    pub fn rethrow<T>(
        &self,
        thrown: impl Into<Thrown>,
        filename: Option<&Path>,
        lineno: usize,
        source: Option<&str>,
    ) -> Result<T, Thrown> {
        rethrow_with(&self.config, thrown, filename, lineno, source)
    }
}
