//! Template execution errors and source-context enrichment
//!
//! A failure raised while compiled template code runs is handed to
//! [`rethrow`], which points the message at the failing line and raises it
//! again. Reading the template source is best effort: if it fails, the error
//! gets a short note and a line number instead, and the original failure is
//! what propagates.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RuntimeConfig;
use crate::value::Value;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error raised during template execution
///
/// The message is what callers see and what [`rethrow`] enriches. The
/// original error, if any, is kept as the [`source`](StdError::source) so
/// callers can still match on its concrete type.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TemplateError {
    message: String,
    detail: String,
    path: Option<PathBuf>,
    line: Option<usize>,
    sealed: bool,
    #[source]
    cause: Option<BoxError>,
}

impl TemplateError {
    /// Create an error from a plain message
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            detail: message.clone(),
            message,
            path: None,
            line: None,
            sealed: false,
            cause: None,
        }
    }

    /// Wrap an existing error, keeping it as the cause
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut wrapped = Self::new(err.to_string());
        wrapped.cause = Some(Box::new(err));
        wrapped
    }

    /// Mark the message read-only
    ///
    /// Sealed errors still record their path and line, but [`rethrow`] leaves
    /// the message as it is.
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    /// The current, possibly enriched, message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message as originally raised
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Template file the error was attributed to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 1-based template line the error was attributed to
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// The wrapped original error
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Downcast the wrapped original error
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.cause()?.downcast_ref::<E>()
    }

    fn rewrite_message(&mut self, rewrite: impl FnOnce(&str) -> String) {
        if self.sealed {
            warn!(error_message = %self.message, "template error message is sealed, leaving it unchanged");
            return;
        }
        self.message = rewrite(&self.message);
    }

    /// Render an annotated diagnostic for the recorded line
    ///
    /// Returns `None` when no line was recorded or `source` has no such line.
    pub fn report(&self, source: &str) -> Option<String> {
        let line = self.line?;
        let span = line_span(source, line)?;
        let name = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "template".to_string());
        let name = name.as_str();

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, name, span.start)
            .with_config(Config::default().with_color(false))
            .with_message(&self.detail)
            .with_label(Label::new((name, span)).with_message("raised while rendering this line"))
            .finish()
            .write((name, Source::from(source)), &mut buf)
            .ok()?;
        Some(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Anything template execution can raise
#[derive(Debug, Error)]
pub enum Thrown {
    /// A real error, eligible for source context
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A non-error value thrown by template code; passed through untouched
    #[error("{0}")]
    Value(Value),
}

impl Thrown {
    /// Wrap an arbitrary error as a template error
    pub fn error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Thrown::Template(TemplateError::from_error(err))
    }

    pub fn as_template_error(&self) -> Option<&TemplateError> {
        match self {
            Thrown::Template(err) => Some(err),
            Thrown::Value(_) => None,
        }
    }
}

impl From<Value> for Thrown {
    fn from(value: Value) -> Self {
        Thrown::Value(value)
    }
}

/// Re-raise `thrown` with context from `filename` around `lineno`
///
/// Always returns `Err`. Uses the default [`RuntimeConfig`]; see
/// [`rethrow_with`] to control the window size or file access.
///
/// # Example
///
/// ```rust
/// use pug_runtime::{rethrow, TemplateError, Thrown};
///
/// let source = "p hello\np= user.name\np bye";
/// let result: Result<(), Thrown> =
///     rethrow(TemplateError::new("user is undefined"), None, 2, Some(source));
/// let err = result.unwrap_err();
/// assert!(err.to_string().starts_with("Pug:2\n"));
/// assert!(err.to_string().contains("  > 2| p= user.name"));
/// ```
pub fn rethrow<T>(
    thrown: impl Into<Thrown>,
    filename: Option<&Path>,
    lineno: usize,
    source: Option<&str>,
) -> Result<T, Thrown> {
    rethrow_with(&RuntimeConfig::default(), thrown, filename, lineno, source)
}

/// [`rethrow`] with an explicit configuration
pub fn rethrow_with<T>(
    config: &RuntimeConfig,
    thrown: impl Into<Thrown>,
    filename: Option<&Path>,
    lineno: usize,
    source: Option<&str>,
) -> Result<T, Thrown> {
    match thrown.into() {
        Thrown::Template(err) => Err(Thrown::Template(contextualize(
            config, err, filename, lineno, source,
        ))),
        other => Err(other),
    }
}

fn contextualize(
    config: &RuntimeConfig,
    mut err: TemplateError,
    filename: Option<&Path>,
    lineno: usize,
    source: Option<&str>,
) -> TemplateError {
    let source = source.filter(|s| !s.is_empty());

    let text = match (source, filename) {
        (Some(text), _) => Cow::Borrowed(text),
        (None, Some(path)) if config.read_sources => {
            debug!(path = %path.display(), "reading template source for error context");
            match fs::read_to_string(path) {
                Ok(text) => Cow::Owned(text),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read template source");
                    err.rewrite_message(|message| {
                        format!("{} - could not read from {} ({})", message, path.display(), e)
                    });
                    return contextualize(config, err, None, lineno, None);
                }
            }
        }
        _ => {
            err.rewrite_message(|message| format!("{} on line {}", message, lineno));
            err.line = Some(lineno);
            return err;
        }
    };

    let context = context_window(&text, lineno, config.context_lines);
    let name = filename
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| config.default_filename.clone());

    err.path = filename.map(Path::to_path_buf);
    err.line = Some(lineno);
    err.rewrite_message(|message| format!("{}:{}\n{}\n\n{}", name, lineno, context, message));
    err
}

/// Format the lines around `lineno`, marking the failing one with `>`
fn context_window(text: &str, lineno: usize, context: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let end = lines.len().min(lineno.saturating_add(context));
    let start = lineno.saturating_sub(context).min(end);

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let current = start + i + 1;
            let marker = if current == lineno { "  > " } else { "    " };
            format!("{}{}| {}", marker, current, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte range of 1-based `line` within `source`
fn line_span(source: &str, line: usize) -> Option<Range<usize>> {
    let mut start = 0;
    for (i, text) in source.split('\n').enumerate() {
        if i + 1 == line {
            return Some(start..start + text.len());
        }
        start += text.len() + 1;
    }
    None
}
