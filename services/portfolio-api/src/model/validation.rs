//! Required-field validation for document writes.
use std::fmt;

/// Whether a payload creates a document or patches an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Every required field must be present and non-empty.
    Create,
    /// Only supplied required fields are checked; absent ones keep their stored value
    /// while `null` or empty ones are rejected.
    Update,
}

/// A write rejected because required fields are missing or empty.
///
/// Renders in the document-store style, e.g.
/// ``Image validation failed: artist: Path `artist` is required.``
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub model: &'static str,
    pub mode: WriteMode,
    pub missing: Vec<&'static str>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            WriteMode::Create => write!(f, "{} validation failed: ", self.model)?,
            WriteMode::Update => write!(f, "Validation failed: ")?,
        }
        for (idx, path) in self.missing.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{path}: Path `{path}` is required.")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collects required-field failures for one payload.
pub(crate) struct RequiredFields {
    model: &'static str,
    mode: WriteMode,
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub(crate) fn new(model: &'static str, mode: WriteMode) -> Self {
        Self {
            model,
            mode,
            missing: Vec::new(),
        }
    }

    /// Record `path` as missing when it is null, empty, or absent on create.
    pub(crate) fn check(mut self, path: &'static str, value: &Option<Option<String>>) -> Self {
        let missing = match value {
            Some(Some(value)) => value.is_empty(),
            Some(None) => true,
            None => self.mode == WriteMode::Create,
        };
        if missing {
            self.missing.push(path);
        }
        self
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(ValidationError {
            model: self.model,
            mode: self.mode,
            missing: self.missing,
        })
    }
}
