//! Check framework for layoutform.
//!
//! Checks inspect a subject (the settings, a layout) and report diagnostic
//! messages without failing. The caller decides what a serious finding
//! means: layout construction, for example, refuses any error-level message.
//!
//! ## Overview
//!
//! - [`CheckMessage`]: A diagnostic message from a check (with level, message, hint, etc.).
//! - [`CheckLevel`]: Severity level (Debug, Info, Warning, Error, Critical).
//! - [`CheckRegistry`]: Registry for check functions over a subject type, with tag-based filtering.
//! - Built-in settings checks: messages are non-empty, `default_max_chars` is positive.
//!
//! ## Examples
//!
//! ```
//! use layoutform_core::checks::{CheckMessage, CheckRegistry};
//! use layoutform_core::settings::Settings;
//!
//! let mut registry: CheckRegistry<Settings> = CheckRegistry::new();
//! registry.register(
//!     |_settings| {
//!         vec![CheckMessage::warning(
//!             "Custom check warning",
//!             Some("Consider fixing this."),
//!             None,
//!             Some("myapp.W001"),
//!         )]
//!     },
//!     &["myapp"],
//! );
//!
//! let messages = registry.run_checks(None, &Settings::default());
//! assert!(!messages.is_empty());
//! ```

use crate::settings::Settings;

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Debugging information.
    Debug = 0,
    /// Informational message.
    Info = 1,
    /// A potential problem.
    Warning = 2,
    /// A definite problem that should be fixed.
    Error = 3,
    /// A critical error that prevents the form from working at all.
    Critical = 4,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A diagnostic message produced by a check.
///
/// Each message has a severity level, a human-readable message, an optional hint,
/// the object that the issue relates to, and an optional identifier.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// The human-readable message describing the issue.
    pub msg: String,
    /// An optional hint on how to fix the issue.
    pub hint: Option<String>,
    /// The object (setting, field id, ...) that has the issue.
    pub obj: Option<String>,
    /// A unique identifier for this check message (e.g. "layout.E001").
    pub id: Option<String>,
}

impl CheckMessage {
    /// Creates a new `CheckMessage` with the given level and details.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: Option<&str>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(String::from),
            obj: obj.map(String::from),
            id: id.map(String::from),
        }
    }

    /// Creates an info-level message.
    pub fn info(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Info, msg, hint, obj, id)
    }

    /// Creates a warning-level message.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Creates an error-level message.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }

    /// Creates a critical-level message.
    pub fn critical(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Critical, msg, hint, obj, id)
    }

    /// Returns `true` if this is a warning or higher severity.
    pub fn is_serious(&self) -> bool {
        self.level >= CheckLevel::Warning
    }

    /// Returns `true` if this is an error or higher severity.
    pub fn is_error(&self) -> bool {
        self.level >= CheckLevel::Error
    }
}

impl std::fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "({id}) ")?;
        }
        write!(f, "{}: {}", self.level, self.msg)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        if let Some(ref obj) = self.obj {
            write!(f, "\n\tObject: {obj}")?;
        }
        Ok(())
    }
}

/// A check function that inspects a subject and returns diagnostic messages.
pub type CheckFn<T> = fn(&T) -> Vec<CheckMessage>;

/// A registered check with associated tags.
struct RegisteredCheck<T: ?Sized> {
    func: CheckFn<T>,
    tags: Vec<String>,
}

/// Registry for check functions over subjects of type `T`.
///
/// Check functions can be registered with tags, and then run all at once
/// or filtered by tag.
pub struct CheckRegistry<T: ?Sized> {
    checks: Vec<RegisteredCheck<T>>,
}

impl<T: ?Sized> CheckRegistry<T> {
    /// Creates a new empty check registry.
    pub const fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Registers a check function with the given tags.
    pub fn register(&mut self, func: CheckFn<T>, tags: &[&str]) {
        self.checks.push(RegisteredCheck {
            func,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        });
    }

    /// Runs all registered checks (or only those matching the given tags)
    /// and collects all resulting messages.
    ///
    /// If `tags` is `None`, all checks are run. If `Some(&["layout"])`,
    /// only checks tagged with "layout" are run.
    pub fn run_checks(&self, tags: Option<&[&str]>, subject: &T) -> Vec<CheckMessage> {
        let mut messages = Vec::new();

        for check in &self.checks {
            let should_run = tags.map_or(true, |filter_tags| {
                filter_tags.iter().any(|t| check.tags.contains(&(*t).to_string()))
            });

            if should_run {
                messages.extend((check.func)(subject));
            }
        }

        messages
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl<T: ?Sized> Default for CheckRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRegistry<Settings> {
    /// Creates a settings check registry pre-loaded with built-in checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(check_messages, &["settings"]);
        registry.register(check_default_max_chars, &["settings"]);
        registry
    }
}

// ============================================================
// Built-in checks
// ============================================================

/// Checks that every validation message is non-empty, since an empty message
/// renders a failing field with no visible explanation.
fn check_messages(settings: &Settings) -> Vec<CheckMessage> {
    let named = [
        ("required_message", &settings.required_message),
        ("invalid_number_message", &settings.invalid_number_message),
        ("invalid_date_message", &settings.invalid_date_message),
        ("max_chars_message", &settings.max_chars_message),
        ("invalid_choice_message", &settings.invalid_choice_message),
    ];

    named
        .iter()
        .filter(|(_, msg)| msg.trim().is_empty())
        .map(|(name, _)| {
            CheckMessage::warning(
                format!("{name} is empty."),
                Some("Set a message users can act on."),
                Some(&format!("settings.{name}")),
                Some("settings.W001"),
            )
        })
        .collect()
}

/// Checks that `default_max_chars` allows at least one character.
fn check_default_max_chars(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    if settings.default_max_chars == 0 {
        messages.push(CheckMessage::error(
            "default_max_chars is 0. Every text edit would be rejected.",
            Some("Set default_max_chars to a positive limit (the default is 1000)."),
            Some("settings.default_max_chars"),
            Some("settings.E001"),
        ));
    }

    messages
}
