//! ## testlog-core::record
//! **Key/value context and the record handed to handlers**
//!
//! Call sites pass context as a flat list alternating key then value, the
//! way most structured loggers take it. Pairing happens here. A dangling
//! trailing element is kept under the [`BAD_KEY`] placeholder instead of
//! being dropped or rejected.

use std::fmt::{self, Display};
use std::panic::Location;

use crate::level::Level;

/// Placeholder key for a value without a key.
pub const BAD_KEY: &str = "!BADKEY";

/// A single rendered key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub key: String,
    pub value: String,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quoting(&self.value) {
            write!(f, "{}={:?}", self.key, self.value)
        } else {
            write!(f, "{}={}", self.key, self.value)
        }
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '=' || c == '"' || c.is_control())
}

/// Ordered list of context attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(Vec<Attr>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs an alternating key/value list.
    pub fn from_ctx(ctx: &[&dyn Display]) -> Self {
        let mut attrs = Self::default();
        attrs.extend_ctx(ctx);
        attrs
    }

    pub fn extend_ctx(&mut self, ctx: &[&dyn Display]) {
        self.0.reserve(ctx.len().div_ceil(2));
        for pair in ctx.chunks(2) {
            match pair {
                [key, value] => self.0.push(Attr::new(key.to_string(), value.to_string())),
                [value] => self.0.push(Attr::new(BAD_KEY, value.to_string())),
                _ => unreachable!("chunks(2) yields one or two elements"),
            }
        }
    }

    /// Appends `other` after the attributes already held.
    pub fn chain(&self, other: Attrs) -> Attrs {
        let mut merged = self.0.clone();
        merged.extend(other.0);
        Attrs(merged)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in &self.0 {
            write!(f, " {attr}")?;
        }
        Ok(())
    }
}

/// A log record as seen by a [`Handler`](crate::Handler).
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub level: Level,
    pub message: &'a str,
    pub attrs: Attrs,
    /// Call site the record was written from, if known.
    pub caller: Option<&'static Location<'static>>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str, attrs: Attrs) -> Self {
        Self {
            level,
            message,
            attrs,
            caller: None,
        }
    }

    pub fn with_caller(mut self, caller: &'static Location<'static>) -> Self {
        self.caller = Some(caller);
        self
    }
}

impl Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.message, self.attrs)
    }
}
