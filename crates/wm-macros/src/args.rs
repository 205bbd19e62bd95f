//! Keyword arguments passed to macro handlers.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::MacroError;

/// Value of a single keyword argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Bare name without a value: `[macro ... wide]`.
    Flag,
    /// Text after the colon, unescaped when it was quoted.
    Text(String),
}

impl ArgValue {
    /// Text of the value, `None` for a bare flag.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Parsed keyword arguments of one directive.
///
/// Keys are unique; inserting an existing key replaces its value, so the last
/// occurrence in the source wins.
///
/// # Example
///
/// ```
/// use wm_macros::{ArgValue, MacroArgs};
///
/// let mut args = MacroArgs::new();
/// args.insert("depth", ArgValue::Text("3".to_owned()));
///
/// let depth: Option<u32> = args.parse("depth").unwrap();
/// assert_eq!(depth, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroArgs {
    values: HashMap<String, ArgValue>,
}

impl MacroArgs {
    /// Create an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an argument, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    /// Get an argument value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Get the text of an argument. Returns `None` for missing names and flags.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_text)
    }

    /// Check whether an argument is present, either as a flag or with a value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Coerce an argument from its text form.
    ///
    /// Returns `Ok(None)` if the argument is absent.
    ///
    /// # Errors
    ///
    /// [`MacroError::MissingValue`] if the argument is a bare flag,
    /// [`MacroError::InvalidArgument`] if the text does not parse as `T`.
    pub fn parse<T>(&self, name: &str) -> Result<Option<T>, MacroError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(name) {
            None => Ok(None),
            Some(ArgValue::Flag) => Err(MacroError::MissingValue {
                arg: name.to_owned(),
            }),
            Some(ArgValue::Text(text)) => {
                text.trim()
                    .parse()
                    .map(Some)
                    .map_err(|e: T::Err| MacroError::InvalidArgument {
                        arg: name.to_owned(),
                        value: text.clone(),
                        reason: e.to_string(),
                    })
            }
        }
    }

    /// Reject arguments a handler does not declare.
    ///
    /// # Errors
    ///
    /// [`MacroError::UnexpectedArgument`] naming the first (alphabetically)
    /// argument not in `accepted`.
    pub fn expect_only(&self, accepted: &[&str]) -> Result<(), MacroError> {
        let mut unexpected: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|name| !accepted.contains(name))
            .collect();
        unexpected.sort_unstable();

        match unexpected.first() {
            Some(name) => Err(MacroError::UnexpectedArgument {
                arg: (*name).to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Iterate over all arguments in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
