//! The variable table: named colors with per-mode definitions, plus opacities.

use std::collections::HashMap;

use super::color::Color;
use super::error::ValidationError;
use super::mode::Mode;

/// An insertion-ordered map. Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, PartialEq)]
struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    fn insert(&mut self, key: &str, value: V) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value));
            }
        }
    }

    fn entry_or_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The definitions of one color variable, keyed by mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeValues {
    light: Option<Color>,
    dark: Option<Color>,
}

impl ModeValues {
    /// Returns the definition for `mode`, if any.
    pub fn get(&self, mode: Mode) -> Option<&Color> {
        match mode {
            Mode::Light => self.light.as_ref(),
            Mode::Dark => self.dark.as_ref(),
        }
    }

    /// Sets the definition for `mode`, replacing any previous one.
    pub fn set(&mut self, mode: Mode, color: Color) {
        match mode {
            Mode::Light => self.light = Some(color),
            Mode::Dark => self.dark = Some(color),
        }
    }

    /// Iterates over the defined modes in [`Mode::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, &Color)> {
        Mode::ALL
            .into_iter()
            .filter_map(move |mode| self.get(mode).map(|color| (mode, color)))
    }

    /// Returns true if no mode is defined.
    pub fn is_empty(&self) -> bool {
        self.light.is_none() && self.dark.is_none()
    }
}

/// Result of looking up a variable under one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The variable has a definition for the mode.
    Defined(&'a Color),
    /// The variable exists but has no definition for the mode.
    NotDefined,
}

/// Named color variables (each with per-mode definitions) and named opacities.
///
/// Iteration follows insertion order so generated output is stable across
/// runs. Once built, a table is only read: resolvers and generators borrow it.
///
/// # Example
///
/// ```rust
/// use stylevars::{Color, Lookup, Mode, VariableTable};
///
/// let table = VariableTable::new()
///     .add("accent", Color::rgb(255, 0, 0))
///     .add_mode("accent", Mode::Dark, Color::rgb(255, 128, 128))
///     .add("accent_faded", Color::rgb_alias("accent", "faded"))
///     .add_opacity("faded", 0.5);
///
/// assert!(table.exists("accent"));
/// assert!(matches!(table.lookup("accent_faded", Mode::Dark), Ok(Lookup::NotDefined)));
/// assert_eq!(table.opacity("faded"), Some(0.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTable {
    colors: OrderedMap<ModeValues>,
    opacities: OrderedMap<f64>,
    in_files: Vec<String>,
}

impl VariableTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a color for the default mode ([`Mode::Light`]), returning the table
    /// for chaining.
    pub fn add(self, name: &str, color: Color) -> Self {
        self.add_mode(name, Mode::default(), color)
    }

    /// Adds a color for a specific mode, returning the table for chaining.
    pub fn add_mode(mut self, name: &str, mode: Mode, color: Color) -> Self {
        self.insert_color(name, mode, color);
        self
    }

    /// Adds a named opacity, returning the table for chaining.
    pub fn add_opacity(mut self, name: &str, value: f64) -> Self {
        self.insert_opacity(name, value);
        self
    }

    /// Records the identifier of a source the table was built from.
    pub fn add_source(mut self, source: impl Into<String>) -> Self {
        self.in_files.push(source.into());
        self
    }

    pub(crate) fn insert_color(&mut self, name: &str, mode: Mode, color: Color) {
        self.colors.entry_or_default(name).set(mode, color);
    }

    pub(crate) fn insert_opacity(&mut self, name: &str, value: f64) {
        self.opacities.insert(name, value);
    }

    /// Looks up `name` under `mode`.
    ///
    /// A variable that exists without a definition for `mode` is
    /// [`Lookup::NotDefined`]; a variable that doesn't exist at all is an
    /// [`ValidationError::UndefinedReference`] with an empty `from`.
    pub fn lookup(&self, name: &str, mode: Mode) -> Result<Lookup<'_>, ValidationError> {
        let values = self
            .colors
            .get(name)
            .ok_or_else(|| ValidationError::unknown(name))?;
        Ok(match values.get(mode) {
            Some(color) => Lookup::Defined(color),
            None => Lookup::NotDefined,
        })
    }

    /// Returns true if a color variable named `name` exists.
    pub fn exists(&self, name: &str) -> bool {
        self.colors.contains(name)
    }

    /// Returns the per-mode definitions of `name`.
    pub fn get(&self, name: &str) -> Option<&ModeValues> {
        self.colors.get(name)
    }

    /// Iterates over color variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModeValues)> {
        self.colors.iter()
    }

    /// Returns the value of an opacity variable.
    pub fn opacity(&self, name: &str) -> Option<f64> {
        self.opacities.get(name).copied()
    }

    /// Returns true if an opacity variable named `name` exists.
    pub fn has_opacity(&self, name: &str) -> bool {
        self.opacities.contains(name)
    }

    /// Iterates over opacity variables in insertion order.
    pub fn opacities(&self) -> impl Iterator<Item = (&str, f64)> {
        self.opacities.iter().map(|(name, value)| (name, *value))
    }

    /// Identifiers of the sources this table was built from, in load order.
    pub fn in_files(&self) -> &[String] {
        &self.in_files
    }

    /// Returns the number of color variables.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if there are neither colors nor opacities.
    pub fn is_empty(&self) -> bool {
        self.colors.len() == 0 && self.opacities.len() == 0
    }

    /// Merges another table into this one.
    ///
    /// Definitions from `other` replace same-named definitions per mode;
    /// new names are appended in `other`'s order.
    pub fn merge(mut self, other: VariableTable) -> Self {
        for (name, values) in other.colors.entries {
            for (mode, color) in values.iter() {
                self.insert_color(&name, mode, color.clone());
            }
        }
        for (name, value) in other.opacities.entries {
            self.insert_opacity(&name, value);
        }
        self.in_files.extend(other.in_files);
        self
    }
}
