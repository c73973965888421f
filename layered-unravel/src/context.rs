//! Rendering configuration.
//!
//! [`RenderContext`] holds per-corpus settings and is usually read once from
//! TOML. [`DisplayOptions`] holds the settings of a single request.

use crate::{UnravelError, UnravelResult};
use layered_corpus::{Node, TypeTable, Value};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Settings of one display format.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormatSpec {
    /// Type whose nodes carry the text in this format; the slot type if unset.
    pub descend_type: Option<String>,
    /// CSS class for text in this format.
    pub text_cls: Option<String>,
}

/// Per-corpus rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderContext {
    /// Types rendered by their first slot only.
    pub lex_types: BTreeSet<String>,
    /// For a type, the only types to descend into.
    pub descendant_type: BTreeMap<String, BTreeSet<String>>,
    /// Per type, feature values that exclude a node from rendering.
    pub exclusions: BTreeMap<String, BTreeMap<String, Value>>,
    /// Per type, the text class that replaces the format's class.
    pub styles: BTreeMap<String, String>,
    /// Per type, CSS classes used in pretty mode.
    pub level_cls: BTreeMap<String, BTreeMap<String, String>>,
    pub formats: BTreeMap<String, FormatSpec>,
    /// Types that are rendered as a leaf unless full display is asked for.
    pub big_types: BTreeSet<String>,
    /// Verse-like types: in plain display they are big only inside a tuple,
    /// unless `show_verse_in_tuple` is set.
    pub verse_types: BTreeSet<String>,
    pub show_verse_in_tuple: bool,
    /// Types whose nodes carry graphics.
    pub has_graphics: BTreeSet<String>,
    /// Per type, material rendered after each child.
    pub after_child: BTreeMap<String, String>,
    pub default_text_cls: String,
}

impl RenderContext {
    pub fn from_toml_str(text: &str) -> UnravelResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Check that every type named in the settings exists.
    pub fn validate(&self, otype: &TypeTable) -> UnravelResult<()> {
        let descendants = self.descendant_type.values().flatten();
        let format_types = self
            .formats
            .values()
            .filter_map(|format| format.descend_type.as_ref());
        check_types(otype, "lex_types", self.lex_types.iter())?;
        check_types(otype, "descendant_type", self.descendant_type.keys().chain(descendants))?;
        check_types(otype, "exclusions", self.exclusions.keys())?;
        check_types(otype, "styles", self.styles.keys())?;
        check_types(otype, "level_cls", self.level_cls.keys())?;
        check_types(otype, "formats", format_types)?;
        check_types(otype, "big_types", self.big_types.iter())?;
        check_types(otype, "verse_types", self.verse_types.iter())?;
        check_types(otype, "has_graphics", self.has_graphics.iter())?;
        check_types(otype, "after_child", self.after_child.keys())?;
        Ok(())
    }
}

fn check_types<'a, I>(otype: &TypeTable, setting: &'static str, types: I) -> UnravelResult<()>
where
    I: IntoIterator<Item = &'a String>,
{
    for name in types {
        if otype.position(name).is_none() {
            return Err(UnravelError::UnknownType {
                setting,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Per-request display settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Expand big nodes too.
    pub full: bool,
    /// Display format; selects the descend type and text class.
    pub fmt: Option<String>,
    /// Drop nodes of `hidden_types`.
    pub hide_types: bool,
    pub hidden_types: BTreeSet<String>,
    /// Types flagged as base types in the output.
    pub base_types: BTreeSet<String>,
    /// Types before this one in canonical order count as big.
    pub condense_type: Option<String>,
    /// Attach level classes.
    pub pretty: bool,
    /// The node is displayed as a member of a tuple.
    pub in_tuple: bool,
    pub direction: TextDirection,
    /// Highlighted nodes, with an optional colour.
    #[serde(skip)]
    pub highlights: BTreeMap<Node, Option<String>>,
}

impl DisplayOptions {
    pub fn from_toml_str(text: &str) -> UnravelResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_highlight(mut self, n: Node, color: Option<&str>) -> Self {
        self.highlights.insert(n, color.map(str::to_string));
        self
    }

    pub fn validate(&self, otype: &TypeTable) -> UnravelResult<()> {
        check_types(otype, "hidden_types", self.hidden_types.iter())?;
        check_types(otype, "base_types", self.base_types.iter())?;
        check_types(otype, "condense_type", self.condense_type.iter())?;
        Ok(())
    }
}

/// Diagnostic dump mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Explain {
    /// One line per tree entry.
    Plain,
    /// Each entry followed by its node context.
    Details,
}

impl FromStr for Explain {
    type Err = UnravelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Explain::Plain),
            "details" => Ok(Explain::Details),
            other => Err(UnravelError::InvalidExplain(other.to_string())),
        }
    }
}
