//! Build configuration: JSON loading and selector-rule resolution.
//!
//! The `selectors` value in the config maps each CSS pattern to either a bare
//! category string, a transform object, or a list of transform objects. All
//! three shapes normalize to an ordered `Vec<Transform>` here, and every
//! selector pattern and regexp compiles during load, so a build never starts
//! with a rule that can fail to compile later.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::dom::{self, SelectorGroup};
use crate::error::{Error, Result};

/// How to turn a matched node into an index entry.
#[derive(Debug, Clone)]
pub struct Transform {
    /// Free-form category label ("Function", "Guide", ...).
    pub entry_type: String,
    /// Source the symbol name from this attribute instead of the node text.
    pub attribute: Option<String>,
    /// Post-process the name: replace all matches with `replacement`.
    pub regexp: Option<Regex>,
    pub replacement: String,
    /// Skip nodes whose extracted text does not match.
    pub require_text: Option<Regex>,
    /// Skip this transform for documents whose path does not match.
    pub match_path: Option<Regex>,
}

/// A compiled selector pattern with its transform passes.
#[derive(Debug, Clone)]
pub struct SelectorRule {
    pub pattern: String,
    pub selectors: SelectorGroup,
    pub transforms: Vec<Transform>,
}

/// Fully resolved build configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Human-oriented bundle name.
    pub name: String,
    /// Computer-readable package identifier; names the output bundle.
    pub package: String,
    /// Index page path inside the bundle.
    pub index: String,
    /// Rules in configuration order.
    pub rules: Vec<SelectorRule>,
    /// Symbol names that never produce index entries.
    pub ignore: HashSet<String>,
    /// Optional 32x32 PNG installed as the bundle icon.
    pub icon32x32: Option<PathBuf>,
    pub allow_js: bool,
    /// Source document-root depth, consumed by the link rewriter.
    pub source_depth: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    name: String,
    package: String,
    index: String,
    selectors: serde_json::Map<String, Value>,
    ignore: Vec<String>,
    icon32x32: String,
    #[serde(rename = "allowJS")]
    allow_js: bool,
    #[serde(rename = "sourceDepth")]
    source_depth: usize,
}

impl Config {
    /// Load and resolve a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Resolve a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;

        if raw.package.is_empty() {
            return Err(Error::Config("missing 'package' identifier".to_string()));
        }

        let mut rules = Vec::with_capacity(raw.selectors.len());
        for (pattern, value) in &raw.selectors {
            let selectors =
                dom::compile(pattern).ok_or_else(|| Error::Selector(pattern.clone()))?;
            rules.push(SelectorRule {
                pattern: pattern.clone(),
                selectors,
                transforms: decode_transforms(pattern, value)?,
            });
        }

        Ok(Self {
            name: raw.name,
            package: raw.package,
            index: raw.index,
            rules,
            ignore: raw.ignore.into_iter().collect(),
            icon32x32: if raw.icon32x32.is_empty() {
                None
            } else {
                Some(PathBuf::from(raw.icon32x32))
            },
            allow_js: raw.allow_js,
            source_depth: raw.source_depth,
        })
    }

    /// Display name for the bundle, falling back to the package identifier.
    pub fn fancy_name(&self) -> String {
        if self.name.is_empty() {
            self.package.to_uppercase()
        } else {
            self.name.clone()
        }
    }
}

/// Normalize one selector value into its transform list.
fn decode_transforms(pattern: &str, value: &Value) -> Result<Vec<Transform>> {
    match value {
        Value::String(entry_type) => Ok(vec![Transform {
            entry_type: entry_type.clone(),
            attribute: None,
            regexp: None,
            replacement: String::new(),
            require_text: None,
            match_path: None,
        }]),
        Value::Object(fields) => Ok(vec![decode_transform(pattern, fields)?]),
        Value::Array(items) => {
            let mut transforms = Vec::with_capacity(items.len());
            for item in items {
                let Value::Object(fields) = item else {
                    return Err(Error::Config(format!(
                        "selector '{pattern}': list entries must be transform objects"
                    )));
                };
                transforms.push(decode_transform(pattern, fields)?);
            }
            Ok(transforms)
        }
        other => Err(Error::Config(format!(
            "selector '{pattern}': expected string, object, or list, got {other}"
        ))),
    }
}

fn decode_transform(pattern: &str, fields: &serde_json::Map<String, Value>) -> Result<Transform> {
    let mut entry_type = String::new();
    let mut attribute = None;
    let mut replacement = String::new();
    let mut regexp_src = None;
    let mut require_src = None;
    let mut match_src = None;

    for (key, value) in fields {
        let Some(text) = value.as_str() else {
            return Err(Error::Config(format!(
                "selector '{pattern}': transform field '{key}' must be a string"
            )));
        };
        match key.as_str() {
            "type" => entry_type = text.to_string(),
            "attr" => attribute = Some(text.to_string()),
            "regexp" => regexp_src = Some(text),
            "replacement" => replacement = text.to_string(),
            "requiretext" => require_src = Some(text),
            "matchpath" => match_src = Some(text),
            _ => {
                return Err(Error::Config(format!(
                    "selector '{pattern}': unknown transform field '{key}'"
                )));
            }
        }
    }

    Ok(Transform {
        entry_type,
        attribute,
        regexp: regexp_src.map(Regex::new).transpose()?,
        replacement,
        require_text: require_src.map(Regex::new).transpose()?,
        match_path: match_src.map(Regex::new).transpose()?,
    })
}
