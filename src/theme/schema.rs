use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use smallvec::SmallVec;
use thiserror::Error;

use super::deserializers::{de_keyframe_steps, de_string_or_non_empty_list, ser_keyframe_steps};
use crate::{registry::LoadError, utils::split_top_level};

/// Shade key to color value, e.g. `500 => "#0ea5e9"` or `DEFAULT => "#FF9900"`.
pub type ColorScale = IndexMap<String, String>;

/// Shade resolved when a scale is referenced without one.
pub const DEFAULT_SHADE: &str = "DEFAULT";

/// A set of design tokens, grouped by category.
///
/// Every map keeps its authored order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    #[serde(default, alias = "colorScales", skip_serializing_if = "IndexMap::is_empty")]
    pub colors: IndexMap<String, ColorToken>,
    #[serde(default, alias = "fontFamilies", skip_serializing_if = "IndexMap::is_empty")]
    pub font_family: IndexMap<String, FontFamily>,
    #[serde(default, alias = "shadows", skip_serializing_if = "IndexMap::is_empty")]
    pub box_shadow: IndexMap<String, String>,
    #[serde(default, alias = "animations", skip_serializing_if = "IndexMap::is_empty")]
    pub animation: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub keyframes: IndexMap<String, Keyframes>,
}

macro_rules! generate_builtin_token_documents {
    ( $( [$path:literal, $name:ident] ),+ ) => {
        $(
            pub fn $name() -> Result<Self, serde_json::Error> {
                serde_json::from_str(include_str!($path))
            }
        )+
    };
}

impl TokenSet {
    generate_builtin_token_documents!(["../../tokens/base.json", base]);

    pub fn from_string<S: AsRef<str>>(str: S) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(str.as_ref())?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        read_document(path.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.font_family.is_empty()
            && self.box_shadow.is_empty()
            && self.animation.is_empty()
            && self.keyframes.is_empty()
    }
}

/// A palette entry: either one color or a scale of shades.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorToken {
    Value(String),
    Scale(ColorScale),
}

impl ColorToken {
    pub fn scale<K, V>(shades: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Scale(
            shades
                .into_iter()
                .map(|(shade, color)| (shade.into(), color.into()))
                .collect(),
        )
    }
}

impl From<&str> for ColorToken {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

/// Font names in fallback order. The first entry is preferred.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct FontFamily {
    #[serde(deserialize_with = "de_string_or_non_empty_list")]
    pub names: SmallVec<[String; 2]>,
}

impl FontFamily {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn preferred(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// The ordered steps of a keyframe definition.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Keyframes {
    #[serde(
        deserialize_with = "de_keyframe_steps",
        serialize_with = "ser_keyframe_steps"
    )]
    pub steps: Vec<KeyframeStep>,
}

impl Keyframes {
    pub fn new(steps: impl IntoIterator<Item = KeyframeStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }
}

/// Property values at one or more progress points, e.g. `0%, 100%`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStep {
    pub selector: String,
    pub properties: IndexMap<String, String>,
}

impl KeyframeStep {
    pub fn new<K, V>(
        selector: impl Into<String>,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            selector: selector.into(),
            properties: properties
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Parses the selector into its progress points, in authored order.
    pub fn offsets(&self) -> Result<SmallVec<[KeyframeOffset; 2]>, InvalidKeyframeOffset> {
        split_top_level(&self.selector, ',')
            .into_iter()
            .map(KeyframeOffset::parse)
            .collect()
    }
}

/// A keyframe progress point as a percentage in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeOffset(pub f32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a keyframe offset, expected `from`, `to` or a percentage from 0% to 100%")]
pub struct InvalidKeyframeOffset(pub String);

impl KeyframeOffset {
    pub fn parse(point: &str) -> Result<Self, InvalidKeyframeOffset> {
        match point {
            "from" => Ok(Self(0.)),
            "to" => Ok(Self(100.)),
            _ => point
                .strip_suffix('%')
                .and_then(|percent| percent.parse::<f32>().ok())
                .filter(|percent| (0.0..=100.0).contains(percent))
                .map(Self)
                .ok_or_else(|| InvalidKeyframeOffset(point.to_string())),
        }
    }
}

/// A configuration document for the utility-class generator.
///
/// `theme.<category>` replaces a whole base category while `theme.extend`
/// is merged over the base.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TokenConfig {
    /// Source globs scanned by the generator. Carried through untouched.
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub theme: ThemeSection,
    /// Accepted so generator configs parse, but never loaded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<serde_json::Value>,
}

impl TokenConfig {
    generate_builtin_token_documents!(["../../tokens/site.json", site]);

    pub fn from_string<S: AsRef<str>>(str: S) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(str.as_ref())?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        read_document(path.as_ref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSection {
    #[serde(default, alias = "colorScales", skip_serializing_if = "Option::is_none")]
    pub colors: Option<IndexMap<String, ColorToken>>,
    #[serde(default, alias = "fontFamilies", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<IndexMap<String, FontFamily>>,
    #[serde(default, alias = "shadows", skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<IndexMap<String, String>>,
    #[serde(default, alias = "animations", skip_serializing_if = "Option::is_none")]
    pub animation: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyframes: Option<IndexMap<String, Keyframes>>,
    #[serde(default)]
    pub extend: TokenSet,
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(serde_json::from_str(&content)?)
}
