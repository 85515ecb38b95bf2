#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;

use super::TokenSet;

/// The categories a token set is grouped by.
///
/// `key()` is the segment used in generator configs and dotted paths,
/// `alias()` the descriptive name also accepted in both places.
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[func(pub fn key(&self) -> &'static str)]
#[func(pub fn alias(&self) -> &'static str)]
#[func(pub fn count(&self, tokens: &TokenSet) -> usize)]
pub enum TokenCategory {
    /// Palettes, either a single color or a scale of shades.
    #[assoc(key = "colors")]
    #[assoc(alias = "colorScales")]
    #[assoc(count = tokens.colors.len())]
    Colors,
    /// Font names in fallback order.
    #[assoc(key = "fontFamily")]
    #[assoc(alias = "fontFamilies")]
    #[assoc(count = tokens.font_family.len())]
    FontFamily,
    /// CSS `box-shadow` values.
    #[assoc(key = "boxShadow")]
    #[assoc(alias = "shadows")]
    #[assoc(count = tokens.box_shadow.len())]
    BoxShadow,
    /// CSS `animation` shorthand values.
    #[assoc(key = "animation")]
    #[assoc(alias = "animations")]
    #[assoc(count = tokens.animation.len())]
    Animation,
    /// Named keyframe step sequences.
    #[assoc(key = "keyframes")]
    #[assoc(alias = "keyframes")]
    #[assoc(count = tokens.keyframes.len())]
    Keyframes,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 5] = [
        TokenCategory::Colors,
        TokenCategory::FontFamily,
        TokenCategory::BoxShadow,
        TokenCategory::Animation,
        TokenCategory::Keyframes,
    ];

    /// Resolves the first segment of a dotted token path.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == segment || category.alias() == segment)
    }

    /// Joins `segments` onto this category's key, e.g. `colors.primary.500`.
    pub fn path(&self, segments: &[&str]) -> String {
        let mut path = self.key().to_string();
        for segment in segments {
            path.push('.');
            path.push_str(segment);
        }
        path
    }
}
