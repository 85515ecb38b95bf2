#![allow(missing_docs)] // Derive macros generate undocumented methods.

use std::borrow::Cow;

use anyhow::Result;
use enum_assoc::Assoc;
use rust_embed::RustEmbed;

use crate::assets::assets::AssetProvider;

/// Token documents bundled with the crate.
#[derive(RustEmbed)]
#[folder = "tokens/"]
#[include = "**/*.json"]
#[exclude = "*.DS_Store"]
pub struct TokenAssets;

impl AssetProvider for TokenAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        <Self as RustEmbed>::get(path).map(|f| f.data)
    }

    fn list(&self, path: &str) -> Result<Vec<String>> {
        Ok(TokenAssets::iter()
            .filter(|p| p.starts_with(path))
            .map(|p| p.into_owned())
            .collect())
    }
}

/// Documents shipped in [`TokenAssets`].
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn path(&self) -> &'static str)]
pub enum BuiltinTokenDocument {
    /// The generator's default theme subset.
    #[assoc(path = "base.json")]
    Base,

    /// The site configuration extending the base.
    #[assoc(path = "site.json")]
    Site,
}

impl From<BuiltinTokenDocument> for &'static str {
    fn from(document: BuiltinTokenDocument) -> Self {
        document.path()
    }
}
