use std::borrow::Cow;

use anyhow::{Context, Result, anyhow};
use smallvec::SmallVec;

use crate::theme::{TokenConfig, TokenSet};

/// Token documents resolved from a chain of providers, first match wins.
pub struct Assets<const N: usize> {
    providers: SmallVec<[Box<dyn AssetProvider>; N]>,
}

impl<const N: usize> Assets<N> {
    pub fn new(providers: [Box<dyn AssetProvider>; N]) -> Assets<N> {
        Self {
            providers: SmallVec::from(providers),
        }
    }

    pub fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        if path.is_empty() {
            return Ok(None);
        }

        for provider in &self.providers {
            let asset = provider.get(path);

            if asset.is_some() {
                return Ok(asset);
            }
        }

        Err(anyhow!("could not find token document at path \"{path}\""))
    }

    pub fn list(&self, path: &str) -> Result<Vec<String>> {
        Ok(self
            .providers
            .iter()
            .flat_map(|assets| assets.list(path).into_iter())
            .flatten()
            .collect())
    }

    pub fn load_token_set(&self, path: &str) -> Result<TokenSet> {
        let bytes = self.require(path)?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse token set \"{path}\""))
    }

    pub fn load_config(&self, path: &str) -> Result<TokenConfig> {
        let bytes = self.require(path)?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse token config \"{path}\""))
    }

    fn require(&self, path: &str) -> Result<Cow<'static, [u8]>> {
        self.load(path)?
            .ok_or_else(|| anyhow!("token document path is empty"))
    }
}

#[macro_export]
macro_rules! assets {
    ( $( $item:expr ),* $(,)? ) => {
        $crate::Assets::new([
            $( Box::new($item) ),*
        ])
    };
}

pub trait AssetProvider: Send + Sync {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>>;
    fn list(&self, path: &str) -> Result<Vec<String>>;
}
