use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    registry::TokenRegistry,
    theme::{TokenCategory, TokenConfig, TokenSet, TokensExt},
};

/// Builds the registry for the bundled site configuration over the bundled base.
pub fn init() -> Result<TokenRegistry> {
    let base = TokenSet::base().context("failed to parse bundled base tokens")?;
    let config = TokenConfig::site().context("failed to parse bundled site config")?;

    let registry = TokenRegistry::from_config(&base, &config)
        .context("bundled site tokens failed validation")?;

    debug!(
        colors = TokenCategory::Colors.count(registry.tokens()),
        keyframes = TokenCategory::Keyframes.count(registry.tokens()),
        "loaded bundled tokens"
    );

    Ok(registry)
}
