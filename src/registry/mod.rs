//! The validated, read-only token registry.
//!
//! A [`TokenRegistry`] is built once from a base set and an override set.
//! Construction merges, validates and either returns a ready registry or the
//! first error found. There is no way to change a registry afterwards, so it
//! can be shared between threads freely.

mod animation;
pub use animation::*;

mod error;
pub use error::*;

mod validate;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::theme::{
    ColorScale, ColorToken, KeyframeStep, TokenCategory, TokenConfig, TokenSet, TokensExt,
};

/// A literal value returned by [`TokenRegistry::lookup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue<'a> {
    Color(&'a str),
    ColorScale(&'a ColorScale),
    FontFamily(&'a [String]),
    Shadow(&'a str),
    Animation(&'a str),
    Keyframes(&'a [KeyframeStep]),
}

impl<'a> TokenValue<'a> {
    /// The value as written, for the categories holding a single string.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::Color(value) | Self::Shadow(value) | Self::Animation(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenRegistry {
    tokens: TokenSet,
    animations: IndexMap<String, AnimationSpec>,
    content: Vec<String>,
}

impl TokenRegistry {
    /// Deep merges `overrides` over `base` and validates the result.
    pub fn new(base: &TokenSet, overrides: &TokenSet) -> Result<Self, RegistryError> {
        Self::build(base.merge(overrides), Vec::new())
    }

    /// Builds a registry from a generator configuration document.
    ///
    /// Categories set directly under `theme` replace the base ones, then
    /// `theme.extend` is merged on top.
    pub fn from_config(base: &TokenSet, config: &TokenConfig) -> Result<Self, RegistryError> {
        if !config.plugins.is_empty() {
            warn!(
                plugins = config.plugins.len(),
                "token config lists plugins, which are ignored"
            );
        }

        let replaced = base.replace_categories(&config.theme);
        Self::build(replaced.merge(&config.theme.extend), config.content.clone())
    }

    fn build(tokens: TokenSet, content: Vec<String>) -> Result<Self, RegistryError> {
        let animations = validate::validate(&tokens).inspect_err(|error| {
            warn!(path = %error.path(), %error, "token set failed validation");
        })?;

        debug!(
            animations = animations.len(),
            content = content.len(),
            "token registry ready"
        );

        Ok(Self {
            tokens,
            animations,
            content,
        })
    }

    /// Source globs from the configuration, for the generator to scan.
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// The parsed form of an animation token.
    pub fn animation(&self, name: &str) -> Option<&AnimationSpec> {
        self.animations.get(name)
    }

    /// Looks up a dotted path such as `colors.primary.500` or `keyframes.float`.
    ///
    /// `colors.<palette>` returns the whole scale. Category segments accept
    /// both the config key and its alias, so `shadows.glow` is `boxShadow.glow`.
    pub fn lookup(&self, path: &str) -> Result<TokenValue<'_>, NotFoundError> {
        let not_found = |segment: &str| NotFoundError {
            path: path.to_string(),
            segment: segment.to_string(),
        };

        let mut segments = path.split('.');

        let category = segments.next().unwrap_or_default();
        let category = TokenCategory::from_segment(category).ok_or_else(|| not_found(category))?;
        let name = segments.next().ok_or_else(|| not_found(""))?;

        let value = match category {
            TokenCategory::Colors => match self.tokens.colors.get(name).ok_or_else(|| not_found(name))? {
                ColorToken::Value(value) => TokenValue::Color(value),
                ColorToken::Scale(scale) => match segments.next() {
                    None => return Ok(TokenValue::ColorScale(scale)),
                    Some(shade) => TokenValue::Color(scale.get(shade).ok_or_else(|| not_found(shade))?),
                },
            },
            TokenCategory::FontFamily => TokenValue::FontFamily(
                &self
                    .tokens
                    .font_family
                    .get(name)
                    .ok_or_else(|| not_found(name))?
                    .names,
            ),
            TokenCategory::BoxShadow => TokenValue::Shadow(
                self.tokens.box_shadow.get(name).ok_or_else(|| not_found(name))?,
            ),
            TokenCategory::Animation => TokenValue::Animation(
                self.tokens.animation.get(name).ok_or_else(|| not_found(name))?,
            ),
            TokenCategory::Keyframes => TokenValue::Keyframes(
                &self
                    .tokens
                    .keyframes
                    .get(name)
                    .ok_or_else(|| not_found(name))?
                    .steps,
            ),
        };

        match segments.next() {
            Some(extra) => Err(not_found(extra)),
            None => Ok(value),
        }
    }
}

impl TokensExt for TokenRegistry {
    fn tokens(&self) -> &TokenSet {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::{FontFamily, Keyframes, ThemeSection};

    fn float_overrides() -> TokenSet {
        let mut overrides = TokenSet::default();
        overrides
            .animation
            .insert("float".into(), "float 6s ease-in-out infinite".into());
        overrides.keyframes.insert(
            "float".into(),
            Keyframes::new([
                KeyframeStep::new("0%,100%", [("transform", "translateY(0px)")]),
                KeyframeStep::new("50%", [("transform", "translateY(-15px)")]),
            ]),
        );
        overrides
    }

    fn site_registry() -> TokenRegistry {
        let base = TokenSet::base().expect("bundled base should parse");
        let config = TokenConfig::site().expect("bundled site config should parse");
        TokenRegistry::from_config(&base, &config).expect("site tokens should validate")
    }

    #[test]
    fn test_float_lookup_returns_literals() {
        let overrides = float_overrides();
        let registry =
            TokenRegistry::new(&TokenSet::default(), &overrides).expect("float should validate");

        assert_eq!(
            registry.lookup("animations.float"),
            Ok(TokenValue::Animation("float 6s ease-in-out infinite"))
        );

        let Ok(TokenValue::Keyframes(steps)) = registry.lookup("keyframes.float") else {
            panic!("keyframes.float should resolve to keyframes");
        };
        assert_eq!(steps, overrides.keyframes["float"].steps.as_slice());
        assert_eq!(steps[0].selector, "0%,100%");
        assert_eq!(steps[1].properties["transform"], "translateY(-15px)");
    }

    #[test]
    fn test_dangling_reference_names_animation() {
        let mut overrides = float_overrides();
        overrides
            .animation
            .insert("wiggle".into(), "wiggle 1s ease-in-out infinite".into());

        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("wiggle has no keyframes");

        assert_eq!(
            error,
            RegistryError::DanglingReference(DanglingReferenceError {
                animation: "wiggle".into(),
                keyframe: "wiggle".into(),
            })
        );
        assert_eq!(error.path(), "animation.wiggle");
    }

    #[test]
    fn test_references_resolve_against_merged_keyframes() {
        let mut base = TokenSet::default();
        base.keyframes.insert(
            "pulse".into(),
            Keyframes::new([KeyframeStep::new("50%", [("opacity", ".5")])]),
        );

        let mut overrides = TokenSet::default();
        overrides.animation.insert(
            "pulse-slow".into(),
            "pulse 4s cubic-bezier(0.4, 0, 0.6, 1) infinite".into(),
        );

        let registry = TokenRegistry::new(&base, &overrides).expect("pulse comes from the base");
        let spec = registry.animation("pulse-slow").expect("animation is parsed");
        assert_eq!(spec.keyframe_names().collect::<Vec<_>>(), ["pulse"]);
    }

    #[test]
    fn test_malformed_color_reports_exact_path() {
        let mut overrides = TokenSet::default();
        overrides.colors.insert(
            "primary".into(),
            ColorToken::scale([("400", "#38bdf8"), ("500", "#0ea5e")]),
        );

        let error = TokenRegistry::new(&TokenSet::base().expect("base parses"), &overrides)
            .expect_err("#0ea5e isn't a color");

        let RegistryError::MalformedToken(error) = error else {
            panic!("expected a malformed token error, got {error:?}");
        };
        assert_eq!(error.path, "colors.primary.500");
    }

    #[test]
    fn test_malformed_keyframes_and_shadows() {
        let mut overrides = TokenSet::default();
        overrides.keyframes.insert(
            "float".into(),
            Keyframes::new([KeyframeStep::new("halfway", [("transform", "none")])]),
        );
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("`halfway` isn't an offset");
        assert_eq!(error.path(), "keyframes.float.halfway");

        let mut overrides = TokenSet::default();
        overrides.keyframes.insert(
            "float".into(),
            Keyframes::new([KeyframeStep::new("50%", Vec::<(String, String)>::new())]),
        );
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("steps need properties");
        assert_eq!(error.path(), "keyframes.float.50%");

        let mut overrides = TokenSet::default();
        overrides.box_shadow.insert("glow".into(), "glow".into());
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("`glow` isn't a shadow");
        assert_eq!(error.path(), "boxShadow.glow");
    }

    #[test]
    fn test_malformed_fonts_and_animations() {
        let mut overrides = TokenSet::default();
        overrides
            .font_family
            .insert("sans".into(), FontFamily::new(["Inter", " "]));
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("blank font names are rejected");
        assert_eq!(error.path(), "fontFamily.sans");

        let mut overrides = TokenSet::default();
        overrides
            .animation
            .insert("float".into(), "6s ease-in-out infinite".into());
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("animation needs a keyframes name");
        assert!(matches!(error, RegistryError::MalformedToken(_)));
        assert_eq!(error.path(), "animation.float");
    }

    #[test]
    fn test_dotted_names_are_rejected() {
        let mut overrides = TokenSet::default();
        overrides.colors.insert("brand.dark".into(), "#000".into());
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("`brand.dark` can't be looked up");
        assert!(matches!(error, RegistryError::MalformedToken(_)));
        assert_eq!(error.path(), "colors.brand.dark");

        let mut overrides = TokenSet::default();
        overrides
            .box_shadow
            .insert("glow.lg".into(), "0 0 60px rgba(255, 153, 0, 0.25)".into());
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("`glow.lg` can't be looked up");
        assert_eq!(error.path(), "boxShadow.glow.lg");

        let mut overrides = float_overrides();
        let float = overrides.keyframes["float"].clone();
        overrides.keyframes.insert("float.v2".into(), float);
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("`float.v2` can't be looked up");
        assert_eq!(error.path(), "keyframes.float.v2");

        let mut overrides = float_overrides();
        overrides
            .animation
            .insert("float.slow".into(), "float 12s ease-in-out infinite".into());
        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("`float.slow` can't be looked up");
        assert_eq!(error.path(), "animation.float.slow");
    }

    #[test]
    fn test_css_color_forms_validate() {
        let mut overrides = TokenSet::default();
        for (palette, value) in [
            ("coral", "coral"),
            ("rebecca", "rebeccapurple"),
            ("sky", "oklch(70% 0.1 200)"),
            ("steel", "hwb(200 10% 10%)"),
            ("clay", "lab(52% 40 59)"),
        ] {
            overrides.colors.insert(palette.into(), value.into());
        }

        let registry = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect("all of these are CSS colors");
        assert_eq!(registry.lookup("colors.sky"), Ok(TokenValue::Color("oklch(70% 0.1 200)")));
    }

    #[test]
    fn test_first_error_follows_category_order() {
        let mut overrides = TokenSet::default();
        overrides
            .animation
            .insert("wiggle".into(), "wiggle 1s infinite".into());
        overrides.colors.insert("accent".into(), "not-a-color".into());

        let error = TokenRegistry::new(&TokenSet::default(), &overrides)
            .expect_err("both entries are invalid");
        assert_eq!(error.path(), "colors.accent", "colors are checked first");
    }

    #[test]
    fn test_lookup_shapes() {
        let registry = site_registry();

        assert_eq!(registry.lookup("colors.primary.500"), Ok(TokenValue::Color("#0ea5e9")));
        assert_eq!(registry.lookup("colors.accent.DEFAULT"), Ok(TokenValue::Color("#FF9900")));
        assert_eq!(registry.lookup("colors.black"), Ok(TokenValue::Color("#000")));
        assert_eq!(
            registry.lookup("shadows.glow"),
            registry.lookup("boxShadow.glow"),
        );
        assert_eq!(
            registry.lookup("fontFamily.sans"),
            Ok(TokenValue::FontFamily(&["Inter".to_string(), "sans-serif".to_string()]))
        );

        let Ok(TokenValue::ColorScale(accent)) = registry.lookup("colors.accent") else {
            panic!("colors.accent should be a scale");
        };
        assert_eq!(accent.len(), 3);
    }

    #[test]
    fn test_lookup_not_found() {
        let registry = site_registry();

        let cases = [
            ("colors.primary.990", "990"),
            ("colors.teal.500", "teal"),
            ("colors.black.500", "500"),
            ("colors.primary.500.light", "light"),
            ("spacing.4", "spacing"),
            ("keyframes", ""),
            ("keyframes.wiggle", "wiggle"),
            ("animation.float.duration", "duration"),
            ("", ""),
        ];

        for (path, segment) in cases {
            assert_eq!(
                registry.lookup(path),
                Err(NotFoundError {
                    path: path.to_string(),
                    segment: segment.to_string(),
                }),
                "lookup of `{path}`"
            );
        }
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let registry = site_registry();

        for path in ["colors.slate.950", "keyframes.fadeInUp", "animation.pulse-slow"] {
            let first = registry.lookup(path).expect("path exists");
            let second = registry.lookup(path).expect("path exists");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_construction_is_deterministic() {
        let base = TokenSet::base().expect("bundled base should parse");
        let config = TokenConfig::site().expect("bundled site config should parse");

        let first = TokenRegistry::from_config(&base, &config).expect("site tokens validate");
        let second = TokenRegistry::from_config(&base, &config).expect("site tokens validate");

        assert_eq!(first.tokens(), second.tokens());
        assert_eq!(first.animations, second.animations);
    }

    #[test]
    fn test_site_extends_base() {
        let registry = site_registry();

        assert_eq!(registry.content(), ["./*.html".to_string()]);
        assert_eq!(
            registry.lookup("colors.slate.950"),
            Ok(TokenValue::Color("#0a0f1a")),
            "site overrides slate 950"
        );
        assert_eq!(registry.lookup("colors.slate.850"), Ok(TokenValue::Color("#1a2436")));
        assert_eq!(registry.lookup("colors.slate.50"), Ok(TokenValue::Color("#f8fafc")));
        assert!(registry.lookup("animation.spin").is_ok(), "base animations stay");
        assert!(registry.animation("pulse-slow").is_some());
        assert_eq!(
            registry.font_stack("sans").as_deref(),
            Some("Inter, sans-serif")
        );
    }

    #[test]
    fn test_theme_categories_replace_base() {
        let base = TokenSet::base().expect("bundled base should parse");
        let mut config = TokenConfig::site().expect("bundled site config should parse");
        config.theme = ThemeSection {
            keyframes: Some(IndexMap::new()),
            ..config.theme
        };

        let error = TokenRegistry::from_config(&base, &config)
            .expect_err("pulse-slow loses its base keyframes");
        assert!(matches!(error, RegistryError::DanglingReference(_)));
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokenRegistry>();

        let registry = Arc::new(site_registry());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry
                        .lookup("colors.accent.light")
                        .map(|value| value.as_str().map(str::to_string))
                })
            })
            .collect();

        for handle in handles {
            let value = handle.join().expect("reader thread panicked");
            assert_eq!(value, Ok(Some("#FFB84D".to_string())));
        }
    }
}
