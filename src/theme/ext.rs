use crate::{
    registry::{AnimationLayer, AnimationSpec},
    theme::{ColorToken, DEFAULT_SHADE, KeyframeStep, TokenSet},
};

/// Extension trait for typed access to a token set.
pub trait TokensExt {
    /// Gets an immutable reference to the tokens.
    fn tokens(&self) -> &TokenSet;

    /// Gets a color. Scales resolve their `DEFAULT` shade when `shade` is `None`.
    fn color(&self, palette: &str, shade: Option<&str>) -> Option<&str> {
        match (self.tokens().colors.get(palette)?, shade) {
            (ColorToken::Value(value), None) => Some(value.as_str()),
            (ColorToken::Value(_), Some(_)) => None,
            (ColorToken::Scale(scale), shade) => scale
                .get(shade.unwrap_or(DEFAULT_SHADE))
                .map(String::as_str),
        }
    }

    /// Formats a font family as a CSS `font-family` list.
    fn font_stack(&self, family: &str) -> Option<String> {
        let family = self.tokens().font_family.get(family)?;

        let names: Vec<String> = family
            .names
            .iter()
            .map(|name| {
                let quoted = name.starts_with(['"', '\'']);
                if !quoted && name.contains(char::is_whitespace) {
                    format!("\"{name}\"")
                } else {
                    name.clone()
                }
            })
            .collect();

        Some(names.join(", "))
    }

    fn shadow(&self, name: &str) -> Option<&str> {
        self.tokens().box_shadow.get(name).map(String::as_str)
    }

    /// Parses an animation into its layers. `None` if it's missing or malformed.
    fn animation_layers(&self, name: &str) -> Option<Vec<AnimationLayer>> {
        let value = self.tokens().animation.get(name)?;
        AnimationSpec::parse(value)
            .ok()
            .map(|spec| spec.layers().to_vec())
    }

    fn keyframes(&self, name: &str) -> Option<&[KeyframeStep]> {
        self.tokens()
            .keyframes
            .get(name)
            .map(|keyframes| keyframes.steps.as_slice())
    }
}

impl TokensExt for TokenSet {
    fn tokens(&self) -> &TokenSet {
        self
    }
}
