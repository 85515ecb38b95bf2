use indexmap::IndexMap;

use super::{
    AnimationSpec, DanglingReferenceError, MalformedTokenError, RegistryError,
};
use crate::{
    theme::{ColorToken, FontFamily, Keyframes, TokenCategory, TokenSet},
    utils::{is_color, is_length, parse_color, split_top_level, split_whitespace_top_level},
};

/// Checks every category of a merged set and parses its animations.
///
/// Categories are checked in a fixed order so the same input always reports
/// the same error: colors, fonts, shadows, keyframes, then animations.
pub(super) fn validate(tokens: &TokenSet) -> Result<IndexMap<String, AnimationSpec>, RegistryError> {
    validate_colors(&tokens.colors)?;
    validate_fonts(&tokens.font_family)?;
    validate_shadows(&tokens.box_shadow)?;
    validate_keyframes(&tokens.keyframes)?;
    resolve_animations(&tokens.animation, &tokens.keyframes)
}

/// Names become path segments, so they can't hold the path separator.
fn check_name(category: TokenCategory, segments: &[&str]) -> Result<(), MalformedTokenError> {
    match segments.last() {
        Some(name) if name.contains('.') => Err(MalformedTokenError::new(
            category,
            segments,
            format!("name `{name}` contains `.`, which separates path segments"),
        )),
        _ => Ok(()),
    }
}

fn validate_colors(colors: &IndexMap<String, ColorToken>) -> Result<(), MalformedTokenError> {
    let category = TokenCategory::Colors;

    for (palette, token) in colors {
        if palette.trim().is_empty() {
            return Err(MalformedTokenError::new(category, &[palette.as_str()], "palette name is blank"));
        }
        check_name(category, &[palette.as_str()])?;

        match token {
            ColorToken::Value(value) => {
                parse_color(value)
                    .map_err(|error| MalformedTokenError::new(category, &[palette.as_str()], error))?;
            }
            ColorToken::Scale(scale) => {
                if scale.is_empty() {
                    return Err(MalformedTokenError::new(
                        category,
                        &[palette.as_str()],
                        "color scale has no shades",
                    ));
                }

                for (shade, value) in scale {
                    if shade.trim().is_empty() {
                        return Err(MalformedTokenError::new(
                            category,
                            &[palette.as_str(), shade.as_str()],
                            "shade key is blank",
                        ));
                    }
                    check_name(category, &[palette.as_str(), shade.as_str()])?;

                    parse_color(value).map_err(|error| {
                        MalformedTokenError::new(category, &[palette.as_str(), shade.as_str()], error)
                    })?;
                }
            }
        }
    }

    Ok(())
}

fn validate_fonts(fonts: &IndexMap<String, FontFamily>) -> Result<(), MalformedTokenError> {
    let category = TokenCategory::FontFamily;

    for (family, fonts) in fonts {
        check_name(category, &[family.as_str()])?;

        if fonts.names.is_empty() {
            return Err(MalformedTokenError::new(
                category,
                &[family.as_str()],
                "font family lists no fonts",
            ));
        }

        if let Some(position) = fonts.names.iter().position(|name| name.trim().is_empty()) {
            return Err(MalformedTokenError::new(
                category,
                &[family.as_str()],
                format!("font name at position {position} is blank"),
            ));
        }
    }

    Ok(())
}

fn validate_shadows(shadows: &IndexMap<String, String>) -> Result<(), MalformedTokenError> {
    for (name, value) in shadows {
        check_name(TokenCategory::BoxShadow, &[name.as_str()])?;
        validate_shadow(value)
            .map_err(|reason| MalformedTokenError::new(TokenCategory::BoxShadow, &[name.as_str()], reason))?;
    }

    Ok(())
}

/// A shadow is `none` or comma-separated layers of 2 to 4 lengths, an optional
/// `inset` and at most one color.
fn validate_shadow(value: &str) -> Result<(), String> {
    let value = value.trim();

    if value.is_empty() {
        return Err("shadow value is empty".to_string());
    }

    if value == "none" {
        return Ok(());
    }

    for layer in split_top_level(value, ',') {
        if layer.is_empty() {
            return Err("shadow has an empty layer".to_string());
        }

        let mut lengths = 0;
        let mut inset = false;
        let mut color = false;

        for part in split_whitespace_top_level(layer) {
            if part == "inset" {
                if inset {
                    return Err(format!("shadow layer `{layer}` repeats `inset`"));
                }
                inset = true;
            } else if is_length(part) {
                lengths += 1;
            } else if is_color(part) {
                if color {
                    return Err(format!("shadow layer `{layer}` has more than one color"));
                }
                color = true;
            } else {
                return Err(format!("`{part}` is neither a length nor a color"));
            }
        }

        if !(2..=4).contains(&lengths) {
            return Err(format!(
                "shadow layer `{layer}` needs 2 to 4 lengths, found {lengths}"
            ));
        }
    }

    Ok(())
}

fn validate_keyframes(keyframes: &IndexMap<String, Keyframes>) -> Result<(), MalformedTokenError> {
    let category = TokenCategory::Keyframes;

    for (name, keyframes) in keyframes {
        check_name(category, &[name.as_str()])?;

        if keyframes.steps.is_empty() {
            return Err(MalformedTokenError::new(category, &[name.as_str()], "keyframes have no steps"));
        }

        for step in &keyframes.steps {
            let selector = step.selector.as_str();

            step.offsets()
                .map_err(|error| MalformedTokenError::new(category, &[name.as_str(), selector], error))?;

            if step.properties.is_empty() {
                return Err(MalformedTokenError::new(
                    category,
                    &[name.as_str(), selector],
                    "keyframe step sets no properties",
                ));
            }

            for (property, value) in &step.properties {
                if property.trim().is_empty() {
                    return Err(MalformedTokenError::new(
                        category,
                        &[name.as_str(), selector],
                        "property name is blank",
                    ));
                }

                if value.trim().is_empty() {
                    return Err(MalformedTokenError::new(
                        category,
                        &[name.as_str(), selector, property.as_str()],
                        "property value is blank",
                    ));
                }
            }
        }
    }

    Ok(())
}

fn resolve_animations(
    animations: &IndexMap<String, String>,
    keyframes: &IndexMap<String, Keyframes>,
) -> Result<IndexMap<String, AnimationSpec>, RegistryError> {
    let mut parsed = IndexMap::with_capacity(animations.len());

    for (name, value) in animations {
        check_name(TokenCategory::Animation, &[name.as_str()])?;

        let spec = AnimationSpec::parse(value).map_err(|error| {
            MalformedTokenError::new(TokenCategory::Animation, &[name.as_str()], error)
        })?;

        if let Some(missing) = spec.keyframe_names().find(|keyframe| !keyframes.contains_key(*keyframe)) {
            return Err(DanglingReferenceError {
                animation: name.clone(),
                keyframe: missing.to_string(),
            }
            .into());
        }

        parsed.insert(name.clone(), spec);
    }

    Ok(parsed)
}
