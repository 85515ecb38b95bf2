use smallvec::SmallVec;
use thiserror::Error;

use crate::utils::{parse_time_ms, split_top_level, split_whitespace_top_level};

const TIMING_KEYWORDS: &[&str] = &[
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "linear",
    "step-start",
    "step-end",
];
const TIMING_FUNCTIONS: &[&str] = &["cubic-bezier(", "steps(", "linear("];
const DIRECTIONS: &[&str] = &["normal", "reverse", "alternate", "alternate-reverse"];
const FILL_MODES: &[&str] = &["none", "forwards", "backwards", "both"];
const PLAY_STATES: &[&str] = &["running", "paused"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationCount {
    Infinite,
    Count(f64),
}

/// One comma-separated layer of a CSS `animation` value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationLayer {
    /// Keyframes this layer plays. `None` only for the bare `none` value.
    pub name: Option<String>,
    pub duration_ms: Option<f64>,
    pub delay_ms: Option<f64>,
    pub timing_function: Option<String>,
    pub iteration_count: Option<IterationCount>,
    pub direction: Option<String>,
    pub fill_mode: Option<String>,
    pub play_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationParseError {
    #[error("animation value has an empty layer")]
    EmptyLayer,
    #[error("animation layer `{0}` doesn't name any keyframes")]
    MissingName(String),
    #[error("animation layer names both `{first}` and `{second}`")]
    DuplicateName { first: String, second: String },
    #[error("animation layer `{layer}` sets its {property} twice")]
    Repeated {
        layer: String,
        property: &'static str,
    },
    #[error("animation duration `{0}` can't be negative")]
    NegativeDuration(String),
}

/// A parsed CSS `animation` shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    layers: SmallVec<[AnimationLayer; 1]>,
}

impl AnimationSpec {
    pub fn parse(value: &str) -> Result<Self, AnimationParseError> {
        let layers: SmallVec<[AnimationLayer; 1]> = split_top_level(value, ',')
            .into_iter()
            .map(parse_layer)
            .collect::<Result<_, _>>()?;

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[AnimationLayer] {
        &self.layers
    }

    /// Keyframe names referenced by the layers, in order.
    pub fn keyframe_names(&self) -> impl Iterator<Item = &str> {
        self.layers
            .iter()
            .filter_map(|layer| layer.name.as_deref())
    }
}

fn parse_layer(layer: &str) -> Result<AnimationLayer, AnimationParseError> {
    if layer.is_empty() {
        return Err(AnimationParseError::EmptyLayer);
    }

    if layer == "none" {
        return Ok(AnimationLayer::default());
    }

    let mut parsed = AnimationLayer::default();

    let repeated = |property| AnimationParseError::Repeated {
        layer: layer.to_string(),
        property,
    };

    for part in split_whitespace_top_level(layer) {
        if let Some(ms) = parse_time_ms(part) {
            // The first time is the duration, the second the delay.
            if parsed.duration_ms.is_none() {
                if ms < 0. {
                    return Err(AnimationParseError::NegativeDuration(part.to_string()));
                }
                parsed.duration_ms = Some(ms);
            } else if parsed.delay_ms.is_none() {
                parsed.delay_ms = Some(ms);
            } else {
                return Err(repeated("delay"));
            }
        } else if is_timing_function(part) {
            set_once(&mut parsed.timing_function, part, || repeated("timing function"))?;
        } else if let Some(count) = parse_iteration_count(part) {
            if parsed.iteration_count.replace(count).is_some() {
                return Err(repeated("iteration count"));
            }
        } else if DIRECTIONS.contains(&part) {
            set_once(&mut parsed.direction, part, || repeated("direction"))?;
        } else if FILL_MODES.contains(&part) {
            set_once(&mut parsed.fill_mode, part, || repeated("fill mode"))?;
        } else if PLAY_STATES.contains(&part) {
            set_once(&mut parsed.play_state, part, || repeated("play state"))?;
        } else if let Some(first) = &parsed.name {
            return Err(AnimationParseError::DuplicateName {
                first: first.clone(),
                second: part.to_string(),
            });
        } else {
            parsed.name = Some(part.to_string());
        }
    }

    if parsed.name.is_none() {
        return Err(AnimationParseError::MissingName(layer.to_string()));
    }

    Ok(parsed)
}

fn set_once(
    slot: &mut Option<String>,
    value: &str,
    error: impl FnOnce() -> AnimationParseError,
) -> Result<(), AnimationParseError> {
    if slot.is_some() {
        return Err(error());
    }
    *slot = Some(value.to_string());
    Ok(())
}

fn is_timing_function(part: &str) -> bool {
    TIMING_KEYWORDS.contains(&part)
        || TIMING_FUNCTIONS
            .iter()
            .any(|function| part.starts_with(function) && part.ends_with(')'))
}

fn parse_iteration_count(part: &str) -> Option<IterationCount> {
    if part == "infinite" {
        return Some(IterationCount::Infinite);
    }

    part.parse::<f64>()
        .ok()
        .filter(|count| count.is_finite() && *count >= 0.)
        .map(IterationCount::Count)
}
