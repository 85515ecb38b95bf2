use thiserror::Error;

use super::split_top_level;

/// A color with each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Creates an RGBA color from a hex value and alpha component.
pub fn rgb_a(hex: u32, a: f32) -> Rgba {
    let [_, r, g, b] = hex.to_be_bytes().map(|b| (b as f32) / 255.0);
    Rgba { r, g, b, a }
}

/// Extension trait for modifying RGBA colors.
pub trait RgbaExt {
    /// Returns a new color with the specified alpha value.
    fn alpha(self, alpha: f32) -> Self;
}

impl RgbaExt for Rgba {
    fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

/// A CSS color value as accepted in token sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssColor {
    Rgba(Rgba),
    /// `currentColor`, `inherit` and the other CSS-wide keywords.
    /// These only resolve once they're applied to an element.
    Keyword(&'static str),
    /// A color in a space other than sRGB (`lab()`, `oklch()`, ...), kept as
    /// its channel values.
    Space {
        space: &'static str,
        channels: [f32; 3],
        alpha: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color value is empty")]
    Empty,
    #[error("`{0}` is not a valid hex color, expected 3, 4, 6 or 8 hex digits")]
    InvalidHex(String),
    #[error("`{value}` is not a valid {function}() color")]
    InvalidFunction {
        value: String,
        function: &'static str,
    },
    #[error("`{0}` is not a recognised color")]
    Unknown(String),
}

const KEYWORDS: &[&str] = &["currentColor", "inherit", "initial", "unset", "revert"];

/// The CSS named colors, sorted by name.
const NAMED: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

/// Color functions whose channels are checked but not converted to sRGB.
const SPACES: &[&str] = &["lab", "lch", "oklab", "oklch"];

/// Parses a CSS color: hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, `hwb()`,
/// `lab()`/`lch()`/`oklab()`/`oklch()`, `transparent`, a named color or a
/// CSS-wide keyword.
pub fn parse_color(value: &str) -> Result<CssColor, ColorParseError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(digits) = value.strip_prefix('#') {
        return parse_hex(digits)
            .map(CssColor::Rgba)
            .ok_or_else(|| ColorParseError::InvalidHex(value.to_string()));
    }

    if let Some((function, args)) = value
        .strip_suffix(')')
        .and_then(|value| value.split_once('('))
    {
        let function = function.trim().to_ascii_lowercase();

        let (parsed, function) = match function.as_str() {
            "rgb" | "rgba" => (parse_rgb_args(args).map(CssColor::Rgba), "rgb"),
            "hsl" | "hsla" => (parse_hsl_args(args).map(CssColor::Rgba), "hsl"),
            "hwb" => (parse_hwb_args(args).map(CssColor::Rgba), "hwb"),
            name => match SPACES.iter().find(|space| **space == name) {
                Some(space) => (parse_space_args(*space, args), *space),
                None => return Err(ColorParseError::Unknown(value.to_string())),
            },
        };

        return parsed.ok_or_else(|| ColorParseError::InvalidFunction {
            value: value.to_string(),
            function,
        });
    }

    if value.eq_ignore_ascii_case("transparent") {
        return Ok(CssColor::Rgba(rgb_a(0x000000, 0.)));
    }

    if let Some(keyword) = KEYWORDS.iter().find(|k| k.eq_ignore_ascii_case(value)) {
        return Ok(CssColor::Keyword(*keyword));
    }

    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, hex)| CssColor::Rgba(rgb_a(*hex, 1.)))
        .ok_or_else(|| ColorParseError::Unknown(value.to_string()))
}

/// Whether `value` can be parsed as a color.
pub fn is_color(value: &str) -> bool {
    parse_color(value).is_ok()
}

fn parse_hex(digits: &str) -> Option<Rgba> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    // Short forms repeat each digit: `#f80` is `#ff8800`.
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    let value = u32::from_str_radix(&expanded, 16).ok()?;

    Some(if expanded.len() == 8 {
        rgb_a(value >> 8, (value & 0xff) as f32 / 255.)
    } else {
        rgb_a(value, 1.)
    })
}

/// Splits `a, b, c, d` or `a b c / d` into color components and alpha.
fn split_components(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    if args.contains(',') {
        let mut parts = split_top_level(args, ',');
        let alpha = match parts.len() {
            3 => None,
            4 => parts.pop(),
            _ => return None,
        };
        return Some((parts, alpha));
    }

    let (channels, alpha) = match args.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (args, None),
    };

    let channels: Vec<&str> = channels.split_whitespace().collect();
    (channels.len() == 3).then_some((channels, alpha))
}

fn parse_number(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|n| n.is_finite())
}

fn parse_percent(value: &str) -> Option<f32> {
    value.trim().strip_suffix('%').and_then(parse_number)
}

fn parse_alpha(value: Option<&str>) -> Option<f32> {
    let Some(value) = value else {
        return Some(1.);
    };

    let alpha = match parse_percent(value) {
        Some(percent) => percent / 100.,
        None => parse_number(value)?,
    };

    (0.0..=1.0).contains(&alpha).then_some(alpha)
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let (channels, alpha) = split_components(args)?;

    let mut rgb = [0f32; 3];
    for (slot, channel) in rgb.iter_mut().zip(channels) {
        let value = match parse_percent(channel) {
            Some(percent) => percent / 100.,
            None => parse_number(channel)? / 255.,
        };

        if !(0.0..=1.0).contains(&value) {
            return None;
        }
        *slot = value;
    }

    let [r, g, b] = rgb;
    Some(Rgba { r, g, b, a: 1. }.alpha(parse_alpha(alpha)?))
}

fn parse_hue(value: &str) -> Option<f32> {
    let value = value.trim();
    parse_number(value.strip_suffix("deg").unwrap_or(value))
}

/// sRGB channels for a hue at full saturation and half lightness.
fn hue_to_rgb(hue: f32) -> [f32; 3] {
    let sector = hue.rem_euclid(360.) / 60.;
    let x = 1. - (sector % 2. - 1.).abs();
    match sector as u32 {
        0 => [1., x, 0.],
        1 => [x, 1., 0.],
        2 => [0., 1., x],
        3 => [0., x, 1.],
        4 => [x, 0., 1.],
        _ => [1., 0., x],
    }
}

fn parse_hsl_args(args: &str) -> Option<Rgba> {
    let (channels, alpha) = split_components(args)?;

    let hue = parse_hue(channels[0])?;
    let saturation = parse_percent(channels[1])? / 100.;
    let lightness = parse_percent(channels[2])? / 100.;

    if !(0.0..=1.0).contains(&saturation) || !(0.0..=1.0).contains(&lightness) {
        return None;
    }

    let chroma = (1. - (2. * lightness - 1.).abs()) * saturation;
    let m = lightness - chroma / 2.;
    let [r, g, b] = hue_to_rgb(hue).map(|channel| channel * chroma + m);

    Some(Rgba { r, g, b, a: 1. }.alpha(parse_alpha(alpha)?))
}

fn parse_hwb_args(args: &str) -> Option<Rgba> {
    let (channels, alpha) = split_components(args)?;

    let hue = parse_hue(channels[0])?;
    let mut whiteness = parse_percent(channels[1])? / 100.;
    let mut blackness = parse_percent(channels[2])? / 100.;

    if !(0.0..=1.0).contains(&whiteness) || !(0.0..=1.0).contains(&blackness) {
        return None;
    }

    // Whiteness and blackness over 100% together normalize to a gray.
    let sum = whiteness + blackness;
    if sum > 1. {
        whiteness /= sum;
        blackness /= sum;
    }

    let [r, g, b] =
        hue_to_rgb(hue).map(|channel| channel * (1. - whiteness - blackness) + whiteness);

    Some(Rgba { r, g, b, a: 1. }.alpha(parse_alpha(alpha)?))
}

/// Checks the space-separated `L a b` or `L C h` form, with an optional
/// `/ alpha`. Channels may be numbers, percentages or `none`, and the hue of
/// `lch()`/`oklch()` may carry an angle unit.
fn parse_space_args(space: &'static str, args: &str) -> Option<CssColor> {
    if args.contains(',') {
        return None;
    }

    let (channels, alpha) = split_components(args)?;
    let polar = space.ends_with("ch");

    let mut values = [0f32; 3];
    for (index, (slot, channel)) in values.iter_mut().zip(channels).enumerate() {
        let channel = channel.trim();

        *slot = if channel == "none" {
            0.
        } else if polar && index == 2 {
            parse_angle(channel)?
        } else {
            match parse_percent(channel) {
                Some(percent) => percent,
                None => parse_number(channel)?,
            }
        };
    }

    let alpha = if alpha == Some("none") {
        0.
    } else {
        parse_alpha(alpha)?
    };

    Some(CssColor::Space {
        space,
        channels: values,
        alpha,
    })
}

fn parse_angle(value: &str) -> Option<f32> {
    const UNITS: &[(&str, f32)] = &[("deg", 1.), ("grad", 0.9), ("rad", 57.295_78), ("turn", 360.)];

    for (unit, degrees) in UNITS {
        if let Some(number) = value.strip_suffix(unit) {
            return parse_number(number).map(|number| number * degrees);
        }
    }

    parse_number(value)
}
