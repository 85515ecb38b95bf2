/// Splits `value` on `separator`, ignoring separators nested inside
/// parentheses. Each part is trimmed.
pub fn split_top_level(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(value[start..index].trim());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(value[start..].trim());
    parts
}

/// Splits `value` on whitespace outside of parentheses, so
/// `cubic-bezier(0.4, 0, 0.6, 1)` stays a single item.
pub fn split_whitespace_top_level(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (index, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(from) = start.take() {
                    parts.push(&value[from..index]);
                }
                continue;
            }
            _ => {}
        }

        start.get_or_insert(index);
    }

    if let Some(from) = start {
        parts.push(&value[from..]);
    }

    parts
}

const LENGTH_UNITS: &[&str] = &[
    "px", "rem", "em", "vh", "vw", "vmin", "vmax", "ch", "ex", "pt", "pc", "cm", "mm", "in", "%",
];

/// Whether `value` is a CSS length such as `0`, `40px` or `-1.5rem`.
pub fn is_length(value: &str) -> bool {
    if value.parse::<f32>() == Ok(0.) {
        return true;
    }

    LENGTH_UNITS.iter().any(|unit| {
        value
            .strip_suffix(unit)
            .is_some_and(|number| number.parse::<f32>().is_ok_and(f32::is_finite))
    })
}

/// Parses a CSS `<time>` (`0.8s`, `150ms`) into milliseconds.
pub fn parse_time_ms(value: &str) -> Option<f64> {
    let (number, scale) = if let Some(number) = value.strip_suffix("ms") {
        (number, 1.)
    } else if let Some(number) = value.strip_suffix('s') {
        (number, 1000.)
    } else {
        return None;
    };

    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n * scale)
}
