use indexmap::IndexMap;
use tracing::{debug, trace};

use super::{ColorToken, ThemeSection, TokenCategory, TokenSet};

impl TokenSet {
    /// Deep merges `overrides` over `self` and returns the result.
    ///
    /// Entries in `overrides` are added or replace same-named entries, and
    /// entries only present in `self` are kept. Color scales merge one level
    /// deeper, shade by shade. Existing keys keep their position and new keys
    /// are appended in the order they were authored.
    pub fn merge(&self, overrides: &TokenSet) -> TokenSet {
        let mut merged = self.clone();

        for (palette, color) in &overrides.colors {
            if let (Some(ColorToken::Scale(base)), ColorToken::Scale(shades)) =
                (merged.colors.get_mut(palette), color)
            {
                trace!(palette = palette.as_str(), shades = shades.len(), "merging color scale");
                extend_entries(base, shades);
                continue;
            }

            merged.colors.insert(palette.clone(), color.clone());
        }

        extend_entries(&mut merged.font_family, &overrides.font_family);
        extend_entries(&mut merged.box_shadow, &overrides.box_shadow);
        extend_entries(&mut merged.animation, &overrides.animation);
        extend_entries(&mut merged.keyframes, &overrides.keyframes);

        debug!(
            colors = TokenCategory::Colors.count(&merged),
            font_families = TokenCategory::FontFamily.count(&merged),
            shadows = TokenCategory::BoxShadow.count(&merged),
            animations = TokenCategory::Animation.count(&merged),
            keyframes = TokenCategory::Keyframes.count(&merged),
            "merged token sets"
        );

        merged
    }

    /// Returns a copy of `self` with every category that `section` sets
    /// replaced wholesale. `section.extend` isn't applied here.
    pub fn replace_categories(&self, section: &ThemeSection) -> TokenSet {
        let mut replaced = self.clone();

        replace_entries(&mut replaced.colors, &section.colors, TokenCategory::Colors);
        replace_entries(
            &mut replaced.font_family,
            &section.font_family,
            TokenCategory::FontFamily,
        );
        replace_entries(
            &mut replaced.box_shadow,
            &section.box_shadow,
            TokenCategory::BoxShadow,
        );
        replace_entries(
            &mut replaced.animation,
            &section.animation,
            TokenCategory::Animation,
        );
        replace_entries(
            &mut replaced.keyframes,
            &section.keyframes,
            TokenCategory::Keyframes,
        );

        replaced
    }
}

fn extend_entries<V: Clone>(base: &mut IndexMap<String, V>, overrides: &IndexMap<String, V>) {
    base.extend(
        overrides
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
}

fn replace_entries<V: Clone>(
    base: &mut IndexMap<String, V>,
    replacement: &Option<IndexMap<String, V>>,
    category: TokenCategory,
) {
    if let Some(replacement) = replacement {
        debug!(
            category = category.key(),
            entries = replacement.len(),
            "replacing base category"
        );
        base.clone_from(replacement);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::seq::SliceRandom;

    use super::*;
    use crate::theme::{FontFamily, KeyframeStep, Keyframes};

    fn slate_base() -> TokenSet {
        let mut base = TokenSet::default();
        base.colors.insert(
            "slate".into(),
            ColorToken::scale([
                ("50", "#f8fafc"),
                ("100", "#f1f5f9"),
                ("200", "#e2e8f0"),
                ("300", "#cbd5e1"),
                ("400", "#94a3b8"),
                ("500", "#64748b"),
                ("600", "#475569"),
                ("700", "#334155"),
                ("800", "#1e293b"),
                ("900", "#0f172a"),
            ]),
        );
        base.colors.insert("black".into(), "#000".into());
        base.box_shadow
            .insert("sm".into(), "0 1px 2px 0 rgb(0 0 0 / 0.05)".into());
        base.font_family.insert(
            "sans".into(),
            FontFamily::new(["ui-sans-serif", "system-ui", "sans-serif"]),
        );
        base
    }

    #[test]
    fn test_shade_is_added_to_existing_scale() {
        let mut overrides = TokenSet::default();
        overrides
            .colors
            .insert("slate".into(), ColorToken::scale([("950", "#0a0f1a")]));

        let merged = slate_base().merge(&overrides);

        let Some(ColorToken::Scale(slate)) = merged.colors.get("slate") else {
            panic!("slate should still be a scale");
        };

        let shades: Vec<&str> = slate.keys().map(String::as_str).collect();
        assert_eq!(
            shades,
            ["50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950"]
        );
        assert_eq!(slate["50"], "#f8fafc");
        assert_eq!(slate["900"], "#0f172a");
        assert_eq!(slate["950"], "#0a0f1a");
    }

    #[test]
    fn test_override_wins_and_siblings_stay() {
        let mut overrides = TokenSet::default();
        overrides
            .colors
            .insert("slate".into(), ColorToken::scale([("500", "#000000")]));
        overrides
            .font_family
            .insert("sans".into(), FontFamily::new(["Inter", "sans-serif"]));

        let base = slate_base();
        let merged = base.merge(&overrides);

        let Some(ColorToken::Scale(slate)) = merged.colors.get("slate") else {
            panic!("slate should still be a scale");
        };
        assert_eq!(slate["500"], "#000000");
        assert_eq!(slate.len(), 10);
        assert_eq!(
            slate.get_index_of("500"),
            Some(5),
            "replaced shades keep their base position"
        );

        assert_eq!(
            merged.font_family["sans"].names.as_slice(),
            &["Inter".to_string(), "sans-serif".to_string()],
            "font families are replaced, not concatenated"
        );
        assert_eq!(merged.box_shadow, base.box_shadow);
        assert_eq!(merged.colors["black"], base.colors["black"]);
    }

    #[test]
    fn test_single_value_and_scale_replace_each_other() {
        let mut overrides = TokenSet::default();
        overrides.colors.insert(
            "black".into(),
            ColorToken::scale([("DEFAULT", "#000"), ("soft", "#111")]),
        );
        overrides.colors.insert("slate".into(), "#64748b".into());

        let merged = slate_base().merge(&overrides);

        assert!(matches!(&merged.colors["black"], ColorToken::Scale(scale) if scale.len() == 2));
        assert_eq!(merged.colors["slate"], ColorToken::Value("#64748b".into()));
    }

    #[test]
    fn test_disjoint_sets_merge_into_union() {
        let base = slate_base();

        let mut overrides = TokenSet::default();
        overrides
            .colors
            .insert("accent".into(), ColorToken::scale([("DEFAULT", "#FF9900")]));
        overrides
            .box_shadow
            .insert("glow".into(), "0 0 40px rgba(255, 153, 0, 0.2)".into());
        overrides
            .animation
            .insert("float".into(), "float 6s ease-in-out infinite".into());
        overrides.keyframes.insert(
            "float".into(),
            Keyframes::new([KeyframeStep::new("50%", [("transform", "translateY(-15px)")])]),
        );

        let merged = base.merge(&overrides);

        for (palette, color) in base.colors.iter().chain(&overrides.colors) {
            assert_eq!(&merged.colors[palette], color);
        }
        for (name, shadow) in base.box_shadow.iter().chain(&overrides.box_shadow) {
            assert_eq!(&merged.box_shadow[name], shadow);
        }
        assert_eq!(merged.font_family, base.font_family);
        assert_eq!(merged.animation, overrides.animation);
        assert_eq!(merged.keyframes, overrides.keyframes);
    }

    #[test]
    fn test_keyframes_are_replaced_whole() {
        let mut base = TokenSet::default();
        base.keyframes.insert(
            "pulse".into(),
            Keyframes::new([
                KeyframeStep::new("0%", [("opacity", "1")]),
                KeyframeStep::new("50%", [("opacity", ".5")]),
            ]),
        );

        let mut overrides = TokenSet::default();
        overrides.keyframes.insert(
            "pulse".into(),
            Keyframes::new([KeyframeStep::new("50%", [("opacity", ".25")])]),
        );

        let merged = base.merge(&overrides);
        assert_eq!(merged.keyframes["pulse"], overrides.keyframes["pulse"]);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let base = TokenSet::base().expect("bundled base should parse");
        let overrides = crate::theme::TokenConfig::site()
            .expect("bundled site config should parse")
            .theme
            .extend;

        assert_eq!(base.merge(&overrides), base.merge(&overrides));
    }

    #[test]
    fn test_merge_values_do_not_depend_on_override_order() {
        let base = TokenSet::base().expect("bundled base should parse");
        let overrides = crate::theme::TokenConfig::site()
            .expect("bundled site config should parse")
            .theme
            .extend;

        let mut entries: Vec<_> = overrides.box_shadow.clone().into_iter().collect();
        entries.shuffle(&mut rand::rng());

        let mut shuffled = overrides.clone();
        shuffled.box_shadow = entries.into_iter().collect();

        let expected = base.merge(&overrides);
        let actual = base.merge(&shuffled);

        for (name, shadow) in &expected.box_shadow {
            assert_eq!(&actual.box_shadow[name], shadow);
        }
        assert_eq!(actual.box_shadow.len(), expected.box_shadow.len());
    }

    #[test]
    fn test_replace_categories() {
        let base = slate_base();
        let section = ThemeSection {
            box_shadow: Some(IndexMap::from([(
                "glow".to_string(),
                "0 0 40px red".to_string(),
            )])),
            ..Default::default()
        };

        let replaced = base.replace_categories(&section);

        assert_eq!(replaced.box_shadow.len(), 1);
        assert!(!replaced.box_shadow.contains_key("sm"));
        assert_eq!(replaced.colors, base.colors, "unset categories are kept");
    }
}
