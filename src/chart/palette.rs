//! Brand colors and display labels.
//!
//! Each brand gets a palette color by first-seen index, cycling when there
//! are more brands than colors. The first brand can carry a display label
//! that differs from its data key; lookups always go through the key.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A display color as a `#RRGGBB` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this looks like a `#RRGGBB` value.
    pub fn is_valid_hex(&self) -> bool {
        let s = self.0.as_str();
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const BLUE: &str = "#58C4DD";
pub const RED: &str = "#FC6255";
pub const GREEN: &str = "#83C167";
pub const YELLOW: &str = "#FFFF00";
pub const WHITE: &str = "#FFFFFF";
pub const ORANGE: &str = "#FF862F";
pub const TEAL: &str = "#5CD0B3";
pub const MAROON: &str = "#C55F73";
pub const PINK: &str = "#D147BD";
pub const GOLD: &str = "#F0AC5F";
pub const PURPLE: &str = "#9A72AC";

/// Brand palette, in assignment order.
pub const BRAND_PALETTE: [&str; 10] = [
    BLUE, RED, GREEN, YELLOW, WHITE, ORANGE, TEAL, MAROON, PINK, GOLD,
];

/// Fallback bar colors when a chart is given none.
pub const BAR_PALETTE: [&str; 10] = [
    BLUE, RED, GREEN, YELLOW, PURPLE, ORANGE, TEAL, MAROON, PINK, GOLD,
];

/// The brand palette as owned colors.
pub fn default_palette() -> Vec<Color> {
    BRAND_PALETTE.iter().map(|c| Color::new(*c)).collect()
}

/// Fallback color for the `index`-th bar.
pub fn bar_color(index: usize) -> Color {
    Color::new(BAR_PALETTE[index % BAR_PALETTE.len()])
}

/// Display style of one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandStyle {
    /// Data key used for lookups.
    pub key: String,
    /// Label shown on screen.
    pub label: String,
    /// Assigned color.
    pub color: Color,
}

/// Color and label assignment for every brand, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandStyles {
    styles: Vec<BrandStyle>,
}

impl BrandStyles {
    /// Assign palette colors by index and relabel the first brand when a
    /// placeholder label is given.
    pub fn assign(
        brands: &[String],
        palette: &[Color],
        placeholder: Option<&str>,
    ) -> Result<Self, GeometryError> {
        if palette.is_empty() {
            return Err(GeometryError::EmptyPalette);
        }

        let styles = brands
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let label = match placeholder {
                    Some(label) if i == 0 => label.to_string(),
                    _ => key.clone(),
                };
                BrandStyle {
                    key: key.clone(),
                    label,
                    color: palette[i % palette.len()].clone(),
                }
            })
            .collect();

        Ok(Self { styles })
    }

    pub fn styles(&self) -> &[BrandStyle] {
        &self.styles
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&BrandStyle> {
        self.styles.iter().find(|s| s.key == key)
    }

    pub fn color_of(&self, key: &str) -> Option<&Color> {
        self.get(key).map(|s| &s.color)
    }

    pub fn label_of(&self, key: &str) -> Option<&str> {
        self.get(key).map(|s| s.label.as_str())
    }

    /// Map a display label back to its data key.
    pub fn key_for_label(&self, label: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_assign_by_first_seen_index() {
        let styles =
            BrandStyles::assign(&names(&["Acme", "Apple", "Samsung"]), &default_palette(), None)
                .unwrap();

        assert_eq!(styles.color_of("Acme"), Some(&Color::new(BLUE)));
        assert_eq!(styles.color_of("Apple"), Some(&Color::new(RED)));
        assert_eq!(styles.color_of("Samsung"), Some(&Color::new(GREEN)));
        assert_eq!(styles.label_of("Acme"), Some("Acme"));
    }

    #[test]
    fn test_palette_cycles() {
        let palette = vec![Color::new(BLUE), Color::new(RED)];
        let styles = BrandStyles::assign(&names(&["a", "b", "c", "d", "e"]), &palette, None).unwrap();

        assert_eq!(styles.color_of("c"), Some(&Color::new(BLUE)));
        assert_eq!(styles.color_of("d"), Some(&Color::new(RED)));
        assert_eq!(styles.color_of("e"), Some(&Color::new(BLUE)));
    }

    #[test]
    fn test_placeholder_label_keeps_key() {
        let styles = BrandStyles::assign(
            &names(&["", "Apple"]),
            &default_palette(),
            Some("Unknown"),
        )
        .unwrap();

        assert_eq!(styles.label_of(""), Some("Unknown"));
        assert_eq!(styles.label_of("Apple"), Some("Apple"));
        assert_eq!(styles.key_for_label("Unknown"), Some(""));
        assert_eq!(styles.color_of(""), Some(&Color::new(BLUE)));
        assert!(styles.color_of("Unknown").is_none());
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = BrandStyles::assign(&names(&["a"]), &[], None).unwrap_err();
        assert_eq!(err, GeometryError::EmptyPalette);
    }

    #[test]
    fn test_hex_validation() {
        assert!(Color::new("#58C4DD").is_valid_hex());
        assert!(!Color::new("58C4DD").is_valid_hex());
        assert!(!Color::new("#58C4DZ").is_valid_hex());
        assert_eq!(bar_color(11), Color::new(RED));
    }
}
