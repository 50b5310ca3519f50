//! Circular placement of the alphabet.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::locale::sort_letters;
use crate::models::Language;

/// Size of the square container the circle is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleGeometry {
    /// Container width (and height) in pixels.
    pub size: f64,
    /// Margin kept between the circle and the container edge for the glyph.
    pub inset: f64,
}

impl Default for CircleGeometry {
    fn default() -> Self {
        Self {
            size: 400.0,
            inset: 30.0,
        }
    }
}

impl CircleGeometry {
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// Radius of the ring the letters sit on.
    pub fn ring_radius(&self) -> f64 {
        (self.radius() - self.inset).max(0.0)
    }
}

/// One letter node positioned inside the container.
///
/// `x`/`y` are offsets from the container's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLetter {
    pub key: String,
    pub x: f64,
    pub y: f64,
}

/// Order `letters` for `language` and place them clockwise on a circle,
/// starting at 12 o'clock.
pub fn layout<I, S>(
    letters: I,
    language: Language,
    geometry: CircleGeometry,
) -> Result<Vec<PlacedLetter>, LayoutError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let ordered = sort_letters(letters, language)?;
    if ordered.is_empty() {
        return Err(LayoutError::Empty);
    }

    let center = geometry.radius();
    let ring = geometry.ring_radius();
    let step = 2.0 * PI / ordered.len() as f64;

    Ok(ordered
        .into_iter()
        .enumerate()
        .map(|(i, key)| {
            let angle = i as f64 * step - PI / 2.0;
            PlacedLetter {
                key,
                x: center + ring * angle.cos(),
                y: center + ring * angle.sin(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn first_letter_sits_at_twelve_o_clock() {
        let placed = layout(["B", "A", "C", "D"], Language::En, CircleGeometry::default()).unwrap();
        let keys: Vec<&str> = placed.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "C", "D"]);

        // size 400, inset 30: center 200, ring 170
        assert!((placed[0].x - 200.0).abs() < EPS);
        assert!((placed[0].y - 30.0).abs() < EPS);
        // clockwise: the second of four letters is at 3 o'clock
        assert!((placed[1].x - 370.0).abs() < EPS);
        assert!((placed[1].y - 200.0).abs() < EPS);
        assert!((placed[2].y - 370.0).abs() < EPS);
        assert!((placed[3].x - 30.0).abs() < EPS);
    }

    #[test]
    fn layout_is_pure() {
        let geometry = CircleGeometry {
            size: 520.0,
            inset: 24.0,
        };
        let first = layout(["Ş", "A", "Ç", "Z"], Language::Tr, geometry).unwrap();
        let second = layout(["Z", "Ç", "Ş", "A"], Language::Tr, geometry).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn single_letter_is_placed() {
        let placed = layout(["A"], Language::En, CircleGeometry::default()).unwrap();
        assert_eq!(placed.len(), 1);
        assert!((placed[0].x - 200.0).abs() < EPS);
        assert!((placed[0].y - 30.0).abs() < EPS);
    }

    #[test]
    fn empty_alphabet_is_an_error() {
        let none: [&str; 0] = [];
        assert_eq!(
            layout(none, Language::En, CircleGeometry::default()),
            Err(LayoutError::Empty)
        );
    }

    #[test]
    fn unknown_turkish_letter_fails_loudly() {
        let result = layout(["A", "W"], Language::Tr, CircleGeometry::default());
        assert!(matches!(result, Err(LayoutError::UnknownLetter { .. })));
    }
}
