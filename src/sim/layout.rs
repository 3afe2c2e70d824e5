//! Play area geometry
//!
//! All coordinates are pixels relative to the play area's top-left corner,
//! y growing downward.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// A classification target as laid out by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBox {
    pub category: String,
    pub rect: Rect,
}

/// The region words fall through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
    pub boxes: Vec<CategoryBox>,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT)
    }
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            boxes: Vec::new(),
        }
    }

    /// Vertical threshold a word's bottom edge must not pass
    pub fn loss_boundary(&self) -> f32 {
        self.height - LOSS_MARGIN
    }

    /// Random horizontal spawn position keeping the word on screen.
    /// The left margin gives way when the area is too narrow for it.
    pub fn spawn_x<R: Rng>(&self, rng: &mut R) -> f32 {
        let span = self.width - WORD_WIDTH;
        if span <= 0.0 {
            return 0.0;
        }
        rng.random_range(0.0..span).max(SPAWN_MIN_X).min(span)
    }

    /// Category whose box contains `point`; `None` for the bare play area
    pub fn category_at(&self, point: Vec2) -> Option<&str> {
        self.boxes
            .iter()
            .find(|b| b.rect.contains(point))
            .map(|b| b.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_loss_boundary() {
        let area = PlayArea::new(400.0, 500.0);
        assert_eq!(area.loss_boundary(), 490.0);
    }

    #[test]
    fn test_spawn_x_stays_visible() {
        let area = PlayArea::new(300.0, 500.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let x = area.spawn_x(&mut rng);
            assert!(x >= SPAWN_MIN_X);
            assert!(x + WORD_WIDTH <= area.width);
        }
    }

    #[test]
    fn test_spawn_x_narrow_area_never_overflows() {
        let mut rng = Pcg32::seed_from_u64(7);
        for width in [91.0, 95.0, 99.0, 100.0, 105.0] {
            let area = PlayArea::new(width, 500.0);
            for _ in 0..100 {
                let x = area.spawn_x(&mut rng);
                assert!(x >= 0.0);
                assert!(x + WORD_WIDTH <= area.width, "width {width}: x {x}");
            }
        }
    }

    #[test]
    fn test_spawn_x_area_narrower_than_word() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(PlayArea::new(50.0, 500.0).spawn_x(&mut rng), 0.0);
        assert_eq!(PlayArea::new(WORD_WIDTH, 500.0).spawn_x(&mut rng), 0.0);
    }

    #[test]
    fn test_category_hit_testing() {
        let mut area = PlayArea::new(400.0, 500.0);
        area.boxes.push(CategoryBox {
            category: "AVES".into(),
            rect: Rect::new(0.0, 400.0, 100.0, 100.0),
        });
        area.boxes.push(CategoryBox {
            category: "INSECTOS".into(),
            rect: Rect::new(100.0, 400.0, 100.0, 100.0),
        });

        assert_eq!(area.category_at(Vec2::new(50.0, 450.0)), Some("AVES"));
        assert_eq!(area.category_at(Vec2::new(150.0, 450.0)), Some("INSECTOS"));
        // Shared edge belongs to the first box
        assert_eq!(area.category_at(Vec2::new(100.0, 450.0)), Some("AVES"));
        assert_eq!(area.category_at(Vec2::new(300.0, 100.0)), None);
    }
}
