// Geometry helpers shared by engine and game code

/// Index of the grid cell containing `coord`, for cells `cell_size` wide.
/// Negative coordinates map to negative cells.
pub fn grid_cell(coord: f32, cell_size: f32) -> i32 {
    debug_assert!(cell_size > 0.0, "cell size must be positive, got {}", cell_size);
    (coord / cell_size).floor() as i32
}

/// Axis-aligned rectangle in pixel space, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell() {
        assert_eq!(grid_cell(0.0, 32.0), 0);
        assert_eq!(grid_cell(31.9, 32.0), 0);
        assert_eq!(grid_cell(32.0, 32.0), 1);
        assert_eq!(grid_cell(-0.5, 32.0), -1);
    }

    #[test]
    fn test_rect_bottom() {
        let rect = Rect::new(10.0, 20.0, 32.0, 64.0);
        assert_eq!(rect.bottom(), 84.0);
    }
}
