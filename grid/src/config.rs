use crate::error::{GridError, GridResult};
use common::Vec2;
use std::ops::RangeInclusive;

/// Extent and resolution of a uniform grid.
///
/// Cells are addressed row-major: `index = y * columns + x`. A position
/// lying exactly on a boundary between two cells belongs to the cell with
/// the higher index, and positions on the far edges (`x == width` or
/// `y == height`) are outside the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub width: f32,
    pub height: f32,
    pub columns: usize,
    pub rows: usize,
}

impl GridConfig {
    pub const DEFAULT_COLUMNS: usize = 8;
    pub const DEFAULT_ROWS: usize = 8;

    pub fn new(width: f32, height: f32) -> Self {
        Self::with_cells(width, height, Self::DEFAULT_COLUMNS, Self::DEFAULT_ROWS)
    }

    pub fn with_cells(width: f32, height: f32, columns: usize, rows: usize) -> Self {
        Self {
            width,
            height,
            columns,
            rows,
        }
    }

    pub fn validate(&self) -> GridResult<()> {
        let extent_ok =
            self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0;
        if !extent_ok || self.columns == 0 || self.rows == 0 {
            return Err(GridError::InvalidConfig {
                width: self.width,
                height: self.height,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }

    #[inline(always)]
    pub fn cell_width(&self) -> f32 {
        self.width / self.columns as f32
    }

    #[inline(always)]
    pub fn cell_height(&self) -> f32 {
        self.height / self.rows as f32
    }

    #[inline(always)]
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Length of the longest segment that fits inside the extent.
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }

    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0 && position.y >= 0.0 && position.x < self.width && position.y < self.height
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.columns + x
    }

    /// Column and row of the cell holding `position`, if it is inside.
    pub fn cell_of(&self, position: Vec2) -> Option<(usize, usize)> {
        if !self.contains(position) {
            return None;
        }
        Some((
            clamp_axis(position.x / self.cell_width(), self.columns),
            clamp_axis(position.y / self.cell_height(), self.rows),
        ))
    }

    pub fn cell_index(&self, position: Vec2) -> Option<usize> {
        self.cell_of(position).map(|(x, y)| self.index(x, y))
    }

    /// Cells overlapped by the bounding box of the circle at `center`,
    /// clamped to the grid. `None` when the box misses the grid entirely.
    pub fn cell_range(
        &self,
        center: Vec2,
        radius: f32,
    ) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        if !center.x.is_finite() || !center.y.is_finite() {
            return None;
        }
        let radius = radius.max(0.0);
        let (min_x, max_x) = (center.x - radius, center.x + radius);
        let (min_y, max_y) = (center.y - radius, center.y + radius);
        if max_x < 0.0 || max_y < 0.0 || min_x >= self.width || min_y >= self.height {
            return None;
        }

        let cell_width = self.cell_width();
        let cell_height = self.cell_height();
        Some((
            clamp_axis(min_x / cell_width, self.columns)..=clamp_axis(max_x / cell_width, self.columns),
            clamp_axis(min_y / cell_height, self.rows)..=clamp_axis(max_y / cell_height, self.rows),
        ))
    }
}

// Float-to-usize casts saturate, so negative and huge values land on the
// first and last cell respectively.
#[inline(always)]
pub(crate) fn clamp_axis(cells: f32, count: usize) -> usize {
    (cells.floor().max(0.0) as usize).min(count - 1)
}
