use crate::config::{clamp_axis, GridConfig};
use crate::error::{GridError, GridResult};
use common::Vec2;
use std::iter::FusedIterator;

/// A half-line through a grid, captured by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec2,
    direction: Vec2,
    config: GridConfig,
}

impl Ray {
    /// Builds a ray; `direction` is normalised. A zero or non-finite
    /// direction gives a degenerate ray whose traversal is empty.
    pub fn new(origin: Vec2, direction: Vec2, config: GridConfig) -> Self {
        let direction = if direction.x.is_finite() && direction.y.is_finite() {
            direction
                .try_normalize(f32::MIN_POSITIVE)
                .unwrap_or_else(Vec2::zeros)
        } else {
            Vec2::zeros()
        };
        Self {
            origin,
            direction,
            config,
        }
    }

    pub fn try_new(origin: Vec2, direction: Vec2, config: GridConfig) -> GridResult<Self> {
        let ray = Self::new(origin, direction, config);
        if ray.is_degenerate() {
            return Err(GridError::DegenerateRay {
                x: direction.x,
                y: direction.y,
            });
        }
        Ok(ray)
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Unit direction, or zero for a degenerate ray.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec2::zeros()
    }

    pub fn point_at(&self, distance: f32) -> Vec2 {
        self.origin + self.direction * distance
    }

    /// Distance along the ray at which it enters the grid extent, 0 when the
    /// origin is already inside. `None` for a degenerate ray or one that
    /// misses the extent.
    pub fn entry(&self) -> Option<f32> {
        if self.is_degenerate() || !self.origin.x.is_finite() || !self.origin.y.is_finite() {
            return None;
        }
        let mut near = 0.0_f32;
        let mut far = f32::INFINITY;
        for (origin, direction, size) in [
            (self.origin.x, self.direction.x, self.config.width),
            (self.origin.y, self.direction.y, self.config.height),
        ] {
            if direction == 0.0 {
                if !(0.0..size).contains(&origin) {
                    return None;
                }
                continue;
            }
            let a = -origin / direction;
            let b = (size - origin) / direction;
            near = near.max(a.min(b));
            far = far.min(a.max(b));
        }
        (near < far).then_some(near)
    }

    /// Cells crossed by the ray, nearest first. Empty when the origin is
    /// outside the grid.
    pub fn iter(&self) -> RayIter {
        if self.is_degenerate() {
            return RayIter::exhausted(&self.config);
        }
        match self.config.cell_of(self.origin) {
            Some(cell) => self.traverse(self.origin, cell, 0.0),
            None => RayIter::exhausted(&self.config),
        }
    }

    /// Like [`Ray::iter`], but a ray starting outside the grid is followed
    /// from the point where it enters. Entry distances are still measured
    /// from the origin.
    pub fn iter_clipped(&self) -> RayIter {
        if self.is_degenerate() {
            return RayIter::exhausted(&self.config);
        }
        if let Some(cell) = self.config.cell_of(self.origin) {
            return self.traverse(self.origin, cell, 0.0);
        }
        let Some(distance) = self.entry() else {
            return RayIter::exhausted(&self.config);
        };
        let start = self.point_at(distance);
        let cell = (
            clamp_axis(start.x / self.config.cell_width(), self.config.columns),
            clamp_axis(start.y / self.config.cell_height(), self.config.rows),
        );
        self.traverse(start, cell, distance)
    }

    fn traverse(&self, start: Vec2, (x, y): (usize, usize), offset: f32) -> RayIter {
        let (step_x, t_max_x, t_delta_x) =
            axis_stepping(start.x, self.direction.x, self.config.cell_width(), x);
        let (step_y, t_max_y, t_delta_y) =
            axis_stepping(start.y, self.direction.y, self.config.cell_height(), y);

        RayIter {
            x: x as i64,
            y: y as i64,
            step_x,
            step_y,
            t_max_x: t_max_x + offset,
            t_max_y: t_max_y + offset,
            t_delta_x,
            t_delta_y,
            t_entry: offset,
            last_entry: offset,
            columns: self.config.columns as i64,
            rows: self.config.rows as i64,
        }
    }
}

impl IntoIterator for &Ray {
    type Item = usize;
    type IntoIter = RayIter;

    fn into_iter(self) -> RayIter {
        self.iter()
    }
}

// Step sign, distance to the first grid line and distance between grid
// lines along one axis. An axis the ray does not move along never advances.
#[inline(always)]
fn axis_stepping(origin: f32, direction: f32, cell_size: f32, cell: usize) -> (i64, f32, f32) {
    if direction > 0.0 {
        let boundary = (cell + 1) as f32 * cell_size;
        (
            1,
            ((boundary - origin) / direction).max(0.0),
            cell_size / direction,
        )
    } else if direction < 0.0 {
        let boundary = cell as f32 * cell_size;
        (
            -1,
            ((origin - boundary) / -direction).max(0.0),
            cell_size / -direction,
        )
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}

/// Incremental grid traversal yielding row-major cell indices.
///
/// Each step advances whichever axis reaches its next grid line first. When
/// both axes reach a grid line at exactly the same distance the ray passes
/// through a cell corner, and both axes advance together: the two cells that
/// only touch the corner are not reported.
///
/// The sequence ends as soon as the current cell leaves the grid, and is at
/// most `columns + rows` long.
#[derive(Debug, Clone)]
pub struct RayIter {
    x: i64,
    y: i64,
    step_x: i64,
    step_y: i64,
    t_max_x: f32,
    t_max_y: f32,
    t_delta_x: f32,
    t_delta_y: f32,
    t_entry: f32,
    last_entry: f32,
    columns: i64,
    rows: i64,
}

impl RayIter {
    fn exhausted(config: &GridConfig) -> Self {
        Self {
            x: -1,
            y: -1,
            step_x: 0,
            step_y: 0,
            t_max_x: f32::INFINITY,
            t_max_y: f32::INFINITY,
            t_delta_x: f32::INFINITY,
            t_delta_y: f32::INFINITY,
            t_entry: 0.0,
            last_entry: 0.0,
            columns: config.columns as i64,
            rows: config.rows as i64,
        }
    }

    #[inline(always)]
    fn in_bounds(&self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < self.columns && self.y < self.rows
    }

    /// Cell the next call to `next` yields; outside the grid once finished.
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Distance along the ray at which the most recently yielded cell was
    /// entered (0 for the origin cell, the clip distance for the first cell
    /// of a clipped traversal).
    pub fn entry_distance(&self) -> f32 {
        self.last_entry
    }

    fn advance(&mut self) {
        if self.t_max_x < self.t_max_y {
            self.x += self.step_x;
            self.t_entry = self.t_max_x;
            self.t_max_x += self.t_delta_x;
        } else if self.t_max_y < self.t_max_x {
            self.y += self.step_y;
            self.t_entry = self.t_max_y;
            self.t_max_y += self.t_delta_y;
        } else if self.t_max_x.is_finite() {
            self.x += self.step_x;
            self.y += self.step_y;
            self.t_entry = self.t_max_x;
            self.t_max_x += self.t_delta_x;
            self.t_max_y += self.t_delta_y;
        } else {
            // Neither axis can move.
            self.x = -1;
        }
    }
}

impl Iterator for RayIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        let index = (self.y * self.columns + self.x) as usize;
        self.last_entry = self.t_entry;
        self.advance();
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.in_bounds() {
            (1, Some((self.columns + self.rows) as usize))
        } else {
            (0, Some(0))
        }
    }
}

impl FusedIterator for RayIter {}

impl PartialEq for RayIter {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}
