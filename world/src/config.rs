use grid::GridConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub columns: usize,
    pub rows: usize,
    /// Neighbour query radius, in multiples of the querying mover's
    /// bounding radius, when none is given.
    pub neighbour_radius_factor: f32,
    /// Same, for obstacle queries around a mover.
    pub obstacle_radius_factor: f32,
    /// Same, for item pickup queries around a mover.
    pub item_radius_factor: f32,
}

impl WorldConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            columns: GridConfig::DEFAULT_COLUMNS,
            rows: GridConfig::DEFAULT_ROWS,
            neighbour_radius_factor: 2.0,
            obstacle_radius_factor: 4.0,
            item_radius_factor: 2.0,
        }
    }

    pub fn with_cells(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn grid(&self) -> GridConfig {
        GridConfig::with_cells(self.width, self.height, self.columns, self.rows)
    }
}
