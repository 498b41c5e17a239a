use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error(
        "grid extent must be finite and positive with at least one cell \
         (width: {width}, height: {height}, columns: {columns}, rows: {rows})"
    )]
    InvalidConfig {
        width: f32,
        height: f32,
        columns: usize,
        rows: usize,
    },
    #[error("position ({x}, {y}) lies outside the grid extent (width: {width}, height: {height})")]
    OutOfBounds {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    #[error("entity is not tracked by this partition")]
    NotFound,
    #[error("ray direction ({x}, {y}) has no usable length")]
    DegenerateRay { x: f32, y: f32 },
}

pub type GridResult<T> = Result<T, GridError>;
