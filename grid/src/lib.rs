pub mod config;
pub mod error;
pub mod partition;
pub mod ray;

pub use config::GridConfig;
pub use error::{GridError, GridResult};
pub use partition::CellSpacePartition;
pub use ray::{Ray, RayIter};
