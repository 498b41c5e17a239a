use crate::config::GridConfig;
use crate::error::{GridError, GridResult};
use common::Vec2;
use fxhash::FxHashMap;
use log::{debug, warn};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::RangeInclusive;

/// Uniform grid of buckets holding entity handles.
///
/// The partition only knows the positions it is told about: callers report
/// every move through [`CellSpacePartition::update`]. Each key lives in at
/// most one bucket.
pub struct CellSpacePartition<K> {
    config: GridConfig,
    cells: Vec<Vec<K>>,
    owner_map: FxHashMap<K, usize>,
}

impl<K> CellSpacePartition<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new(config: GridConfig) -> GridResult<Self> {
        config.validate()?;
        let mut cells = Vec::with_capacity(config.cell_count());
        cells.resize_with(config.cell_count(), Vec::new);
        Ok(Self {
            config,
            cells,
            owner_map: FxHashMap::default(),
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.owner_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner_map.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.owner_map.contains_key(&key)
    }

    /// Index of the bucket currently holding `key`.
    pub fn bucket_of(&self, key: K) -> Option<usize> {
        self.owner_map.get(&key).copied()
    }

    pub fn bucket(&self, index: usize) -> &[K] {
        self.cells.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.cells.iter().flatten().copied()
    }

    fn locate(&self, position: Vec2) -> GridResult<usize> {
        self.config
            .cell_index(position)
            .ok_or(GridError::OutOfBounds {
                x: position.x,
                y: position.y,
                width: self.config.width,
                height: self.config.height,
            })
    }

    fn detach(&mut self, key: K, cell: usize) {
        let bucket = &mut self.cells[cell];
        if let Some(slot) = bucket.iter().position(|candidate| *candidate == key) {
            bucket.swap_remove(slot);
        }
    }

    fn attach(&mut self, key: K, cell: usize) {
        self.cells[cell].push(key);
        self.owner_map.insert(key, cell);
    }

    /// Adds `key` to the bucket covering `position`.
    ///
    /// Positions outside the grid are rejected and the key is left untracked.
    /// Inserting a key that is already tracked moves it.
    pub fn insert(&mut self, key: K, position: Vec2) -> GridResult<()> {
        let cell = self.locate(position).map_err(|err| {
            warn!("rejecting insert of {:?}: {}", key, err);
            err
        })?;

        if let Some(current) = self.bucket_of(key) {
            debug!("{:?} inserted twice, moving it to cell {}", key, cell);
            if current == cell {
                return Ok(());
            }
            self.detach(key, current);
        }
        self.attach(key, cell);
        Ok(())
    }

    pub fn remove(&mut self, key: K) -> GridResult<()> {
        match self.owner_map.remove(&key) {
            Some(cell) => {
                self.detach(key, cell);
                Ok(())
            }
            None => {
                debug!("remove of untracked {:?} ignored", key);
                Err(GridError::NotFound)
            }
        }
    }

    /// Re-buckets `key` after it moved from `old_position` to `new_position`.
    ///
    /// A move within the same cell is a no-op. A move outside the grid is
    /// rejected and the key stays where it was.
    pub fn update(&mut self, key: K, old_position: Vec2, new_position: Vec2) -> GridResult<()> {
        let Some(current) = self.bucket_of(key) else {
            debug!("update of untracked {:?} ignored", key);
            return Err(GridError::NotFound);
        };
        let new_cell = self.locate(new_position).map_err(|err| {
            warn!("ignoring move of {:?}: {}", key, err);
            err
        })?;

        let old_cell = self.config.cell_index(old_position);
        if old_cell != Some(current) {
            warn!(
                "{:?} reported old position ({}, {}) outside its tracked cell {}",
                key, old_position.x, old_position.y, current
            );
        }

        if new_cell != current {
            self.detach(key, current);
            self.attach(key, new_cell);
        }
        Ok(())
    }

    /// Calls `f` for every key in the given block of cells. Ranges are
    /// clamped to the grid.
    pub fn query_cells_with<F>(&self, columns: RangeInclusive<usize>, rows: RangeInclusive<usize>, mut f: F)
    where
        F: FnMut(K),
    {
        let last_column = (*columns.end()).min(self.config.columns - 1);
        let last_row = (*rows.end()).min(self.config.rows - 1);
        for y in *rows.start()..=last_row {
            for x in *columns.start()..=last_column {
                for &key in &self.cells[self.config.index(x, y)] {
                    f(key);
                }
            }
        }
    }

    /// Broad-phase radius query: every key in a cell touched by the bounding
    /// box of the circle. Results may lie farther than `radius`.
    pub fn query_radius_with<F>(&self, point: Vec2, radius: f32, f: F)
    where
        F: FnMut(K),
    {
        if let Some((columns, rows)) = self.config.cell_range(point, radius) {
            self.query_cells_with(columns, rows, f);
        }
    }

    pub fn query_radius_into(&self, point: Vec2, radius: f32, candidates: &mut Vec<K>) {
        self.query_radius_with(point, radius, |key| candidates.push(key));
    }

    pub fn query_radius(&self, point: Vec2, radius: f32) -> Vec<K> {
        let mut candidates = Vec::new();
        self.query_radius_into(point, radius, &mut candidates);
        candidates
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.cells {
            bucket.clear();
        }
        self.owner_map.clear();
    }
}
