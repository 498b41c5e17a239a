use crate::config::WorldConfig;
use crate::entity::{ItemKey, MoverKey, ObstacleKey, RocketKey, Spatial};
use crate::raycast::{consider, RayHit};
use crate::wall::{Wall, WallSide};
use common::collision_detection::shape_circle;
use common::shapes::Segment;
use common::Vec2;
use fxhash::FxHashSet;
use grid::{CellSpacePartition, GridConfig, GridResult, Ray};
use log::{debug, trace};
use slotmap::{Key, SlotMap};

// One entity category: its partition plus the largest bounding radius
// registered since the last clear.
struct Layer<K> {
    partition: CellSpacePartition<K>,
    reach: f32,
}

impl<K: Key> Layer<K> {
    fn new(config: GridConfig) -> GridResult<Self> {
        Ok(Self {
            partition: CellSpacePartition::new(config)?,
            reach: 0.0,
        })
    }

    fn add<T: Spatial + ?Sized>(&mut self, key: K, entity: &T) -> GridResult<()> {
        self.partition.insert(key, entity.position())?;
        self.reach = self.reach.max(entity.shape().bounding_radius());
        Ok(())
    }

    fn update<T: Spatial + ?Sized>(
        &mut self,
        key: K,
        entity: &T,
        old_position: Vec2,
    ) -> GridResult<()> {
        self.partition
            .update(key, old_position, entity.position())?;
        self.reach = self.reach.max(entity.shape().bounding_radius());
        Ok(())
    }

    fn clear(&mut self) {
        self.partition.clear();
        self.reach = 0.0;
    }

    // Entities are bucketed by position only, so a shape can stick out of
    // its cell by up to `reach`. Each crossed cell is widened by that much,
    // and the walk stops once the best hit is closer than the next cell.
    // A ray starting outside is walked from where it enters the world.
    // Hits lying beyond the world boundary are not guaranteed to be found.
    fn raycast<T: Spatial>(
        &self,
        arena: &SlotMap<K, T>,
        from: Vec2,
        direction: Vec2,
        ignore: Option<K>,
    ) -> Option<RayHit<K>> {
        let config = self.partition.config();
        let ray = Ray::new(from, direction, *config);
        if ray.is_degenerate() {
            debug!("raycast with degenerate direction ({}, {})", direction.x, direction.y);
            return None;
        }
        let Some(entry) = ray.entry() else {
            trace!("raycast from ({}, {}) misses the world", from.x, from.y);
            return None;
        };
        let direction = ray.direction();
        let ray_length = entry + config.diagonal();
        let reach_x = (self.reach / config.cell_width()).ceil() as usize;
        let reach_y = (self.reach / config.cell_height()).ceil() as usize;

        let mut tested = FxHashSet::default();
        let mut best: Option<RayHit<K>> = None;
        let mut cells = ray.iter_clipped();
        while let Some(index) = cells.next() {
            if best.map_or(false, |hit| hit.distance < cells.entry_distance()) {
                break;
            }
            let (x, y) = (index % config.columns, index / config.columns);
            self.partition.query_cells_with(
                x.saturating_sub(reach_x)..=x.saturating_add(reach_x),
                y.saturating_sub(reach_y)..=y.saturating_add(reach_y),
                |key| {
                    if ignore == Some(key) || !tested.insert(key) {
                        return;
                    }
                    if let Some(entity) = arena.get(key) {
                        consider(&mut best, key, from, direction, ray_length, entity);
                    }
                },
            );
        }
        trace!("raycast tested {} candidates", tested.len());
        best
    }
}

/// Spatial index of a level: one grid per entity category plus the walls.
///
/// Entities are owned elsewhere (typically one `SlotMap` per category held by
/// the scene); the world stores keys and is told about every move. Remove a
/// key here before freeing it from its arena.
pub struct World {
    config: WorldConfig,
    movers: Layer<MoverKey>,
    obstacles: Layer<ObstacleKey>,
    rockets: Layer<RocketKey>,
    items: Layer<ItemKey>,
    walls: Vec<Wall>,
}

impl World {
    pub fn new(width: f32, height: f32) -> GridResult<Self> {
        Self::new_with_config(WorldConfig::new(width, height))
    }

    pub fn new_with_config(config: WorldConfig) -> GridResult<Self> {
        let grid = config.grid();
        Ok(Self {
            config,
            movers: Layer::new(grid)?,
            obstacles: Layer::new(grid)?,
            rockets: Layer::new(grid)?,
            items: Layer::new(grid)?,
            walls: Vec::new(),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    pub fn cell_width(&self) -> f32 {
        self.movers.partition.config().cell_width()
    }

    pub fn cell_height(&self) -> f32 {
        self.movers.partition.config().cell_height()
    }

    pub fn movers(&self) -> &CellSpacePartition<MoverKey> {
        &self.movers.partition
    }

    pub fn obstacles_partition(&self) -> &CellSpacePartition<ObstacleKey> {
        &self.obstacles.partition
    }

    pub fn rockets_partition(&self) -> &CellSpacePartition<RocketKey> {
        &self.rockets.partition
    }

    pub fn items_partition(&self) -> &CellSpacePartition<ItemKey> {
        &self.items.partition
    }

    /// Appends to `out` every mover in the cells around `position`.
    pub fn neighbours(&self, position: Vec2, radius: f32, out: &mut Vec<MoverKey>) {
        self.movers.partition.query_radius_into(position, radius, out);
    }

    /// Like [`World::neighbours`] around `mover`, leaving out `key` itself.
    /// Without a radius, `neighbour_radius_factor` times the mover's bounding
    /// radius is used.
    pub fn mover_neighbours<T: Spatial + ?Sized>(
        &self,
        key: MoverKey,
        mover: &T,
        radius: Option<f32>,
        out: &mut Vec<MoverKey>,
    ) {
        let radius = radius.unwrap_or_else(|| {
            self.config.neighbour_radius_factor * mover.shape().bounding_radius()
        });
        self.movers
            .partition
            .query_radius_with(mover.position(), radius, |other| {
                if other != key {
                    out.push(other);
                }
            });
    }

    pub fn obstacles(&self, position: Vec2, radius: f32) -> Vec<ObstacleKey> {
        self.obstacles.partition.query_radius(position, radius)
    }

    /// Obstacles around `mover`; defaults to `obstacle_radius_factor` times
    /// its bounding radius.
    pub fn mover_obstacles<T: Spatial + ?Sized>(
        &self,
        mover: &T,
        radius: Option<f32>,
    ) -> Vec<ObstacleKey> {
        let radius = radius.unwrap_or_else(|| {
            self.config.obstacle_radius_factor * mover.shape().bounding_radius()
        });
        self.obstacles(mover.position(), radius)
    }

    pub fn items<T: Spatial + ?Sized>(&self, mover: &T) -> Vec<ItemKey> {
        let radius = self.config.item_radius_factor * mover.shape().bounding_radius();
        self.items.partition.query_radius(mover.position(), radius)
    }

    pub fn rockets(&self, position: Vec2, radius: f32) -> Vec<RocketKey> {
        self.rockets.partition.query_radius(position, radius)
    }

    /// Movers whose shape actually overlaps the circle at `position`.
    pub fn overlapping_movers<T: Spatial>(
        &self,
        movers: &SlotMap<MoverKey, T>,
        position: Vec2,
        radius: f32,
        exclude: Option<MoverKey>,
    ) -> Vec<MoverKey> {
        let mut overlapping = Vec::new();
        self.movers
            .partition
            .query_radius_with(position, radius + self.movers.reach, |key| {
                if exclude == Some(key) {
                    return;
                }
                if let Some(mover) = movers.get(key) {
                    if shape_circle(mover.shape(), mover.position(), position, radius) {
                        overlapping.push(key);
                    }
                }
            });
        overlapping
    }

    /// Nearest mover hit by the ray, skipping the `caster`.
    pub fn raycast_mover<T: Spatial>(
        &self,
        movers: &SlotMap<MoverKey, T>,
        caster: Option<MoverKey>,
        from: Vec2,
        direction: Vec2,
    ) -> Option<RayHit<MoverKey>> {
        self.movers.raycast(movers, from, direction, caster)
    }

    pub fn raycast_item<T: Spatial>(
        &self,
        items: &SlotMap<ItemKey, T>,
        from: Vec2,
        direction: Vec2,
    ) -> Option<RayHit<ItemKey>> {
        self.items.raycast(items, from, direction, None)
    }

    pub fn raycast_obstacle<T: Spatial>(
        &self,
        obstacles: &SlotMap<ObstacleKey, T>,
        from: Vec2,
        direction: Vec2,
    ) -> Option<RayHit<ObstacleKey>> {
        self.obstacles.raycast(obstacles, from, direction, None)
    }

    /// Length at which rays starting inside the world are cut for edge
    /// tests: the world diagonal.
    pub fn ray_length(&self) -> f32 {
        self.config.grid().diagonal()
    }

    pub fn add_mover<T: Spatial + ?Sized>(&mut self, key: MoverKey, mover: &T) -> GridResult<()> {
        self.movers.add(key, mover)
    }

    pub fn add_obstacle<T: Spatial + ?Sized>(
        &mut self,
        key: ObstacleKey,
        obstacle: &T,
    ) -> GridResult<()> {
        self.obstacles.add(key, obstacle)
    }

    pub fn add_item<T: Spatial + ?Sized>(&mut self, key: ItemKey, item: &T) -> GridResult<()> {
        self.items.add(key, item)
    }

    pub fn add_rocket<T: Spatial + ?Sized>(&mut self, key: RocketKey, rocket: &T) -> GridResult<()> {
        self.rockets.add(key, rocket)
    }

    pub fn remove_mover(&mut self, key: MoverKey) -> GridResult<()> {
        self.movers.partition.remove(key)
    }

    pub fn remove_obstacle(&mut self, key: ObstacleKey) -> GridResult<()> {
        self.obstacles.partition.remove(key)
    }

    pub fn remove_item(&mut self, key: ItemKey) -> GridResult<()> {
        self.items.partition.remove(key)
    }

    pub fn remove_rocket(&mut self, key: RocketKey) -> GridResult<()> {
        self.rockets.partition.remove(key)
    }

    pub fn update_mover<T: Spatial + ?Sized>(
        &mut self,
        key: MoverKey,
        mover: &T,
        old_position: Vec2,
    ) -> GridResult<()> {
        self.movers.update(key, mover, old_position)
    }

    pub fn update_obstacle<T: Spatial + ?Sized>(
        &mut self,
        key: ObstacleKey,
        obstacle: &T,
        old_position: Vec2,
    ) -> GridResult<()> {
        self.obstacles.update(key, obstacle, old_position)
    }

    pub fn update_rocket<T: Spatial + ?Sized>(
        &mut self,
        key: RocketKey,
        rocket: &T,
        old_position: Vec2,
    ) -> GridResult<()> {
        self.rockets.update(key, rocket, old_position)
    }

    pub fn update_item<T: Spatial + ?Sized>(
        &mut self,
        key: ItemKey,
        item: &T,
        old_position: Vec2,
    ) -> GridResult<()> {
        self.items.update(key, item, old_position)
    }

    pub fn add_wall(&mut self, owner: ObstacleKey, segment: Segment, side: WallSide) {
        self.walls.push(Wall::new(owner, segment, side));
    }

    /// Walls along the four edges of the world, owned by `owner`.
    pub fn add_boundary_walls(&mut self, owner: ObstacleKey) {
        let (w, h) = (self.config.width, self.config.height);
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ];
        self.add_wall(owner, Segment::new(corners[3], corners[0]), WallSide::Left);
        self.add_wall(owner, Segment::new(corners[0], corners[1]), WallSide::Top);
        self.add_wall(owner, Segment::new(corners[1], corners[2]), WallSide::Right);
        self.add_wall(owner, Segment::new(corners[2], corners[3]), WallSide::Bottom);
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn walls_mut(&mut self) -> &mut Vec<Wall> {
        &mut self.walls
    }

    /// Walls passing closer than `radius` to `position`.
    pub fn walls_near(&self, position: Vec2, radius: f32) -> impl Iterator<Item = &Wall> + '_ {
        self.walls
            .iter()
            .filter(move |wall| wall.distance_to(position) < radius)
    }

    /// Forgets every entity and wall, e.g. before loading a level.
    pub fn clear(&mut self) {
        self.movers.clear();
        self.obstacles.clear();
        self.rockets.clear();
        self.items.clear();
        self.walls.clear();
    }
}
