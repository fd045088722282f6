//! Arena layouts
//!
//! The arena is a `width x height` rectangle with its origin at the top-left
//! corner and a fixed set of blocks. It is built once per match from a
//! layout id and never changes afterwards.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::block::Block;
use crate::error::SimError;

/// Named arena layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// No obstacles
    Empty,
    /// One large square in the middle
    CentralColumn,
    /// Four small columns near the corners
    CornerColumns,
    /// A central wall with a passage through the middle
    Doorway,
    /// Two crossing walls
    Plus,
    /// 3-7 blocks placed with point symmetry about the center
    Randomized,
}

impl Layout {
    pub const ALL: [Layout; 6] = [
        Layout::Empty,
        Layout::CentralColumn,
        Layout::CornerColumns,
        Layout::Doorway,
        Layout::Plus,
        Layout::Randomized,
    ];

    /// Look up a layout by its numeric id (0-5)
    pub fn from_id(id: u32) -> Result<Self, SimError> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(SimError::UnknownLayout(id))
    }

    pub fn id(&self) -> u32 {
        match self {
            Layout::Empty => 0,
            Layout::CentralColumn => 1,
            Layout::CornerColumns => 2,
            Layout::Doorway => 3,
            Layout::Plus => 4,
            Layout::Randomized => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Empty => "Empty Arena",
            Layout::CentralColumn => "Central Column Arena",
            Layout::CornerColumns => "Corner Column Arena",
            Layout::Doorway => "Doorway Arena",
            Layout::Plus => "Plus-Shaped Arena",
            Layout::Randomized => "Randomized Arena",
        }
    }
}

/// Starting pose of a turtle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vec2,
    /// Heading in degrees
    pub heading: f32,
}

/// The match arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    width: f32,
    height: f32,
    layout: Option<Layout>,
    blocks: Vec<Block>,
}

impl Arena {
    /// Build a named layout. Only `Layout::Randomized` draws from `rng`.
    pub fn build<R: Rng>(width: f32, height: f32, layout: Layout, rng: &mut R) -> Self {
        let mut arena = Self {
            width,
            height,
            layout: Some(layout),
            blocks: Vec::new(),
        };

        match layout {
            Layout::Empty => {}
            Layout::CentralColumn => arena.single_block(),
            Layout::CornerColumns => arena.corner_blocks(),
            Layout::Doorway => arena.doorway_blocks(),
            Layout::Plus => arena.plus_blocks(),
            Layout::Randomized => arena.random_blocks(rng),
        }

        log::info!(
            "Built {} ({}x{}) with {} blocks",
            layout.name(),
            width,
            height,
            arena.blocks.len()
        );
        arena
    }

    /// Build a layout from its numeric id
    pub fn from_id<R: Rng>(
        width: f32,
        height: f32,
        id: u32,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        Ok(Self::build(width, height, Layout::from_id(id)?, rng))
    }

    /// Arena with an explicit set of blocks
    pub fn with_blocks(width: f32, height: f32, blocks: Vec<Block>) -> Self {
        Self {
            width,
            height,
            layout: None,
            blocks,
        }
    }

    fn single_block(&mut self) {
        let center = self.center();
        self.blocks.push(Block::centered(center, 80.0, 80.0));
    }

    fn corner_blocks(&mut self) {
        let (w, h) = (self.width, self.height);
        self.blocks.push(Block::new(200.0, 260.0, 200.0, 260.0));
        self.blocks.push(Block::new(w - 260.0, w - 200.0, 200.0, 260.0));
        self.blocks.push(Block::new(200.0, 260.0, h - 260.0, h - 200.0));
        self.blocks
            .push(Block::new(w - 260.0, w - 200.0, h - 260.0, h - 200.0));
    }

    fn doorway_blocks(&mut self) {
        let (w, h) = (self.width, self.height);
        self.blocks
            .push(Block::new(w / 2.0 - 30.0, w / 2.0 + 30.0, -40.0, h / 2.0 - 60.0));
        self.blocks
            .push(Block::new(w / 2.0 - 30.0, w / 2.0 + 30.0, h / 2.0 + 60.0, h + 40.0));
    }

    fn plus_blocks(&mut self) {
        let (w, h) = (self.width, self.height);
        self.blocks.push(Block::new(
            w / 2.0 - 30.0,
            w / 2.0 + 30.0,
            (h / 3.0).floor(),
            (2.0 * h / 3.0).ceil(),
        ));
        self.blocks.push(Block::new(
            (w / 3.0).floor(),
            (2.0 * w / 3.0).ceil(),
            h / 2.0 - 30.0,
            h / 2.0 + 30.0,
        ));
    }

    /// Randomized layout: an optional central block plus 1-3 pairs of
    /// blocks mirrored through the center. Candidates that would cover a
    /// spawn point are thrown away and redrawn.
    ///
    /// The retry loop has no upper bound. With very small arenas or spawn
    /// points that every placement covers, it would never finish.
    fn random_blocks<R: Rng>(&mut self, rng: &mut R) {
        let (w, h) = (self.width, self.height);
        let center = self.center();

        if rng.random_bool(0.5) {
            loop {
                let hw = rng.random_range(10..=150) as f32;
                let hh = rng.random_range(10..=150) as f32;
                let block = Block::centered(center, hw, hh);
                if !self.covers_spawn(&[block]) {
                    self.blocks.push(block);
                    break;
                }
                log::debug!("Rejected central block {:?} covering a spawn point", block);
            }
        }

        let pairs = rng.random_range(1..=3);
        let mut placed = 0;
        while placed < pairs {
            let hw = rng.random_range(10..=120) as f32;
            let hh = rng.random_range(10..=120) as f32;
            let cx = rng.random_range(0..=w as u32) as f32;
            let cy = rng.random_range(0..=h as u32) as f32;

            let first = Block::centered(Vec2::new(cx, cy), hw, hh);
            let mirror = Block::centered(Vec2::new(w - cx, h - cy), hw, hh);
            if self.covers_spawn(&[first, mirror]) {
                log::debug!("Rejected block pair at ({cx}, {cy}) covering a spawn point");
                continue;
            }

            self.blocks.push(first);
            self.blocks.push(mirror);
            placed += 1;
        }
    }

    fn covers_spawn(&self, candidates: &[Block]) -> bool {
        self.spawn_points().iter().any(|spawn| {
            candidates
                .iter()
                .any(|b| b.contains(spawn.position, true))
        })
    }

    /// Default starting poses for player 1 and player 2
    pub fn spawn_points(&self) -> [SpawnPoint; 2] {
        [
            SpawnPoint {
                position: Vec2::new(self.width / 4.0, self.height / 2.0),
                heading: -90.0,
            },
            SpawnPoint {
                position: Vec2::new(3.0 * self.width / 4.0, self.height / 2.0),
                heading: 90.0,
            },
        ]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Smallest x coordinate
    pub fn left(&self) -> f32 {
        0.0
    }

    /// Largest x coordinate
    pub fn right(&self) -> f32 {
        self.width
    }

    /// Smallest y coordinate
    pub fn bottom(&self) -> f32 {
        0.0
    }

    /// Largest y coordinate
    pub fn top(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Layout this arena was built from (None for custom block sets)
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether a point lies within the arena extents (edges included)
    pub fn in_bounds(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    /// Clamp a point to the arena extents
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.bottom(), self.top()),
        )
    }

    /// All blocks containing a point (boundary included)
    pub fn intersections(&self, point: Vec2) -> Vec<&Block> {
        self.blocks
            .iter()
            .filter(|b| b.contains(point, true))
            .collect()
    }

    /// Whether any block contains a point
    pub fn blocked(&self, point: Vec2) -> bool {
        self.blocks.iter().any(|b| b.contains(point, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn build(layout: Layout, seed: u64) -> Arena {
        let mut rng = Pcg32::seed_from_u64(seed);
        Arena::build(800.0, 800.0, layout, &mut rng)
    }

    #[test]
    fn test_layout_ids_round_trip() {
        for layout in Layout::ALL {
            assert_eq!(Layout::from_id(layout.id()).unwrap(), layout);
        }
        assert_eq!(Layout::from_id(6).unwrap_err(), SimError::UnknownLayout(6));
    }

    #[test]
    fn test_block_counts() {
        assert_eq!(build(Layout::Empty, 0).blocks().len(), 0);
        assert_eq!(build(Layout::CentralColumn, 0).blocks().len(), 1);
        assert_eq!(build(Layout::CornerColumns, 0).blocks().len(), 4);
        assert_eq!(build(Layout::Doorway, 0).blocks().len(), 2);
        assert_eq!(build(Layout::Plus, 0).blocks().len(), 2);
    }

    #[test]
    fn test_default_spawn_points() {
        let arena = build(Layout::Empty, 0);
        let [p1, p2] = arena.spawn_points();
        assert_eq!(p1.position, Vec2::new(200.0, 400.0));
        assert_eq!(p1.heading, -90.0);
        assert_eq!(p2.position, Vec2::new(600.0, 400.0));
        assert_eq!(p2.heading, 90.0);
    }

    #[test]
    fn test_fixed_layouts_leave_spawns_free() {
        for layout in Layout::ALL {
            let arena = build(layout, 7);
            for spawn in arena.spawn_points() {
                assert!(!arena.blocked(spawn.position), "{} blocks a spawn", layout.name());
            }
        }
    }

    #[test]
    fn test_doorway_has_passage() {
        let arena = build(Layout::Doorway, 0);
        assert!(!arena.blocked(Vec2::new(400.0, 400.0)));
        assert!(arena.blocked(Vec2::new(400.0, 100.0)));
        assert!(arena.blocked(Vec2::new(400.0, 700.0)));
    }

    #[test]
    fn test_plus_center_is_blocked_by_both() {
        let arena = build(Layout::Plus, 0);
        assert_eq!(arena.intersections(Vec2::new(400.0, 400.0)).len(), 2);
        assert_eq!(arena.intersections(Vec2::new(400.0, 300.0)).len(), 1);
        assert!(arena.intersections(Vec2::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_randomized_layout_properties() {
        for seed in 0..50 {
            let arena = build(Layout::Randomized, seed);
            let n = arena.blocks().len();
            assert!((2..=7).contains(&n), "seed {seed} produced {n} blocks");

            for spawn in arena.spawn_points() {
                assert!(!arena.blocked(spawn.position), "seed {seed} covers a spawn");
            }

            // Every block has a mirror image through the center
            let c = arena.center();
            for b in arena.blocks() {
                let mirrored = c * 2.0 - b.center();
                assert!(
                    arena.blocks().iter().any(|o| {
                        (o.center() - mirrored).length() < 1e-3
                            && (o.width() - b.width()).abs() < 1e-3
                            && (o.height() - b.height()).abs() < 1e-3
                    }),
                    "seed {seed}: block {b:?} has no mirror"
                );
            }
        }
    }

    #[test]
    fn test_randomized_layout_is_seeded() {
        let a = build(Layout::Randomized, 1234);
        let b = build(Layout::Randomized, 1234);
        assert_eq!(a.blocks(), b.blocks());
    }

    #[test]
    fn test_clamp_and_bounds() {
        let arena = build(Layout::Empty, 0);
        assert_eq!(arena.clamp(Vec2::new(-5.0, 900.0)), Vec2::new(0.0, 800.0));
        assert!(arena.in_bounds(Vec2::new(0.0, 800.0)));
        assert!(!arena.in_bounds(Vec2::new(800.1, 10.0)));
    }
}
