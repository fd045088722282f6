//! Turtle-vs-block collision response
//!
//! Collisions are resolved after the fact: a turtle moves, gets clamped to
//! the arena, and is then pushed out of every block it ended up inside along
//! the axis of least penetration. This is a greedy single pass: with
//! overlapping blocks the result may still lie inside one of them.

use glam::Vec2;

use super::arena::Arena;
use super::block::Block;
use crate::consts::{NO_PENETRATION, PUSH_CLEARANCE};

/// Edge of a block a turtle is pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushEdge {
    Left,
    Right,
    Bottom,
    Top,
}

impl PushEdge {
    /// Tie-break order when two edges are equally close
    pub const ORDER: [PushEdge; 4] = [PushEdge::Left, PushEdge::Right, PushEdge::Bottom, PushEdge::Top];
}

/// Result of a push-out check against one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushOut {
    /// Edge the point leaves through
    pub edge: PushEdge,
    /// Distance past that edge
    pub penetration: f32,
    /// Corrected position, one unit of clearance outside the edge
    pub resolved: Vec2,
}

/// Penetration depth past each edge of a block, in `PushEdge::ORDER`.
///
/// An edge the point has not crossed reports `NO_PENETRATION`.
pub fn penetrations(point: Vec2, block: &Block) -> [f32; 4] {
    let mut overlap = [NO_PENETRATION; 4];
    if point.x >= block.left() {
        overlap[0] = point.x - block.left();
    }
    if point.x <= block.right() {
        overlap[1] = block.right() - point.x;
    }
    if point.y >= block.bottom() {
        overlap[2] = point.y - block.bottom();
    }
    if point.y <= block.top() {
        overlap[3] = block.top() - point.y;
    }
    overlap
}

fn resolved_position(point: Vec2, block: &Block, edge: PushEdge) -> Vec2 {
    match edge {
        PushEdge::Left => Vec2::new(block.left() - PUSH_CLEARANCE, point.y),
        PushEdge::Right => Vec2::new(block.right() + PUSH_CLEARANCE, point.y),
        PushEdge::Bottom => Vec2::new(point.x, block.bottom() - PUSH_CLEARANCE),
        PushEdge::Top => Vec2::new(point.x, block.top() + PUSH_CLEARANCE),
    }
}

/// Least-penetration push-out of a point from a block.
///
/// Edges whose corrected position would leave the arena are skipped. If
/// every edge would leave the arena the plain minimum is used.
pub fn push_out(point: Vec2, block: &Block, arena: &Arena) -> PushOut {
    let overlap = penetrations(point, block);

    let mut best: Option<PushOut> = None;
    let mut fallback: Option<PushOut> = None;
    for (i, edge) in PushEdge::ORDER.into_iter().enumerate() {
        let candidate = PushOut {
            edge,
            penetration: overlap[i],
            resolved: resolved_position(point, block, edge),
        };

        if fallback.is_none_or(|f| candidate.penetration < f.penetration) {
            fallback = Some(candidate);
        }
        if arena.in_bounds(candidate.resolved)
            && best.is_none_or(|b| candidate.penetration < b.penetration)
        {
            best = Some(candidate);
        }
    }

    // ORDER is non-empty, so at least the fallback is always set
    best.or(fallback).unwrap_or(PushOut {
        edge: PushEdge::Left,
        penetration: 0.0,
        resolved: point,
    })
}

/// Clamp a candidate position to the arena and push it out of any blocks it
/// lands in.
///
/// The set of blocks is taken once from the clamped position. Each is then
/// resolved in arena order against the running position.
pub fn resolve_position(candidate: Vec2, arena: &Arena) -> Vec2 {
    let mut pos = arena.clamp(candidate);
    let hits: Vec<Block> = arena.intersections(pos).into_iter().copied().collect();
    for block in &hits {
        let push = push_out(pos, block, arena);
        log::trace!(
            "Pushed out of block through {:?} edge ({} deep)",
            push.edge,
            push.penetration
        );
        pos = push.resolved;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena_with(block: Block) -> Arena {
        Arena::with_blocks(800.0, 800.0, vec![block])
    }

    #[test]
    fn test_penetrations() {
        let block = Block::new(100.0, 200.0, 100.0, 200.0);
        let overlap = penetrations(Vec2::new(110.0, 150.0), &block);
        assert_eq!(overlap, [10.0, 90.0, 50.0, 50.0]);

        // Edges not crossed report the sentinel
        let overlap = penetrations(Vec2::new(90.0, 150.0), &block);
        assert_eq!(overlap[0], NO_PENETRATION);
    }

    #[test]
    fn test_push_out_least_penetration() {
        let block = Block::new(100.0, 200.0, 100.0, 200.0);
        let arena = arena_with(block);

        let push = push_out(Vec2::new(110.0, 150.0), &block, &arena);
        assert_eq!(push.edge, PushEdge::Left);
        assert_eq!(push.resolved, Vec2::new(99.0, 150.0));

        let push = push_out(Vec2::new(150.0, 197.0), &block, &arena);
        assert_eq!(push.edge, PushEdge::Top);
        assert_eq!(push.resolved, Vec2::new(150.0, 201.0));

        let push = push_out(Vec2::new(150.0, 101.0), &block, &arena);
        assert_eq!(push.edge, PushEdge::Bottom);
        assert_eq!(push.resolved, Vec2::new(150.0, 99.0));
    }

    #[test]
    fn test_ties_prefer_left_then_right() {
        let block = Block::new(100.0, 200.0, 100.0, 200.0);
        let arena = arena_with(block);
        // Dead center: all four overlaps equal
        let push = push_out(Vec2::new(150.0, 150.0), &block, &arena);
        assert_eq!(push.edge, PushEdge::Left);
    }

    #[test]
    fn test_push_stays_inside_arena() {
        // Block hugging the left wall: leaving through its left edge would
        // exit the arena, so the next best edge is used
        let block = Block::new(-20.0, 60.0, 300.0, 500.0);
        let arena = arena_with(block);
        let pos = resolve_position(Vec2::new(-4.0, 400.0), &arena);
        assert_eq!(pos, Vec2::new(61.0, 400.0));
    }

    #[test]
    fn test_resolve_clamps_first() {
        let arena = Arena::with_blocks(800.0, 800.0, Vec::new());
        assert_eq!(resolve_position(Vec2::new(900.0, -3.0), &arena), Vec2::new(800.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_single_block_resolution(
            left in 10.0f32..700.0,
            bottom in 10.0f32..700.0,
            w in 1.0f32..80.0,
            h in 1.0f32..80.0,
            px in -50.0f32..850.0,
            py in -50.0f32..850.0,
        ) {
            let block = Block::new(left, left + w, bottom, bottom + h);
            let arena = arena_with(block);
            let pos = resolve_position(Vec2::new(px, py), &arena);
            prop_assert!(arena.in_bounds(pos));
            prop_assert!(!block.contains(pos, true));
        }
    }
}
