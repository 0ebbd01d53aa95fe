//! Uniform spatial hash for broad-phase collision detection
//!
//! Entities are indexed into every cell their bounding circle touches, so a
//! query only has to look at the cells the query circle touches. The grid is
//! rebuilt from scratch every frame; it stores slice indices, which stay valid
//! until the entity list changes.

use std::collections::HashMap;

use glam::Vec2;

use super::ball::Ball;

/// Cell coordinate
type CellKey = (i32, i32);

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            cells: HashMap::new(),
        }
    }

    /// Clear contents, keeping allocations for the next rebuild
    pub fn clear(&mut self) {
        for v in self.cells.values_mut() {
            v.clear();
        }
        self.cells.retain(|_, v| v.capacity() > 0);
    }

    #[inline]
    fn cell_coord(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    /// Inclusive cell range covered by a circle
    fn cell_range(&self, pos: Vec2, radius: f32) -> (CellKey, CellKey) {
        let r = radius.max(0.0);
        (
            (self.cell_coord(pos.x - r), self.cell_coord(pos.y - r)),
            (self.cell_coord(pos.x + r), self.cell_coord(pos.y + r)),
        )
    }

    /// Index an entity into every cell its bounding circle overlaps
    pub fn insert(&mut self, index: usize, pos: Vec2, radius: f32) {
        if !pos.is_finite() {
            return;
        }
        let ((x0, y0), (x1, y1)) = self.cell_range(pos, radius);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                self.cells.entry((cx, cy)).or_default().push(index);
            }
        }
    }

    /// Clear and repopulate from the balls that can still collide
    pub fn rebuild(&mut self, balls: &[Ball]) {
        self.clear();
        for (i, ball) in balls.iter().enumerate() {
            if ball.is_active() {
                self.insert(i, ball.pos, ball.radius());
            }
        }
    }

    /// Indices sharing a cell with the given circle, deduplicated and sorted,
    /// excluding `exclude`
    ///
    /// This is a superset of the true overlaps; callers run the exact test.
    pub fn query(&self, pos: Vec2, radius: f32, exclude: Option<usize>) -> Vec<usize> {
        if !pos.is_finite() {
            return Vec::new();
        }
        let ((x0, y0), (x1, y1)) = self.cell_range(pos, radius);
        let mut found = Vec::new();
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                if let Some(entries) = self.cells.get(&(cx, cy)) {
                    found.extend(entries.iter().copied().filter(|&i| Some(i) != exclude));
                }
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Number of non-empty cells (diagnostics)
    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|v| !v.is_empty()).count()
    }
}
