//! Layout module - hex geometry in world space
//!
//! Cells are flat-top hexagons. With `r = cell_width * scale / 2`:
//!
//! - column `c` is centered at `x = c * 1.5r`
//! - row `r0` of an even column is centered at `y = -r0 * sqrt(3) * r`
//! - odd columns are shifted down by half a cell height (`sqrt(3)/2 * r`)
//!
//! Positions are relative to `origin`, the center of slot (0, 0); y grows upwards,
//! so rows run downwards.

use crate::types::{GridPosition, Point, VertexDirection, DEFAULT_CELL_WIDTH};

const SQRT_3: f32 = 1.732_050_8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    pub cell_width: f32,
    pub scale: f32,
    pub origin: Point,
}

impl HexLayout {
    pub fn new(cell_width: f32, scale: f32, origin: Point) -> Self {
        Self {
            cell_width,
            scale,
            origin,
        }
    }

    /// Distance from a cell center to any of its vertices
    pub fn radius(&self) -> f32 {
        self.cell_width * self.scale * 0.5
    }

    /// World-space center of the slot at `position`
    pub fn slot_center(&self, position: GridPosition) -> Point {
        let r = self.radius();
        let x = position.column as f32 * 1.5 * r;
        let mut y = -(position.row as f32) * SQRT_3 * r;
        if !position.is_even_column() {
            y -= SQRT_3 * 0.5 * r;
        }
        Point::new(self.origin.x + x, self.origin.y + y)
    }

    /// World-space point of one vertex of the slot at `position`
    pub fn vertex(&self, position: GridPosition, vertex: VertexDirection) -> Point {
        let center = self.slot_center(position);
        let r = self.radius();
        let h = SQRT_3 * 0.5 * r;
        let (dx, dy) = match vertex {
            VertexDirection::NorthEast => (0.5 * r, h),
            VertexDirection::East => (r, 0.0),
            VertexDirection::SouthEast => (0.5 * r, -h),
            VertexDirection::SouthWest => (-0.5 * r, -h),
            VertexDirection::West => (-r, 0.0),
            VertexDirection::NorthWest => (-0.5 * r, h),
        };
        Point::new(center.x + dx, center.y + dy)
    }

    /// All six vertices of a slot in cyclic order
    pub fn vertices(&self, position: GridPosition) -> [(VertexDirection, Point); 6] {
        VertexDirection::ALL.map(|vertex| (vertex, self.vertex(position, vertex)))
    }

    /// Vertex of the slot nearest to `point`
    ///
    /// Ties resolve to the earliest vertex in cyclic order.
    pub fn nearest_vertex(&self, position: GridPosition, point: Point) -> VertexDirection {
        let mut best = VertexDirection::NorthEast;
        let mut best_distance = f32::INFINITY;
        for (vertex, corner) in self.vertices(position) {
            let distance = point.distance_squared(corner);
            if distance < best_distance {
                best_distance = distance;
                best = vertex;
            }
        }
        best
    }

    /// Point above the top row of `position`'s column where refilled cells enter
    pub fn spawn_point(&self, position: GridPosition) -> Point {
        let top = self.slot_center(GridPosition::new(0, position.column));
        Point::new(top.x, top.y + SQRT_3 * self.radius())
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_WIDTH, 1.0, Point::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_slot_centers() {
        let layout = HexLayout::default();
        assert!(close(layout.slot_center(GridPosition::new(0, 0)), Point::new(0.0, 0.0)));
        assert!(close(
            layout.slot_center(GridPosition::new(0, 1)),
            Point::new(0.75, -SQRT_3 * 0.25)
        ));
        assert!(close(
            layout.slot_center(GridPosition::new(2, 2)),
            Point::new(1.5, -SQRT_3)
        ));
    }

    #[test]
    fn test_neighbors_share_vertices() {
        // NE neighbor of (1,0) is (0,1); its SW vertex equals (1,0)'s E vertex.
        let layout = HexLayout::default();
        let e = layout.vertex(GridPosition::new(1, 0), VertexDirection::East);
        let sw = layout.vertex(GridPosition::new(0, 1), VertexDirection::SouthWest);
        assert!(close(e, sw));

        // N neighbor of (1,0) is (0,0); its SE vertex equals (1,0)'s NE vertex.
        let ne = layout.vertex(GridPosition::new(1, 0), VertexDirection::NorthEast);
        let se = layout.vertex(GridPosition::new(0, 0), VertexDirection::SouthEast);
        assert!(close(ne, se));
    }

    #[test]
    fn test_nearest_vertex() {
        let layout = HexLayout::default();
        let pos = GridPosition::new(3, 3);
        for (vertex, corner) in layout.vertices(pos) {
            assert_eq!(layout.nearest_vertex(pos, corner), vertex);
        }
        let center = layout.slot_center(pos);
        let nudged = Point::new(center.x - 0.1, center.y - 0.01);
        assert_eq!(layout.nearest_vertex(pos, nudged), VertexDirection::West);
    }

    #[test]
    fn test_spawn_point_is_above_board() {
        let layout = HexLayout::default();
        let spawn = layout.spawn_point(GridPosition::new(5, 2));
        assert!(spawn.y > layout.slot_center(GridPosition::new(0, 2)).y);
    }
}
