//! Half-edge mesh built from finished Voronoi edges.
//!
//! Construction contract
//! - Every edge contributes two vertices (start, end) and two twinned
//!   half-edges: `2k` runs start → end, `2k + 1` runs end → start.
//! - The forward half-edge has the cell of `site_right` on its left, the
//!   backward one the cell of `site_left` (edge directions rotate
//!   `right - left` clockwise).
//! - Vertices are not welded; consumers that need shared vertices merge by position.

use nalgebra::Vector2;

use crate::sweep::VoronoiEdge;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub pos: Vector2<f64>,
    /// Half-edge leaving this vertex.
    pub half_edge: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfEdge {
    pub origin: usize,
    pub twin: usize,
    /// Input index of the site whose cell lies to the left.
    pub site: usize,
}

#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    pub vertices: Vec<MeshVertex>,
    pub half_edges: Vec<HalfEdge>,
}

impl HalfEdgeMesh {
    pub fn from_edges(edges: &[VoronoiEdge]) -> Self {
        let mut mesh = Self {
            vertices: Vec::with_capacity(2 * edges.len()),
            half_edges: Vec::with_capacity(2 * edges.len()),
        };
        for e in edges {
            let v0 = mesh.vertices.len();
            let h0 = mesh.half_edges.len();
            mesh.vertices.push(MeshVertex {
                pos: e.start,
                half_edge: h0,
            });
            mesh.vertices.push(MeshVertex {
                pos: e.end,
                half_edge: h0 + 1,
            });
            mesh.half_edges.push(HalfEdge {
                origin: v0,
                twin: h0 + 1,
                site: e.site_right,
            });
            mesh.half_edges.push(HalfEdge {
                origin: v0 + 1,
                twin: h0,
                site: e.site_left,
            });
        }
        mesh
    }

    #[inline]
    pub fn twin(&self, h: usize) -> usize {
        self.half_edges[h].twin
    }

    #[inline]
    pub fn origin(&self, h: usize) -> Vector2<f64> {
        self.vertices[self.half_edges[h].origin].pos
    }

    #[inline]
    pub fn destination(&self, h: usize) -> Vector2<f64> {
        self.origin(self.twin(h))
    }

    /// Half-edges bordering the cell of `site`.
    pub fn cell_half_edges(&self, site: usize) -> impl Iterator<Item = usize> + '_ {
        self.half_edges
            .iter()
            .enumerate()
            .filter(move |(_, h)| h.site == site)
            .map(|(i, _)| i)
    }
}
