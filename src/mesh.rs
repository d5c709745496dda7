//! `PolyMesh`: an indexed polygon mesh with edge→face adjacency

use crate::errors::MeshError;
use crate::float_types::Real;
use crate::polygon::Polygon;
use crate::traits::FaceMesh;
use hashbrown::{HashMap, HashSet};
use nalgebra::Point3;
use tracing::debug;

/// Identity of a face: its position in the mesh's face list.
///
/// Ids are reassigned when faces are deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// Canonical edge key (smaller vertex index first)
pub type EdgeKey = (usize, usize);

const fn edge_key(a: usize, b: usize) -> EdgeKey {
    if a < b { (a, b) } else { (b, a) }
}

/// Polygon mesh with shared vertices.
#[derive(Debug, Clone)]
pub struct PolyMesh {
    vertices: Vec<Point3<Real>>,
    faces: Vec<Vec<usize>>,
    polygons: Vec<Polygon>,
    edge_faces: HashMap<EdgeKey, Vec<FaceId>>,
}

impl PolyMesh {
    /// Build a mesh from vertex positions and face index loops.
    ///
    /// ## Errors
    /// If a coordinate is not finite, a face has fewer than 3 indices,
    /// references a missing vertex, or repeats a vertex consecutively.
    pub fn new(vertices: Vec<Point3<Real>>, faces: Vec<Vec<usize>>) -> Result<Self, MeshError> {
        if let Some((vertex, point)) = vertices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(MeshError::InvalidCoordinate { vertex, point: *point });
        }

        for (face, indices) in faces.iter().enumerate() {
            if indices.len() < 3 {
                return Err(MeshError::TooFewPoints { face, count: indices.len() });
            }
            if let Some(&vertex) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::InvalidVertexIndex {
                    face,
                    vertex,
                    len: vertices.len(),
                });
            }
            if let Some((&vertex, _)) = indices
                .iter()
                .zip(indices.iter().cycle().skip(1))
                .find(|(a, b)| a == b)
            {
                return Err(MeshError::RepeatedPoint { face, vertex });
            }
        }

        Ok(Self::assemble(vertices, faces))
    }

    /// Build a mesh from unconnected position loops, welding positions that
    /// coincide after quantization so that touching faces become linked.
    ///
    /// - Uses a `QUANTIZATION_FACTOR` for `Real` coordinates, so positions
    ///   closer than `1e-7` per axis may be merged
    /// - Coordinates must stay below `i64::MAX / QUANTIZATION_FACTOR`
    ///   (about `9.2e11`) in magnitude
    ///
    /// ## Errors
    /// [`MeshError::InvalidCoordinate`] for a non-finite or out-of-range
    /// coordinate, where `vertex` counts positions across all loops.
    /// Otherwise the same as [`PolyMesh::new`].
    pub fn from_polygon_soup(loops: &[Vec<Point3<Real>>]) -> Result<Self, MeshError> {
        const QUANTIZATION_FACTOR: Real = 1e7;

        let limit = i64::MAX as Real;
        if let Some((vertex, point)) = loops.iter().flatten().enumerate().find(|(_, p)| {
            !p.coords
                .iter()
                .all(|c| (c * QUANTIZATION_FACTOR).abs() < limit)
        }) {
            return Err(MeshError::InvalidCoordinate { vertex, point: *point });
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        struct QuantizedPoint(i64, i64, i64);

        fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
            QuantizedPoint(
                (p.x * QUANTIZATION_FACTOR).round() as i64,
                (p.y * QUANTIZATION_FACTOR).round() as i64,
                (p.z * QUANTIZATION_FACTOR).round() as i64,
            )
        }

        let mut vertices = Vec::new();
        let mut lookup: HashMap<QuantizedPoint, usize> = HashMap::new();
        let faces = loops
            .iter()
            .map(|face_loop| {
                face_loop
                    .iter()
                    .map(|p| {
                        *lookup.entry(quantize_point(p)).or_insert_with(|| {
                            vertices.push(*p);
                            vertices.len() - 1
                        })
                    })
                    .collect()
            })
            .collect();

        Self::new(vertices, faces)
    }

    fn assemble(vertices: Vec<Point3<Real>>, faces: Vec<Vec<usize>>) -> Self {
        let polygons = faces
            .iter()
            .map(|indices| Polygon::new(indices.iter().map(|&i| vertices[i]).collect()))
            .collect();

        let mut edge_faces: HashMap<EdgeKey, Vec<FaceId>> = HashMap::new();
        for (face_idx, indices) in faces.iter().enumerate() {
            for (&a, &b) in indices.iter().zip(indices.iter().cycle().skip(1)) {
                let linked = edge_faces.entry(edge_key(a, b)).or_default();
                if !linked.contains(&FaceId(face_idx)) {
                    linked.push(FaceId(face_idx));
                }
            }
        }

        PolyMesh {
            vertices,
            faces,
            polygons,
            edge_faces,
        }
    }

    /// Vertex positions
    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    /// Face index loops
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Vertex indices of one face
    pub fn face_indices(&self, id: FaceId) -> &[usize] {
        &self.faces[id.0]
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Faces sharing the edge between vertices `a` and `b` (either order).
    pub fn edge_faces(&self, a: usize, b: usize) -> &[FaceId] {
        self.edge_faces
            .get(&edge_key(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl FaceMesh for PolyMesh {
    fn face_ids(&self) -> Vec<FaceId> {
        (0..self.faces.len()).map(FaceId).collect()
    }

    fn face(&self, id: FaceId) -> &Polygon {
        &self.polygons[id.0]
    }

    fn linked_faces(&self, id: FaceId) -> Vec<FaceId> {
        let indices = &self.faces[id.0];
        let mut linked = Vec::new();
        for (&a, &b) in indices.iter().zip(indices.iter().cycle().skip(1)) {
            for &other in self.edge_faces(a, b) {
                if other != id && !linked.contains(&other) {
                    linked.push(other);
                }
            }
        }
        linked
    }

    /// Removes the faces, then any vertex no longer used by a remaining face.
    /// Surviving faces keep their relative order and are renumbered.
    fn delete_faces(&mut self, faces: &HashSet<FaceId>) {
        if faces.is_empty() {
            return;
        }

        let kept: Vec<Vec<usize>> = self
            .faces
            .iter()
            .enumerate()
            .filter(|(idx, _)| !faces.contains(&FaceId(*idx)))
            .map(|(_, indices)| indices.clone())
            .collect();

        let mut remap: HashMap<usize, usize> = HashMap::new();
        let mut vertices = Vec::new();
        let kept: Vec<Vec<usize>> = kept
            .into_iter()
            .map(|indices| {
                indices
                    .into_iter()
                    .map(|old| {
                        *remap.entry(old).or_insert_with(|| {
                            vertices.push(self.vertices[old]);
                            vertices.len() - 1
                        })
                    })
                    .collect()
            })
            .collect();

        let before = self.faces.len();
        *self = Self::assemble(vertices, kept);
        debug!(
            "Deleted {} faces, {} remain",
            before - self.faces.len(),
            self.faces.len()
        );
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }
}
