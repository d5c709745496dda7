use crate::mesh::FaceId;
use crate::polygon::Polygon;
use hashbrown::HashSet;

/// Face access and face deletion needed by the z-fight scan.
///
/// Implementors own the topology; the scan only reads faces and adjacency and
/// hands back a finished, duplicate-free set of faces to delete.
pub trait FaceMesh {
    /// All face ids, in a fixed order that the scan will follow.
    fn face_ids(&self) -> Vec<FaceId>;

    /// Geometry of a face.
    fn face(&self, id: FaceId) -> &Polygon;

    /// Faces sharing at least one edge with `id`, excluding `id` itself.
    fn linked_faces(&self, id: FaceId) -> Vec<FaceId>;

    /// Remove every face in `faces`.
    fn delete_faces(&mut self, faces: &HashSet<FaceId>);

    /// Number of faces.
    fn face_count(&self) -> usize {
        self.face_ids().len()
    }

    /// Area of a face.
    fn face_area(&self, id: FaceId) -> crate::float_types::Real {
        self.face(id).area()
    }
}
