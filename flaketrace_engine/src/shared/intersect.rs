use crate::core::types::{Number, Point3, Vector3};
use crate::object::Primitive;

/// A geometry-only ray-mesh intersection, as produced by a [mesh](crate::mesh::Mesh)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshIntersection {
    /// Parameter along the ray that the intersection occurred, as a fraction of the ray's direction
    pub t: Number,
    /// The position in world coordinates of the intersection
    pub pos: Point3,
    /// Surface normal at intersection.
    /// This should point in the *outwards* direction, irrespective of the
    /// incident ray
    ///
    /// # Invariants
    ///  - Must be normalised
    pub normal: Vector3,
}

/// A struct representing a ray-object intersection, borrowing the [Primitive] that was hit
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'s> {
    pub t: Number,
    pub pos: Point3,
    pub normal: Vector3,
    /// The top-level primitive that was hit; supplies the material
    pub primitive: &'s Primitive,
}

impl MeshIntersection {
    /// Attaches the primitive that owns the mesh, turning this into a full [Intersection]
    pub fn with_primitive(self, primitive: &Primitive) -> Intersection<'_> {
        Intersection {
            t: self.t,
            pos: self.pos,
            normal: self.normal,
            primitive,
        }
    }
}
