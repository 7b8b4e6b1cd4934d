use crate::errors::SimError;
use nalgebra as na;

/// Combinator selector for [`Face2D::combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    Add,
    Subtract,
}

/// Right-hand operand for [`Face2D::combine`]: either another polygon or a
/// translation offset.
#[derive(Debug, Clone)]
pub enum Operand {
    Polygon(Face2D),
    Offset(na::Vector2<f64>),
}

/// A closed polygonal face in its own 2D plane.
///
/// The outer ring is listed counterclockwise with the first vertex repeated at
/// the end. Holes are encoded by appending additional closed rings wound
/// clockwise; the shoelace sums then subtract their area automatically, so no
/// polygon clipping is ever performed. Winding and closure are preconditions,
/// not validated at runtime.
#[derive(Debug, Clone)]
pub struct Face2D {
    vertices: Vec<na::Vector2<f64>>,
    area: f64,
    centroid: na::Vector2<f64>,
    sigma_n: f64,
    sigma_t: f64,
    reflection_coeff: f64,
}

impl Face2D {
    /// Default momentum-exchange and reflection coefficients, used when a face
    /// is built without explicit surface properties.
    pub const DEFAULT_SIGMA_N: f64 = 0.8;
    pub const DEFAULT_SIGMA_T: f64 = 0.8;
    pub const DEFAULT_REFLECTION: f64 = 0.6;

    pub fn new(vertices: Vec<na::Vector2<f64>>) -> Self {
        let area = polygon_area(&vertices);
        let centroid = polygon_centroid(&vertices, area);
        Face2D {
            vertices,
            area,
            centroid,
            sigma_n: Self::DEFAULT_SIGMA_N,
            sigma_t: Self::DEFAULT_SIGMA_T,
            reflection_coeff: Self::DEFAULT_REFLECTION,
        }
    }

    /// Axis-aligned rectangle of the given width and height centered at the
    /// origin, wound counterclockwise and closed.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Face2D::new(vec![
            na::Vector2::new(-hw, -hh),
            na::Vector2::new(hw, -hh),
            na::Vector2::new(hw, hh),
            na::Vector2::new(-hw, hh),
            na::Vector2::new(-hw, -hh),
        ])
    }

    pub fn with_coefficients(mut self, sigma_n: f64, sigma_t: f64, reflection_coeff: f64) -> Self {
        self.sigma_n = sigma_n;
        self.sigma_t = sigma_t;
        self.reflection_coeff = reflection_coeff;
        self
    }

    pub fn vertices(&self) -> &[na::Vector2<f64>] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn centroid(&self) -> na::Vector2<f64> {
        self.centroid
    }

    pub fn sigma_n(&self) -> f64 {
        self.sigma_n
    }

    pub fn sigma_t(&self) -> f64 {
        self.sigma_t
    }

    pub fn reflection_coeff(&self) -> f64 {
        self.reflection_coeff
    }

    /// New face with every vertex shifted by `offset`. Surface coefficients
    /// carry over; area is unchanged, centroid shifts with the vertices.
    pub fn translated(&self, offset: &na::Vector2<f64>) -> Self {
        let vertices = self.vertices.iter().map(|v| v + offset).collect();
        Face2D {
            vertices,
            area: self.area,
            centroid: self.centroid + offset,
            sigma_n: self.sigma_n,
            sigma_t: self.sigma_t,
            reflection_coeff: self.reflection_coeff,
        }
    }

    /// Merge with an adjacent face by concatenating its ring onto this one and
    /// re-closing. Both rings keep their winding, so the areas add.
    pub fn union(&self, other: &Face2D) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.extend_from_slice(&other.vertices);
        vertices.push(self.vertices[0]);
        Face2D::new(vertices).with_coefficients(self.sigma_n, self.sigma_t, self.reflection_coeff)
    }

    /// Cut `other` out of this face by appending its ring reversed before
    /// re-closing. Reversing flips the winding, which makes the appended ring
    /// a hole: its signed area subtracts from the total.
    pub fn difference(&self, other: &Face2D) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.extend(other.vertices.iter().rev());
        vertices.push(self.vertices[0]);
        Face2D::new(vertices).with_coefficients(self.sigma_n, self.sigma_t, self.reflection_coeff)
    }

    /// Dynamic combinator dispatch. `Add` merges with a polygon or shifts by
    /// an offset; `Subtract` cuts a polygon hole. Subtracting an offset has no
    /// geometric meaning and fails with `TypeConflict`.
    pub fn combine(&self, op: CombineOp, operand: &Operand) -> Result<Face2D, SimError> {
        match (op, operand) {
            (CombineOp::Add, Operand::Polygon(other)) => Ok(self.union(other)),
            (CombineOp::Add, Operand::Offset(offset)) => Ok(self.translated(offset)),
            (CombineOp::Subtract, Operand::Polygon(other)) => Ok(self.difference(other)),
            (CombineOp::Subtract, Operand::Offset(_)) => Err(SimError::TypeConflict(
                "cannot subtract a translation offset from a polygon".to_string(),
            )),
        }
    }
}

/// Signed shoelace area over a closed vertex ring (last vertex == first).
/// https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
fn polygon_area(v: &[na::Vector2<f64>]) -> f64 {
    let mut a = 0.0;
    for i in 0..v.len().saturating_sub(1) {
        a += v[i].x * v[i + 1].y - v[i + 1].x * v[i].y;
    }
    0.5 * a
}

fn polygon_centroid(v: &[na::Vector2<f64>], area: f64) -> na::Vector2<f64> {
    let mut c = na::Vector2::zeros();
    for i in 0..v.len().saturating_sub(1) {
        let cross = v[i].x * v[i + 1].y - v[i + 1].x * v[i].y;
        c.x += (v[i].x + v[i + 1].x) * cross;
        c.y += (v[i].y + v[i + 1].y) * cross;
    }
    c / (6.0 * area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(4.0, 4.0, 16.0; "square of side 4")]
    #[test_case(2.0, 3.0, 6.0; "2 by 3 rectangle")]
    fn rectangle_area(w: f64, h: f64, expected: f64) {
        let face = Face2D::rectangle(w, h);
        assert_abs_diff_eq!(face.area(), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(face.centroid(), na::Vector2::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn hole_subtracts_area() {
        let outer = Face2D::rectangle(4.0, 4.0);
        let hole = Face2D::rectangle(2.0, 2.0);
        let cut = outer.difference(&hole);
        assert_abs_diff_eq!(cut.area(), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cut.centroid(), na::Vector2::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn difference_area_identity_for_offset_hole() {
        let outer = Face2D::rectangle(4.0, 4.0);
        let hole = Face2D::rectangle(2.0, 2.0).translated(&na::Vector2::new(0.5, 0.5));
        let cut = outer.difference(&hole);
        assert_abs_diff_eq!(cut.area(), outer.area() - hole.area(), epsilon = 1e-12);
    }

    #[test]
    fn union_adds_area() {
        let left = Face2D::rectangle(2.0, 2.0).translated(&na::Vector2::new(-1.0, 0.0));
        let right = Face2D::rectangle(2.0, 2.0).translated(&na::Vector2::new(1.0, 0.0));
        let merged = left.union(&right);
        assert_abs_diff_eq!(merged.area(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn translate_round_trip() {
        let face = Face2D::rectangle(1.0, 3.0).translated(&na::Vector2::new(0.3, -0.7));
        let t = na::Vector2::new(2.5, -1.25);
        let back = face.translated(&t).translated(&-t);
        assert_abs_diff_eq!(back.centroid(), face.centroid(), epsilon = 1e-12);
        for (a, b) in back.vertices().iter().zip(face.vertices()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn combine_dispatches_to_each_combinator() {
        let outer = Face2D::rectangle(4.0, 4.0);
        let hole = Face2D::rectangle(2.0, 2.0);

        let cut = outer
            .combine(CombineOp::Subtract, &Operand::Polygon(hole.clone()))
            .unwrap();
        assert_abs_diff_eq!(cut.area(), 12.0, epsilon = 1e-12);

        let merged = outer
            .combine(CombineOp::Add, &Operand::Polygon(hole))
            .unwrap();
        assert_abs_diff_eq!(merged.area(), 20.0, epsilon = 1e-12);

        let shifted = outer
            .combine(CombineOp::Add, &Operand::Offset(na::Vector2::new(1.0, 2.0)))
            .unwrap();
        assert_abs_diff_eq!(shifted.centroid(), na::Vector2::new(1.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn combine_rejects_subtracting_an_offset() {
        let face = Face2D::rectangle(1.0, 1.0);
        let result = face.combine(CombineOp::Subtract, &Operand::Offset(na::Vector2::x()));
        assert!(matches!(result, Err(SimError::TypeConflict(_))));
    }

    #[test]
    fn coefficients_survive_combinators() {
        let face = Face2D::rectangle(1.0, 1.0).with_coefficients(0.7, 0.6, 0.3);
        let cut = face.difference(&Face2D::rectangle(0.5, 0.5));
        assert_eq!(cut.sigma_n(), 0.7);
        assert_eq!(cut.sigma_t(), 0.6);
        assert_eq!(cut.reflection_coeff(), 0.3);
    }
}
