use crate::errors::SimError;
use crate::geometry::Face2D;
use nalgebra as na;
use std::str::FromStr;

/// One of the six signed coordinate directions used to orient a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    PlusX,
    MinusX,
    PlusY,
    MinusY,
    PlusZ,
    MinusZ,
}

impl Axis {
    pub fn unit(&self) -> na::Vector3<f64> {
        match self {
            Axis::PlusX => na::Vector3::x(),
            Axis::MinusX => -na::Vector3::x(),
            Axis::PlusY => na::Vector3::y(),
            Axis::MinusY => -na::Vector3::y(),
            Axis::PlusZ => na::Vector3::z(),
            Axis::MinusZ => -na::Vector3::z(),
        }
    }
}

impl FromStr for Axis {
    type Err = SimError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "+x" => Ok(Axis::PlusX),
            "-x" => Ok(Axis::MinusX),
            "+y" => Ok(Axis::PlusY),
            "-y" => Ok(Axis::MinusY),
            "+z" => Ok(Axis::PlusZ),
            "-z" => Ok(Axis::MinusZ),
            other => Err(SimError::TypeConflict(format!(
                "'{}' is not a signed axis token",
                other
            ))),
        }
    }
}

/// Face orientation: either the first two local basis vectors named as signed
/// global axes (third = cross product, right-handed), or an explicit rotation
/// matrix. Matrices are assumed orthonormal and are not validated.
#[derive(Debug, Clone, Copy)]
pub enum Orientation {
    AxisPair(Axis, Axis),
    Matrix(na::Matrix3<f64>),
}

impl Orientation {
    /// Columns are the local basis expressed in the global frame.
    pub fn to_matrix(&self) -> na::Matrix3<f64> {
        match self {
            Orientation::AxisPair(first, second) => {
                let e1 = first.unit();
                let e2 = second.unit();
                let e3 = e1.cross(&e2);
                na::Matrix3::from_columns(&[e1, e2, e3])
            }
            Orientation::Matrix(m) => *m,
        }
    }
}

/// A 2D face embedded in 3D: the planar polygon at local z = 0, rotated by
/// the orientation and shifted by the translation. All derived quantities
/// (vertices, area, centroid, outward normal) are computed at construction;
/// `with_*` methods return a fully re-derived copy, so no stale state is ever
/// observable.
#[derive(Debug, Clone)]
pub struct Face3D {
    face: Face2D,
    orientation: na::Matrix3<f64>,
    translation: na::Vector3<f64>,
    name: String,
    solar_panel: bool,
    // derived
    vertices: Vec<na::Vector3<f64>>,
    centroid: na::Vector3<f64>,
    normal: na::Vector3<f64>,
}

impl Face3D {
    pub fn new(face: Face2D, orientation: Orientation, translation: na::Vector3<f64>) -> Self {
        let rot = orientation.to_matrix();
        let (vertices, centroid, normal) = derive(&face, &rot, &translation);
        Face3D {
            face,
            orientation: rot,
            translation,
            name: String::new(),
            solar_panel: false,
            vertices,
            centroid,
            normal,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Marks the face as power-capable for the solar-panel power sum.
    pub fn as_solar_panel(mut self) -> Self {
        self.solar_panel = true;
        self
    }

    pub fn with_face(&self, face: Face2D) -> Self {
        let mut next = self.clone();
        next.face = face;
        next.rederive();
        next
    }

    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        let mut next = self.clone();
        next.orientation = orientation.to_matrix();
        next.rederive();
        next
    }

    pub fn with_translation(&self, translation: na::Vector3<f64>) -> Self {
        let mut next = self.clone();
        next.translation = translation;
        next.rederive();
        next
    }

    fn rederive(&mut self) {
        let (vertices, centroid, normal) = derive(&self.face, &self.orientation, &self.translation);
        self.vertices = vertices;
        self.centroid = centroid;
        self.normal = normal;
    }

    pub fn face(&self) -> &Face2D {
        &self.face
    }

    pub fn orientation(&self) -> &na::Matrix3<f64> {
        &self.orientation
    }

    pub fn translation(&self) -> na::Vector3<f64> {
        self.translation
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_solar_panel(&self) -> bool {
        self.solar_panel
    }

    pub fn vertices(&self) -> &[na::Vector3<f64>] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        self.face.area()
    }

    pub fn centroid(&self) -> na::Vector3<f64> {
        self.centroid
    }

    /// Outward normal: the local +z axis expressed in the global frame.
    pub fn normal(&self) -> na::Vector3<f64> {
        self.normal
    }

    pub fn sigma_n(&self) -> f64 {
        self.face.sigma_n()
    }

    pub fn sigma_t(&self) -> f64 {
        self.face.sigma_t()
    }

    pub fn reflection_coeff(&self) -> f64 {
        self.face.reflection_coeff()
    }
}

fn derive(
    face: &Face2D,
    rot: &na::Matrix3<f64>,
    translation: &na::Vector3<f64>,
) -> (Vec<na::Vector3<f64>>, na::Vector3<f64>, na::Vector3<f64>) {
    let vertices = face
        .vertices()
        .iter()
        .map(|v| rot * na::Vector3::new(v.x, v.y, 0.0) + translation)
        .collect();
    let c2 = face.centroid();
    let centroid = rot * na::Vector3::new(c2.x, c2.y, 0.0) + translation;
    let normal = rot * na::Vector3::z();
    (vertices, centroid, normal)
}
