use crate::constants::PI;
use nalgebra as na;

/// Default grid resolution, matching the reference attitude propagator.
pub const DEFAULT_RESOLUTION: usize = 101;

/// Precomputed torque field over the unit sphere of body-relative directions.
///
/// The grid spans azimuth [0, 2pi] x elevation [0, pi] with inclusive
/// endpoints; each node stores the torque for the direction
/// (sin el cos az, sin el sin az, cos el). Building walks the full per-face
/// model once per node, querying is a bilinear interpolation per component.
/// The table is immutable after build and safe to share.
#[derive(Debug, Clone)]
pub struct TorqueTable {
    n_az: usize,
    n_el: usize,
    data: Vec<na::Vector3<f64>>,
}

impl TorqueTable {
    pub fn build<F>(n_az: usize, n_el: usize, f: F) -> Self
    where
        F: Fn(&na::Vector3<f64>) -> na::Vector3<f64>,
    {
        let mut data = Vec::with_capacity(n_az * n_el);
        for i in 0..n_el {
            for j in 0..n_az {
                data.push(f(&grid_direction(j, i, n_az, n_el)));
            }
        }
        TorqueTable { n_az, n_el, data }
    }

    pub fn query(&self, direction: &na::Vector3<f64>) -> na::Vector3<f64> {
        let (j, i, fa, fe) = locate(direction, self.n_az, self.n_el);
        let v00 = self.data[i * self.n_az + j];
        let v01 = self.data[i * self.n_az + j + 1];
        let v10 = self.data[(i + 1) * self.n_az + j];
        let v11 = self.data[(i + 1) * self.n_az + j + 1];
        (v00 * (1.0 - fa) + v01 * fa) * (1.0 - fe) + (v10 * (1.0 - fa) + v11 * fa) * fe
    }

    pub fn node(&self, az_index: usize, el_index: usize) -> na::Vector3<f64> {
        self.data[el_index * self.n_az + az_index]
    }
}

/// Scalar analog of `TorqueTable`, used for the solar-panel power map.
#[derive(Debug, Clone)]
pub struct PowerTable {
    n_az: usize,
    n_el: usize,
    data: Vec<f64>,
}

impl PowerTable {
    pub fn build<F>(n_az: usize, n_el: usize, f: F) -> Self
    where
        F: Fn(&na::Vector3<f64>) -> f64,
    {
        let mut data = Vec::with_capacity(n_az * n_el);
        for i in 0..n_el {
            for j in 0..n_az {
                data.push(f(&grid_direction(j, i, n_az, n_el)));
            }
        }
        PowerTable { n_az, n_el, data }
    }

    pub fn query(&self, direction: &na::Vector3<f64>) -> f64 {
        let (j, i, fa, fe) = locate(direction, self.n_az, self.n_el);
        let v00 = self.data[i * self.n_az + j];
        let v01 = self.data[i * self.n_az + j + 1];
        let v10 = self.data[(i + 1) * self.n_az + j];
        let v11 = self.data[(i + 1) * self.n_az + j + 1];
        (v00 * (1.0 - fa) + v01 * fa) * (1.0 - fe) + (v10 * (1.0 - fa) + v11 * fa) * fe
    }
}

/// Unit direction for grid node (az j, el i).
pub fn grid_direction(j: usize, i: usize, n_az: usize, n_el: usize) -> na::Vector3<f64> {
    let az = 2.0 * PI * j as f64 / (n_az - 1) as f64;
    let el = PI * i as f64 / (n_el - 1) as f64;
    na::Vector3::new(el.sin() * az.cos(), el.sin() * az.sin(), el.cos())
}

/// Enclosing cell indices and interpolation fractions for a unit direction.
fn locate(direction: &na::Vector3<f64>, n_az: usize, n_el: usize) -> (usize, usize, f64, f64) {
    let mut az = direction.y.atan2(direction.x);
    if az < 0.0 {
        az += 2.0 * PI;
    }
    let el = direction.z.clamp(-1.0, 1.0).acos();

    let az_step = 2.0 * PI / (n_az - 1) as f64;
    let el_step = PI / (n_el - 1) as f64;

    let j = ((az / az_step) as usize).min(n_az - 2);
    let i = ((el / el_step) as usize).min(n_el - 2);
    let fa = az / az_step - j as f64;
    let fe = el / el_step - i as f64;
    (j, i, fa, fe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // a smooth direction-dependent field standing in for the torque model
    fn field(dir: &na::Vector3<f64>) -> na::Vector3<f64> {
        na::Vector3::new(dir.x * dir.z, dir.y * dir.y, dir.x + 2.0 * dir.z)
    }

    #[test]
    fn query_at_grid_node_is_exact() {
        let table = TorqueTable::build(41, 41, field);
        for &(j, i) in &[(0usize, 0usize), (10, 7), (20, 20), (39, 40), (40, 1)] {
            let dir = grid_direction(j, i, 41, 41);
            assert_abs_diff_eq!(table.node(j, i), field(&dir), epsilon = 1e-15);
            assert_abs_diff_eq!(table.query(&dir), table.node(j, i), epsilon = 1e-6);
        }
    }

    #[test]
    fn interpolation_converges_with_resolution() {
        let coarse = TorqueTable::build(21, 21, field);
        let fine = TorqueTable::build(161, 161, field);
        let dir = na::Vector3::new(0.3, -0.5, 0.9).normalize();
        let exact = field(&dir);
        let err_coarse = (coarse.query(&dir) - exact).norm();
        let err_fine = (fine.query(&dir) - exact).norm();
        assert!(err_fine < err_coarse);
        assert!(err_fine < 1e-3);
    }

    #[test]
    fn power_table_node_exactness() {
        let table = PowerTable::build(31, 31, |d| d.z.max(0.0) * 10.0);
        let dir = grid_direction(5, 12, 31, 31);
        assert_abs_diff_eq!(table.query(&dir), dir.z.max(0.0) * 10.0, epsilon = 1e-6);
    }
}
