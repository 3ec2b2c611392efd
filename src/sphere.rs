use std::f32::consts::{PI, TAU};

use anyhow::{ensure, Result};
use glam::{vec3, Vec3};

/// Latitude-major vertex grid over a sphere, meant to be drawn as a triangle strip.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    radius: f32,
    vertices: Vec<Vec3>,
}

impl SphereMesh {
    pub fn new(radius: f32, segments: u32) -> Result<Self> {
        ensure!(
            radius.is_finite() && radius > 0.,
            "Sphere radius must be positive, got {}",
            radius
        );
        ensure!(segments >= 1, "Sphere needs at least one segment");

        let n = segments as f32;
        let vertices = (0..=segments)
            .flat_map(|i| {
                let lat = PI * i as f32 / n;
                (0..=segments).map(move |j| {
                    let lon = TAU * j as f32 / n;
                    vec3(
                        radius * lat.sin() * lon.cos(),
                        radius * lat.sin() * lon.sin(),
                        radius * lat.cos(),
                    )
                })
            })
            .collect();

        Ok(Self { radius, vertices })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as _
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_is_segments_plus_one_squared() {
        for segments in [1, 2, 7, 32] {
            let mesh = SphereMesh::new(1., segments).unwrap();
            let side = segments as usize + 1;
            assert_eq!(mesh.vertices().len(), side * side);
            assert_eq!(mesh.vertex_count() as usize, side * side);
        }
    }

    #[test]
    fn first_vertex_is_north_pole() {
        let mesh = SphereMesh::new(5., 32).unwrap();
        assert!(mesh.vertices()[0].abs_diff_eq(vec3(0., 0., 5.), 1e-6));
    }

    #[test]
    fn last_row_sits_on_south_pole() {
        let mesh = SphereMesh::new(5., 32).unwrap();
        let last = *mesh.vertices().last().unwrap();
        assert!(last.abs_diff_eq(vec3(0., 0., -5.), 1e-4));
    }

    #[test]
    fn every_vertex_lies_on_the_surface() {
        let mesh = SphereMesh::new(5., 32).unwrap();
        for v in mesh.vertices() {
            assert!((v.length() - 5.).abs() < 1e-4, "{:?} is off the surface", v);
        }
    }

    #[test]
    fn rows_are_latitude_major() {
        let mesh = SphereMesh::new(2., 4).unwrap();
        // Second row is lat = PI / 4 for every longitude.
        let row = &mesh.vertices()[5..10];
        for v in row {
            assert!((v.z - 2. * (PI / 4.).cos()).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(SphereMesh::new(0., 8).is_err());
        assert!(SphereMesh::new(-1., 8).is_err());
        assert!(SphereMesh::new(f32::NAN, 8).is_err());
        assert!(SphereMesh::new(1., 0).is_err());
    }
}
