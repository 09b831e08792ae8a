//! Ray and overlap primitives
//!
//! Axis-aligned bounding boxes plus the two query shapes the runner core
//! needs: a ray-AABB intersection (ground probes) and an inflated
//! point-overlap test (turn-trigger probes).
//!
//! # Ray-AABB Intersection
//!
//! The slab method computes entry and exit times for each axis pair and
//! intersects the intervals. A hit behind the ray origin is rejected.
//!
//! # Example
//!
//! ```ignore
//! use canyon_run_engine::physics::raycast::{Aabb, ray_aabb_intersect};
//! use glam::Vec3;
//!
//! let tile = Aabb::new(Vec3::new(-1.0, -0.5, 0.0), Vec3::new(1.0, 0.0, 4.0));
//! let origin = Vec3::new(0.0, 0.1, 2.0);
//!
//! if let Some(t) = ray_aabb_intersect(origin, Vec3::NEG_Y, tile.min, tile.max) {
//!     println!("ground {} below", t);
//! }
//! ```

use glam::Vec3;

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two corners, ordering each axis so that
    /// `min <= max` holds even when the caller hands in swapped corners.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box from a center point and a full size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size of the box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Tests whether a point lies inside the box inflated by `radius` on
    /// every axis. With `radius == 0.0` this is plain containment.
    pub fn contains_inflated(&self, point: Vec3, radius: f32) -> bool {
        point.x >= self.min.x - radius
            && point.x <= self.max.x + radius
            && point.y >= self.min.y - radius
            && point.y <= self.max.y + radius
            && point.z >= self.min.z - radius
            && point.z <= self.max.z + radius
    }

    /// Horizontal-only variant of [`contains_inflated`](Self::contains_inflated):
    /// ignores the Y axis. Turn triggers cover a tile's full height, so the
    /// probe only cares about the XZ footprint.
    pub fn contains_inflated_xz(&self, point: Vec3, radius: f32) -> bool {
        point.x >= self.min.x - radius
            && point.x <= self.max.x + radius
            && point.z >= self.min.z - radius
            && point.z <= self.max.z + radius
    }
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0);
///   for a ray starting inside the box this is the exit distance
/// * `None` - No intersection, or the box is entirely behind the origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Inverse direction; near-zero components degrade to huge values so the
    // corresponding slab never constrains the interval incorrectly.
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_aabb_from_above() {
        let tile = Aabb::new(Vec3::new(-1.0, -0.5, 0.0), Vec3::new(1.0, 0.0, 4.0));
        let origin = Vec3::new(0.0, 0.1, 2.0);

        let result = ray_aabb_intersect(origin, Vec3::NEG_Y, tile.min, tile.max);
        assert!(result.is_some());
        let t = result.unwrap();
        assert!((t - 0.1).abs() < 0.001, "Expected t=0.1, got t={}", t);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let tile = Aabb::new(Vec3::new(-1.0, -0.5, 0.0), Vec3::new(1.0, 0.0, 4.0));
        let origin = Vec3::new(5.0, 0.1, 2.0);

        let result = ray_aabb_intersect(origin, Vec3::NEG_Y, tile.min, tile.max);
        assert!(result.is_none());
    }

    #[test]
    fn test_ray_starts_inside_aabb() {
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        let result = ray_aabb_intersect(Vec3::ZERO, Vec3::Z, aabb_min, aabb_max);
        assert!(result.is_some());
        // Exit face at z=1
        assert!((result.unwrap() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        let result = ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, aabb_min, aabb_max);
        assert!(result.is_none());
    }

    #[test]
    fn test_new_orders_corners() {
        let aabb = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, -3.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_center_size() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 1.0, 2.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 5.0));
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_contains_inflated() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));

        assert!(aabb.contains_inflated(Vec3::new(1.0, 1.0, 1.0), 0.0));
        assert!(!aabb.contains_inflated(Vec3::new(2.05, 1.0, 1.0), 0.0));
        // Inflation pulls the same point inside
        assert!(aabb.contains_inflated(Vec3::new(2.05, 1.0, 1.0), 0.1));
    }

    #[test]
    fn test_contains_inflated_xz_ignores_height() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 0.5, 2.0));

        // Point well above the box still counts horizontally
        assert!(aabb.contains_inflated_xz(Vec3::new(1.0, 10.0, 1.0), 0.0));
        assert!(!aabb.contains_inflated_xz(Vec3::new(3.0, 0.0, 1.0), 0.1));
    }
}
