//! Bounding box.

use std::iter::FromIterator;

use cgmath::{num_traits::Float, EuclideanSpace, MetricSpace, Point3};

/// 3D bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3d<S> {
    /// Minimum.
    min: Point3<S>,
    /// Maximum.
    max: Point3<S>,
}

impl<S: Float> BoundingBox3d<S> {
    /// Returns minimum xyz.
    pub fn min(&self) -> Point3<S> {
        self.min
    }

    /// Returns maximum xyz.
    pub fn max(&self) -> Point3<S> {
        self.max
    }

    /// Returns the center point, where a camera should look at.
    pub fn center(&self) -> Point3<S>
    where
        S: cgmath::BaseFloat,
    {
        self.min.midpoint(self.max)
    }

    /// Returns the length of the diagonal.
    pub fn diagonal(&self) -> S
    where
        S: cgmath::BaseFloat,
    {
        self.min.distance(self.max)
    }

    /// Extends the bounding box to contain the given point.
    pub fn insert(&self, p: Point3<S>) -> Self {
        Self {
            min: element_wise_apply(self.min, p, Float::min),
            max: element_wise_apply(self.max, p, Float::max),
        }
    }
}

impl<S: Float> From<Point3<S>> for BoundingBox3d<S> {
    fn from(p: Point3<S>) -> Self {
        Self { min: p, max: p }
    }
}

/// 3D bounding box, which can be empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionalBoundingBox3d<S> {
    /// Bounding box.
    bbox: Option<BoundingBox3d<S>>,
}

impl<S: Float> OptionalBoundingBox3d<S> {
    /// Creates a new empty `OptionalBoundingBox3d`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bounding box.
    pub fn bounding_box(&self) -> Option<BoundingBox3d<S>> {
        self.bbox
    }

    /// Extends the bounding box to contain the given point.
    pub fn insert(&self, p: Point3<S>) -> Self {
        let bbox = self
            .bbox
            .map_or_else(|| BoundingBox3d::from(p), |bbox| bbox.insert(p));
        Self { bbox: Some(bbox) }
    }
}

impl<S> Default for OptionalBoundingBox3d<S> {
    fn default() -> Self {
        Self { bbox: None }
    }
}

impl<S: Float> FromIterator<Point3<S>> for OptionalBoundingBox3d<S> {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Point3<S>>,
    {
        iter.into_iter().fold(Self::new(), |bbox, p| bbox.insert(p))
    }
}

impl<'a, S: 'a + Float> FromIterator<&'a Point3<S>> for OptionalBoundingBox3d<S> {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = &'a Point3<S>>,
    {
        iter.into_iter().cloned().collect()
    }
}

/// Applies the given function element wise.
fn element_wise_apply<S, U, F>(a: Point3<S>, b: Point3<S>, f: F) -> Point3<U>
where
    F: Fn(S, S) -> U,
{
    Point3::new(f(a.x, b.x), f(a.y, b.y), f(a.z, b.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_points() {
        let points = [
            Point3::new(1.0f32, -2.0, 0.0),
            Point3::new(-1.0, 4.0, 2.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let bbox = points.iter().collect::<OptionalBoundingBox3d<f32>>();
        let bbox = bbox.bounding_box().unwrap();
        assert_eq!(bbox.min(), Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max(), Point3::new(1.0, 4.0, 2.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn empty_iterator_gives_no_box() {
        let bbox: OptionalBoundingBox3d<f32> = std::iter::empty::<Point3<f32>>().collect();
        assert!(bbox.bounding_box().is_none());
    }
}
