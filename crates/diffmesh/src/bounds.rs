//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

/// Per-axis minimum and maximum of a set of points.
///
/// # Example
///
/// ```
/// use diffmesh::BoundingBox;
/// use nalgebra::Point3;
///
/// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0)];
/// let bounds = BoundingBox::from_points(points.iter()).unwrap();
/// assert_eq!(bounds.max_extent(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Bounding box of `points`, or `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min = bounds.min.inf(p);
            bounds.max = bounds.max.sup(p);
        }
        Some(bounds)
    }

    /// Extent (max - min) per axis.
    #[inline]
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Largest extent over the three axes.
    #[inline]
    pub fn max_extent(&self) -> f64 {
        self.extents().max()
    }

    /// Centre of the box.
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = self.extents();
        write!(
            f,
            "[{:.8}, {:.8}, {:.8}] to [{:.8}, {:.8}, {:.8}] (extent {:.8} x {:.8} x {:.8})",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z, d.x, d.y, d.z
        )
    }
}
