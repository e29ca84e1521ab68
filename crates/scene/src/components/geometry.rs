use foundation::math::Vec2;

/// Retained element geometry in image pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry2D {
    /// Closed outline, filled by the host.
    Polygon { points: Vec<Vec2> },
    /// Open path, stroked by the host.
    Polyline { points: Vec<Vec2> },
    /// A point other content hangs off, e.g. a text origin.
    Anchor { position: Vec2 },
}

impl Geometry2D {
    pub fn polygon(points: Vec<Vec2>) -> Self {
        Self::Polygon { points }
    }

    pub fn polyline(points: Vec<Vec2>) -> Self {
        Self::Polyline { points }
    }

    pub fn anchor(position: Vec2) -> Self {
        Self::Anchor { position }
    }
}

#[cfg(test)]
mod tests {
    use super::Geometry2D;
    use foundation::math::Vec2;

    #[test]
    fn create_polygon_geometry() {
        let geometry = Geometry2D::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ]);
        assert!(matches!(geometry, Geometry2D::Polygon { .. }));
    }
}
