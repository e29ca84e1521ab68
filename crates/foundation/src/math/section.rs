//! Depth-to-pixel projection for the cross-section image.
//!
//! The section photograph is taken at an oblique angle, so one meter of soil
//! covers more pixels on the right side of the image than the left. Two
//! conceptual lines describe this: the ground line (depth 0) and a reference
//! line at a known real-world depth. Both vary linearly across the image
//! width, and the pixels-per-meter scale at any horizontal position falls out
//! of their local vertical separation.

use super::linear::EdgeLine;

#[derive(Debug)]
pub enum ProjectionError {
    NonPositiveWidth { width_px: f64 },
    NonPositiveHeight { height_px: f64 },
    NonPositiveReferenceDepth { depth_m: f64 },
    NonFiniteLine,
    ReferenceNotBelowGround { edge_fraction: f64 },
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::NonPositiveWidth { width_px } => {
                write!(f, "image width must be positive, got {width_px}")
            }
            ProjectionError::NonPositiveHeight { height_px } => {
                write!(f, "image height must be positive, got {height_px}")
            }
            ProjectionError::NonPositiveReferenceDepth { depth_m } => {
                write!(f, "reference depth must be positive, got {depth_m}")
            }
            ProjectionError::NonFiniteLine => {
                write!(f, "ground and reference lines must be finite")
            }
            ProjectionError::ReferenceNotBelowGround { edge_fraction } => {
                write!(
                    f,
                    "reference line must sit below the ground line (fails at fraction {edge_fraction})"
                )
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Stateless mapping from (depth, horizontal position) to image-space Y.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DepthProjection {
    width_px: f64,
    height_px: f64,
    ground: EdgeLine,
    reference: EdgeLine,
    reference_depth_m: f64,
}

impl DepthProjection {
    pub fn new(
        width_px: f64,
        height_px: f64,
        ground: EdgeLine,
        reference: EdgeLine,
        reference_depth_m: f64,
    ) -> Result<Self, ProjectionError> {
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(ProjectionError::NonPositiveWidth { width_px });
        }
        if !height_px.is_finite() || height_px <= 0.0 {
            return Err(ProjectionError::NonPositiveHeight { height_px });
        }
        if !reference_depth_m.is_finite() || reference_depth_m <= 0.0 {
            return Err(ProjectionError::NonPositiveReferenceDepth {
                depth_m: reference_depth_m,
            });
        }
        if !ground.is_finite() || !reference.is_finite() {
            return Err(ProjectionError::NonFiniteLine);
        }
        // Both lines are linear, so checking the two edges covers every x.
        for edge_fraction in [0.0, 1.0] {
            if reference.at_fraction(edge_fraction) <= ground.at_fraction(edge_fraction) {
                return Err(ProjectionError::ReferenceNotBelowGround { edge_fraction });
            }
        }

        Ok(Self {
            width_px,
            height_px,
            ground,
            reference,
            reference_depth_m,
        })
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    pub fn reference_depth_m(&self) -> f64 {
        self.reference_depth_m
    }

    /// Y of the ground surface (depth 0) at horizontal position `x_px`.
    pub fn ground_y(&self, x_px: f64) -> f64 {
        self.ground.at_fraction(x_px / self.width_px)
    }

    /// Y of the reference-depth line at horizontal position `x_px`.
    pub fn reference_y(&self, x_px: f64) -> f64 {
        self.reference.at_fraction(x_px / self.width_px)
    }

    /// Vertical pixels covered by one meter of soil at `x_px`.
    pub fn pixels_per_meter(&self, x_px: f64) -> f64 {
        (self.reference_y(x_px) - self.ground_y(x_px)) / self.reference_depth_m
    }

    /// Image-space Y of `depth_m` below ground at `x_px`.
    ///
    /// Depth is not clamped: negative depths project above the ground line and
    /// depths past the reference line extrapolate below it.
    pub fn y_for_depth(&self, depth_m: f64, x_px: f64) -> f64 {
        self.ground_y(x_px) + depth_m * self.pixels_per_meter(x_px)
    }

    /// Deepest depth still inside the image, bounded by the deepest depth the
    /// dataset reports.
    pub fn max_render_depth(&self, max_data_depth_m: f64) -> f64 {
        let bottom_depth = (self.height_px - self.ground_y(0.0)) / self.pixels_per_meter(0.0);
        max_data_depth_m.min(bottom_depth)
    }
}
