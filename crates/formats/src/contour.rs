use foundation::math::DepthProjection;
use std::fs;
use std::path::Path;

/// Where the drawn ground outline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourSource {
    File,
    Fallback,
}

/// SVG path data tracing the ground surface, used by hosts to clip the
/// painted section to the artwork.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundContour {
    pub path_data: String,
    pub source: ContourSource,
}

impl GroundContour {
    /// Loads traced path data from `path`, substituting [`fallback`] when the
    /// file is missing or blank.
    ///
    /// [`fallback`]: GroundContour::fallback
    pub fn from_file(path: impl AsRef<Path>, projection: &DepthProjection) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    tracing::warn!("ground contour {} is blank, using fallback", path.display());
                    Self::fallback(projection)
                } else {
                    Self {
                        path_data: trimmed.to_string(),
                        source: ContourSource::File,
                    }
                }
            }
            Err(err) => {
                tracing::warn!(
                    "ground contour {} unreadable ({err}), using fallback",
                    path.display()
                );
                Self::fallback(projection)
            }
        }
    }

    /// Rectangle from the higher ground edge down to the bottom of the image.
    pub fn fallback(projection: &DepthProjection) -> Self {
        let width = projection.width_px();
        let height = projection.height_px();
        let top = projection.ground_y(0.0).min(projection.ground_y(width));
        Self {
            path_data: format!("M0,{top} L{width},{top} L{width},{height} L0,{height} Z"),
            source: ContourSource::Fallback,
        }
    }
}
