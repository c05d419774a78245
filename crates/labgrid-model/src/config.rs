//! Startup configuration for a grid scene.

use crate::axis::{Axis, AxisNames};
use crate::color::Palette;
use crate::error::Result;
use crate::grid::{positive, GridDims, Lattice};

/// Everything fixed at startup. Nothing here changes while the scene runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Axis sizes
    pub dims: GridDims,
    /// Cube edge length and spacing
    pub lattice: Lattice,
    /// Colors by process index
    pub palette: Palette,
    /// Label text prefixes
    pub axis_names: AxisNames,
    /// Initial camera eye position; the camera orbits the origin
    pub camera_position: [f32; 3],
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Directional light intensity
    pub directional_intensity: f32,
    /// Directional light position; light travels from here toward the origin
    pub directional_position: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dims: GridDims::default(),
            lattice: Lattice::default(),
            palette: Palette::default(),
            axis_names: AxisNames::default(),
            camera_position: [3.0, 3.0, 10.0],
            ambient_intensity: 0.6,
            directional_intensity: 0.8,
            directional_position: [5.0, 5.0, 5.0],
        }
    }
}

impl GridConfig {
    /// Check every value the grid and renderer rely on.
    ///
    /// The palette enforces its own length and uniqueness on construction.
    pub fn validate(&self) -> Result<()> {
        self.dims.validate()?;
        self.lattice.validate()?;
        positive("ambient_intensity", self.ambient_intensity)?;
        positive("directional_intensity", self.directional_intensity)?;
        let eye = self.camera_position;
        positive(
            "camera distance",
            (eye[0] * eye[0] + eye[1] * eye[1] + eye[2] * eye[2]).sqrt(),
        )
    }

    /// Short human-readable summary for startup logs.
    pub fn summary(&self) -> String {
        let sizes: Vec<String> = Axis::ALL
            .iter()
            .map(|&a| format!("{} {}", self.dims.size(a), self.axis_names.get(a)))
            .collect();
        format!(
            "{} ({} cells, cube {}, spacing {})",
            sizes.join(" x "),
            self.dims.cell_count(),
            self.lattice.cube_size,
            self.lattice.spacing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_axis_is_rejected() {
        let mut config = GridConfig::default();
        config.dims.processes = 0;
        assert_eq!(config.validate(), Err(Error::ZeroAxisSize(Axis::Z)));
    }

    #[test]
    fn non_positive_light_is_rejected() {
        let config = GridConfig {
            ambient_intensity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::NonPositive { field: "ambient_intensity", .. })
        ));
    }

    #[test]
    fn camera_at_origin_is_rejected() {
        let config = GridConfig {
            camera_position: [0.0; 3],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn summary_names_every_axis() {
        let summary = GridConfig::default().summary();
        assert_eq!(summary, "5 Clinic x 5 Lab x 5 Process (125 cells, cube 0.5, spacing 0.8)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let config: GridConfig =
            serde_json::from_str(r#"{ "dims": { "clinics": 3, "lab_areas": 4, "processes": 6 } }"#)
                .unwrap();
        assert_eq!(config.dims, GridDims::new(3, 4, 6));
        assert_eq!(config.lattice, Lattice::default());
        assert_eq!(config.palette, Palette::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn short_palette_fails_to_deserialize() {
        let result: std::result::Result<GridConfig, _> =
            serde_json::from_str(r#"{ "palette": [16711680, 255] }"#);
        assert!(result.is_err());
    }
}
