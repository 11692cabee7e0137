use crate::error::{ConfigError, Result};

/// Tunable settings for the wall engine.
///
/// `Default` gives the interactive defaults; `new` and the `with_*`
/// methods validate each field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallConfig {
    /// Thickness shared by boundary and inner walls.
    pub(crate) thickness: f64,
    /// Upper bound accepted by text thickness edits.
    pub(crate) max_thickness: f64,
    /// Snap radius.
    pub(crate) magnet_distance: f64,
    /// Whether the tangent-point snap pass runs.
    pub(crate) snap_to_tangent: bool,
    /// Offset used to build tangent snap candidates.
    pub(crate) tangent_radius: f64,
    /// Multiplier applied to endpoint distances (smaller is more magnetic).
    pub(crate) endpoint_priority: f64,
    /// Angular window, in degrees, for orthogonal and diagonal snapping.
    pub(crate) ortho_snap_threshold_deg: f64,
    /// Shortest inner wall segment the network will create.
    pub(crate) min_segment_length: f64,
    /// Distance under which a point counts as lying on a wall.
    pub(crate) on_wall_epsilon: f64,
    /// Upper bound on drag propagation rounds.
    pub(crate) max_propagation_rounds: usize,
    /// How far a dragged inner wall is extended to find its new ends.
    pub(crate) partition_extension: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            thickness: 20.0,
            max_thickness: 100.0,
            magnet_distance: 8.0,
            snap_to_tangent: false,
            tangent_radius: 50.0,
            endpoint_priority: 0.5,
            ortho_snap_threshold_deg: 3.0,
            min_segment_length: 3.0,
            on_wall_epsilon: 0.1,
            max_propagation_rounds: 64,
            partition_extension: 1000.0,
        }
    }
}

impl WallConfig {
    /// Creates a configuration with the given thickness and snap radius.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not positive or the thickness
    /// exceeds the default maximum.
    pub fn new(thickness: f64, magnet_distance: f64) -> Result<Self> {
        Self::default()
            .with_thickness(thickness)?
            .with_magnet_distance(magnet_distance)
    }

    /// Sets the wall thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if `thickness` is not in `(0, max_thickness]`.
    pub fn with_thickness(mut self, thickness: f64) -> Result<Self> {
        self.thickness = self.check_thickness(thickness)?;
        Ok(self)
    }

    /// Sets the snap radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` is not positive.
    pub fn with_magnet_distance(mut self, distance: f64) -> Result<Self> {
        self.magnet_distance = positive("magnet_distance", distance)?;
        Ok(self)
    }

    /// Enables or disables tangent snapping with the given candidate radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive.
    pub fn with_tangent_snap(mut self, enabled: bool, radius: f64) -> Result<Self> {
        self.tangent_radius = positive("tangent_radius", radius)?;
        self.snap_to_tangent = enabled;
        Ok(self)
    }

    /// Sets the minimum inner wall segment length.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is not positive.
    pub fn with_min_segment_length(mut self, length: f64) -> Result<Self> {
        self.min_segment_length = positive("min_segment_length", length)?;
        Ok(self)
    }

    /// Sets the orthogonal snap window in degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if `degrees` is outside `[0, 45)`.
    pub fn with_ortho_threshold(mut self, degrees: f64) -> Result<Self> {
        if !(0.0..45.0).contains(&degrees) {
            return Err(ConfigError::OutOfRange {
                name: "ortho_snap_threshold_deg",
                value: degrees,
                min: 0.0,
                max: 45.0,
            }
            .into());
        }
        self.ortho_snap_threshold_deg = degrees;
        Ok(self)
    }

    /// Sets the bound on drag propagation rounds.
    #[must_use]
    pub fn with_max_propagation_rounds(mut self, rounds: usize) -> Self {
        self.max_propagation_rounds = rounds.max(1);
        self
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn max_thickness(&self) -> f64 {
        self.max_thickness
    }

    #[must_use]
    pub fn magnet_distance(&self) -> f64 {
        self.magnet_distance
    }

    #[must_use]
    pub fn snap_to_tangent(&self) -> bool {
        self.snap_to_tangent
    }

    #[must_use]
    pub fn tangent_radius(&self) -> f64 {
        self.tangent_radius
    }

    #[must_use]
    pub fn min_segment_length(&self) -> f64 {
        self.min_segment_length
    }

    pub(crate) fn check_thickness(&self, thickness: f64) -> Result<f64> {
        if !thickness.is_finite() || thickness <= 0.0 || thickness > self.max_thickness {
            return Err(ConfigError::OutOfRange {
                name: "thickness",
                value: thickness,
                min: 0.0,
                max: self.max_thickness,
            }
            .into());
        }
        Ok(thickness)
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value }.into());
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = WallConfig::default();
        assert!((c.thickness() - 20.0).abs() < f64::EPSILON);
        assert!((c.magnet_distance() - 8.0).abs() < f64::EPSILON);
        assert!((c.min_segment_length() - 3.0).abs() < f64::EPSILON);
        assert!(!c.snap_to_tangent());
    }

    #[test]
    fn new_with_valid_values() {
        let c = WallConfig::new(10.0, 5.0).unwrap();
        assert!((c.thickness() - 10.0).abs() < f64::EPSILON);
        assert!((c.magnet_distance() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_thickness_fails() {
        assert!(WallConfig::new(0.0, 5.0).is_err());
    }

    #[test]
    fn thickness_above_maximum_fails() {
        assert!(WallConfig::new(150.0, 5.0).is_err());
    }

    #[test]
    fn negative_magnet_distance_fails() {
        assert!(WallConfig::new(10.0, -1.0).is_err());
    }

    #[test]
    fn nan_values_fail() {
        assert!(WallConfig::new(f64::NAN, 5.0).is_err());
        assert!(WallConfig::default().with_min_segment_length(f64::NAN).is_err());
    }

    #[test]
    fn ortho_threshold_range() {
        assert!(WallConfig::default().with_ortho_threshold(5.0).is_ok());
        assert!(WallConfig::default().with_ortho_threshold(45.0).is_err());
    }

    #[test]
    fn tangent_snap_toggle() {
        let c = WallConfig::default().with_tangent_snap(true, 20.0).unwrap();
        assert!(c.snap_to_tangent());
        assert!((c.tangent_radius() - 20.0).abs() < f64::EPSILON);
    }
}
