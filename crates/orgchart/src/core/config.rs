//! Layout configuration
//!
//! [`SpacingConfig`] controls box sizes and gaps, [`ConnectorConfig`] holds the
//! connector tuning constants. Both are validated once when a layout starts.

use serde::{Deserialize, Serialize};

use super::OrgChartError;

/// Smallest extra gap inserted between two sibling clusters
const MIN_GROUP_GAP: f64 = 16.0;

/// Share of the horizontal spacing added between sibling clusters
const GROUP_GAP_RATIO: f64 = 0.4;

/// Box size and spacing, in layout units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacingConfig {
    pub box_width: f64,
    pub box_height: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub margin: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            box_width: 160.0,
            box_height: 60.0,
            horizontal_spacing: 40.0,
            vertical_spacing: 80.0,
            margin: 20.0,
        }
    }
}

impl SpacingConfig {
    pub fn new(box_width: f64, box_height: f64) -> Self {
        Self {
            box_width,
            box_height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), OrgChartError> {
        let fields = [
            ("box_width", self.box_width),
            ("box_height", self.box_height),
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("margin", self.margin),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(OrgChartError::invalid_config(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.box_width <= 0.0 || self.box_height <= 0.0 {
            return Err(OrgChartError::invalid_config(format!(
                "box size must be positive, got {}x{}",
                self.box_width, self.box_height
            )));
        }
        for (name, value) in &fields[2..] {
            if *value < 0.0 {
                return Err(OrgChartError::invalid_config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Step between neighbouring siblings during initial placement
    pub fn sibling_gap(&self) -> f64 {
        (self.box_width / 4.0).max(self.horizontal_spacing)
    }

    /// Gap between consecutive sibling clusters, always wider than [`Self::sibling_gap`]
    pub fn group_gap(&self) -> f64 {
        self.sibling_gap() + (self.horizontal_spacing * GROUP_GAP_RATIO).max(MIN_GROUP_GAP)
    }

    /// Minimum gap the overlap resolver keeps between boxes in a band
    pub fn min_spacing(&self) -> f64 {
        self.horizontal_spacing
    }

    /// Distance between the tops of two consecutive bands
    pub fn band_pitch(&self) -> f64 {
        self.box_height + self.vertical_spacing
    }
}

/// Connector tuning constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectorConfig {
    /// Where the bridge sits between parent bottom (0) and children top (1)
    pub bridge_bias: f64,
    /// Largest center offset still drawn as a direct connector
    pub align_tolerance: f64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            bridge_bias: 0.6,
            align_tolerance: 10.0,
        }
    }
}

impl ConnectorConfig {
    pub fn validate(&self) -> Result<(), OrgChartError> {
        if !(self.bridge_bias > 0.0 && self.bridge_bias < 1.0) {
            return Err(OrgChartError::invalid_config(format!(
                "bridge_bias must be between 0 and 1, got {}",
                self.bridge_bias
            )));
        }
        if !self.align_tolerance.is_finite() || self.align_tolerance < 0.0 {
            return Err(OrgChartError::invalid_config(format!(
                "align_tolerance must be a non-negative number, got {}",
                self.align_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SpacingConfig::default().validate().is_ok());
        assert!(ConnectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_group_gap_wider_than_sibling_gap() {
        let config = SpacingConfig::default();
        assert_eq!(config.sibling_gap(), 40.0);
        assert_eq!(config.group_gap(), 56.0);

        let tight = SpacingConfig {
            horizontal_spacing: 0.0,
            ..SpacingConfig::default()
        };
        assert_eq!(tight.sibling_gap(), 40.0);
        assert_eq!(tight.group_gap(), 56.0);
        assert!(tight.group_gap() > tight.sibling_gap());
    }

    #[test]
    fn test_rejects_bad_spacing() {
        let zero_width = SpacingConfig::new(0.0, 10.0);
        assert!(zero_width.validate().is_err());

        let negative = SpacingConfig {
            margin: -1.0,
            ..SpacingConfig::default()
        };
        assert!(negative.validate().is_err());

        let nan = SpacingConfig {
            vertical_spacing: f64::NAN,
            ..SpacingConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_connectors() {
        let bias = ConnectorConfig {
            bridge_bias: 1.0,
            ..ConnectorConfig::default()
        };
        assert!(bias.validate().is_err());

        let tolerance = ConnectorConfig {
            align_tolerance: -0.5,
            ..ConnectorConfig::default()
        };
        assert!(tolerance.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SpacingConfig = serde_json::from_str(r#"{"boxWidth": 100}"#).unwrap();
        assert_eq!(config.box_width, 100.0);
        assert_eq!(config.box_height, SpacingConfig::default().box_height);
    }
}
