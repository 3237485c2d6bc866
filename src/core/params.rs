//! Parameter set for the YOLOv8 segmentation node
//!
//! The record is owned by the host's processing node and shared with the
//! panel as [`SharedParams`]; the panel writes it back only when the user
//! confirms with apply.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

/// Errors for parameter values arriving from outside the bounded UI controls
/// (JSON documents, command-line overrides).
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("unknown model variant: {0}")]
    UnknownVariant(String),

    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("input size must be greater than zero")]
    ZeroInputSize,
}

/// The five YOLOv8 segmentation size variants, smallest to largest.
///
/// The canonical string form is the published model name; it is also the
/// serialized form and the text shown in the model drop-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelVariant {
    #[serde(rename = "yolov8n-seg")]
    Nano,
    #[serde(rename = "yolov8s-seg")]
    Small,
    #[serde(rename = "yolov8m-seg")]
    Medium,
    #[serde(rename = "yolov8l-seg")]
    Large,
    #[serde(rename = "yolov8x-seg")]
    XLarge,
}

impl ModelVariant {
    /// All variants, in drop-down order.
    pub const ALL: [ModelVariant; 5] = [
        ModelVariant::Nano,
        ModelVariant::Small,
        ModelVariant::Medium,
        ModelVariant::Large,
        ModelVariant::XLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::Nano => "yolov8n-seg",
            ModelVariant::Small => "yolov8s-seg",
            ModelVariant::Medium => "yolov8m-seg",
            ModelVariant::Large => "yolov8l-seg",
            ModelVariant::XLarge => "yolov8x-seg",
        }
    }

    /// Position within [`ModelVariant::ALL`], matching drop-down indices.
    pub fn index(&self) -> u32 {
        match self {
            ModelVariant::Nano => 0,
            ModelVariant::Small => 1,
            ModelVariant::Medium => 2,
            ModelVariant::Large => 3,
            ModelVariant::XLarge => 4,
        }
    }

    /// Variant for a drop-down index; out-of-range falls back to the default.
    pub fn from_index(index: u32) -> Self {
        ModelVariant::ALL
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }
}

impl Default for ModelVariant {
    fn default() -> Self {
        ModelVariant::Medium
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVariant {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelVariant::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ParamError::UnknownVariant(s.to_string()))
    }
}

/// Parameter set shared between the host's processing node and the panel.
///
/// The panel holds a clone of the `Rc`, never a private copy of the record,
/// so host and panel always see the same values.
pub type SharedParams = Rc<RefCell<YoloSegParams>>;

/// Configuration consumed by the segmentation processing node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoloSegParams {
    #[serde(default)]
    pub model_name: ModelVariant,
    #[serde(default = "default_cuda")]
    pub cuda: bool,
    /// Path to custom weights; empty means the named variant's defaults.
    #[serde(default)]
    pub model_weight_file: String,
    #[serde(default = "default_input_size")]
    pub input_size: u32,
    #[serde(default = "default_conf_thres")]
    pub conf_thres: f64,
    #[serde(default = "default_iou_thres")]
    pub iou_thres: f64,
    /// Raised by the panel on apply; tells the host to re-run the node.
    /// Transient handshake state, never persisted.
    #[serde(skip)]
    pub update: bool,
}

fn default_cuda() -> bool {
    true
}

fn default_input_size() -> u32 {
    640
}

fn default_conf_thres() -> f64 {
    0.25
}

fn default_iou_thres() -> f64 {
    0.7
}

impl Default for YoloSegParams {
    fn default() -> Self {
        Self {
            model_name: ModelVariant::default(),
            cuda: default_cuda(),
            model_weight_file: String::new(),
            input_size: default_input_size(),
            conf_thres: default_conf_thres(),
            iou_thres: default_iou_thres(),
            update: false,
        }
    }
}

impl YoloSegParams {
    /// True iff a custom weights file is configured. Drives the initial
    /// state of the "Custom model" checkbox and the weights-row visibility.
    pub fn has_custom_weights(&self) -> bool {
        !self.model_weight_file.is_empty()
    }

    /// Check values that did not pass through the bounded form controls.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(0.0..=1.0).contains(&self.conf_thres) {
            return Err(ParamError::ThresholdOutOfRange {
                name: "confidence threshold",
                value: self.conf_thres,
            });
        }
        if !(0.0..=1.0).contains(&self.iou_thres) {
            return Err(ParamError::ThresholdOutOfRange {
                name: "IoU threshold",
                value: self.iou_thres,
            });
        }
        if self.input_size == 0 {
            return Err(ParamError::ZeroInputSize);
        }
        Ok(())
    }

    /// Wrap into the shared form handed between host and panel.
    pub fn shared(self) -> SharedParams {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_string_round_trip() {
        for variant in ModelVariant::ALL {
            assert_eq!(variant.as_str().parse::<ModelVariant>().unwrap(), variant);
        }
    }

    #[test]
    fn test_variant_index_round_trip() {
        for variant in ModelVariant::ALL {
            assert_eq!(ModelVariant::from_index(variant.index()), variant);
        }
        // Out-of-range drop-down index falls back to the default variant
        assert_eq!(ModelVariant::from_index(99), ModelVariant::default());
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let err = "yolov9-seg".parse::<ModelVariant>().unwrap_err();
        assert!(matches!(err, ParamError::UnknownVariant(_)));
    }

    #[test]
    fn test_default_params() {
        let params = YoloSegParams::default();
        assert_eq!(params.model_name, ModelVariant::Medium);
        assert!(params.cuda);
        assert!(!params.has_custom_weights());
        assert_eq!(params.input_size, 640);
        assert_eq!(params.conf_thres, 0.25);
        assert_eq!(params.iou_thres, 0.7);
        assert!(!params.update);
        params.validate().unwrap();
    }

    #[test]
    fn test_params_serialization() {
        let mut params = YoloSegParams {
            model_name: ModelVariant::Nano,
            model_weight_file: "/models/custom.pt".to_string(),
            update: true,
            ..YoloSegParams::default()
        };
        params.conf_thres = 0.4;

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"yolov8n-seg\""));
        // The update handshake flag is not part of the persisted form
        assert!(!json.contains("update"));

        let restored: YoloSegParams = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.model_name, ModelVariant::Nano);
        assert_eq!(restored.model_weight_file, "/models/custom.pt");
        assert_eq!(restored.conf_thres, 0.4);
        assert!(!restored.update);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: YoloSegParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.model_name, ModelVariant::Medium);
        assert_eq!(params.input_size, 640);
        assert!(params.cuda);
    }

    #[test]
    fn test_validate_rejects_out_of_range_thresholds() {
        let mut params = YoloSegParams::default();
        params.conf_thres = 1.5;
        assert!(matches!(
            params.validate(),
            Err(ParamError::ThresholdOutOfRange { name: "confidence threshold", .. })
        ));

        params.conf_thres = 0.25;
        params.iou_thres = -0.1;
        assert!(matches!(
            params.validate(),
            Err(ParamError::ThresholdOutOfRange { name: "IoU threshold", .. })
        ));
    }

    #[test]
    fn test_validate_accepts_threshold_bounds() {
        let mut params = YoloSegParams::default();
        params.conf_thres = 0.0;
        params.iou_thres = 1.0;
        params.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_input_size() {
        let mut params = YoloSegParams::default();
        params.input_size = 0;
        assert!(matches!(params.validate(), Err(ParamError::ZeroInputSize)));
    }
}
