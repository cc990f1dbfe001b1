//! Mobile (9:16) layout types.
//!
//! A [`LayoutPlan`] describes how one source clip is composited onto a
//! portrait canvas: a magnified, undistorted foreground overlaid on a
//! blurred background that fills the full canvas height.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target width for portrait (9:16) output.
pub const PORTRAIT_WIDTH: u32 = 1080;

/// Target height for portrait (9:16) output.
pub const PORTRAIT_HEIGHT: u32 = 1920;

/// Default foreground magnification relative to the canvas width.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.2;

/// Invalid input handed to the layout calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Source dimensions must be positive, got {width}x{height}")]
    InvalidSource { width: u32, height: u32 },

    #[error("Target canvas must be positive, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Scale factor must be a finite value >= 1.0, got {0}")]
    InvalidScaleFactor(f64),

    #[error("Layout of {width}x{height} at scale {scale_factor} exceeds the pixel range")]
    Overflow {
        width: u32,
        height: u32,
        scale_factor: f64,
    },
}

/// Output canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The 1080x1920 portrait canvas.
    pub const fn portrait() -> Self {
        Self::new(PORTRAIT_WIDTH, PORTRAIT_HEIGHT)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::portrait()
    }
}

/// Settings for the mobile layout calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobileLayoutConfig {
    /// Foreground width as a multiple of the canvas width.
    ///
    /// Values above 1.0 push the foreground past both canvas edges so the
    /// subject fills more of the phone screen.
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,

    /// Output canvas.
    #[serde(default)]
    pub target: CanvasSize,
}

fn default_scale_factor() -> f64 {
    DEFAULT_SCALE_FACTOR
}

impl Default for MobileLayoutConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            target: CanvasSize::portrait(),
        }
    }
}

impl MobileLayoutConfig {
    /// Portrait canvas with a custom scale factor.
    pub fn with_scale_factor(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.scale_factor.is_finite() || self.scale_factor < 1.0 {
            return Err(LayoutError::InvalidScaleFactor(self.scale_factor));
        }
        if self.target.width == 0 || self.target.height == 0 {
            return Err(LayoutError::InvalidCanvas {
                width: self.target.width,
                height: self.target.height,
            });
        }
        Ok(())
    }
}

/// Placement of foreground and background layers on the canvas.
///
/// Origins may be negative: the foreground is drawn with an overlay that
/// tolerates off-canvas positions, never cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Output canvas
    pub target: CanvasSize,
    /// Foreground scaled width
    pub fg_w: i64,
    /// Foreground scaled height
    pub fg_h: i64,
    /// Foreground overlay x (usually negative)
    pub fg_x: i64,
    /// Foreground overlay y
    pub fg_y: i64,
    /// Background scaled width
    pub bg_w: i64,
    /// Background scaled height (always the canvas height)
    pub bg_h: i64,
    /// Background origin x; its magnitude is the centre-crop offset
    pub bg_x: i64,
}

impl LayoutPlan {
    /// Horizontal offset into the scaled background for the centre crop.
    pub fn background_crop_x(&self) -> i64 {
        if self.bg_x < 0 {
            self.bg_x.abs()
        } else {
            0
        }
    }

    /// Whether the scaled background is wide enough to crop a full canvas.
    ///
    /// False for sources narrower than 9:16.
    pub fn background_covers_canvas(&self) -> bool {
        self.bg_w >= i64::from(self.target.width) && self.bg_h >= i64::from(self.target.height)
    }
}
