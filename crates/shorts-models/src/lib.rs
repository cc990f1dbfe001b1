//! Shared data models for the shorts cutter.
//!
//! This crate provides Serde-serializable types for:
//! - Planned segments and the segmentation bounds
//! - Mobile layout plans and the 9:16 canvas
//! - Scene/silence detection settings
//! - Encoding configuration for the mobile compositor
//! - Probed video information

pub mod detection;
pub mod encoding;
pub mod layout;
pub mod segment;
pub mod video;

// Re-export common types
pub use detection::DetectionConfig;
pub use encoding::EncodingConfig;
pub use layout::{CanvasSize, LayoutError, LayoutPlan, MobileLayoutConfig};
pub use segment::{PlanError, Segment, SegmentationConfig};
pub use video::{is_supported_video, VideoInfo, VIDEO_EXTENSIONS};
