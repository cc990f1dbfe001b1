//! Mobile layout geometry.
//!
//! The foreground is scaled to `scale_factor` times the canvas width,
//! keeping its aspect ratio, and centred (so with the default 1.2 it
//! overhangs both side edges). The background is scaled to the canvas
//! height and centre-cropped to the canvas width before blurring.
//!
//! All values are whole pixels. Divisions truncate toward zero.

use shorts_models::{CanvasSize, LayoutError, LayoutPlan, MobileLayoutConfig};

/// Compute the layout of a `source_width` x `source_height` clip.
pub fn compute_layout(
    source_width: u32,
    source_height: u32,
    config: &MobileLayoutConfig,
) -> Result<LayoutPlan, LayoutError> {
    if source_width == 0 || source_height == 0 {
        return Err(LayoutError::InvalidSource {
            width: source_width,
            height: source_height,
        });
    }
    config.validate()?;

    let overflow = || LayoutError::Overflow {
        width: source_width,
        height: source_height,
        scale_factor: config.scale_factor,
    };
    let pixels = |value: i128| i64::try_from(value).map_err(|_| overflow());

    // Products of two u32 dimensions and an i64 width always fit in i128
    let sw = i128::from(source_width);
    let sh = i128::from(source_height);
    let tw = i128::from(config.target.width);
    let th = i128::from(config.target.height);

    let scaled_width = tw as f64 * config.scale_factor;
    if scaled_width >= i64::MAX as f64 {
        return Err(overflow());
    }
    let fg_w = scaled_width as i128;
    let fg_h = sh * fg_w / sw;
    let fg_x = (tw - fg_w) / 2;
    let fg_y = (th - fg_h) / 2;

    let bg_h = th;
    let bg_w = sw * th / sh;
    let bg_x = (tw - bg_w) / 2;

    Ok(LayoutPlan {
        target: config.target,
        fg_w: pixels(fg_w)?,
        fg_h: pixels(fg_h)?,
        fg_x: pixels(fg_x)?,
        fg_y: pixels(fg_y)?,
        bg_w: pixels(bg_w)?,
        bg_h: pixels(bg_h)?,
        bg_x: pixels(bg_x)?,
    })
}

/// Layout on the 1080x1920 portrait canvas.
pub fn compute(
    source_width: u32,
    source_height: u32,
    scale_factor: f64,
) -> Result<LayoutPlan, LayoutError> {
    compute_layout(
        source_width,
        source_height,
        &MobileLayoutConfig {
            scale_factor,
            target: CanvasSize::portrait(),
        },
    )
}
