//! FFmpeg filter graphs.

use shorts_models::LayoutPlan;

/// Build the blurred-background portrait filter graph for a layout.
///
/// The background is scaled to `bg_w x bg_h`, blurred and centre-cropped to
/// the canvas; the foreground is scaled to `fg_w x fg_h` and overlaid at
/// `(fg_x, fg_y)`. Negative overlay offsets are valid and clip the
/// foreground at the canvas edge.
pub fn build_mobile_filter(plan: &LayoutPlan, blur: &str) -> String {
    format!(
        "[0:v]scale={bg_w}:{bg_h},boxblur={blur},crop={tw}:{th}:{crop_x}:0[bg];\
         [0:v]scale={fg_w}:{fg_h}[main];\
         [bg][main]overlay={fg_x}:{fg_y}",
        bg_w = plan.bg_w,
        bg_h = plan.bg_h,
        blur = blur,
        tw = plan.target.width,
        th = plan.target.height,
        crop_x = plan.background_crop_x(),
        fg_w = plan.fg_w,
        fg_h = plan.fg_h,
        fg_x = plan.fg_x,
        fg_y = plan.fg_y,
    )
}
