// SPDX-License-Identifier: MPL-2.0
//! Sample-text rasterizer backing the preview renderer binary.
//!
//! This is a stand-in for the real text pipeline the settings control: it
//! draws the sample string with the 8x8 bitmap font at a few sizes and
//! approximates the visual effect of the settings that translate readily
//! to a static bitmap (embolden, shadow, gamma, pixel geometry fringes,
//! aliasing). The point of the preview is that a settings change produces a
//! visibly different frame, not typographic fidelity.

use crate::cmdline::Arguments;
use crate::settings::values::parse_int;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image_rs::{Rgba, RgbaImage};

pub const CANVAS_WIDTH: u32 = 480;
pub const CANVAS_HEIGHT: u32 = 300;
pub const DEFAULT_SAMPLE: &str = "The quick brown fox jumps over the lazy dog 0123456789";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: [u8; 3] = [24, 24, 24];
const LINE_SCALES: [u32; 3] = [1, 2, 3];
const MARGIN: i32 = 12;

/// Render parameters distilled from the helper's command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleScene {
    sample: String,
    embolden: i32,
    gamma: [f32; 3],
    shadow_offset: (i32, i32),
    shadow_alpha: u8,
    aliased: bool,
    subpixel: bool,
    bgr: bool,
}

impl Default for SampleScene {
    fn default() -> Self {
        Self {
            sample: DEFAULT_SAMPLE.to_string(),
            embolden: 0,
            gamma: [1.0, 1.0, 1.0],
            shadow_offset: (0, 0),
            shadow_alpha: 0,
            aliased: false,
            subpixel: false,
            bgr: false,
        }
    }
}

fn parse_gamma_channel(args: &Arguments, key: &str) -> f32 {
    args.get(key)
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|g| *g > 0.0)
        .unwrap_or(1.0)
}

impl SampleScene {
    pub fn from_args(args: &Arguments) -> Self {
        let defaults = Self::default();
        Self {
            sample: args
                .get("sample")
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.sample),
            embolden: args.get("embolden").and_then(parse_int).unwrap_or(0),
            gamma: [
                parse_gamma_channel(args, "gamma.red"),
                parse_gamma_channel(args, "gamma.green"),
                parse_gamma_channel(args, "gamma.blue"),
            ],
            shadow_offset: (
                args.get("shadow.offset_x").and_then(parse_int).unwrap_or(0),
                args.get("shadow.offset_y").and_then(parse_int).unwrap_or(0),
            ),
            shadow_alpha: args
                .get("shadow.alpha")
                .and_then(parse_int)
                .unwrap_or(0)
                .clamp(0, 255) as u8,
            aliased: args.get("render_mode.aliased_text").and_then(parse_int) == Some(1)
                || args.get("aliased_text").and_then(parse_int) == Some(1),
            subpixel: args
                .get("render_mode.subpixel")
                .and_then(parse_int)
                .map_or(false, |v| v > 0),
            bgr: args.get("pixel_geometry").and_then(parse_int) == Some(1),
        }
    }

    /// Ink color after per-channel gamma correction.
    fn ink(&self) -> Rgba<u8> {
        let mut channels = [0u8; 3];
        for (i, base) in INK.iter().enumerate() {
            let corrected = (f32::from(*base) / 255.0).powf(1.0 / self.gamma[i]) * 255.0;
            channels[i] = corrected.round().clamp(0.0, 255.0) as u8;
        }
        Rgba([channels[0], channels[1], channels[2], 255])
    }

    /// Horizontal dilation passes approximating FreeType's embolden units
    /// (1000 units per four extra pixel columns).
    fn dilation(&self) -> i32 {
        (self.embolden.clamp(0, 1000) + 249) / 250
    }

    pub fn render(&self) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
        let ink = self.ink();
        let mut y = MARGIN;

        for scale in LINE_SCALES {
            let scale_i = scale as i32;

            if self.shadow_alpha > 0 && self.shadow_offset != (0, 0) {
                let shadow = Rgba([0, 0, 0, self.shadow_alpha]);
                draw_text(
                    &mut image,
                    MARGIN + self.shadow_offset.0,
                    y + self.shadow_offset.1,
                    &self.sample,
                    shadow,
                    scale,
                );
            }

            if self.subpixel && !self.aliased {
                // Crude LCD fringe: one tinted column on each side, ordered
                // by the panel's pixel geometry.
                let (lead, trail) = if self.bgr {
                    (Rgba([64, 64, 255, 96]), Rgba([255, 64, 64, 96]))
                } else {
                    (Rgba([255, 64, 64, 96]), Rgba([64, 64, 255, 96]))
                };
                draw_text(&mut image, MARGIN - 1, y, &self.sample, lead, scale);
                draw_text(&mut image, MARGIN + 1, y, &self.sample, trail, scale);
            }

            for dx in 0..=self.dilation() {
                draw_text(&mut image, MARGIN + dx, y, &self.sample, ink, scale);
            }

            y += (8 * scale_i) + 6 + scale_i * 2;
        }

        image
    }
}

fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let alpha = u32::from(src.0[3]);
    if alpha == 255 {
        return src;
    }
    let inv = 255 - alpha;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = ((u32::from(src.0[i]) * alpha + u32::from(dst.0[i]) * inv) / 255) as u8;
    }
    out[3] = 255;
    Rgba(out)
}

/// Draws `text` with the scaled 8x8 bitmap font, clipping at the canvas
/// edges. Unmapped characters fall back to `?`.
fn draw_text(image: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    let scale_i = scale.max(1) as i32;
    let mut cursor_x = x;

    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += 8 * scale_i;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for col_idx in 0..8 {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale_i;
                let py = y + row_idx as i32 * scale_i;
                for sy in 0..scale_i {
                    for sx in 0..scale_i {
                        let tx = px + sx;
                        let ty = py + sy;
                        if tx >= 0
                            && ty >= 0
                            && tx < image.width() as i32
                            && ty < image.height() as i32
                        {
                            let dst = *image.get_pixel(tx as u32, ty as u32);
                            image.put_pixel(tx as u32, ty as u32, blend(dst, color));
                        }
                    }
                }
            }
        }
        cursor_x += 8 * scale_i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_pixel_count(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p.0[0] < 200).count()
    }

    #[test]
    fn render_fills_the_canvas_and_draws_something() {
        let image = SampleScene::default().render();
        assert_eq!(image.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert!(dark_pixel_count(&image) > 0, "sample text should leave ink");
    }

    #[test]
    fn embolden_adds_ink() {
        let plain = SampleScene::default().render();
        let scene = SampleScene {
            embolden: 1000,
            ..SampleScene::default()
        };
        let bold = scene.render();
        assert!(dark_pixel_count(&bold) > dark_pixel_count(&plain));
    }

    #[test]
    fn shadow_requires_offset_and_alpha() {
        let no_offset = SampleScene {
            shadow_alpha: 128,
            ..SampleScene::default()
        };
        let offset = SampleScene {
            shadow_alpha: 128,
            shadow_offset: (3, 3),
            ..SampleScene::default()
        };
        assert!(dark_pixel_count(&offset.render()) > dark_pixel_count(&no_offset.render()));
    }

    #[test]
    fn from_args_reads_settings_keys() {
        let args = Arguments::parse([
            "sample=Hi",
            "embolden=500",
            "gamma.red=1.4",
            "shadow.offset_x=2",
            "shadow.offset_y=2",
            "shadow.alpha=90",
            "render_mode.subpixel=2",
            "pixel_geometry=1",
            "aliased_text=0",
        ]);
        let scene = SampleScene::from_args(&args);
        assert_eq!(scene.sample, "Hi");
        assert_eq!(scene.embolden, 500);
        assert!((scene.gamma[0] - 1.4).abs() < f32::EPSILON);
        assert_eq!(scene.shadow_offset, (2, 2));
        assert_eq!(scene.shadow_alpha, 90);
        assert!(scene.subpixel);
        assert!(scene.bgr);
        assert!(!scene.aliased);
    }

    #[test]
    fn invalid_gamma_falls_back_to_neutral() {
        let args = Arguments::parse(["gamma.red=0", "gamma.green=banana"]);
        let scene = SampleScene::from_args(&args);
        assert_eq!(scene.gamma, [1.0, 1.0, 1.0]);
    }
}
