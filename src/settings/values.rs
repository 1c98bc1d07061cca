// SPDX-License-Identifier: MPL-2.0
//! Typed settings record for the gdipp document, with per-field validation.
//!
//! Every field is independently optional: `None` is the "not set" state and
//! is distinct from every in-domain value. Enumerated settings are closed
//! enums that know their on-disk integer codes, so an unrecognized code in
//! the document simply leaves the field unset instead of smuggling an
//! out-of-domain integer into the record.

use std::fmt;

/// How gdipp drives FreeType's auto-hinter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoHintingMode {
    Disabled,
    TtfBytecode,
    Force,
}

impl AutoHintingMode {
    pub const ALL: [AutoHintingMode; 3] = [
        AutoHintingMode::Disabled,
        AutoHintingMode::TtfBytecode,
        AutoHintingMode::Force,
    ];

    pub fn code(self) -> i32 {
        match self {
            AutoHintingMode::Disabled => 0,
            AutoHintingMode::TtfBytecode => 1,
            AutoHintingMode::Force => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(AutoHintingMode::Disabled),
            1 => Some(AutoHintingMode::TtfBytecode),
            2 => Some(AutoHintingMode::Force),
            _ => None,
        }
    }
}

impl fmt::Display for AutoHintingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AutoHintingMode::Disabled => "Disabled",
            AutoHintingMode::TtfBytecode => "TTF bytecode",
            AutoHintingMode::Force => "Force auto-hinting",
        };
        f.write_str(label)
    }
}

/// FreeType LCD filter selection. Note the non-contiguous `Legacy` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdFilter {
    None,
    Default,
    Light,
    Legacy,
}

impl LcdFilter {
    pub const ALL: [LcdFilter; 4] = [
        LcdFilter::None,
        LcdFilter::Default,
        LcdFilter::Light,
        LcdFilter::Legacy,
    ];

    pub fn code(self) -> i32 {
        match self {
            LcdFilter::None => 0,
            LcdFilter::Default => 1,
            LcdFilter::Light => 2,
            LcdFilter::Legacy => 16,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(LcdFilter::None),
            1 => Some(LcdFilter::Default),
            2 => Some(LcdFilter::Light),
            16 => Some(LcdFilter::Legacy),
            _ => None,
        }
    }
}

impl fmt::Display for LcdFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LcdFilter::None => "None",
            LcdFilter::Default => "Default",
            LcdFilter::Light => "Light",
            LcdFilter::Legacy => "Legacy",
        };
        f.write_str(label)
    }
}

/// Per-render-mode policy (mono, gray, and subpixel each carry one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPolicy {
    Disabled,
    Enabled,
    Forced,
}

impl RenderPolicy {
    pub const ALL: [RenderPolicy; 3] = [
        RenderPolicy::Disabled,
        RenderPolicy::Enabled,
        RenderPolicy::Forced,
    ];

    pub fn code(self) -> i32 {
        match self {
            RenderPolicy::Disabled => 0,
            RenderPolicy::Enabled => 1,
            RenderPolicy::Forced => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(RenderPolicy::Disabled),
            1 => Some(RenderPolicy::Enabled),
            2 => Some(RenderPolicy::Forced),
            _ => None,
        }
    }
}

impl fmt::Display for RenderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RenderPolicy::Disabled => "Disabled",
            RenderPolicy::Enabled => "Enabled",
            RenderPolicy::Forced => "Forced",
        };
        f.write_str(label)
    }
}

/// Subpixel component ordering of the target display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelGeometry {
    Rgb,
    Bgr,
}

impl PixelGeometry {
    pub const ALL: [PixelGeometry; 2] = [PixelGeometry::Rgb, PixelGeometry::Bgr];

    pub fn code(self) -> i32 {
        match self {
            PixelGeometry::Rgb => 0,
            PixelGeometry::Bgr => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PixelGeometry::Rgb),
            1 => Some(PixelGeometry::Bgr),
            _ => None,
        }
    }
}

impl fmt::Display for PixelGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PixelGeometry::Rgb => "RGB",
            PixelGeometry::Bgr => "BGR",
        };
        f.write_str(label)
    }
}

/// One editing session's worth of gdipp settings.
///
/// `load` fills this from the document, the form mutates it, `save` writes
/// it back. Fields keep their own notion of "not set" so validation can
/// tell a missing node apart from a bad value... except that both are
/// reported the same way, by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsRecord {
    pub auto_hinting: Option<AutoHintingMode>,
    pub embedded_bitmap: Option<i32>,
    pub embolden: Option<i32>,
    pub lcd_filter: Option<LcdFilter>,
    pub gamma_red: Option<String>,
    pub gamma_green: Option<String>,
    pub gamma_blue: Option<String>,
    pub hinting: Option<i32>,
    pub kerning: Option<i32>,
    pub render_mono: Option<RenderPolicy>,
    pub render_gray: Option<RenderPolicy>,
    pub render_subpixel: Option<RenderPolicy>,
    pub renderer: Option<i32>,
    pub pixel_geometry: Option<PixelGeometry>,
    pub shadow_offset_x: Option<i32>,
    pub shadow_offset_y: Option<i32>,
    pub shadow_alpha: Option<i32>,
    pub aliased_text: Option<i32>,
}

pub const EMBOLDEN_MIN: i32 = -1000;
pub const EMBOLDEN_MAX: i32 = 1000;
pub const HINTING_MAX: i32 = 3;
pub const SHADOW_ALPHA_MAX: i32 = 255;

/// Parses document text the way the settings loader expects integers:
/// surrounding whitespace ignored, anything unparseable means "not set".
pub fn parse_int(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

fn parse_gamma(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl SettingsRecord {
    /// Applies one document leaf to the record. Unknown names are ignored
    /// so the loader stays tolerant of future schema additions.
    pub fn apply_node(&mut self, name: &str, text: &str) {
        match name {
            "auto_hinting" => self.auto_hinting = parse_int(text).and_then(AutoHintingMode::from_code),
            "embedded_bitmap" => self.embedded_bitmap = parse_int(text),
            "embolden" => self.embolden = parse_int(text),
            "lcd_filter" => self.lcd_filter = parse_int(text).and_then(LcdFilter::from_code),
            "gamma.red" => self.gamma_red = parse_gamma(text),
            "gamma.green" => self.gamma_green = parse_gamma(text),
            "gamma.blue" => self.gamma_blue = parse_gamma(text),
            "hinting" => self.hinting = parse_int(text),
            "kerning" => self.kerning = parse_int(text),
            "render_mode.mono" => self.render_mono = parse_int(text).and_then(RenderPolicy::from_code),
            "render_mode.gray" => self.render_gray = parse_int(text).and_then(RenderPolicy::from_code),
            "render_mode.subpixel" => {
                self.render_subpixel = parse_int(text).and_then(RenderPolicy::from_code);
            }
            "render_mode.pixel_geometry" => {
                self.pixel_geometry = parse_int(text).and_then(PixelGeometry::from_code);
            }
            "render_mode.aliased_text" => self.aliased_text = parse_int(text),
            "renderer" => self.renderer = parse_int(text),
            "shadow.offset_x" => self.shadow_offset_x = parse_int(text),
            "shadow.offset_y" => self.shadow_offset_y = parse_int(text),
            "shadow.alpha" => self.shadow_alpha = parse_int(text),
            _ => {}
        }
    }

    /// Serialized text for one document leaf, `None` when the field is
    /// unset (the writer then leaves the node alone).
    pub fn node_text(&self, name: &str) -> Option<String> {
        match name {
            "auto_hinting" => self.auto_hinting.map(|v| v.code().to_string()),
            "embedded_bitmap" => self.embedded_bitmap.map(|v| v.to_string()),
            "embolden" => self.embolden.map(|v| v.to_string()),
            "lcd_filter" => self.lcd_filter.map(|v| v.code().to_string()),
            "gamma.red" => self.gamma_red.clone(),
            "gamma.green" => self.gamma_green.clone(),
            "gamma.blue" => self.gamma_blue.clone(),
            "hinting" => self.hinting.map(|v| v.to_string()),
            "kerning" => self.kerning.map(|v| v.to_string()),
            "render_mode.mono" => self.render_mono.map(|v| v.code().to_string()),
            "render_mode.gray" => self.render_gray.map(|v| v.code().to_string()),
            "render_mode.subpixel" => self.render_subpixel.map(|v| v.code().to_string()),
            "render_mode.pixel_geometry" => self.pixel_geometry.map(|v| v.code().to_string()),
            "render_mode.aliased_text" => self.aliased_text.map(|v| v.to_string()),
            "renderer" => self.renderer.map(|v| v.to_string()),
            "shadow.offset_x" => self.shadow_offset_x.map(|v| v.to_string()),
            "shadow.offset_y" => self.shadow_offset_y.map(|v| v.to_string()),
            "shadow.alpha" => self.shadow_alpha.map(|v| v.to_string()),
            _ => None,
        }
    }

    /// `key=value` pairs for every set field, in declaration order. The
    /// preview helper consumes these on its command line.
    pub fn to_arg_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((name, value));
            }
        };
        push("auto_hinting", self.auto_hinting.map(|v| v.code().to_string()));
        push("embedded_bitmap", self.embedded_bitmap.map(|v| v.to_string()));
        push("embolden", self.embolden.map(|v| v.to_string()));
        push("lcd_filter", self.lcd_filter.map(|v| v.code().to_string()));
        push("gamma.red", self.gamma_red.clone());
        push("gamma.green", self.gamma_green.clone());
        push("gamma.blue", self.gamma_blue.clone());
        push("hinting", self.hinting.map(|v| v.to_string()));
        push("kerning", self.kerning.map(|v| v.to_string()));
        push("render_mode.mono", self.render_mono.map(|v| v.code().to_string()));
        push("render_mode.gray", self.render_gray.map(|v| v.code().to_string()));
        push(
            "render_mode.subpixel",
            self.render_subpixel.map(|v| v.code().to_string()),
        );
        push("renderer", self.renderer.map(|v| v.to_string()));
        push(
            "pixel_geometry",
            self.pixel_geometry.map(|v| v.code().to_string()),
        );
        push("shadow.offset_x", self.shadow_offset_x.map(|v| v.to_string()));
        push("shadow.offset_y", self.shadow_offset_y.map(|v| v.to_string()));
        push("shadow.alpha", self.shadow_alpha.map(|v| v.to_string()));
        push("aliased_text", self.aliased_text.map(|v| v.to_string()));
        pairs
    }

    /// Checks every field against its domain, in declaration order. Field
    /// names appear at most once; the render-mode triplet reports as a
    /// single `render_mode` entry when any member is unset.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.auto_hinting.is_none() {
            report.append("auto_hinting");
        }

        if !matches!(self.embedded_bitmap, Some(0..=1)) {
            report.append("embedded_bitmap");
        }

        if !matches!(self.embolden, Some(EMBOLDEN_MIN..=EMBOLDEN_MAX)) {
            report.append("embolden");
        }

        if self.lcd_filter.is_none() {
            report.append("lcd_filter");
        }

        if self.gamma_red.as_deref().map_or(true, str::is_empty) {
            report.append("gamma.red");
        }

        if self.gamma_green.as_deref().map_or(true, str::is_empty) {
            report.append("gamma.green");
        }

        if self.gamma_blue.as_deref().map_or(true, str::is_empty) {
            report.append("gamma.blue");
        }

        if !matches!(self.hinting, Some(0..=HINTING_MAX)) {
            report.append("hinting");
        }

        if !matches!(self.kerning, Some(0..=1)) {
            report.append("kerning");
        }

        if self.render_mono.is_none() || self.render_gray.is_none() || self.render_subpixel.is_none()
        {
            report.append("render_mode");
        }

        if self.renderer.is_none() {
            report.append("renderer");
        }

        if self.pixel_geometry.is_none() {
            report.append("pixel_geometry");
        }

        if self.shadow_offset_x.is_none() {
            report.append("shadow.offset_x");
        }

        if self.shadow_offset_y.is_none() {
            report.append("shadow.offset_y");
        }

        if !matches!(self.shadow_alpha, Some(0..=SHADOW_ALPHA_MAX)) {
            report.append("shadow.alpha");
        }

        if !matches!(self.aliased_text, Some(0..=1)) {
            report.append("aliased_text");
        }

        report
    }
}

/// Outcome of one validation pass: the names of every unset or
/// out-of-domain field, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    incorrect: Vec<&'static str>,
}

impl ValidationReport {
    fn append(&mut self, field: &'static str) {
        self.incorrect.push(field);
    }

    pub fn is_valid(&self) -> bool {
        self.incorrect.is_empty()
    }

    pub fn incorrect_fields(&self) -> &[&'static str] {
        &self.incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A record with every field set and in-domain.
    pub(crate) fn complete_record() -> SettingsRecord {
        SettingsRecord {
            auto_hinting: Some(AutoHintingMode::TtfBytecode),
            embedded_bitmap: Some(0),
            embolden: Some(0),
            lcd_filter: Some(LcdFilter::Default),
            gamma_red: Some("1.0".to_string()),
            gamma_green: Some("1.0".to_string()),
            gamma_blue: Some("1.0".to_string()),
            hinting: Some(2),
            kerning: Some(1),
            render_mono: Some(RenderPolicy::Disabled),
            render_gray: Some(RenderPolicy::Enabled),
            render_subpixel: Some(RenderPolicy::Forced),
            renderer: Some(0),
            pixel_geometry: Some(PixelGeometry::Rgb),
            shadow_offset_x: Some(1),
            shadow_offset_y: Some(1),
            shadow_alpha: Some(64),
            aliased_text: Some(0),
        }
    }

    #[test]
    fn complete_record_is_valid() {
        assert!(complete_record().validate().is_valid());
    }

    #[test]
    fn default_record_reports_every_field() {
        let report = SettingsRecord::default().validate();
        assert_eq!(
            report.incorrect_fields(),
            &[
                "auto_hinting",
                "embedded_bitmap",
                "embolden",
                "lcd_filter",
                "gamma.red",
                "gamma.green",
                "gamma.blue",
                "hinting",
                "kerning",
                "render_mode",
                "renderer",
                "pixel_geometry",
                "shadow.offset_x",
                "shadow.offset_y",
                "shadow.alpha",
                "aliased_text",
            ]
        );
    }

    #[test]
    fn out_of_range_fields_reported_once_each() {
        let mut record = complete_record();
        record.embolden = Some(EMBOLDEN_MAX + 1);
        record.hinting = Some(7);
        record.shadow_alpha = Some(-3);

        let report = record.validate();
        assert_eq!(
            report.incorrect_fields(),
            &["embolden", "hinting", "shadow.alpha"]
        );
    }

    #[test]
    fn missing_renderer_reports_exactly_renderer() {
        let mut record = complete_record();
        record.renderer = None;
        assert_eq!(record.validate().incorrect_fields(), &["renderer"]);
    }

    #[test]
    fn partial_render_mode_triplet_reported_once() {
        let mut record = complete_record();
        record.render_gray = None;
        assert_eq!(record.validate().incorrect_fields(), &["render_mode"]);
    }

    #[test]
    fn empty_gamma_channel_is_invalid() {
        let mut record = complete_record();
        record.gamma_green = Some(String::new());
        assert_eq!(record.validate().incorrect_fields(), &["gamma.green"]);
    }

    #[test]
    fn unrecognized_enum_code_stays_unset() {
        let mut record = SettingsRecord::default();
        record.apply_node("lcd_filter", "5");
        assert_eq!(record.lcd_filter, None);

        record.apply_node("lcd_filter", "16");
        assert_eq!(record.lcd_filter, Some(LcdFilter::Legacy));
    }

    #[test]
    fn apply_node_tolerates_garbage_text() {
        let mut record = SettingsRecord::default();
        record.apply_node("embolden", "not-a-number");
        assert_eq!(record.embolden, None);

        record.apply_node("embolden", " 12 ");
        assert_eq!(record.embolden, Some(12));
    }

    #[test]
    fn node_text_round_trips_enum_codes() {
        let record = complete_record();
        assert_eq!(record.node_text("lcd_filter").as_deref(), Some("1"));
        assert_eq!(
            record.node_text("render_mode.subpixel").as_deref(),
            Some("2")
        );
        assert_eq!(record.node_text("gamma.red").as_deref(), Some("1.0"));
        assert_eq!(SettingsRecord::default().node_text("hinting"), None);
    }

    #[test]
    fn arg_pairs_skip_unset_fields() {
        let mut record = SettingsRecord::default();
        record.embolden = Some(24);
        record.pixel_geometry = Some(PixelGeometry::Bgr);

        let pairs = record.to_arg_pairs();
        assert_eq!(
            pairs,
            vec![("embolden", "24".to_string()), ("pixel_geometry", "1".to_string())]
        );
    }
}
