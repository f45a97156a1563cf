use ab_glyph::{FontVec, PxScale};
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_hollow_circle_mut, draw_line_segment_mut, draw_text_mut, text_size,
};
use serde_json::{Value, json};

use crate::error::{Result, SeoError};
use crate::types::ThumbnailConcept;

pub const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";

pub const PREVIEW_WIDTH: u32 = 1280;
pub const PREVIEW_HEIGHT: u32 = 720;

const PLACEHOLDER_COLOR: Rgb<u8> = Rgb([0x22, 0x22, 0x22]);
const DEFAULT_GRADIENT_TOP: Rgb<u8> = Rgb([0x33, 0x66, 0xCC]);
const DEFAULT_GRADIENT_BOTTOM: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);
const WATERMARK: &str = "AI Generated Preview";

/// Image-service size string per target platform.
pub fn platform_image_size(platform: &str) -> &'static str {
    match platform {
        "Instagram" => "1024x1024",
        _ => "1792x1024",
    }
}

/// Request a generated thumbnail from the remote image service. Best-effort:
/// the caller falls through to [`render_preview`] on any error.
pub async fn request_remote_thumbnail(
    api_key: &str,
    concept: &ThumbnailConcept,
    video_title: &str,
    platform: &str,
) -> Result<String> {
    let size = platform_image_size(platform);
    let prompt = format!(
        r#"Create a highly engaging professional {platform} thumbnail in {size}.
- Aspect ratio must strictly match platform requirements
- Sharp composition, cinematic depth, clear subject visibility
- Strong readable foreground text: "{overlay}"
- Focus subject: {focal}
- Emotional tone: {tone}
- Visual concept: {concept}
- Strong contrast colors, readable on mobile
- Inspired by high CTR YouTube thumbnails
- Avoid clutter and tiny text
Video title context: "{video_title}""#,
        overlay = concept.text_overlay,
        focal = concept.focal_point,
        tone = concept.tone,
        concept = concept.concept,
    );

    let response = reqwest::Client::new()
        .post(OPENAI_IMAGES_URL)
        .bearer_auth(api_key)
        .json(&json!({
            "model": "dall-e-3",
            "prompt": prompt,
            "size": size,
            "quality": "standard",
            "n": 1,
        }))
        .send()
        .await
        .map_err(|err| render_failure(err.to_string()))?
        .error_for_status()
        .map_err(|err| render_failure(err.to_string()))?
        .json::<Value>()
        .await
        .map_err(|err| render_failure(err.to_string()))?;

    response["data"][0]["url"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| render_failure(format!("no image URL in response: {response}")))
}

/// Synthesize a local preview for a thumbnail concept. Never fails: any
/// error inside the attempt degrades to a flat placeholder image.
pub fn render_preview(concept: &ThumbnailConcept, base_image: Option<&[u8]>) -> RgbImage {
    try_render_preview(concept, base_image)
        .unwrap_or_else(|_| RgbImage::from_pixel(PREVIEW_WIDTH, PREVIEW_HEIGHT, PLACEHOLDER_COLOR))
}

fn try_render_preview(
    concept: &ThumbnailConcept,
    base_image: Option<&[u8]>,
) -> Result<RgbImage> {
    let mut img = match base_image {
        Some(bytes) => match image::load_from_memory(bytes) {
            Ok(decoded) => decoded
                .resize_exact(PREVIEW_WIDTH, PREVIEW_HEIGHT, FilterType::Triangle)
                .to_rgb8(),
            Err(_) => gradient_background(concept, PREVIEW_WIDTH, PREVIEW_HEIGHT),
        },
        None => gradient_background(concept, PREVIEW_WIDTH, PREVIEW_HEIGHT),
    };

    let font = load_font();
    if !concept.text_overlay.is_empty() {
        let font = font.as_ref().ok_or_else(|| {
            render_failure("no usable system font for the text overlay".to_string())
        })?;
        draw_text_with_outline(&mut img, concept, font);
    }
    if let Some(font) = font.as_ref() {
        draw_watermark(&mut img, font);
    }
    Ok(img)
}

/// Two-color vertical gradient with an optional tone-keyed pattern overlay.
pub fn gradient_background(concept: &ThumbnailConcept, width: u32, height: u32) -> RgbImage {
    let (top, bottom) = gradient_colors(&concept.colors);
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        let ratio = y as f32 / height as f32;
        let pixel = Rgb([
            lerp(top[0], bottom[0], ratio),
            lerp(top[1], bottom[1], ratio),
            lerp(top[2], bottom[2], ratio),
        ]);
        for x in 0..width {
            img.put_pixel(x, y, pixel);
        }
    }

    match pattern_for_tone(&concept.tone) {
        Some(TonePattern::Grid) => draw_grid(&mut img),
        Some(TonePattern::Crosshatch) => draw_crosshatch(&mut img),
        Some(TonePattern::Arcs) => draw_arcs(&mut img),
        None => {}
    }
    img
}

/// First two concept colors, or the fixed blue/white pair when fewer than
/// two are given or either fails to parse.
fn gradient_colors(colors: &[String]) -> (Rgb<u8>, Rgb<u8>) {
    if colors.len() >= 2 {
        if let (Some(top), Some(bottom)) =
            (parse_hex_color(&colors[0]), parse_hex_color(&colors[1]))
        {
            return (top, bottom);
        }
    }
    (DEFAULT_GRADIENT_TOP, DEFAULT_GRADIENT_BOTTOM)
}

pub fn parse_hex_color(color: &str) -> Option<Rgb<u8>> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb([r, g, b]))
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TonePattern {
    Grid,
    Crosshatch,
    Arcs,
}

/// Decorative pattern keyed by a case-insensitive substring of the tone.
pub fn pattern_for_tone(tone: &str) -> Option<TonePattern> {
    let tone = tone.to_lowercase();
    if tone.contains("professional") {
        Some(TonePattern::Grid)
    } else if tone.contains("energetic") {
        Some(TonePattern::Crosshatch)
    } else if tone.contains("dramatic") {
        Some(TonePattern::Arcs)
    } else {
        None
    }
}

fn draw_grid(img: &mut RgbImage) {
    let (w, h) = img.dimensions();
    let color = Rgb([0xEB, 0xEB, 0xEB]);
    for x in (0..w).step_by(40) {
        draw_line_segment_mut(img, (x as f32, 0.0), (x as f32, h as f32), color);
    }
    for y in (0..h).step_by(40) {
        draw_line_segment_mut(img, (0.0, y as f32), (w as f32, y as f32), color);
    }
}

fn draw_crosshatch(img: &mut RgbImage) {
    let (w, h) = img.dimensions();
    let (w, h) = (w as i32, h as i32);
    let color = Rgb([0xEB, 0xEB, 0xEB]);
    for i in (-h..w + h).step_by(60) {
        draw_line_segment_mut(img, (i as f32, 0.0), ((i + h) as f32, h as f32), color);
        draw_line_segment_mut(img, (i as f32, h as f32), ((i + h) as f32, 0.0), color);
    }
}

fn draw_arcs(img: &mut RgbImage) {
    let (w, h) = img.dimensions();
    let center = (w as i32 / 2, h as i32 / 2);
    let color = Rgb([0xEB, 0xEB, 0xEB]);
    for radius in (50..w.max(h) as i32).step_by(120) {
        draw_hollow_circle_mut(img, center, radius, color);
    }
}

fn load_font() -> Option<FontVec> {
    const CANDIDATES: [&str; 8] = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    for path in CANDIDATES {
        if let Ok(bytes) = std::fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(bytes) {
                return Some(font);
            }
        }
    }
    None
}

fn draw_text_with_outline(img: &mut RgbImage, concept: &ThumbnailConcept, font: &FontVec) {
    let scale = PxScale::from(80.0);
    let text = &concept.text_overlay;
    let text_color = concept
        .colors
        .first()
        .and_then(|c| parse_hex_color(c))
        .unwrap_or(Rgb([0xFF, 0xFF, 0xFF]));
    let outline_color = concept
        .colors
        .get(1)
        .and_then(|c| parse_hex_color(c))
        .unwrap_or(Rgb([0x00, 0x00, 0x00]));

    let (text_w, text_h) = text_size(scale, font, text);
    let (x, y) = text_position(
        &concept.composition,
        img.width(),
        img.height(),
        text_w as i32,
        text_h as i32,
    );

    const OUTLINE: i32 = 3;
    for ox in -OUTLINE..=OUTLINE {
        for oy in -OUTLINE..=OUTLINE {
            draw_text_mut(img, outline_color, x + ox, y + oy, scale, font, text);
        }
    }
    draw_text_mut(img, text_color, x, y, scale, font, text);
}

/// Anchor point for the overlay text: centered, repositioned by a
/// case-insensitive substring match on the concept's composition.
pub fn text_position(
    composition: &str,
    img_w: u32,
    img_h: u32,
    text_w: i32,
    text_h: i32,
) -> (i32, i32) {
    let (img_w, img_h) = (img_w as i32, img_h as i32);
    let mut x = (img_w - text_w) / 2;
    let mut y = (img_h - text_h) / 2;

    let comp = composition.to_lowercase();
    if comp.contains("top") {
        y = img_h / 4;
    } else if comp.contains("bottom") {
        y = img_h * 3 / 4;
    }
    if comp.contains("left") {
        x = img_w / 4;
    } else if comp.contains("right") {
        x = img_w * 3 / 4 - text_w;
    }
    (x, y)
}

fn draw_watermark(img: &mut RgbImage, font: &FontVec) {
    let scale = PxScale::from(20.0);
    let (w, h) = img.dimensions();
    draw_text_mut(
        img,
        Rgb([0xFF, 0xFF, 0xFF]),
        w as i32 - 240,
        h as i32 - 35,
        scale,
        font,
        WATERMARK,
    );
}

fn render_failure(reason: String) -> SeoError {
    SeoError::RenderFailure { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(colors: &[&str], tone: &str, overlay: &str) -> ThumbnailConcept {
        ThumbnailConcept {
            concept: "test".to_string(),
            text_overlay: overlay.to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            focal_point: "Center".to_string(),
            tone: tone.to_string(),
            composition: String::new(),
        }
    }

    #[test]
    fn hex_colors_parse_and_reject_garbage() {
        assert_eq!(parse_hex_color("#FF0000"), Some(Rgb([0xFF, 0x00, 0x00])));
        assert_eq!(parse_hex_color("3366CC"), Some(Rgb([0x33, 0x66, 0xCC])));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn tone_pattern_matches_substrings_case_insensitively() {
        assert_eq!(pattern_for_tone("Professional"), Some(TonePattern::Grid));
        assert_eq!(
            pattern_for_tone("very ENERGETIC vibe"),
            Some(TonePattern::Crosshatch)
        );
        assert_eq!(pattern_for_tone("dramatic"), Some(TonePattern::Arcs));
        assert_eq!(pattern_for_tone("calm"), None);
        assert_eq!(pattern_for_tone(""), None);
    }

    #[test]
    fn gradient_runs_from_first_color_to_second() {
        let img = gradient_background(&concept(&["#000000", "#FF0000"], "", ""), 64, 64);
        assert_eq!(*img.get_pixel(0, 0), Rgb([0x00, 0x00, 0x00]));
        let bottom = img.get_pixel(0, 63);
        assert!(bottom[0] > 0xF0 && bottom[1] == 0 && bottom[2] == 0);
    }

    #[test]
    fn bad_or_missing_colors_fall_back_to_blue_white() {
        for colors in [&["#FF0000"][..], &["nope", "#FFFFFF"][..], &[][..]] {
            let c = concept(colors, "", "");
            let img = gradient_background(&c, 16, 16);
            assert_eq!(*img.get_pixel(0, 0), Rgb([0x33, 0x66, 0xCC]));
        }
    }

    #[test]
    fn preview_has_fixed_dimensions_without_text() {
        let img = render_preview(&concept(&["#112233", "#445566"], "calm", ""), None);
        assert_eq!(img.dimensions(), (PREVIEW_WIDTH, PREVIEW_HEIGHT));
        // gradient, not the flat placeholder
        assert_eq!(*img.get_pixel(0, 0), Rgb([0x11, 0x22, 0x33]));
    }

    #[test]
    fn undecodable_base_image_degrades_to_gradient() {
        let img = render_preview(&concept(&["#112233", "#445566"], "", ""), Some(b"not an image"));
        assert_eq!(img.dimensions(), (PREVIEW_WIDTH, PREVIEW_HEIGHT));
        assert_eq!(*img.get_pixel(0, 0), Rgb([0x11, 0x22, 0x33]));
    }

    #[test]
    fn text_position_honors_composition_keywords() {
        let (w, h) = (1280, 720);
        let centered = text_position("", w, h, 200, 80);
        assert_eq!(centered, (540, 320));
        assert_eq!(text_position("Top banner", w, h, 200, 80).1, 180);
        assert_eq!(text_position("bottom third", w, h, 200, 80).1, 540);
        assert_eq!(text_position("LEFT aligned", w, h, 200, 80).0, 320);
        assert_eq!(text_position("right side", w, h, 200, 80).0, 760);
    }

    #[test]
    fn platform_sizes() {
        assert_eq!(platform_image_size("YouTube"), "1792x1024");
        assert_eq!(platform_image_size("LinkedIn"), "1792x1024");
        assert_eq!(platform_image_size("Instagram"), "1024x1024");
        assert_eq!(platform_image_size("Unknown"), "1792x1024");
    }
}
