use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use crate::config::{MAX_LABEL_CHARS, SEGMENT_COLORS};

/// Read an uploaded file into memory as raw bytes.
///
/// The parser receives the file as an opaque blob; decoding problems are its
/// concern, not the reader's.
pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("Could not read file '{}'", file.name()))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Cycle through the alternating segment palette.
pub fn segment_color(index: usize) -> &'static str {
    SEGMENT_COLORS[index % SEGMENT_COLORS.len()]
}

/// Shorten long entry names so they fit inside a segment.
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let short: String = name.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}...", short)
    } else {
        name.to_string()
    }
}

/// Scale the label font with the segment count so text stays readable.
pub fn label_font_size(len: usize) -> f64 {
    (200.0 / len as f64).clamp(10.0, 14.0)
}

/// Point on a circle of radius `r` around (`cx`, `cy`) at `angle_deg`
/// degrees, measured from 3 o'clock with y growing downward (SVG
/// convention).
pub fn polar_point(cx: f64, cy: f64, r: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (cx + r * rad.cos(), cy + r * rad.sin())
}

/// SVG path for one pie segment spanning `[start_deg, end_deg]`.
pub fn segment_path(cx: f64, cy: f64, r: f64, start_deg: f64, end_deg: f64) -> String {
    let (x1, y1) = polar_point(cx, cy, r, start_deg);
    let (x2, y2) = polar_point(cx, cy, r, end_deg);
    let large_arc = if end_deg - start_deg > 180.0 { 1 } else { 0 };
    format!(
        "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_truncated_with_ellipsis() {
        assert_eq!(truncate_label("A very long participant name"), "A very long par...");
        assert_eq!(truncate_label("Short"), "Short");
    }

    #[test]
    fn palette_cycles_past_its_length() {
        assert_eq!(segment_color(0), segment_color(SEGMENT_COLORS.len()));
        assert_ne!(segment_color(0), segment_color(1));
    }

    #[test]
    fn label_font_size_stays_within_bounds() {
        assert_eq!(label_font_size(2), 14.0);
        assert_eq!(label_font_size(100), 10.0);
        assert_eq!(label_font_size(16), 12.5);
    }

    #[test]
    fn polar_points_follow_the_svg_convention() {
        let (x, y) = polar_point(0.0, 0.0, 1.0, 0.0);
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9);
        // 90° points straight down in screen coordinates.
        let (x, y) = polar_point(0.0, 0.0, 1.0, 90.0);
        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn segment_paths_switch_to_the_major_arc_past_180_degrees() {
        let path = segment_path(50.0, 50.0, 40.0, -90.0, 0.0);
        assert!(path.contains("A 40.00 40.00 0 0 1"));
        let path = segment_path(50.0, 50.0, 40.0, -90.0, 120.0);
        assert!(path.contains("A 40.00 40.00 0 1 1"));
    }
}
