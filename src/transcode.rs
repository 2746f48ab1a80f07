//! Color transcoding between the authoring and display representations.
//!
//! The display side wants 8-bit RGB, the authoring side 8-bit RGBA. Floating
//! point input is classified by its largest color channel: if nothing exceeds
//! `1.0` the array is taken as normalized and scaled by 255, otherwise it is
//! taken as already being in the 8-bit range. A float array holding 8-bit
//! values that are all `0` or `1` is therefore read as normalized.

use rgb::{RGB8, RGBA8};

use crate::{
    data::{ColorArray, ColorValues},
    error::{Result, ViewerError},
};

/// Converts authoring colors to display colors, dropping alpha.
pub fn to_display(colors: &ColorArray) -> Vec<RGB8> {
    to_rgba8(colors).into_iter().map(|c| c.rgb()).collect()
}

/// Converts display colors to authoring colors with opaque alpha.
///
/// Fails with `ColorSizeMismatch` when the color count differs from
/// `target_vertex_count`.
pub fn to_authoring(colors: &[RGB8], target_vertex_count: usize) -> Result<Vec<RGBA8>> {
    if colors.len() != target_vertex_count {
        return Err(ViewerError::ColorSizeMismatch {
            colors: colors.len(),
            vertices: target_vertex_count,
        });
    }
    Ok(colors.iter().map(|c| c.alpha(255)).collect())
}

/// Converts a color array to 8-bit RGBA.
///
/// 3-channel input gets opaque alpha. The range heuristic looks at the RGB
/// channels only.
pub fn to_rgba8(colors: &ColorArray) -> Vec<RGBA8> {
    let channels = colors.channels();
    let bytes: Vec<u8> = match colors.values() {
        ColorValues::U8(values) => values.clone(),
        ColorValues::F32(values) => {
            let scale = if is_normalized(values, channels) {
                255.0
            } else {
                1.0
            };
            // `as` truncates and saturates, like a cast to an 8-bit array.
            values.iter().map(|&v| (v * scale) as u8).collect()
        }
    };
    bytes
        .chunks_exact(channels)
        .map(|c| RGBA8::new(c[0], c[1], c[2], if channels == 4 { c[3] } else { 255 }))
        .collect()
}

/// Returns whether no color channel exceeds `1.0`.
fn is_normalized(values: &[f32], channels: usize) -> bool {
    values
        .chunks_exact(channels)
        .flat_map(|c| &c[..3])
        .all(|&v| v <= 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_colors(channels: usize, values: &[f32]) -> ColorArray {
        ColorArray::new(channels, ColorValues::F32(values.to_vec())).unwrap()
    }

    #[test]
    fn normalized_floats_are_scaled() {
        let colors = float_colors(3, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            to_display(&colors),
            vec![RGB8::new(0, 0, 0), RGB8::new(255, 255, 255)]
        );
    }

    #[test]
    fn eight_bit_values_are_kept() {
        let bytes = ColorArray::new(3, ColorValues::U8(vec![0, 0, 0, 255, 255, 255])).unwrap();
        assert_eq!(
            to_display(&bytes),
            vec![RGB8::new(0, 0, 0), RGB8::new(255, 255, 255)]
        );
        let floats = float_colors(3, &[0.0, 0.0, 0.0, 255.0, 255.0, 255.0]);
        assert_eq!(to_display(&floats), to_display(&bytes));
    }

    #[test]
    fn scaling_truncates() {
        let colors = float_colors(3, &[0.5, 0.999, 0.1]);
        assert_eq!(to_display(&colors), vec![RGB8::new(127, 254, 25)]);
    }

    #[test]
    fn alpha_is_ignored_for_range_detection() {
        // Alpha of 200 must not flip normalized RGB into the 8-bit range.
        let colors = float_colors(4, &[1.0, 0.5, 0.0, 200.0]);
        assert_eq!(to_display(&colors), vec![RGB8::new(255, 127, 0)]);
    }

    #[test]
    fn four_channels_drop_alpha_for_display() {
        let colors = ColorArray::new(4, ColorValues::U8(vec![10, 20, 30, 40])).unwrap();
        assert_eq!(to_display(&colors), vec![RGB8::new(10, 20, 30)]);
        assert_eq!(to_rgba8(&colors), vec![RGBA8::new(10, 20, 30, 40)]);
    }

    #[test]
    fn authoring_adds_opaque_alpha() {
        let colors = [RGB8::new(1, 2, 3), RGB8::new(4, 5, 6)];
        assert_eq!(
            to_authoring(&colors, 2).unwrap(),
            vec![RGBA8::new(1, 2, 3, 255), RGBA8::new(4, 5, 6, 255)]
        );
    }

    #[test]
    fn authoring_rejects_size_mismatch() {
        let colors = [RGB8::new(1, 2, 3)];
        assert!(matches!(
            to_authoring(&colors, 2),
            Err(ViewerError::ColorSizeMismatch {
                colors: 1,
                vertices: 2
            })
        ));
    }
}
