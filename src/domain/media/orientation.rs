// SPDX-License-Identifier: MPL-2.0
//! Display orientation shared by EXIF images and video display matrices.

use std::fmt;

/// How stored pixels must be transformed to appear upright.
///
/// Images carry this as the EXIF `Orientation` tag (1-8); videos carry it as a
/// per-stream display matrix. Both collapse to the same eight cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Normal,
    CW90,
    CW180,
    CW270,
    MirroredVertical,
    MirroredHorizontal,
    MirroredHorizontalAnd90CW,
    MirroredHorizontalAnd270CW,
}

impl Orientation {
    /// Maps an EXIF orientation value. Unknown values are treated as upright.
    #[must_use]
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Self::MirroredHorizontal,
            3 => Self::CW180,
            4 => Self::MirroredVertical,
            5 => Self::MirroredHorizontalAnd270CW,
            6 => Self::CW90,
            7 => Self::MirroredHorizontalAnd90CW,
            8 => Self::CW270,
            _ => Self::Normal,
        }
    }

    /// Builds an orientation from a clockwise correction angle and a mirror flag.
    ///
    /// The angle is snapped to the nearest quarter turn.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_rotation(clockwise_degrees: f64, mirrored: bool) -> Self {
        if !clockwise_degrees.is_finite() {
            return if mirrored {
                Self::MirroredHorizontal
            } else {
                Self::Normal
            };
        }
        let quarter_turns = ((clockwise_degrees / 90.0).round() as i64).rem_euclid(4);
        match (quarter_turns, mirrored) {
            (0, false) => Self::Normal,
            (1, false) => Self::CW90,
            (2, false) => Self::CW180,
            (3, false) => Self::CW270,
            (0, true) => Self::MirroredHorizontal,
            (1, true) => Self::MirroredHorizontalAnd90CW,
            (2, true) => Self::MirroredVertical,
            _ => Self::MirroredHorizontalAnd270CW,
        }
    }

    /// Derives the correction from an `FFmpeg` display matrix.
    ///
    /// The matrix is 3x3, row-major; the first two columns are 16.16 fixed
    /// point. The stored rotation is counterclockwise, so the correction is
    /// its negation. A negative determinant means the frame is mirrored; the
    /// horizontal flip is factored out before the angle is measured.
    #[must_use]
    pub fn from_display_matrix(matrix: &[i32; 9]) -> Self {
        let conv = |v: i32| f64::from(v) / 65536.0;
        let (mut a, b) = (conv(matrix[0]), conv(matrix[1]));
        let (mut c, d) = (conv(matrix[3]), conv(matrix[4]));

        let mirrored = a * d - b * c < 0.0;
        if mirrored {
            a = -a;
            c = -c;
        }

        let scale_x = a.hypot(c);
        let scale_y = b.hypot(d);
        if scale_x == 0.0 || scale_y == 0.0 {
            return Self::Normal;
        }

        let counterclockwise = -(b / scale_y).atan2(a / scale_x).to_degrees();
        Self::from_rotation(-counterclockwise, mirrored)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Normal => "identity",
            Self::CW90 => "rotate 90° CW",
            Self::CW180 => "rotate 180°",
            Self::CW270 => "rotate 270° CW",
            Self::MirroredVertical => "mirror vertical",
            Self::MirroredHorizontal => "mirror horizontal",
            Self::MirroredHorizontalAnd90CW => "mirror horizontal + rotate 90° CW",
            Self::MirroredHorizontalAnd270CW => "mirror horizontal + rotate 270° CW",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: i32 = 1 << 16;
    const W: i32 = 1 << 30;

    #[test]
    fn from_exif_maps_all_values() {
        assert_eq!(Orientation::from_exif(1), Orientation::Normal);
        assert_eq!(Orientation::from_exif(2), Orientation::MirroredHorizontal);
        assert_eq!(Orientation::from_exif(3), Orientation::CW180);
        assert_eq!(Orientation::from_exif(4), Orientation::MirroredVertical);
        assert_eq!(Orientation::from_exif(5), Orientation::MirroredHorizontalAnd270CW);
        assert_eq!(Orientation::from_exif(6), Orientation::CW90);
        assert_eq!(Orientation::from_exif(7), Orientation::MirroredHorizontalAnd90CW);
        assert_eq!(Orientation::from_exif(8), Orientation::CW270);
        assert_eq!(Orientation::from_exif(0), Orientation::Normal);
        assert_eq!(Orientation::from_exif(42), Orientation::Normal);
    }

    #[test]
    fn identity_matrix_is_normal() {
        let matrix = [ONE, 0, 0, 0, ONE, 0, 0, 0, W];
        assert_eq!(Orientation::from_display_matrix(&matrix), Orientation::Normal);
    }

    #[test]
    fn portrait_phone_matrix_rotates_clockwise() {
        // tkhd matrix written by phones recording in portrait
        let matrix = [0, ONE, 0, -ONE, 0, 0, 0, 0, W];
        let orientation = Orientation::from_display_matrix(&matrix);
        assert_eq!(orientation, Orientation::CW90);
    }

    #[test]
    fn upside_down_matrix_rotates_half_turn() {
        let matrix = [-ONE, 0, 0, 0, -ONE, 0, 0, 0, W];
        assert_eq!(Orientation::from_display_matrix(&matrix), Orientation::CW180);
    }

    #[test]
    fn reverse_portrait_matrix_rotates_counterclockwise() {
        let matrix = [0, -ONE, 0, ONE, 0, 0, 0, 0, W];
        assert_eq!(Orientation::from_display_matrix(&matrix), Orientation::CW270);
    }

    #[test]
    fn mirrored_matrix_is_detected() {
        let matrix = [-ONE, 0, 0, 0, ONE, 0, 0, 0, W];
        assert_eq!(
            Orientation::from_display_matrix(&matrix),
            Orientation::MirroredHorizontal
        );
    }

    #[test]
    fn degenerate_matrix_is_normal() {
        let matrix = [0; 9];
        assert_eq!(Orientation::from_display_matrix(&matrix), Orientation::Normal);
    }

    #[test]
    fn from_rotation_snaps_and_wraps() {
        assert_eq!(Orientation::from_rotation(89.6, false), Orientation::CW90);
        assert_eq!(Orientation::from_rotation(-90.0, false), Orientation::CW270);
        assert_eq!(Orientation::from_rotation(450.0, false), Orientation::CW90);
        assert_eq!(Orientation::from_rotation(f64::NAN, false), Orientation::Normal);
        assert_eq!(Orientation::from_rotation(180.0, true), Orientation::MirroredVertical);
    }

    #[test]
    fn display_descriptors() {
        assert_eq!(Orientation::Normal.to_string(), "identity");
        assert_eq!(Orientation::CW90.to_string(), "rotate 90° CW");
    }
}
