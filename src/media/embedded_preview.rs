// SPDX-License-Identifier: MPL-2.0
//! Embedded JPEG preview lookup for raw camera files and PSD documents.
//!
//! Cameras store one or more ready-made JPEG renditions inside their raw
//! files, and Photoshop keeps a JPEG thumbnail in its image resources. Decoding
//! those is much cheaper than demosaicing, and good enough for a thumbnail.
//!
//! Candidates come from two places:
//! 1. EXIF IFD1 (`JPEGInterchangeFormat` / `JPEGInterchangeFormatLength`)
//! 2. A scan of the file for well-formed `SOI ... EOI` JPEG streams
//!
//! They are returned largest first.

use exif::{In, Tag};
use std::fs;
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;

const SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Little- and big-endian TIFF headers (CR2, NEF, ARW, DNG start with one).
const TIFF_MAGIC: [&[u8]; 2] = [b"II*\0", b"MM\0*"];

/// Streams smaller than this are almost always corrupt fragments.
const MIN_PREVIEW_LEN: usize = 512;

/// Returns every embedded JPEG stream of `path`, largest first.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn embedded_jpegs<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<Vec<u8>>> {
    let bytes = fs::read(path)?;
    Ok(embedded_jpegs_in(&bytes)
        .into_iter()
        .map(|range| bytes[range].to_vec())
        .collect())
}

/// Byte ranges of embedded JPEG streams within `bytes`, largest first.
pub(crate) fn embedded_jpegs_in(bytes: &[u8]) -> Vec<Range<usize>> {
    let mut ranges = scan_jpeg_streams(bytes);

    if let Some(range) = exif_thumbnail_range(bytes) {
        if !ranges.iter().any(|r| r.start == range.start) {
            ranges.push(range);
        }
    }

    ranges.retain(|r| r.len() >= MIN_PREVIEW_LEN);
    ranges.sort_by(|a, b| b.len().cmp(&a.len()));
    ranges
}

/// Locates the IFD1 thumbnail of a TIFF-structured file.
fn exif_thumbnail_range(bytes: &[u8]) -> Option<Range<usize>> {
    // Offsets are relative to the TIFF header, which is only the file start
    // for TIFF-based containers.
    if !TIFF_MAGIC.iter().any(|magic| bytes.starts_with(magic)) {
        return None;
    }
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;

    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let len = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;

    let end = offset.checked_add(len)?;
    (end <= bytes.len() && bytes.get(offset..offset + 3)? == SOI).then_some(offset..end)
}

/// Finds top-level JPEG streams by walking their marker structure.
///
/// Streams nested inside another one (an EXIF thumbnail inside a preview) are
/// skipped along with their parent.
fn scan_jpeg_streams(bytes: &[u8]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut pos = 0;

    while let Some(found) = find_soi(&bytes[pos..]) {
        let start = pos + found;
        match jpeg_stream_len(&bytes[start..]) {
            Some(len) => {
                ranges.push(start..start + len);
                pos = start + len;
            }
            None => pos = start + 2,
        }
    }

    ranges
}

fn find_soi(bytes: &[u8]) -> Option<usize> {
    bytes.windows(SOI.len()).position(|w| w == SOI)
}

/// Length of the JPEG stream starting at `bytes[0]`, up to and including EOI.
fn jpeg_stream_len(bytes: &[u8]) -> Option<usize> {
    if !bytes.starts_with(&SOI[..2]) {
        return None;
    }
    let mut pos = 2;

    loop {
        if *bytes.get(pos)? != 0xFF {
            return None;
        }
        let marker = *bytes.get(pos + 1)?;
        match marker {
            0xFF => {
                pos += 1;
                continue;
            }
            0xD9 => return Some(pos + 2),
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        let len = usize::from(u16::from_be_bytes([*bytes.get(pos + 2)?, *bytes.get(pos + 3)?]));
        if len < 2 {
            return None;
        }
        pos += 2 + len;

        if marker == 0xDA {
            pos = skip_entropy_coded(bytes, pos)?;
        }
    }
}

/// Advances past entropy-coded data to the next real marker.
fn skip_entropy_coded(bytes: &[u8], mut pos: usize) -> Option<usize> {
    loop {
        if *bytes.get(pos)? == 0xFF {
            match *bytes.get(pos + 1)? {
                0x00 | 0xD0..=0xD7 => pos += 2,
                0xFF => pos += 1,
                _ => return Some(pos),
            }
        } else {
            pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{DynamicImage, ImageFormat, RgbImage};

    fn encoded_jpeg(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image_rs::Rgb([(x % 256) as u8, (y % 256) as u8, 90])
        }));
        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, ImageFormat::Jpeg)
            .expect("encode jpeg");
        buf.into_inner()
    }

    #[test]
    fn stream_len_matches_encoder_output() {
        let jpeg = encoded_jpeg(32, 16);
        assert_eq!(jpeg_stream_len(&jpeg), Some(jpeg.len()));
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let jpeg = encoded_jpeg(32, 16);
        assert_eq!(jpeg_stream_len(&jpeg[..jpeg.len() - 10]), None);
    }

    #[test]
    fn scan_finds_streams_between_garbage_largest_first() {
        let small = encoded_jpeg(24, 24);
        let large = encoded_jpeg(160, 120);

        let mut container = b"FORMAT-HEADER\0\0\0".to_vec();
        container.extend_from_slice(&small);
        container.extend_from_slice(&[0u8; 64]);
        container.extend_from_slice(&large);
        container.extend_from_slice(b"trailing raw sensor data");

        let ranges = embedded_jpegs_in(&container);
        assert_eq!(ranges.len(), 2);
        assert_eq!(&container[ranges[0].clone()], large.as_slice());
        assert_eq!(&container[ranges[1].clone()], small.as_slice());
    }

    #[test]
    fn scan_returns_nothing_for_plain_bytes() {
        assert!(embedded_jpegs_in(b"no jpeg here at all").is_empty());
        assert!(embedded_jpegs_in(&[0xFF, 0xD8, 0xFF]).is_empty());
    }

    #[test]
    fn embedded_jpegs_reads_file_and_decodes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("photo.cr2");
        let preview = encoded_jpeg(64, 48);
        let mut contents = b"II*\0\x08\0\0\0".to_vec();
        contents.extend_from_slice(&preview);
        fs::write(&path, &contents).expect("write");

        let previews = embedded_jpegs(&path).expect("read");
        assert_eq!(previews.len(), 1);
        let decoded = image_rs::load_from_memory(&previews[0]).expect("decode preview");
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn ifd1_thumbnail_is_located() {
        let thumbnail = encoded_jpeg(40, 30);
        let make = exif::Field {
            tag: Tag::Make,
            ifd_num: In::PRIMARY,
            value: exif::Value::Ascii(vec![b"Camera".to_vec()]),
        };
        let mut writer = exif::experimental::Writer::new();
        writer.push_field(&make);
        writer.set_jpeg(&thumbnail, In::THUMBNAIL);
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, true).expect("write tiff");
        let tiff = tiff.into_inner();

        let range = exif_thumbnail_range(&tiff).expect("ifd1 thumbnail");
        assert_eq!(&tiff[range.clone()], thumbnail.as_slice());
        assert_eq!(embedded_jpegs_in(&tiff), vec![range]);
    }

    #[test]
    fn ifd1_lookup_ignores_non_tiff_containers() {
        let jpeg = encoded_jpeg(16, 16);
        assert!(exif_thumbnail_range(&jpeg).is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(embedded_jpegs(dir.path().join("none.nef")).is_err());
    }
}
