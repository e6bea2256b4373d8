// SPDX-License-Identifier: MPL-2.0
//! Test utilities: synthetic media fixtures.
//!
//! Builds small JPEG and CR3 files carrying chosen EXIF fields.

use crate::media::exif_source::CANON_UUID;
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image_rs::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Encodes a `width`x`height` gradient as JPEG.
pub fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, ImageFormat::Jpeg)
        .expect("encode gradient jpeg");
    buf.into_inner()
}

/// An ASCII EXIF field in the primary IFD.
pub fn ascii_field(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

/// A SHORT EXIF field in the primary IFD.
pub fn short_field(tag: Tag, value: u16) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![value]),
    }
}

/// Big-endian TIFF structure holding `fields`.
fn tiff_bytes(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).expect("write exif");
    tiff.into_inner()
}

/// Inserts an APP1 `Exif` segment holding `fields` right after the SOI of `jpeg`.
pub fn with_exif(jpeg: &[u8], fields: &[Field]) -> Vec<u8> {
    let tiff = tiff_bytes(fields);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let len = u16::try_from(payload.len() + 2).expect("exif fits in one segment");

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn iso_box(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let size = u32::try_from(payload.len() + 8).expect("box fits in 32 bits");
    let mut out = size.to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);
    out
}

/// A CR3 skeleton: `ftyp` plus a `moov` whose Canon `uuid` box holds `CMT1`
/// (IFD0 `ifd0`) and, when `exif_ifd` is not empty, `CMT2`.
///
/// Fields meant for `CMT2` must use `Context::Tiff` tags, as Canon stores the
/// Exif IFD as a standalone TIFF.
pub fn cr3_with_tags(ifd0: &[Field], exif_ifd: &[Field]) -> Vec<u8> {
    let mut canon = CANON_UUID.to_vec();
    canon.extend(iso_box(b"CMT1", &tiff_bytes(ifd0)));
    if !exif_ifd.is_empty() {
        canon.extend(iso_box(b"CMT2", &tiff_bytes(exif_ifd)));
    }

    let mut moov = iso_box(b"mvhd", &[0; 100]);
    moov.extend(iso_box(b"uuid", &canon));

    let mut out = iso_box(b"ftyp", b"crx \0\0\0\x01crx isom");
    out.extend(iso_box(b"free", &[0; 16]));
    out.extend(iso_box(b"moov", &moov));
    out.extend(iso_box(b"mdat", &[0; 32]));
    out
}
