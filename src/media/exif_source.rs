// SPDX-License-Identifier: MPL-2.0
//! EXIF lookup across image containers, Canon CR3 included.
//!
//! `kamadak-exif` handles JPEG, TIFF-based raw files, PNG and HEIF. CR3 is an
//! ISO base media file it does not recognize: Canon stores the tags as bare
//! TIFF structures in boxes of a `uuid` box inside `moov`, with `CMT1`
//! holding IFD0 and `CMT2` the Exif IFD.

use exif::{Exif, Field, In, Tag, Value};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Extended type of the `uuid` box holding Canon's metadata boxes.
pub(crate) const CANON_UUID: [u8; 16] = [
    0x85, 0xc0, 0xb6, 0x87, 0x82, 0x0f, 0x11, 0xe0, 0x81, 0x11, 0xf4, 0xce, 0x46, 0x2b, 0x6a, 0x48,
];

const CR3_BRAND: [u8; 4] = *b"crx ";

/// `moov` boxes larger than this are not read into memory.
const MAX_MOOV_LEN: u64 = 16 * 1024 * 1024;

/// EXIF fields of one image.
pub(crate) struct ExifTags {
    primary: Exif,
    /// Separate Exif IFD, only present for CR3.
    exif_ifd: Option<Exif>,
}

impl ExifTags {
    /// Reads the EXIF fields of `path`, or `None` when it has none.
    pub(crate) fn read(path: &Path) -> Option<Self> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);

        match exif::Reader::new().read_from_container(&mut reader) {
            Ok(primary) => Some(Self {
                primary,
                exif_ifd: None,
            }),
            Err(e) => {
                tracing::trace!(path = %path.display(), error = %e, "no EXIF in container");
                reader.seek(SeekFrom::Start(0)).ok()?;
                read_cr3(&mut reader)
            }
        }
    }

    /// Looks `tag` up in IFD0, then in the CR3 Exif IFD.
    ///
    /// Tags in `CMT2` are parsed as plain TIFF fields, so they are matched by
    /// number.
    fn field(&self, tag: Tag) -> Option<&Field> {
        self.primary.get_field(tag, In::PRIMARY).or_else(|| {
            self.exif_ifd
                .as_ref()?
                .fields()
                .find(|f| f.ifd_num == In::PRIMARY && f.tag.number() == tag.number())
        })
    }

    pub(crate) fn uint(&self, tag: Tag) -> Option<u32> {
        self.field(tag)?.value.get_uint(0)
    }

    /// The stored text of an ASCII field, without `display_value` reformatting.
    pub(crate) fn text(&self, tag: Tag) -> Option<String> {
        ascii_value(&self.field(tag)?.value)
    }
}

fn ascii_value(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    let first = parts.first()?;
    let text = String::from_utf8_lossy(first);
    let text = text.trim_end_matches('\0').trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn read_cr3<R: Read + Seek>(reader: &mut R) -> Option<ExifTags> {
    let moov = read_moov(reader)?;
    let canon = child_boxes(&moov).into_iter().find_map(|(kind, payload)| {
        (&kind == b"uuid" && payload.starts_with(&CANON_UUID))
            .then(|| &payload[CANON_UUID.len()..])
    })?;

    let tiff = |name: &[u8; 4]| {
        let (_, payload) = child_boxes(canon)
            .into_iter()
            .find(|(kind, _)| kind == name)?;
        exif::Reader::new().read_raw(payload.to_vec()).ok()
    };

    Some(ExifTags {
        primary: tiff(b"CMT1")?,
        exif_ifd: tiff(b"CMT2"),
    })
}

/// Reads one box header, returning its type and payload length.
fn read_box_header<R: Read>(reader: &mut R) -> Option<([u8; 4], u64)> {
    let mut header = [0u8; 8];
    reader.read_exact(&mut header).ok()?;
    let size = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
    let kind = [header[4], header[5], header[6], header[7]];

    let (header_len, box_len) = match size {
        // Extends to the end of the file; never the case for ftyp or moov.
        0 => return None,
        1 => {
            let mut large = [0u8; 8];
            reader.read_exact(&mut large).ok()?;
            (16, u64::from_be_bytes(large))
        }
        n => (8, u64::from(n)),
    };
    Some((kind, box_len.checked_sub(header_len)?))
}

fn skip<R: Seek>(reader: &mut R, len: u64) -> Option<()> {
    reader
        .seek(SeekFrom::Current(i64::try_from(len).ok()?))
        .ok()
        .map(|_| ())
}

/// Checks the `crx ` brand and returns the payload of the top-level `moov`.
fn read_moov<R: Read + Seek>(reader: &mut R) -> Option<Vec<u8>> {
    let (kind, len) = read_box_header(reader)?;
    if &kind != b"ftyp" || len < 4 {
        return None;
    }
    let mut brand = [0u8; 4];
    reader.read_exact(&mut brand).ok()?;
    if brand != CR3_BRAND {
        return None;
    }
    skip(reader, len - 4)?;

    loop {
        let (kind, len) = read_box_header(reader)?;
        if &kind != b"moov" {
            skip(reader, len)?;
            continue;
        }
        if len > MAX_MOOV_LEN {
            return None;
        }
        let mut payload = vec![0u8; usize::try_from(len).ok()?];
        reader.read_exact(&mut payload).ok()?;
        return Some(payload);
    }
}

/// Splits `data` into consecutive `(type, payload)` boxes.
fn child_boxes(data: &[u8]) -> Vec<([u8; 4], &[u8])> {
    let mut boxes = Vec::new();
    let mut rest = data;

    while rest.len() >= 8 {
        let size = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        if size < 8 || size > rest.len() {
            break;
        }
        boxes.push(([rest[4], rest[5], rest[6], rest[7]], &rest[8..size]));
        rest = &rest[size..];
    }

    boxes
}
