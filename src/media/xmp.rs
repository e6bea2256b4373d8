// SPDX-License-Identifier: MPL-2.0
//! XMP packet extraction for rating and label.
//!
//! JPEG files carry XMP in an APP1 segment tagged with the Adobe namespace URI.
//! TIFF, PNG, PSD and raw camera files embed the same `<x:xmpmeta>` packet
//! somewhere in their byte stream, so those are scanned for the packet
//! boundaries instead.
//!
//! Only two properties are read:
//! - `xmp:Rating` - star rating, usually -1..=5
//! - `xmp:Label` - colour label text
//!
//! Both may appear as attributes of `rdf:Description` or as child elements.

use crate::media::{extensions, lowercase_extension};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::{self, File};
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Rating and label read from an XMP packet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmpSummary {
    pub rating: Option<f64>,
    pub label: Option<String>,
}

const XMP_MARKER: &[u8] = b"http://ns.adobe.com/xap/1.0/";
const PACKET_START: &[u8] = b"<x:xmpmeta";
const PACKET_END: &[u8] = b"</x:xmpmeta>";

const RATING: &[u8] = b"xmp:Rating";
const LABEL: &[u8] = b"xmp:Label";

/// Reads the XMP rating and label from any supported image file.
///
/// Returns `None` when the file has no XMP packet or cannot be read.
pub fn read_xmp<P: AsRef<Path>>(path: P) -> Option<XmpSummary> {
    let path = path.as_ref();

    let from_app1 = if extensions::is_jpeg(&lowercase_extension(path)) {
        File::open(path)
            .ok()
            .and_then(|file| find_jpeg_xmp_segment(&mut BufReader::new(file)))
    } else {
        None
    };

    let packet = match from_app1 {
        Some(packet) => packet,
        None => {
            let bytes = fs::read(path).ok()?;
            find_xmp_packet(&bytes)?.to_vec()
        }
    };

    Some(parse_xmp(&packet))
}

/// Finds the XMP APP1 segment of a JPEG stream.
fn find_jpeg_xmp_segment<R: Read + Seek>(reader: &mut R) -> Option<Vec<u8>> {
    let mut marker = [0u8; 2];

    reader.read_exact(&mut marker).ok()?;
    if marker != [0xFF, 0xD8] {
        return None;
    }

    loop {
        reader.read_exact(&mut marker).ok()?;
        if marker[0] != 0xFF {
            return None;
        }

        match marker[1] {
            // EOI, or SOS: XMP always precedes the scan data
            0xD9 | 0xDA => return None,
            0xD8 | 0x00 | 0x01 | 0xD0..=0xD7 => continue,
            // Fill bytes before a marker
            0xFF => {
                reader.seek(SeekFrom::Current(-1)).ok()?;
                continue;
            }
            marker_type => {
                let mut len_bytes = [0u8; 2];
                reader.read_exact(&mut len_bytes).ok()?;
                let segment_len = u16::from_be_bytes(len_bytes) as usize;
                if segment_len < 2 {
                    return None;
                }
                let data_len = segment_len - 2;

                if marker_type != 0xE1 {
                    reader.seek(SeekFrom::Current(data_len as i64)).ok()?;
                    continue;
                }

                let mut segment_data = vec![0u8; data_len];
                reader.read_exact(&mut segment_data).ok()?;

                if segment_data.len() > XMP_MARKER.len() + 1
                    && segment_data.starts_with(XMP_MARKER)
                    && segment_data[XMP_MARKER.len()] == 0
                {
                    return Some(segment_data[XMP_MARKER.len() + 1..].to_vec());
                }
            }
        }
    }
}

/// Locates an `<x:xmpmeta>...</x:xmpmeta>` packet inside arbitrary bytes.
fn find_xmp_packet(bytes: &[u8]) -> Option<&[u8]> {
    let start = find_subslice(bytes, PACKET_START)?;
    let end = find_subslice(&bytes[start..], PACKET_END)? + start + PACKET_END.len();
    Some(&bytes[start..end])
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[derive(Clone, Copy, PartialEq)]
enum Property {
    Rating,
    Label,
}

impl Property {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            RATING => Some(Self::Rating),
            LABEL => Some(Self::Label),
            _ => None,
        }
    }
}

/// Parses an XMP packet. Malformed XML yields whatever was read before the error.
pub fn parse_xmp(xmp_data: &[u8]) -> XmpSummary {
    let mut summary = XmpSummary::default();
    let mut reader = Reader::from_reader(xmp_data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<Property> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                read_attributes(e, &mut summary);
                current = Property::from_name(e.name().as_ref());
            }
            Ok(Event::Empty(ref e)) => read_attributes(e, &mut summary),
            Ok(Event::Text(ref e)) => {
                if let Some(property) = current {
                    if let Ok(text) = e.decode() {
                        apply(&mut summary, property, text.trim());
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    summary
}

fn read_attributes(element: &BytesStart<'_>, summary: &mut XmpSummary) {
    for attr in element.attributes().flatten() {
        let Some(property) = Property::from_name(attr.key.as_ref()) else {
            continue;
        };
        if let Ok(value) = attr.unescape_value() {
            apply(summary, property, value.trim());
        }
    }
}

fn apply(summary: &mut XmpSummary, property: Property, text: &str) {
    if text.is_empty() {
        return;
    }
    match property {
        Property::Rating => {
            if let Ok(rating) = text.parse::<f64>() {
                summary.rating = Some(rating);
            }
        }
        Property::Label => summary.label = Some(text.to_string()),
    }
}
