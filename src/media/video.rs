// SPDX-License-Identifier: MPL-2.0
//! Video frame extraction and container inspection via `FFmpeg`.

use crate::domain::error::DecodeError;
use crate::domain::media::{Orientation, RawImage};
use crate::domain::metadata::{FourCc, MetadataRecord};
use crate::media::image::{apply_orientation, from_raw_image, to_raw_image};
use ffmpeg_next::ffi::AVPacketSideDataType;
use ffmpeg_next::format::stream::Stream;
use ffmpeg_next::media::Type;
use ffmpeg_next::Rescale;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Outcome of the one-time `FFmpeg` initialization.
static FFMPEG_INIT: OnceLock<Result<(), DecodeError>> = OnceLock::new();

/// Initialize FFmpeg with appropriate log level.
///
/// Safe to call multiple times; every call returns the outcome of the first.
/// `FFmpeg`'s own logging is lowered to ERROR so warnings like "Detected
/// creation time before 1970" do not interleave with the report on stdout.
pub fn init_ffmpeg() -> Result<(), DecodeError> {
    FFMPEG_INIT
        .get_or_init(|| {
            ffmpeg_next::init().map_err(|e| {
                DecodeError::DecodingFailed(format!("FFmpeg initialization failed: {e}"))
            })?;

            // SAFETY: av_log_set_level is thread-safe and only affects logging
            unsafe {
                ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
            }
            Ok(())
        })
        .clone()
}

fn open_error(e: &ffmpeg_next::Error) -> DecodeError {
    DecodeError::from_message(&e.to_string())
}

// =============================================================================
// Frame selection
// =============================================================================

/// What to do with a freshly decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pick {
    /// Remember this frame and keep decoding.
    Keep,
    /// Remember this frame; it is the answer.
    KeepAndStop,
    /// Discard this frame; the previously kept one is the answer.
    Stop,
}

/// Chooses the frame on screen at a target presentation timestamp.
///
/// Frames arrive in presentation order after a seek to the preceding
/// keyframe. The answer is the last frame whose timestamp is not after the
/// target; if decoding ends first, the last frame seen is used.
#[derive(Debug)]
pub(crate) struct FramePicker {
    target: i64,
    has_frame: bool,
}

impl FramePicker {
    pub(crate) fn new(target: i64) -> Self {
        Self {
            target,
            has_frame: false,
        }
    }

    pub(crate) fn offer(&mut self, pts: Option<i64>) -> Pick {
        let pick = match pts {
            None => Pick::Keep,
            Some(pts) if pts < self.target => Pick::Keep,
            Some(pts) if pts == self.target => Pick::KeepAndStop,
            // Past the target: the previous frame was on screen at the target,
            // unless the stream starts later than the target.
            Some(_) if self.has_frame => Pick::Stop,
            Some(_) => Pick::KeepAndStop,
        };
        if pick != Pick::Stop {
            self.has_frame = true;
        }
        pick
    }

    pub(crate) fn has_frame(&self) -> bool {
        self.has_frame
    }
}

// =============================================================================
// Frame extraction
// =============================================================================

/// Extracts the frame displayed at `at`, upright and fitted towards `max_edge`.
///
/// Seeks to the keyframe before `at` and decodes forward. A timestamp past the
/// end of the stream yields the last decodable frame.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the file cannot be opened, has no video
/// stream, or no frame at all can be decoded.
pub fn extract_frame<P: AsRef<Path>>(
    path: P,
    at: Duration,
    max_edge: u32,
) -> Result<RawImage, DecodeError> {
    init_ffmpeg()?;
    let path = path.as_ref();

    let mut ictx = ffmpeg_next::format::input(&path).map_err(|e| open_error(&e))?;

    let (video_stream_index, time_base, start_time, orientation, parameters) = {
        let input = ictx
            .streams()
            .best(Type::Video)
            .ok_or(DecodeError::NoVideoStream)?;
        let start = input.start_time();
        (
            input.index(),
            input.time_base(),
            if start == ffmpeg_next::ffi::AV_NOPTS_VALUE { 0 } else { start },
            stream_orientation(&input),
            input.parameters(),
        )
    };

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(parameters)
        .map_err(|e| DecodeError::UnsupportedFormat(format!("codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .video()
        .map_err(|e| DecodeError::UnsupportedFormat(format!("video decoder: {e}")))?;

    let offset = i64::try_from(at.as_micros()).unwrap_or(i64::MAX);
    let target_pts =
        start_time.saturating_add(offset.rescale(ffmpeg_next::rescale::TIME_BASE, time_base));
    let seek_ts = target_pts.rescale(time_base, ffmpeg_next::rescale::TIME_BASE);

    if let Err(e) = ictx.seek(seek_ts, ..seek_ts) {
        // Unseekable input: decode from the start instead.
        tracing::debug!(path = %path.display(), error = %e, "seek failed");
    }

    let mut picker = FramePicker::new(target_pts);
    let mut kept = ffmpeg_next::frame::Video::empty();
    let mut decoded = ffmpeg_next::frame::Video::empty();
    let mut done = false;

    for (stream, packet) in ictx.packets() {
        if stream.index() != video_stream_index {
            continue;
        }
        if let Err(e) = decoder.send_packet(&packet) {
            tracing::debug!(path = %path.display(), error = %e, "skipping undecodable packet");
            continue;
        }
        if drain_frames(&mut decoder, &mut picker, &mut kept, &mut decoded) {
            done = true;
            break;
        }
    }

    if !done {
        // Clamp to the last frame: flush whatever the decoder still buffers.
        if decoder.send_eof().is_ok() {
            drain_frames(&mut decoder, &mut picker, &mut kept, &mut decoded);
        }
    }

    if !picker.has_frame() {
        return Err(DecodeError::NoFrame);
    }

    tracing::debug!(
        path = %path.display(),
        pts = ?kept.timestamp(),
        target = target_pts,
        %orientation,
        "picked video frame"
    );

    let frame = scale_to_rgba(&kept, max_edge)?;
    if orientation == Orientation::Normal {
        return Ok(frame);
    }
    Ok(to_raw_image(&apply_orientation(
        from_raw_image(frame)?,
        orientation,
    )))
}

/// Pulls frames out of the decoder until it wants more input.
///
/// Returns `true` once the picker has its answer.
fn drain_frames(
    decoder: &mut ffmpeg_next::decoder::Video,
    picker: &mut FramePicker,
    kept: &mut ffmpeg_next::frame::Video,
    decoded: &mut ffmpeg_next::frame::Video,
) -> bool {
    while decoder.receive_frame(decoded).is_ok() {
        match picker.offer(decoded.timestamp()) {
            Pick::Keep => std::mem::swap(kept, decoded),
            Pick::KeepAndStop => {
                std::mem::swap(kept, decoded);
                return true;
            }
            Pick::Stop => return true,
        }
    }
    false
}

/// Output size for a `width`x`height` frame fitted into a `max_edge` square.
fn fitted_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_edge || max_edge == 0 {
        return (width, height);
    }
    let scale = |v: u32| {
        let scaled = u64::from(v) * u64::from(max_edge) / u64::from(longest);
        u32::try_from(scaled).unwrap_or(max_edge).max(1)
    };
    (scale(width), scale(height))
}

fn scale_to_rgba(
    frame: &ffmpeg_next::frame::Video,
    max_edge: u32,
) -> Result<RawImage, DecodeError> {
    let (src_width, src_height) = (frame.width(), frame.height());
    if src_width == 0 || src_height == 0 {
        return Err(DecodeError::UnsupportedFormat(format!(
            "invalid video dimensions: {src_width}x{src_height}"
        )));
    }
    let (width, height) = fitted_size(src_width, src_height, max_edge);

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        frame.format(),
        src_width,
        src_height,
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| DecodeError::DecodingFailed(format!("scaler: {e}")))?;

    let mut rgba_frame = ffmpeg_next::frame::Video::empty();
    scaler
        .run(frame, &mut rgba_frame)
        .map_err(|e| DecodeError::DecodingFailed(format!("scale frame: {e}")))?;

    let data = rgba_frame.data(0);
    let stride = rgba_frame.stride(0);
    let row_len = width as usize * 4;

    let mut rgba_bytes = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize {
        let row_start = y * stride;
        let row = data
            .get(row_start..row_start + row_len)
            .ok_or(DecodeError::CorruptedFile)?;
        rgba_bytes.extend_from_slice(row);
    }

    Ok(RawImage::from_rgba(width, height, rgba_bytes))
}

// =============================================================================
// Stream side data
// =============================================================================

/// Returns the coded side data of `kind` attached to `stream`, if any.
fn stream_side_data<'a>(stream: &'a Stream<'_>, kind: AVPacketSideDataType) -> Option<&'a [u8]> {
    // SAFETY: codecpar is owned by the stream and outlives the borrow; the
    // side data array is only read.
    unsafe {
        let par = stream.parameters().as_ptr();
        if par.is_null() {
            return None;
        }
        let entry = ffmpeg_next::ffi::av_packet_side_data_get(
            (*par).coded_side_data,
            (*par).nb_coded_side_data,
            kind,
        );
        if entry.is_null() || (*entry).data.is_null() {
            return None;
        }
        Some(std::slice::from_raw_parts((*entry).data, (*entry).size))
    }
}

/// Reads the display matrix of `stream` and turns it into an orientation.
#[must_use]
pub fn stream_orientation(stream: &Stream<'_>) -> Orientation {
    let Some(bytes) = stream_side_data(stream, AVPacketSideDataType::AV_PKT_DATA_DISPLAYMATRIX)
    else {
        return Orientation::Normal;
    };
    display_matrix_from_bytes(bytes)
        .map(|matrix| Orientation::from_display_matrix(&matrix))
        .unwrap_or_default()
}

/// Decodes nine native-endian `i32`s.
fn display_matrix_from_bytes(bytes: &[u8]) -> Option<[i32; 9]> {
    if bytes.len() < 36 {
        return None;
    }
    let mut matrix = [0i32; 9];
    for (value, chunk) in matrix.iter_mut().zip(bytes.chunks_exact(4)) {
        *value = i32::from_ne_bytes(chunk.try_into().ok()?);
    }
    Some(matrix)
}

fn is_protected(stream: &Stream<'_>) -> bool {
    stream_side_data(stream, AVPacketSideDataType::AV_PKT_DATA_ENCRYPTION_INIT_INFO).is_some()
}

// =============================================================================
// Container metadata
// =============================================================================

/// Reads container and track properties of a video file.
///
/// Never fails: a file `FFmpeg` cannot open yields `readable: false` only.
#[must_use]
pub fn read_video_metadata<P: AsRef<Path>>(path: P) -> MetadataRecord {
    let path = path.as_ref();
    let mut record = MetadataRecord::new();

    let ictx = match init_ffmpeg().and_then(|()| {
        ffmpeg_next::format::input(&path).map_err(|e| open_error(&e))
    }) {
        Ok(ictx) => ictx,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot open video for metadata");
            record.insert("readable", false);
            return record;
        }
    };

    let track_count = ictx.streams().count();
    record.insert("readable", track_count > 0);
    record.insert("track_count", track_count);

    let duration = if ictx.duration() > 0 {
        Some(ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE))
    } else {
        ictx.streams()
            .best(Type::Video)
            .filter(|s| s.duration() > 0)
            .map(|s| s.duration() as f64 * f64::from(s.time_base()))
    };
    record.insert("duration", duration);

    record.insert("protected", ictx.streams().any(|s| is_protected(&s)));
    record.insert(
        "playable",
        ictx.streams().any(|s| {
            let parameters = s.parameters();
            matches!(parameters.medium(), Type::Video | Type::Audio)
                && ffmpeg_next::codec::decoder::find(parameters.id()).is_some()
        }),
    );

    let container_tags = ictx.metadata();
    record.insert(
        "creation_date",
        container_tags.get("creation_time").map(str::to_string),
    );

    if let Some(video) = ictx.streams().best(Type::Video) {
        read_video_track(&video, &mut record);
    }

    let audio_streams = ictx
        .streams()
        .filter(|s| s.parameters().medium() == Type::Audio)
        .count();
    if let Some(audio) = ictx.streams().best(Type::Audio) {
        // SAFETY: codecpar is valid for the lifetime of the stream.
        let (sample_rate, channels) = unsafe {
            let par = audio.parameters().as_ptr();
            ((*par).sample_rate, (*par).ch_layout.nb_channels)
        };
        record.insert("audio_sample_rate", i64::from(sample_rate));
        record.insert("audio_channels", i64::from(channels));
        record.insert("audio_format_count", audio_streams);
    }

    for (key, value) in container_tags.iter() {
        record.insert(format!("meta_{key}"), value);
    }

    record
}

fn read_video_track(stream: &Stream<'_>, record: &mut MetadataRecord) {
    let parameters = stream.parameters();

    // SAFETY: codecpar is valid for the lifetime of the stream.
    let (width, height, codec_tag) = unsafe {
        let par = parameters.as_ptr();
        ((*par).width, (*par).height, (*par).codec_tag)
    };
    record.insert("width", i64::from(width));
    record.insert("height", i64::from(height));

    let rate = stream.avg_frame_rate();
    let rate = if rate.denominator() != 0 && rate.numerator() != 0 {
        rate
    } else {
        stream.rate()
    };
    if rate.denominator() != 0 {
        record.insert("frame_rate", f64::from(rate));
    }

    record.insert("transform", stream_orientation(stream).to_string());

    let codec = if codec_tag == 0 {
        parameters.id().name().to_string()
    } else {
        FourCc::from_le_u32(codec_tag).to_string()
    };
    record.insert("codec", codec);
}
