// src/core/decoder.rs
//
// Audio decoding into interleaved stereo f32.
// Uses Symphonia for format-agnostic decoding.

use log::debug;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{SampleBuffer, SignalSpec};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{MixError, Result};

/// File extensions the command-line tool picks up when walking directories
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "wav", "flac", "aiff", "aif", "mp3", "ogg", "m4a", "aac", "caf", "mkv",
];

/// Decoded audio, always interleaved stereo
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Interleaved `L R L R ...` samples
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source before stereo conversion
    pub source_channels: usize,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Original codec name
    pub codec_name: String,
}

impl AudioData {
    pub fn frame_count(&self) -> usize {
        self.samples.len() / 2
    }
}

/// Whether a path carries one of [`SUPPORTED_EXTENSIONS`]
pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .map_or(false, |e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Fold any channel layout into interleaved stereo.
///
/// Mono is duplicated to both sides; beyond two channels only the first
/// two are kept.
pub fn to_interleaved_stereo(samples: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.iter().flat_map(|&s| [s, s]).collect(),
        2 => samples[..samples.len() / 2 * 2].to_vec(),
        n => samples
            .chunks_exact(n)
            .flat_map(|frame| [frame[0], frame[1]])
            .collect(),
    }
}

/// Sample buffer able to hold `frames` frames of `spec`, reallocated when a
/// packet outgrows the current one
fn sample_buffer_for(
    slot: &mut Option<SampleBuffer<f32>>,
    frames: usize,
    spec: SignalSpec,
) -> &mut SampleBuffer<f32> {
    let needed = frames * spec.channels.count();
    if slot.as_ref().map_or(false, |buf| buf.capacity() < needed) {
        *slot = None;
    }
    slot.get_or_insert_with(|| SampleBuffer::new(frames as u64, spec))
}

/// Decode an audio file to interleaved stereo samples
pub fn decode_audio(path: &Path) -> Result<AudioData> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MixError::Decode("no supported audio track found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| MixError::Decode("file does not specify a sample rate".to_string()))?;
    let codec_name = format!("{:?}", track.codec_params.codec);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels: Option<usize> = None;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            Err(SymphoniaError::DecodeError(msg)) => {
                debug!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let packet_channels = spec.channels.count();
        match channels {
            None => channels = Some(packet_channels),
            Some(c) if c != packet_channels => {
                return Err(MixError::Decode(format!(
                    "channel count changed mid-stream ({} -> {})",
                    c, packet_channels
                )));
            }
            Some(_) => {}
        }

        let buf = sample_buffer_for(&mut sample_buf, decoded.capacity(), spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    let channels = match channels {
        Some(c) if c > 0 && !samples.is_empty() => c,
        Some(0) => return Err(MixError::Decode("stream reports 0 audio channels".to_string())),
        _ => return Err(MixError::Decode("no audio samples decoded".to_string())),
    };

    let samples = to_interleaved_stereo(&samples, channels);
    let duration_secs = (samples.len() / 2) as f64 / sample_rate as f64;
    debug!(
        "Decoded {}: {} Hz, {} ch, {:.2}s ({})",
        path.display(),
        sample_rate,
        channels,
        duration_secs,
        codec_name
    );

    Ok(AudioData {
        samples,
        sample_rate,
        source_channels: channels,
        duration_secs,
        codec_name,
    })
}
