//! Metronome click-track synthesis.
//!
//! Renders a short windowed sine burst at fixed beat intervals and
//! serializes the result to a 16-bit mono WAV container by hand.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use crate::error::PipelineError;

/// Sample rate for all click tracks.
pub const SAMPLE_RATE: u32 = 44_100;

/// Click burst frequency in Hz.
const CLICK_FREQ: f64 = 1_500.0;
/// Click burst length in seconds.
const CLICK_LEN: f64 = 0.035;
/// Click peak amplitude before windowing.
const CLICK_AMP: f64 = 0.6;

/// Parameters for one click track.
#[derive(Debug, Clone)]
pub struct ClickTrack {
    /// Number of clicks.
    pub beats: u32,
    /// Seconds between click onsets.
    pub beat_interval: f64,
    /// Lead-in silence before the first click.
    pub start_offset: f64,
    /// Trailing silence after the last beat slot.
    pub tail: f64,
}

impl ClickTrack {
    pub fn new(beats: u32, beat_interval: f64) -> Self {
        ClickTrack {
            beats,
            beat_interval,
            start_offset: 0.5,
            tail: 2.0,
        }
    }

    /// Total track duration in seconds.
    pub fn duration(&self) -> f64 {
        self.beats as f64 * self.beat_interval + self.tail
    }

    /// Render the track to 16-bit mono PCM.
    ///
    /// Bursts are summed into the buffer, so clicks closer together than
    /// the burst length overlap; the mix is clipped to [-1, 1] before
    /// conversion. Samples falling outside the buffer are dropped.
    pub fn render(&self) -> Vec<i16> {
        let n = (self.duration() * SAMPLE_RATE as f64) as usize;
        let mut buf = vec![0.0_f64; n];

        let click_len = (CLICK_LEN * SAMPLE_RATE as f64) as usize;
        for beat in 0..self.beats {
            let t0 = self.start_offset + beat as f64 * self.beat_interval;
            let p0 = (t0 * SAMPLE_RATE as f64) as i64;
            for k in 0..click_len {
                let p = p0 + k as i64;
                if p < 0 || p as usize >= n {
                    continue;
                }
                // linear fade-out window over the burst
                let w = 1.0 - k as f64 / click_len as f64;
                let phase = 2.0 * PI * CLICK_FREQ * (k as f64 / SAMPLE_RATE as f64);
                buf[p as usize] += CLICK_AMP * w * phase.sin();
            }
        }

        buf.iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * 32_767.0) as i16)
            .collect()
    }
}

/// Encode mono i16 PCM samples into a WAV byte buffer.
pub fn encode_wav_mono(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let channels: u16 = 1;
    let byte_rate = sample_rate * u32::from(channels) * u32::from(bits_per_sample / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}

/// Render a click track and write it as a WAV file.
pub fn write_click_track(track: &ClickTrack, out: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    let pcm = track.render();
    fs::write(out, encode_wav_mono(&pcm, SAMPLE_RATE))?;
    tracing::info!(
        out = %out.display(),
        beats = track.beats,
        duration_s = track.duration(),
        "wrote click track"
    );
    Ok(())
}
