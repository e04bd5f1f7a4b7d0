//! PCM WAV bit-depth/downmix converter.
//!
//! Game engines can be picky about WAV flavors; 24-bit PCM in particular
//! often refuses to play. This reads integer PCM of width 1/2/3/4 bytes,
//! downmixes to mono, and writes 16-bit output with the sample rate
//! preserved.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::PipelineError;

/// Full-scale positive amplitude for an integer PCM bit depth.
fn full_scale(bits: u16) -> Result<i64, PipelineError> {
    match bits {
        8 => Ok(127),
        16 => Ok(32_767),
        24 => Ok(8_388_607),
        32 => Ok(2_147_483_647),
        other => Err(PipelineError::UnsupportedWav(format!(
            "{other} bits per sample"
        ))),
    }
}

/// Average every frame's channels down to a single channel.
///
/// The division truncates toward zero. A trailing partial frame (a
/// malformed data chunk) is dropped rather than averaged short.
pub fn downmix_to_mono(channels: u16, samples: &[i64]) -> Vec<i64> {
    let nch = channels.max(1) as usize;
    if nch == 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(nch)
        .map(|frame| frame.iter().sum::<i64>() / nch as i64)
        .collect()
}

/// Rescale samples from `bits`-deep full scale to the 16-bit signed range.
///
/// Input is clamped to the source range first, then the scaled value is
/// clamped again so `-full_scale - 1` cannot overflow past `i16::MIN`.
pub fn rescale_to_i16(samples: &[i64], bits: u16) -> Result<Vec<i16>, PipelineError> {
    let max_in = full_scale(bits)?;
    let out = samples
        .iter()
        .map(|&s| {
            let s = s.clamp(-max_in - 1, max_in);
            let v = (s as f64 / max_in as f64 * 32_767.0) as i64;
            v.clamp(-32_768, 32_767) as i16
        })
        .collect();
    Ok(out)
}

/// Convert a PCM WAV file to 16-bit mono, preserving the sample rate.
pub fn convert_to_16bit_mono(src: &Path, dst: &Path) -> Result<(), PipelineError> {
    let mut reader = WavReader::open(src)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int {
        return Err(PipelineError::UnsupportedWav(
            "float PCM is not supported".to_string(),
        ));
    }
    // Reject odd widths before decoding anything.
    full_scale(spec.bits_per_sample)?;

    let samples: Vec<i64> = reader
        .samples::<i32>()
        .map(|s| s.map(i64::from))
        .collect::<Result<_, _>>()?;

    let mono = downmix_to_mono(spec.channels, &samples);
    let out = rescale_to_i16(&mono, spec.bits_per_sample)?;

    let out_spec = WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(dst, out_spec)?;
    for &s in &out {
        writer.write_sample(s)?;
    }
    writer.finalize()?;

    tracing::info!(
        src = %src.display(),
        dst = %dst.display(),
        frames = out.len(),
        "converted to 16-bit mono"
    );
    Ok(())
}
