//! CLI command implementations.

use std::path::Path;
use std::time::Duration;

use asset_tools::PipelineError;
use asset_tools::audio::click::{ClickTrack, write_click_track};
use asset_tools::audio::convert::convert_to_16bit_mono;
use asset_tools::draw::{pastel, templates};
use asset_tools::manifest::AssetManifest;
use asset_tools::remote::queue::QueueClient;
use asset_tools::remote::sync::SyncClient;
use asset_tools::tts::PiperTts;

pub fn cmd_convert_wav(input: &Path, output: &Path) -> Result<(), PipelineError> {
    convert_to_16bit_mono(input, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

pub fn cmd_templates(out_dir: &Path) -> Result<(), PipelineError> {
    let written = templates::write_all(out_dir)?;
    println!("Created {} templates in {}", written.len(), out_dir.display());
    Ok(())
}

pub fn cmd_click_track(
    out: &Path,
    beats: u32,
    interval: f64,
    tail: f64,
    start_offset: f64,
) -> Result<(), PipelineError> {
    let track = ClickTrack {
        beats,
        beat_interval: interval,
        start_offset,
        tail,
    };
    write_click_track(&track, out)?;
    println!("Wrote {} ({:.1} s)", out.display(), track.duration());
    Ok(())
}

pub fn cmd_pastel(out_dir: &Path) -> Result<(), PipelineError> {
    let written = pastel::write_batch(out_dir)?;
    println!("Generated {} pastel assets into {}", written.len(), out_dir.display());
    Ok(())
}

pub async fn cmd_generate(manifest_path: &Path, ids: &[String]) -> Result<(), PipelineError> {
    let manifest = AssetManifest::load(manifest_path)?;
    let client = SyncClient::from_env()?;
    client.generate_all(&manifest, ids).await?;
    println!("Done.");
    Ok(())
}

pub async fn cmd_generate_queue(
    manifest_path: &Path,
    ids: &[String],
    timeout_s: u64,
) -> Result<(), PipelineError> {
    let manifest = AssetManifest::load(manifest_path)?;
    let client = QueueClient::from_env()?.with_timeout(Duration::from_secs(timeout_s));
    client.generate_all(&manifest, ids).await?;
    println!("Done.");
    Ok(())
}

pub fn cmd_tts(
    out: &Path,
    piper: &Path,
    model: &Path,
    lines: &[String],
) -> Result<(), PipelineError> {
    let tts = PiperTts::new(piper, model);
    let written = tts.synthesize_batch(lines, out)?;
    println!("Wrote {} clips to {}", written.len(), out.display());
    Ok(())
}
