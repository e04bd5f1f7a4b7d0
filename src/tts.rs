//! Batch text-to-speech with the Piper engine.
//!
//! Piper runs as an external binary and reads its text from stdin, so
//! each line becomes one subprocess invocation writing one WAV clip.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::PipelineError;

/// Turn a spoken line into a filesystem-safe slug.
///
/// `&` is spoken as "dan", so it contributes a word instead of vanishing
/// with the rest of the punctuation. Runs of anything non-alphanumeric
/// collapse into single underscores; an all-punctuation line falls back
/// to `line`.
pub fn slugify(line: &str) -> String {
    let lowered = line.trim().to_lowercase().replace('&', " dan ");

    let mut slug = String::with_capacity(lowered.len());
    let mut gap = false;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('_');
            }
            gap = false;
            slug.push(ch);
        } else {
            gap = true;
        }
    }

    if slug.is_empty() {
        "line".to_string()
    } else {
        slug
    }
}

/// Piper invocation parameters.
#[derive(Debug, Clone)]
pub struct PiperTts {
    pub binary: PathBuf,
    pub model: PathBuf,
}

impl PiperTts {
    pub fn new(binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        PiperTts {
            binary: binary.into(),
            model: model.into(),
        }
    }

    /// Check that the binary and voice model exist before a batch starts.
    pub fn verify(&self) -> Result<(), PipelineError> {
        if !self.binary.exists() {
            return Err(PipelineError::Tts(format!(
                "missing piper binary: {}",
                self.binary.display()
            )));
        }
        if !self.model.exists() {
            return Err(PipelineError::Tts(format!(
                "missing voice model: {}",
                self.model.display()
            )));
        }
        Ok(())
    }

    /// Synthesize one line into `out`.
    pub fn synthesize(&self, line: &str, out: &Path) -> Result<(), PipelineError> {
        let mut child = Command::new(&self.binary)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_file")
            .arg(out)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PipelineError::Tts(format!("failed to launch {}: {e}", self.binary.display()))
            })?;

        // piper reads the text from stdin
        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(line.as_bytes())?;
            stdin.write_all(b"\n")?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(PipelineError::Tts(format!(
                "piper exited with {status} for line '{line}'"
            )));
        }
        Ok(())
    }

    /// Synthesize a batch of lines into `out_dir`, one slug-named clip
    /// per line, and return the written paths.
    pub fn synthesize_batch(
        &self,
        lines: &[String],
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        self.verify()?;
        std::fs::create_dir_all(out_dir)?;

        let mut written = Vec::with_capacity(lines.len());
        for line in lines {
            let out = out_dir.join(format!("{}.wav", slugify(line)));
            self.synthesize(line, &out)?;
            tracing::info!(out = %out.display(), "wrote speech clip");
            written.push(out);
        }
        Ok(written)
    }
}
