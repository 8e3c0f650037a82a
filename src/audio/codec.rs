//! Decoding and encoding at the edge of the program.
//!
//! Every recognised input is decoded with rodio (symphonia underneath) into
//! interleaved `f32` samples. WAV is written with hound; MP3 and FLAC are
//! written by piping raw PCM into an `ffmpeg` child process.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use rodio::{Decoder, Source};
use tracing::{debug, info};

use crate::error::{CodecError, Error, Result};

use super::types::{AudioBuffer, AudioFormat, QualityPreset};

/// Boundary between the core and whatever actually reads and writes audio.
pub trait CodecGateway {
    fn decode(&self, path: &Path) -> Result<AudioBuffer>;

    fn encode(
        &self,
        buffer: &AudioBuffer,
        path: &Path,
        format: AudioFormat,
        quality: QualityPreset,
    ) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct NativeCodec {
    ffmpeg: PathBuf,
}

impl NativeCodec {
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
        }
    }

    fn encode_wav(&self, buffer: &AudioBuffer, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: buffer.channels(),
            sample_rate: buffer.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let encode_err = |e: hound::Error| CodecError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut writer = hound::WavWriter::create(path, spec).map_err(encode_err)?;
        for &sample in buffer.samples() {
            writer.write_sample(to_i16(sample)).map_err(encode_err)?;
        }
        writer.finalize().map_err(encode_err)?;
        Ok(())
    }

    fn encode_ffmpeg(
        &self,
        buffer: &AudioBuffer,
        path: &Path,
        format: AudioFormat,
        quality: QualityPreset,
    ) -> Result<()> {
        let unavailable = |reason: String| CodecError::EncoderUnavailable {
            format: format.extension(),
            program: self.ffmpeg.clone(),
            reason,
        };

        let mut child = Command::new(&self.ffmpeg)
            .args(["-hide_banner", "-loglevel", "error", "-y", "-f", "f32le"])
            .arg("-ar")
            .arg(buffer.sample_rate().to_string())
            .arg("-ac")
            .arg(buffer.channels().to_string())
            .args(["-i", "pipe:0"])
            .args(quality.encoder_args(format))
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| unavailable(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| unavailable("cannot open encoder input".to_string()))?;

        let pcm: Vec<u8> = buffer
            .samples()
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();

        // stderr is drained by wait_with_output while the writer thread feeds stdin.
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(&pcm));
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let encode_err = |reason: String| CodecError::Encode {
            path: path.to_path_buf(),
            reason,
        };
        let output = output.map_err(|e| encode_err(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = format!("ffmpeg exited with {}: {}", output.status, stderr.trim());
            return Err(encode_err(reason).into());
        }
        match written {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(encode_err(e.to_string()).into()),
            Err(_) => Err(encode_err("encoder input thread panicked".to_string()).into()),
        }
    }
}

impl Default for NativeCodec {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl CodecGateway for NativeCodec {
    fn decode(&self, path: &Path) -> Result<AudioBuffer> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let format = AudioFormat::from_path(path)?;

        let decode_err = |reason: String| CodecError::Decode {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let decoder = Decoder::builder()
            .with_data(BufReader::new(file))
            .with_byte_len(len)
            .with_seekable(true)
            .with_hint(format.extension())
            .build()
            .map_err(|e| decode_err(e.to_string()))?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        if channels == 0 || sample_rate == 0 {
            let reason = "stream reports no channels or no sample rate".to_string();
            return Err(decode_err(reason).into());
        }

        let samples: Vec<f32> = decoder.collect();
        let buffer = AudioBuffer::new(samples, sample_rate, channels);
        debug!(
            path = %path.display(),
            sample_rate,
            channels,
            duration_ms = buffer.duration_ms(),
            "decoded"
        );
        Ok(buffer)
    }

    fn encode(
        &self,
        buffer: &AudioBuffer,
        path: &Path,
        format: AudioFormat,
        quality: QualityPreset,
    ) -> Result<()> {
        match format {
            AudioFormat::Wav => self.encode_wav(buffer, path)?,
            AudioFormat::Mp3 | AudioFormat::Flac => {
                self.encode_ffmpeg(buffer, path, format, quality)?
            }
            AudioFormat::M4a | AudioFormat::Ogg => {
                return Err(Error::UnsupportedFormat(format.to_string()));
            }
        }
        info!(
            path = %path.display(),
            %format,
            %quality,
            duration_ms = buffer.duration_ms(),
            "encoded"
        );
        Ok(())
    }
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16
}
