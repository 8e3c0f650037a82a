use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::audio::{AudioBuffer, AudioFormat, CodecGateway, NativeCodec, QualityPreset};
use crate::error::{Error, Result};
use crate::library::ScanOptions;
use crate::metadata::{self, CanonicalMetadata, MetadataOverrides};
use crate::segment::SegmentEntry;

#[derive(Debug, Default)]
struct RecordingReporter {
    successes: Vec<String>,
    failures: Vec<String>,
    warnings: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

/// Decodes anything that exists to one second of silence and writes a
/// placeholder file, so tag handling can be tested without real encoders.
struct FakeCodec;

impl CodecGateway for FakeCodec {
    fn decode(&self, path: &Path) -> Result<AudioBuffer> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Ok(AudioBuffer::new(vec![0.0; 1000], 1000, 1))
    }

    fn encode(
        &self,
        _buffer: &AudioBuffer,
        path: &Path,
        _format: AudioFormat,
        _quality: QualityPreset,
    ) -> Result<()> {
        fs::write(path, [0u8; 64])?;
        Ok(())
    }
}

fn write_wav(path: &Path, duration_ms: u32, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let frames = u64::from(duration_ms) * u64::from(sample_rate) / 1000;
    for i in 0..frames {
        writer.write_sample(((i % 100) as i16) * 50).unwrap();
    }
    writer.finalize().unwrap();
}

fn wav_frames(path: &Path) -> u32 {
    hound::WavReader::open(path).unwrap().duration()
}

fn tagged_mp3(path: &Path, title: &str) {
    fs::write(path, [0u8; 64]).unwrap();
    let meta = CanonicalMetadata {
        title: Some(title.into()),
        artist: Some("Someone".into()),
        ..Default::default()
    };
    metadata::write_file(path, &meta).unwrap();
}

#[test]
fn split_produces_one_file_per_segment_with_exact_durations() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("track.wav");
    write_wav(&input, 120_000, 8_000);
    let out = dir.path().join("out");

    let entries = vec![
        SegmentEntry::new("0", "30000", Some("intro")),
        SegmentEntry::new("30000", "120000", Some("body")),
    ];
    let mut reporter = RecordingReporter::default();
    let result = split(
        &input,
        &out,
        &entries,
        SplitOptions::default(),
        &NativeCodec::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(result, BatchResult { successful: 2, failed: 0 });
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    assert_eq!(wav_frames(&out.join("intro.wav")), 30 * 8_000);
    assert_eq!(wav_frames(&out.join("body.wav")), 90 * 8_000);
    assert_eq!(reporter.successes.len(), 2);
    assert!(reporter.failures.is_empty());
}

#[test]
fn split_skips_bad_segments_and_keeps_going() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("track.wav");
    write_wav(&input, 10_000, 1_000);
    let out = dir.path().join("out");

    let entries = vec![
        SegmentEntry::new("0", "2.5", None),
        SegmentEntry::new("5.0", "4.0", Some("reversed")),
        SegmentEntry::new("0:05", "0:20", Some("too long")),
        SegmentEntry::new("0:05", "0:10", None),
    ];
    let mut reporter = RecordingReporter::default();
    let result = split(
        &input,
        &out,
        &entries,
        SplitOptions::default(),
        &NativeCodec::default(),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(result, BatchResult { successful: 2, failed: 2 });
    assert!(!result.all_succeeded());
    assert_eq!(reporter.failures.len(), 2);
    assert_eq!(wav_frames(&out.join("segment_1.wav")), 2_500);
    assert_eq!(wav_frames(&out.join("segment_4.wav")), 5_000);
}

#[test]
fn split_names_never_clobber() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("track.wav");
    write_wav(&input, 3_000, 1_000);
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("part.wav"), b"already here").unwrap();

    let entries = vec![
        SegmentEntry::new("0", "1000", Some("part")),
        SegmentEntry::new("1000", "2000", Some("part")),
        SegmentEntry::new("2000", "3000", Some("a/b")),
    ];
    let result = split(
        &input,
        &out,
        &entries,
        SplitOptions::default(),
        &NativeCodec::default(),
        &mut RecordingReporter::default(),
    )
    .unwrap();

    assert_eq!(result.successful, 3);
    assert_eq!(fs::read(out.join("part.wav")).unwrap(), b"already here");
    assert!(out.join("part_1.wav").is_file());
    assert!(out.join("part_2.wav").is_file());
    assert!(out.join("a_b.wav").is_file());
}

#[test]
fn split_of_missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    let err = split(
        &dir.path().join("nope.wav"),
        dir.path(),
        &[SegmentEntry::new("0", "1", None)],
        SplitOptions::default(),
        &NativeCodec::default(),
        &mut RecordingReporter::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn batch_isolates_failures() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("in");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    write_wav(&inputs.join("a.wav"), 500, 8_000);
    fs::write(inputs.join("b.wav"), b"RIFF....WAVEbroken header").unwrap();
    write_wav(&inputs.join("c.wav"), 500, 8_000);

    let jobs = plan_batch(
        &inputs,
        &out,
        AudioFormat::Wav,
        QualityPreset::High,
        true,
        &ScanOptions::default(),
    )
    .unwrap();
    assert_eq!(jobs.len(), 3);

    let mut reporter = RecordingReporter::default();
    let result = run(&jobs, &NativeCodec::default(), &mut reporter);

    assert_eq!(result, BatchResult { successful: 2, failed: 1 });
    assert_eq!(result.total(), 3);
    assert_eq!(reporter.failures.len(), 1);
    assert!(reporter.failures[0].contains("b.wav"));
    assert!(out.join("a.wav").is_file());
    assert!(out.join("c.wav").is_file());
    assert!(!out.join("b.wav").exists());
}

#[test]
fn plan_batch_reserves_names_within_the_batch() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("in");
    let out = dir.path().join("out");
    fs::create_dir_all(inputs.join("disc2")).unwrap();
    fs::create_dir_all(&out).unwrap();
    fs::write(inputs.join("song.flac"), b"x").unwrap();
    fs::write(inputs.join("disc2").join("song.ogg"), b"x").unwrap();
    fs::write(inputs.join("notes.txt"), b"x").unwrap();
    fs::write(out.join("song.mp3"), b"old").unwrap();

    let scan = ScanOptions {
        recursive: true,
        ..ScanOptions::default()
    };
    let jobs = plan_batch(&inputs, &out, AudioFormat::Mp3, QualityPreset::Low, false, &scan)
        .unwrap();

    let outputs: Vec<_> = jobs.iter().map(|j| j.output_path().to_path_buf()).collect();
    assert_eq!(outputs, vec![out.join("song_1.mp3"), out.join("song_2.mp3")]);
    assert!(jobs.iter().all(|j| j.target_format() == AudioFormat::Mp3));
}

#[test]
fn plan_batch_needs_an_input_directory() {
    let dir = tempdir().unwrap();
    let err = plan_batch(
        &dir.path().join("missing"),
        dir.path(),
        AudioFormat::Wav,
        QualityPreset::High,
        true,
        &ScanOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn jobs_only_target_writable_formats() {
    let err = ConversionJob::new("a.wav", "a.m4a", AudioFormat::M4a, QualityPreset::High, true)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn convert_copies_tags_between_tag_capable_formats() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("song.mp3");
    tagged_mp3(&input, "Copied");
    let output = dir.path().join("nested").join("copy.mp3");

    let job = ConversionJob::new(&input, &output, AudioFormat::Mp3, QualityPreset::High, true)
        .unwrap();
    let mut reporter = RecordingReporter::default();
    convert_one(&job, &FakeCodec, &mut reporter).unwrap();

    let meta = metadata::read_file(&output).unwrap();
    assert_eq!(meta.title.as_deref(), Some("Copied"));
    assert_eq!(meta.artist.as_deref(), Some("Someone"));
    assert!(reporter.warnings.is_empty());
}

#[test]
fn convert_skips_tags_when_not_preserving() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("song.mp3");
    tagged_mp3(&input, "Dropped");
    let output = dir.path().join("copy.mp3");

    let job = ConversionJob::new(&input, &output, AudioFormat::Mp3, QualityPreset::High, false)
        .unwrap();
    convert_one(&job, &FakeCodec, &mut RecordingReporter::default()).unwrap();

    assert!(metadata::read_file(&output).unwrap().is_empty());
}

#[test]
fn convert_to_wav_warns_that_tags_were_not_written() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("song.mp3");
    tagged_mp3(&input, "Lost");
    let output = dir.path().join("song.wav");

    let job = ConversionJob::new(&input, &output, AudioFormat::Wav, QualityPreset::High, true)
        .unwrap();
    let mut reporter = RecordingReporter::default();
    convert_one(&job, &FakeCodec, &mut reporter).unwrap();

    assert_eq!(reporter.warnings.len(), 1);
    assert!(reporter.warnings[0].contains("no tag support"));
}

#[test]
fn convert_of_missing_input_fails() {
    let dir = tempdir().unwrap();
    let job = ConversionJob::new(
        dir.path().join("gone.wav"),
        dir.path().join("out.wav"),
        AudioFormat::Wav,
        QualityPreset::High,
        true,
    )
    .unwrap();
    let err = convert_one(&job, &FakeCodec, &mut RecordingReporter::default()).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn single_output_into_directory_picks_a_free_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("take.flac"), b"x").unwrap();
    assert_eq!(
        single_output_path(Path::new("in/take.wav"), dir.path(), AudioFormat::Flac),
        dir.path().join("take_1.flac")
    );
    let file = dir.path().join("explicit.mp3");
    assert_eq!(
        single_output_path(Path::new("in/take.wav"), &file, AudioFormat::Mp3),
        file
    );
}

#[test]
fn insert_block_lengthens_the_written_track() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("base.wav");
    write_wav(&input, 10_000, 1_000);
    let output = dir.path().join("longer.wav");

    let times = BlockTimes {
        start: "2",
        end: "4",
        at: "8",
    };
    let info = edit_block(
        &input,
        &output,
        BlockOp::Insert,
        &times,
        QualityPreset::High,
        &NativeCodec::default(),
    )
    .unwrap();

    assert_eq!(info.duration_ms, 12_000);
    assert_eq!(wav_frames(&output), 12_000);
}

#[test]
fn replace_block_keeps_the_track_length() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("base.wav");
    write_wav(&input, 10_000, 1_000);
    let output = dir.path().join("same.wav");

    let times = BlockTimes {
        start: "0:00",
        end: "0:03",
        at: "0:05",
    };
    let info = edit_block(
        &input,
        &output,
        BlockOp::Replace,
        &times,
        QualityPreset::High,
        &NativeCodec::default(),
    )
    .unwrap();

    assert_eq!(info.duration_ms, 10_000);
    assert_eq!(wav_frames(&output), 10_000);
}

#[test]
fn block_position_past_the_end_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("base.wav");
    write_wav(&input, 10_000, 1_000);

    let times = BlockTimes {
        start: "1",
        end: "2",
        at: "11",
    };
    let err = edit_block(
        &input,
        &dir.path().join("x.wav"),
        BlockOp::Insert,
        &times,
        QualityPreset::High,
        &NativeCodec::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidRange(_)));
}

#[test]
fn probe_reports_stream_properties() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clip.wav");
    write_wav(&path, 2_000, 8_000);

    let info = probe(&path).unwrap();
    assert_eq!(info.format, AudioFormat::Wav);
    assert_eq!(info.duration_ms, 2_000);
    assert_eq!(info.sample_rate, Some(8_000));
    assert_eq!(info.channels, Some(1));
    assert!(info.metadata.is_empty());
    assert!(info.to_string().contains("00:02.000"));
}

#[test]
fn update_metadata_applies_overrides_on_top_of_existing_tags() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    tagged_mp3(&path, "Before");

    let overrides = MetadataOverrides {
        title: Some("After".into()),
        year: Some("2020".into()),
        ..Default::default()
    };
    let mut reporter = RecordingReporter::default();
    update_metadata(&path, &overrides, &mut reporter).unwrap();

    let meta = metadata::read_file(&path).unwrap();
    assert_eq!(meta.title.as_deref(), Some("After"));
    assert_eq!(meta.date.as_deref(), Some("2020"));
    assert_eq!(meta.artist.as_deref(), Some("Someone"));
    assert_eq!(reporter.successes.len(), 1);
}

#[test]
fn update_metadata_on_wav_only_warns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clip.wav");
    write_wav(&path, 100, 8_000);

    let mut reporter = RecordingReporter::default();
    let overrides = MetadataOverrides {
        title: Some("x".into()),
        ..Default::default()
    };
    update_metadata(&path, &overrides, &mut reporter).unwrap();
    assert_eq!(reporter.warnings.len(), 1);
    assert!(reporter.successes.is_empty());
}
