//! Plain-text landmark recordings
//!
//! One frame per line:
//! - lines starting with `#` are comments, blank lines are skipped
//! - `-` or `none` marks a frame without a hand
//! - anything else is 63 numbers, `x y z` for each of the 21 landmarks in
//!   index order, separated by commas, semicolons, tabs or spaces
//!
//! The delimiter is detected per line. The writer always emits commas.

use gesturecrate_core::{Landmark, Observation, Result, LANDMARK_COUNT};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::RecordingError;

const VALUES_PER_FRAME: usize = LANDMARK_COUNT * 3;

/// Supported value separators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Space,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Space => ' ',
        }
    }

    /// Detect the delimiter of a data line.
    ///
    /// Comma wins over semicolon, which wins over tab; a line with none of
    /// them is split on whitespace.
    pub fn detect_from_line(line: &str) -> Self {
        [Delimiter::Comma, Delimiter::Semicolon, Delimiter::Tab]
            .into_iter()
            .find(|d| line.contains(d.as_char()))
            .unwrap_or(Delimiter::Space)
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Comma | Delimiter::Semicolon => {
                line.split(self.as_char()).map(str::trim).collect()
            }
            Delimiter::Tab | Delimiter::Space => line.split_whitespace().collect(),
        }
    }
}

/// An ordered stream of frames, `None` where no hand was seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    pub frames: Vec<Option<Observation>>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: Vec<Option<Observation>>) -> Self {
        Self { frames }
    }

    pub fn push(&mut self, frame: Option<Observation>) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames that contain a hand
    pub fn hand_frames(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Option<Observation>> {
        self.frames.iter()
    }
}

impl FromIterator<Option<Observation>> for Recording {
    fn from_iter<I: IntoIterator<Item = Option<Observation>>>(iter: I) -> Self {
        Self { frames: iter.into_iter().collect() }
    }
}

/// Reader for landmark recordings
pub struct RecordingReader;

impl RecordingReader {
    pub fn read_recording<P: AsRef<Path>>(path: P) -> Result<Recording> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Parse a recording from any buffered reader
    pub fn read_from<R: BufRead>(reader: R) -> Result<Recording> {
        let mut recording = Recording::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                std::io::ErrorKind::InvalidData => RecordingError::InvalidText { line: index + 1 },
                _ => RecordingError::Io(e),
            })?;
            if let Some(frame) = Self::parse_line(&line, index + 1)? {
                recording.push(frame);
            }
        }
        Ok(recording)
    }

    /// Parse one line. `Ok(None)` means the line holds no frame.
    pub fn parse_line(
        line: &str,
        line_number: usize,
    ) -> std::result::Result<Option<Option<Observation>>, RecordingError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        if line == "-" || line.eq_ignore_ascii_case("none") {
            return Ok(Some(None));
        }

        let parts = Delimiter::detect_from_line(line).split(line);
        if parts.len() != VALUES_PER_FRAME {
            return Err(RecordingError::FieldCount {
                line: line_number,
                expected: VALUES_PER_FRAME,
                found: parts.len(),
            });
        }

        let mut values = [0.0f32; VALUES_PER_FRAME];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| RecordingError::InvalidNumber {
                line: line_number,
                value: part.to_string(),
            })?;
            if !value.is_finite() {
                return Err(RecordingError::NonFinite { line: line_number });
            }
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (landmark, xyz) in landmarks.iter_mut().zip(values.chunks_exact(3)) {
            *landmark = Landmark::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(Some(Some(Observation::new(landmarks))))
    }
}

/// Writer for landmark recordings
pub struct RecordingWriter;

impl RecordingWriter {
    pub fn write_recording<P: AsRef<Path>>(recording: &Recording, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(recording, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(recording: &Recording, writer: &mut W) -> Result<()> {
        writeln!(writer, "# gesturecrate landmark recording: {} frames", recording.len())?;
        for frame in recording.iter() {
            match frame {
                Some(observation) => {
                    let row = observation
                        .as_flat()
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",");
                    writeln!(writer, "{}", row)?;
                }
                None => writeln!(writer, "-")?,
            }
        }
        Ok(())
    }
}

/// Read a recording from a file
pub fn read_recording<P: AsRef<Path>>(path: P) -> Result<Recording> {
    RecordingReader::read_recording(path)
}

/// Write a recording to a file
pub fn write_recording<P: AsRef<Path>>(recording: &Recording, path: P) -> Result<()> {
    RecordingWriter::write_recording(recording, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesturecrate_core::Error;

    fn sample_row(delimiter: &str) -> String {
        (0..VALUES_PER_FRAME)
            .map(|i| format!("{}", i as f32 * 0.01))
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(Delimiter::detect_from_line("1,2,3"), Delimiter::Comma);
        assert_eq!(Delimiter::detect_from_line("1, 2, 3"), Delimiter::Comma);
        assert_eq!(Delimiter::detect_from_line("1;2;3"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect_from_line("1\t2\t3"), Delimiter::Tab);
        assert_eq!(Delimiter::detect_from_line("1 2   3"), Delimiter::Space);
    }

    #[test]
    fn test_parse_each_delimiter() {
        for delimiter in [",", ", ", ";", "\t", " "] {
            let frame = RecordingReader::parse_line(&sample_row(delimiter), 1)
                .unwrap()
                .unwrap()
                .unwrap();
            assert_eq!(frame[1], Landmark::new(3.0 * 0.01, 4.0 * 0.01, 5.0 * 0.01));
        }
    }

    #[test]
    fn test_gap_and_comment_lines() {
        assert_eq!(RecordingReader::parse_line("# header", 1).unwrap(), None);
        assert_eq!(RecordingReader::parse_line("   ", 2).unwrap(), None);
        assert_eq!(RecordingReader::parse_line("-", 3).unwrap(), Some(None));
        assert_eq!(RecordingReader::parse_line("None", 4).unwrap(), Some(None));
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = RecordingReader::parse_line("0.1,0.2,0.3", 7).unwrap_err();
        assert_eq!(err.line(), Some(7));
        assert!(matches!(err, RecordingError::FieldCount { found: 3, .. }));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let row = sample_row(",").replacen("0.01", "abc", 1);
        let err = RecordingReader::parse_line(&row, 12).unwrap_err();
        assert!(matches!(err, RecordingError::InvalidNumber { line: 12, .. }));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let row = sample_row(",").replacen("0.01", "NaN", 1);
        let err = RecordingReader::parse_line(&row, 3).unwrap_err();
        assert!(matches!(err, RecordingError::NonFinite { line: 3 }));
    }

    #[test]
    fn test_read_from_buffer() {
        let text = format!("# two frames\n{}\n-\n\n{}\n", sample_row(","), sample_row(" "));
        let recording = RecordingReader::read_from(text.as_bytes()).unwrap();
        assert_eq!(recording.len(), 3);
        assert_eq!(recording.hand_frames(), 2);
        assert!(recording.frames[1].is_none());
    }

    #[test]
    fn test_read_error_converts_to_recording_error() {
        let text = format!("{}\n1,2\n", sample_row(","));
        match RecordingReader::read_from(text.as_bytes()) {
            Err(Error::Recording(message)) => assert!(message.contains("line 2")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let bytes = b"-\n\xff\xfe 0.5\n";
        match RecordingReader::read_from(&bytes[..]) {
            Err(Error::Recording(message)) => {
                assert!(message.contains("line 2"), "{}", message);
                assert!(message.contains("UTF-8"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_write_uses_commas() {
        let observation = Observation::new([Landmark::new(0.5, 0.25, -0.125); LANDMARK_COUNT]);
        let recording = Recording::from_frames(vec![Some(observation), None]);
        let mut out = Vec::new();
        RecordingWriter::write_to(&recording, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with('#'));
        assert_eq!(lines[1].split(',').count(), VALUES_PER_FRAME);
        assert!(lines[1].starts_with("0.5,0.25,-0.125"));
        assert_eq!(lines[2], "-");

        let parsed = RecordingReader::read_from(text.as_bytes()).unwrap();
        assert_eq!(parsed, recording);
    }
}
