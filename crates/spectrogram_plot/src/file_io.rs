use anyhow::Context;
use hound::{SampleFormat, WavReader, WavSpec};
use spectrogram::{Spectrogram, SpectrogramError};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    num::ParseFloatError,
    path::Path,
};
use thiserror::Error;

/// Errors reading a comma separated spectrogram.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line} column {column}: \"{value}\" is not a number: {source}")]
    Parse {
        line: usize,
        column: usize,
        value: String,
        source: ParseFloatError,
    },
    #[error("Line {line} has {found} columns but the first row has {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("No rows of data")]
    Empty,
    #[error(transparent)]
    Shape(#[from] SpectrogramError),
}

/// Parse rows of comma separated numbers. One row per time frame and one column per frequency bin.
/// Blank lines and lines starting with `#` are skipped. Every row must have the same number of columns.
pub fn parse_spectrogram_csv(reader: impl BufRead) -> Result<Spectrogram, LoadError> {
    let mut frames: Vec<Vec<f64>> = Vec::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let frame = trimmed
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(column_idx, value)| {
                value.parse::<f64>().map_err(|source| LoadError::Parse {
                    line: line_num,
                    column: column_idx + 1,
                    value: value.to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = frames.first() {
            if first.len() != frame.len() {
                return Err(LoadError::RaggedRow {
                    line: line_num,
                    expected: first.len(),
                    found: frame.len(),
                });
            }
        }
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(LoadError::Empty);
    }
    log::trace!(
        "Parsed {} frames of {} bins",
        frames.len(),
        frames[0].len()
    );
    Ok(Spectrogram::from_frames(frames)?)
}

/// Read a comma separated spectrogram from a file.
pub fn read_spectrogram_csv(file: &Path) -> Result<Spectrogram, LoadError> {
    let file_handle = File::open(file)?;
    parse_spectrogram_csv(BufReader::new(file_handle))
}

/// Write a spectrogram as comma separated values. One line per time frame.
pub fn write_spectrogram_csv(writer: impl Write, spectrogram: &Spectrogram) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for frame in spectrogram.frames() {
        for (i, value) in frame.iter().enumerate() {
            if i != 0 {
                writer.write_all(b",")?;
            }
            write!(writer, "{value}")?;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write a spectrogram to a comma separated file.
pub fn write_spectrogram_csv_file(file: &Path, spectrogram: &Spectrogram) -> anyhow::Result<()> {
    let file_handle =
        File::create(file).with_context(|| format!("Can't create {}", file.display()))?;
    write_spectrogram_csv(file_handle, spectrogram)?;
    Ok(())
}

/// Read data from a wav file.
pub fn read_wav(file: &Path) -> anyhow::Result<(WavSpec, Vec<f64>)> {
    let mut reader =
        WavReader::open(file).with_context(|| format!("Invalid wav file {}", file.display()))?;
    let spec = reader.spec();
    log::trace!("Spec: {:?}", reader.spec());
    // Select correct format representation.
    let data = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(spec.channels.into()) // Make wav mono for analysis. Ignore all but first channel.
            .map(|x| x.map(f64::from))
            .collect::<Result<Vec<_>, _>>(),
        SampleFormat::Int => reader
            .samples::<i32>()
            .step_by(spec.channels.into()) // Make wav mono for analysis. Ignore all but first channel.
            .map(|x| x.map(f64::from))
            .collect::<Result<Vec<_>, _>>(),
    }
    .with_context(|| format!("Error reading sample from {}", file.display()))?;
    Ok((spec, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows() {
        let spectrogram = parse_spectrogram_csv("1,2,3\n4, 5 ,6\r\n".as_bytes()).unwrap();
        assert_eq!(spectrogram.frame_cnt(), 2);
        assert_eq!(spectrogram.bin_cnt(), 3);
        assert_eq!(spectrogram.get(1, 1), Some(5.0));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let spectrogram =
            parse_spectrogram_csv("# frames x bins\n\n0.5,1e-3\n   \n2,3\n".as_bytes()).unwrap();
        assert_eq!(spectrogram.frame_cnt(), 2);
        assert_eq!(spectrogram.get(0, 1), Some(1e-3));
    }

    #[test]
    fn short_row_fails() {
        let err = parse_spectrogram_csv("1,2,3\n4,5\n".as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::RaggedRow {
                    line: 2,
                    expected: 3,
                    found: 2
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn long_row_fails() {
        let err = parse_spectrogram_csv("1,2\n\n3,4,5\n".as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::RaggedRow {
                    line: 3,
                    expected: 2,
                    found: 3
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn bad_number_fails() {
        let err = parse_spectrogram_csv("1,2\n3,x\n".as_bytes()).unwrap_err();
        assert!(
            matches!(
                &err,
                LoadError::Parse {
                    line: 2,
                    column: 2,
                    value,
                    ..
                } if value == "x"
            ),
            "{err:?}"
        );
    }

    #[test]
    fn trailing_comma_fails() {
        assert!(matches!(
            parse_spectrogram_csv("1,2,\n".as_bytes()),
            Err(LoadError::Parse { column: 3, .. })
        ));
    }

    #[test]
    fn empty_fails() {
        assert!(matches!(
            parse_spectrogram_csv("\n# nothing\n".as_bytes()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn missing_file_fails() {
        assert!(matches!(
            read_spectrogram_csv(Path::new("this/file/does/not/exist.csv")),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn written_csv_reads_back() {
        let spectrogram = Spectrogram::from_frames(vec![
            vec![0.0, 0.1, 1.0 / 3.0],
            vec![1e-300, 12345.678, f64::MAX],
        ])
        .unwrap();
        let mut buf = Vec::new();
        write_spectrogram_csv(&mut buf, &spectrogram).unwrap();
        assert_eq!(parse_spectrogram_csv(buf.as_slice()).unwrap(), spectrogram);
    }
}
