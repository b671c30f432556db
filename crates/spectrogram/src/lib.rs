//! Crate for transforming a precomputed magnitude spectrogram for display on a logarithmic frequency axis.

use thiserror::Error;

/// Computing a spectrogram from time domain samples.
pub mod analysis;

/// Linear frequency axis and band selection.
pub mod axis;

/// Geometric frequency grid and the mapping of linear bins onto it.
pub mod log_scale;

/// Errors from building or transforming a [`Spectrogram`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrogramError {
    #[error("Spectrogram has no frames or no frequency bins")]
    Empty,
    #[error("Frame {frame} has {found} bins but frame 0 has {expected}")]
    RaggedRow {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("Band keeps {retained} bins but at least 2 are needed for a log scale")]
    DegenerateBand { retained: usize },
    #[error("Log range {start}..{stop} is not positive and increasing")]
    InvalidLogRange { start: f64, stop: f64 },
    #[error("{samples} samples is shorter than a single {window} sample window")]
    TooShort { samples: usize, window: usize },
    #[error("Fft failed: {0}")]
    Fft(String),
}

/// A magnitude spectrogram.
/// Each row is one time frame and each column one frequency bin, starting at 0 hz.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    data: Vec<Vec<f64>>, // Frame major. Every frame has the same number of bins.
}

impl Spectrogram {
    /// Constructor from rows of time frames.
    /// # Errors
    /// If there are no frames, no bins, or the frames disagree on the number of bins.
    pub fn from_frames(data: Vec<Vec<f64>>) -> Result<Self, SpectrogramError> {
        let expected = data.first().map(Vec::len).unwrap_or_default();
        if expected == 0 {
            return Err(SpectrogramError::Empty);
        }
        if let Some((frame, row)) = data
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(SpectrogramError::RaggedRow {
                frame,
                expected,
                found: row.len(),
            });
        }
        Ok(Spectrogram { data })
    }

    /// Number of time frames.
    #[must_use]
    pub fn frame_cnt(&self) -> usize {
        self.data.len()
    }

    /// Number of frequency bins.
    #[must_use]
    pub fn bin_cnt(&self) -> usize {
        self.data[0].len()
    }

    /// Value at the given frame and bin if it exists.
    #[must_use]
    pub fn get(&self, frame: usize, bin: usize) -> Option<f64> {
        self.data.get(frame)?.get(bin).copied()
    }

    /// Each frame's bins from the first frame to the last.
    pub fn frames(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.iter().map(Vec::as_slice)
    }

    /// Compresses the dynamic range with `ln(1+x)` on every value.
    /// Values below -1 become NaN.
    #[must_use]
    pub fn log_amplitude(&self) -> Self {
        self.map(f64::ln_1p)
    }

    /// Applies `f` to every value, producing a new spectrogram of the same shape.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Spectrogram {
            data: self
                .data
                .iter()
                .map(|frame| frame.iter().copied().map(&f).collect())
                .collect(),
        }
    }

    /// Keeps the bins `[0, bins)` of every frame. `bins` is clamped to the number of available bins.
    /// # Errors
    /// If `bins` is 0.
    pub fn truncate_bins(&self, bins: usize) -> Result<Self, SpectrogramError> {
        let bins = bins.min(self.bin_cnt());
        Self::from_frames(
            self.data
                .iter()
                .map(|frame| frame[..bins].to_vec())
                .collect(),
        )
    }

    /// Smallest and largest non NaN value. `None` if every value is NaN.
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .flatten()
            .copied()
            .filter(|x| !x.is_nan())
            .fold(None, |acc, x| match acc {
                None => Some((x, x)),
                Some((min, max)) => Some((min.min(x), max.max(x))),
            })
    }
}
