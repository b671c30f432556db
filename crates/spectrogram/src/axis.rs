use crate::{Spectrogram, SpectrogramError};

/// Half the sample rate. The highest frequency representable without aliasing.
#[must_use]
pub fn nyquist(sample_rate: f64) -> f64 {
    sample_rate / 2.0
}

/// Frequency in hz of each bin of a spectrogram.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAxis {
    freqs: Vec<f64>,
}

impl FrequencyAxis {
    /// `bin_cnt` frequencies evenly spaced from 0 hz to the Nyquist frequency, both inclusive.
    #[must_use]
    pub fn linear(sample_rate: f64, bin_cnt: usize) -> Self {
        FrequencyAxis {
            freqs: linspace(0.0, nyquist(sample_rate), bin_cnt),
        }
    }

    /// Getter for the frequencies.
    #[must_use]
    pub fn freqs(&self) -> &[f64] {
        &self.freqs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    /// Keeps the first `bins` frequencies. Clamped to the axis length.
    #[must_use]
    pub fn truncate(&self, bins: usize) -> Self {
        FrequencyAxis {
            freqs: self.freqs[..bins.min(self.freqs.len())].to_vec(),
        }
    }
}

/// `num` evenly spaced values from `start` to `stop`. Both ends are exact.
#[must_use]
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Number of bins at or below `max_frequency`.
/// `floor(max_frequency / nyquist * bin_cnt)` clamped to `bin_cnt`.
#[must_use]
pub fn cutoff_bin(max_frequency: f64, sample_rate: f64, bin_cnt: usize) -> usize {
    let cutoff = (max_frequency / nyquist(sample_rate) * bin_cnt as f64).floor();
    if cutoff <= 0.0 {
        0
    } else {
        (cutoff as usize).min(bin_cnt)
    }
}

/// A spectrogram restricted to a low frequency band along with its frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub spectrogram: Spectrogram,
    pub axis: FrequencyAxis,
    /// Number of retained bins.
    pub cutoff: usize,
}

/// Restricts the spectrogram and a matching linear axis to the bins below `max_frequency`.
/// # Errors
/// If no bins are retained.
pub fn select_band(
    spectrogram: &Spectrogram,
    sample_rate: f64,
    max_frequency: f64,
) -> Result<Band, SpectrogramError> {
    let axis = FrequencyAxis::linear(sample_rate, spectrogram.bin_cnt());
    let cutoff = cutoff_bin(max_frequency, sample_rate, spectrogram.bin_cnt());
    log::debug!(
        "Cutoff of {max_frequency} hz at {sample_rate} hz sample rate keeps {cutoff} of {} bins",
        spectrogram.bin_cnt()
    );
    if cutoff == 0 {
        return Err(SpectrogramError::DegenerateBand { retained: 0 });
    }
    Ok(Band {
        spectrogram: spectrogram.truncate_bins(cutoff)?,
        axis: axis.truncate(cutoff),
        cutoff,
    })
}
