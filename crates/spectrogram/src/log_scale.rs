use crate::{axis::FrequencyAxis, SpectrogramError};

/// `num` values from `start` to `stop` with a constant ratio between neighbours. Both ends are exact.
/// `start` and `stop` must be positive.
#[must_use]
pub fn geomspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let (log_start, log_stop) = (start.ln(), stop.ln());
            let step = (log_stop - log_start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num)
                .map(|i| (log_start + step * i as f64).exp())
                .collect();
            out[0] = start;
            out[num - 1] = stop;
            out
        }
    }
}

/// Piecewise linear interpolation of `x` through the points `(xp[i], fp[i])`.
/// `xp` must be increasing. Outside of `xp` the first or last `fp` is returned.
/// # Panics
/// If `xp` and `fp` differ in length.
#[must_use]
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    assert_eq!(xp.len(), fp.len(), "sample points and values differ in length");
    let (Some(&x_first), Some(&x_last)) = (xp.first(), xp.last()) else {
        return f64::NAN;
    };
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= x_first {
        return fp[0];
    }
    if x >= x_last {
        return fp[fp.len() - 1];
    }
    // First sample point strictly above `x`. Always in `1..xp.len()` here.
    let i = xp.partition_point(|&p| p <= x);
    let (x0, x1, y0, y1) = (xp[i - 1], xp[i], fp[i - 1], fp[i]);
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Geometric frequency grid spanning a band, and where each linear bin lands on it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRemap {
    grid: Vec<f64>,
    positions: Vec<f64>,
}

impl LogRemap {
    /// Builds the grid from the band's second frequency (the first is 0 hz) up to `max_frequency`,
    /// with as many points as the band has bins.
    /// # Errors
    /// If the band has fewer than 2 bins or the grid bounds aren't finite, positive and increasing.
    pub fn new(axis: &FrequencyAxis, max_frequency: f64) -> Result<Self, SpectrogramError> {
        let freqs = axis.freqs();
        if freqs.len() < 2 {
            return Err(SpectrogramError::DegenerateBand {
                retained: freqs.len(),
            });
        }
        let start = freqs[1];
        if !(start.is_finite() && max_frequency.is_finite() && start > 0.0 && start < max_frequency)
        {
            return Err(SpectrogramError::InvalidLogRange {
                start,
                stop: max_frequency,
            });
        }
        let grid = geomspace(start, max_frequency, freqs.len());
        let indices: Vec<f64> = (0..grid.len()).map(|i| i as f64).collect();
        let positions = freqs.iter().map(|&f| interp(f, &grid, &indices)).collect();
        Ok(LogRemap { grid, positions })
    }

    /// The geometric frequencies in hz.
    #[must_use]
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Fractional index on [`Self::grid`] of each linear frequency bin.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Lowest and highest grid frequency.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        (self.grid[0], self.grid[self.grid.len() - 1])
    }
}
