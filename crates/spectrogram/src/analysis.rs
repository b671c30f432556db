use crate::{Spectrogram, SpectrogramError};
use derive_more::{Add, Div, Mul, Sub};
use realfft::RealFftPlanner;
use std::time::Duration;
use window_fn::WindowFn;

/// A window length. Wraps the number of samples with methods for converting to time.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Add, Div, Mul, Sub)]
pub struct WindowLength {
    sample_num: usize,
}

impl WindowLength {
    /// [`WindowLength`] constructor.
    #[must_use]
    pub fn from_samples(sample_num: usize) -> Self {
        WindowLength { sample_num }
    }

    /// Getter for samples
    #[must_use]
    pub fn samples(&self) -> usize {
        self.sample_num
    }

    /// Converts samples to duration. Samples / (samples/sec)= secs
    #[must_use]
    pub fn duration(&self, sample_rate: f32) -> Duration {
        Duration::from_secs_f32(self.sample_num as f32 / sample_rate)
    }
}

/// Number of frequency bins produced by a real fft of `window_samples` time samples.
/// N samples to (N/2)+1 bins.
#[must_use]
pub const fn time_samples_to_frequency(window_samples: usize) -> usize {
    (window_samples / 2) + 1
}

/// The information required to calculate a spectrogram.
#[derive(Debug)]
pub struct SpecCompute {
    data: Vec<f64>,            // Time domain data.
    window_len: WindowLength,  // The length of a window.
    window_step: WindowLength, // The step between successive windows. At most the window length.
    window_fn: WindowFn,
}

impl SpecCompute {
    /// Basic constructor.
    pub fn new(
        data: Vec<f64>,
        window_len: WindowLength,
        window_step: WindowLength,
        window_fn: WindowFn,
    ) -> Self {
        assert!(window_len.samples() > 0, "Window should not be empty.");
        assert!(window_step.samples() > 0, "Step length should not be 0.");
        assert!(
            window_step <= window_len,
            "Step length should not be larger than the window itself."
        );
        SpecCompute {
            data,
            window_len,
            window_step,
            window_fn,
        }
    }

    /// Magnitude of each frequency bin for each window of the data.
    /// Outer vec is each window in time. Inner vec is each bin from 0 hz to Nyquist.
    /// # Errors
    /// If the data doesn't fill a single window or the fft rejects its buffers.
    pub fn spectrogram(&self) -> Result<Spectrogram, SpectrogramError> {
        let window_samples = self.window_len.samples();
        if self.data.len() < window_samples {
            return Err(SpectrogramError::TooShort {
                samples: self.data.len(),
                window: window_samples,
            });
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(window_samples);
        let mut spectrum = r2c.make_output_vec();

        let mut frames = Vec::with_capacity(
            (self.data.len() - window_samples) / self.window_step.samples() + 1,
        );
        for window_of_data in self
            .data
            .windows(window_samples)
            .step_by(self.window_step.samples())
        {
            let mut window_of_data = window_of_data.to_owned();
            window_fn::apply_window(&mut window_of_data, self.window_fn);

            r2c.process(&mut window_of_data, &mut spectrum)
                .map_err(|err| SpectrogramError::Fft(err.to_string()))?;
            frames.push(spectrum.iter().map(|v| v.norm()).collect());
        }
        log::trace!("Computed {} frames", frames.len());

        Spectrogram::from_frames(frames)
    }
}

/// Windowing functions. See <https://en.wikipedia.org/wiki/Window_function> for details.
pub mod window_fn {
    pub type WindowFloat = f64;
    pub type WindowFn = fn(usize, usize) -> WindowFloat;
    use std::f64::consts::PI;

    /// Applies the given window function to the input data.
    pub fn apply_window(data: &mut [WindowFloat], window: WindowFn) {
        let data_len = data.len();
        for (i, elem) in data.iter_mut().enumerate() {
            *elem *= window(i, data_len);
        }
    }

    pub const fn rectangular(_n: usize, _samples: usize) -> WindowFloat {
        1.0
    }

    pub fn hann(n: usize, samples: usize) -> WindowFloat {
        const A0: WindowFloat = 0.5;
        A0 * (1.0
            - WindowFloat::cos((2.0 * PI * n as WindowFloat) / (samples as WindowFloat - 1.0)))
    }
}
