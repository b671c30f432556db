use crate::args::BandOpt;
use log::{debug, info};
use spectrogram::{
    axis::{select_band, Band},
    log_scale::LogRemap,
    Spectrogram, SpectrogramError,
};

/// A spectrogram ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    /// Log amplitude values below the cutoff frequency.
    pub band: Band,
    /// Geometric frequency grid over the band. Its ends are the vertical extent of the plot.
    pub remap: LogRemap,
    /// Smallest and largest finite value in the band, used for the colormap.
    pub value_range: (f64, f64),
}

/// Log amplitude, band selection and log frequency grid, in that order.
pub fn prepare(spectrogram: &Spectrogram, band_opt: &BandOpt) -> Result<Prepared, SpectrogramError> {
    info!(
        "Spectrogram has {} frames of {} bins",
        spectrogram.frame_cnt(),
        spectrogram.bin_cnt()
    );
    let log_spectrogram = spectrogram.log_amplitude();

    let band = select_band(
        &log_spectrogram,
        band_opt.sample_rate,
        band_opt.max_frequency,
    )?;
    info!(
        "Keeping {} bins up to {} hz",
        band.cutoff, band_opt.max_frequency
    );

    let remap = LogRemap::new(&band.axis, band_opt.max_frequency)?;
    debug!("Log frequency grid: {:?}", remap.grid());
    debug!("Linear bins on log grid: {:?}", remap.positions());

    let value_range = finite_range(&band.spectrogram);
    info!("Max of plot is {}", value_range.1);
    info!("Min of plot is {}", value_range.0);

    Ok(Prepared {
        band,
        remap,
        value_range,
    })
}

/// Range of the finite values. Falls back to `0..1` when there are none.
fn finite_range(spectrogram: &Spectrogram) -> (f64, f64) {
    spectrogram
        .map(|x| if x.is_finite() { x } else { f64::NAN })
        .min_max()
        .unwrap_or((0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Used to init logging only once among multiple tests.
    static INIT_LOGGING: std::sync::Once = std::sync::Once::new();

    fn init_logging() {
        INIT_LOGGING.call_once(|| {
            simple_logger::init_with_env().unwrap();
        });
    }

    #[test]
    fn prepares_512_bins() {
        init_logging();
        let frames = (0..5)
            .map(|t| (0..512).map(|b| (t * b) as f64).collect())
            .collect();
        let spectrogram = Spectrogram::from_frames(frames).unwrap();
        let prepared = prepare(&spectrogram, &BandOpt::default()).unwrap();

        assert_eq!(prepared.band.cutoff, 21);
        assert_eq!(prepared.band.spectrogram.frame_cnt(), 5);
        assert_eq!(prepared.band.spectrogram.bin_cnt(), 21);
        assert_eq!(prepared.remap.grid().len(), 21);
        assert_eq!(prepared.remap.extent().1, 1000.0);
        assert_eq!(prepared.value_range.0, 0.0);
        assert_eq!(prepared.value_range.1, (4.0f64 * 20.0).ln_1p());
    }

    #[test]
    fn infinite_values_are_left_out_of_range() {
        init_logging();
        let spectrogram =
            Spectrogram::from_frames(vec![vec![f64::INFINITY, 1.0, -2.0, 0.0]; 2]).unwrap();
        let prepared = prepare(
            &spectrogram,
            &BandOpt {
                sample_rate: 8.0,
                max_frequency: 4.0,
            },
        )
        .unwrap();
        assert_eq!(prepared.band.cutoff, 4);
        assert_eq!(prepared.value_range, (0.0, 1f64.ln_1p()));
    }

    #[test]
    fn infinite_max_frequency_fails() {
        init_logging();
        let spectrogram = Spectrogram::from_frames(vec![vec![0.0; 512]]).unwrap();
        let band_opt = BandOpt {
            max_frequency: f64::INFINITY,
            ..BandOpt::default()
        };
        assert!(matches!(
            prepare(&spectrogram, &band_opt),
            Err(SpectrogramError::InvalidLogRange { .. })
        ));
    }

    #[test]
    fn narrow_band_fails() {
        let spectrogram = Spectrogram::from_frames(vec![vec![0.0; 30]]).unwrap();
        assert_eq!(
            prepare(&spectrogram, &BandOpt::default()).unwrap_err(),
            SpectrogramError::DegenerateBand { retained: 1 }
        );
    }
}
