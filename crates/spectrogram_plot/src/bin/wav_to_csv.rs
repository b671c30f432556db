//! Computes the magnitude spectrogram of a wav file and writes it in the format `plot_spectrogram` reads.

use anyhow::ensure;
use clap::Parser as _;
use log::info;
use spectrogram::analysis::{window_fn, SpecCompute, WindowLength};
use spectrogram_plot::{
    args::WavToCsvCli,
    file_io::{read_wav, write_spectrogram_csv_file},
};

fn main() -> Result<(), anyhow::Error> {
    // Handle commandline arguments.
    let opt = WavToCsvCli::parse();
    simple_logger::init_with_level(opt.log_opt.log_level)?;
    ensure!(opt.fft_size >= 2, "fft size must be at least 2");

    // Read in wav file.
    let (spec, data) = read_wav(&opt.file_in.in_file)?;

    // Half overlapping hann windows.
    let window_len = WindowLength::from_samples(opt.fft_size);
    let window_step = window_len / 2;
    info!(
        "Window of {:?} stepping by {:?} at {} hz",
        window_len.duration(spec.sample_rate as f32),
        window_step.duration(spec.sample_rate as f32),
        spec.sample_rate
    );

    let spectrogram = SpecCompute::new(data, window_len, window_step, window_fn::hann).spectrogram()?;
    info!(
        "Computed {} frames of {} bins",
        spectrogram.frame_cnt(),
        spectrogram.bin_cnt()
    );

    write_spectrogram_csv_file(&opt.file_out.out_file, &spectrogram)?;
    info!("Saved spectrogram to {}", opt.file_out.out_file.display());
    Ok(())
}
