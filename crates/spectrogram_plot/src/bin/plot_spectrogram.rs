//! Plots a comma separated spectrogram on a logarithmic frequency axis.

use anyhow::Context;
use clap::Parser as _;
use spectrogram_plot::{
    args::PlotCli, file_io::read_spectrogram_csv, pipeline::prepare, plotting::render_to_file,
};

fn main() -> Result<(), anyhow::Error> {
    // Handle commandline arguments.
    let opt = PlotCli::parse();
    simple_logger::init_with_level(opt.log_opt.log_level)?;

    let in_file = &opt.file_in.in_file;
    let spectrogram = read_spectrogram_csv(in_file)
        .with_context(|| format!("Can't load spectrogram from {}", in_file.display()))?;

    let prepared = prepare(&spectrogram, &opt.band)?;

    render_to_file(&opt.file_out.out_file, &prepared, &opt.render)?;
    Ok(())
}
