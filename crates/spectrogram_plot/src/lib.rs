/// Arguments for the binaries.
pub mod args;

/// Defaults and fixed labels.
pub mod constants;

/// Reading and writing spectrogram and wav files.
pub mod file_io;

/// Turning a loaded spectrogram into what gets drawn.
pub mod pipeline;

/// Plotting functionality.
pub mod plotting;
