use hound::{SampleFormat, WavSpec, WavWriter};
use spectrogram::{
    analysis::{window_fn, SpecCompute, WindowLength},
    Spectrogram,
};
use spectrogram_plot::{
    args::{BandOpt, RenderOpt},
    file_io::{read_spectrogram_csv, read_wav, write_spectrogram_csv_file, LoadError},
    pipeline::prepare,
    plotting::{cells, render_to_file},
};
use plotters::drawing::DrawingAreaErrorKind;
use plotters_backend::DrawingErrorKind;
use std::{fs, path::PathBuf};

/// Unique path in the temp dir for this test.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("spectrogram_plot_{}_{name}", std::process::id()))
}

#[test]
fn csv_file_to_prepared_band() {
    let path = temp_path("band.csv");
    let row = (0..512)
        .map(|b| {
            if b == 0 {
                format!("{}", std::f64::consts::E - 1.0)
            } else {
                "0".to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    fs::write(&path, format!("{row}\n{row}\n{row}\n")).unwrap();

    let spectrogram = read_spectrogram_csv(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(spectrogram.frame_cnt(), 3);
    assert_eq!(spectrogram.bin_cnt(), 512);

    let prepared = prepare(&spectrogram, &BandOpt::default()).unwrap();
    assert_eq!(prepared.band.spectrogram.bin_cnt(), 21);
    assert_eq!(prepared.band.axis.len(), 21);
    let corner = prepared.band.spectrogram.get(0, 0).unwrap();
    assert!((corner - 1.0).abs() <= f64::EPSILON, "{corner}");
    assert_eq!(cells(&prepared).count(), 3 * 21);
}

#[test]
fn ragged_csv_file_fails() {
    let path = temp_path("ragged.csv");
    fs::write(&path, "1,2,3\n1,2\n1,2,3\n").unwrap();
    let result = read_spectrogram_csv(&path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(LoadError::RaggedRow { line: 2, .. })));
}

#[test]
fn wav_to_csv_to_band() {
    let sample_rate = 48000;
    let wav_path = temp_path("tone.wav");
    let csv_path = temp_path("tone.csv");

    // 468.75 hz is exactly bin 10 of a 1024 sample window at 48 khz.
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&wav_path, spec).unwrap();
    for n in 0..sample_rate {
        let t = n as f32 / sample_rate as f32;
        writer
            .write_sample((2.0 * std::f32::consts::PI * 468.75 * t).sin())
            .unwrap();
    }
    writer.finalize().unwrap();

    let (read_spec, data) = read_wav(&wav_path).unwrap();
    fs::remove_file(&wav_path).unwrap();
    assert_eq!(read_spec.sample_rate, sample_rate);
    assert_eq!(data.len(), sample_rate as usize);

    let window_len = WindowLength::from_samples(1024);
    let spectrogram = SpecCompute::new(data, window_len, window_len / 2, window_fn::hann)
        .spectrogram()
        .unwrap();
    assert_eq!(spectrogram.bin_cnt(), 513);

    write_spectrogram_csv_file(&csv_path, &spectrogram).unwrap();
    let read_back: Spectrogram = read_spectrogram_csv(&csv_path).unwrap();
    fs::remove_file(&csv_path).unwrap();
    assert_eq!(read_back, spectrogram);

    // 1000 / 24000 * 513 = 21.375
    let prepared = prepare(&read_back, &BandOpt::default()).unwrap();
    assert_eq!(prepared.band.cutoff, 21);
    for frame in prepared.band.spectrogram.frames() {
        let loudest = frame
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(loudest, 10);
    }
}

#[test]
fn renders_svg() {
    let spectrogram =
        Spectrogram::from_frames((0..50).map(|t| vec![t as f64; 512]).collect()).unwrap();
    let prepared = prepare(&spectrogram, &BandOpt::default()).unwrap();
    let path = temp_path("render.svg");
    let rendered = render_to_file(
        &path,
        &prepared,
        &RenderOpt {
            width: 800,
            height: 400,
            ..RenderOpt::default()
        },
    );
    if let Err(err) = &rendered {
        // Text layout needs a system sans-serif font.
        if let Some(DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(font_err))) =
            err.downcast_ref::<DrawingAreaErrorKind<std::io::Error>>()
        {
            eprintln!("Skipping render check without fonts: {font_err}");
            let _ = fs::remove_file(&path);
            return;
        }
    }
    rendered.unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert!(svg.contains("Log Amplitude"));
    assert!(svg.contains("Frequency (Hz)"));
    assert!(svg.contains("Time Frames"));
    assert!(svg.matches(">1,000<").count() <= 1);
}
