use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use soundboard_dsp::{AnalyserConfig, ByteFrequencyAnalyser};
use soundboard_viz::{RenderConfig, RendererState, SamplingSource};

pub mod common;
use common::*;

const FFT_SIZE: usize = 64;

fn tone(bin: usize, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| 0.5 * (2.0 * PI * bin as f32 * i as f32 / FFT_SIZE as f32).sin())
        .collect()
}

#[test]
fn test_played_tone_lifts_its_bar() {
    let analyser = Rc::new(RefCell::new(
        ByteFrequencyAnalyser::new(AnalyserConfig::default()).unwrap(),
    ));
    let mut renderer = renderer(RenderConfig::default(), 400, 100);
    let (surface, log) = RecordingSurface::new();
    renderer
        .attach(Some(Rc::clone(&analyser)), Some(surface))
        .unwrap();
    assert_eq!(renderer.bins().len(), 32);

    // Audio keeps flowing between display frames.
    let samples = tone(8, FFT_SIZE);
    for _ in 0..30 {
        analyser.borrow_mut().push_samples(&samples);
        step(&mut renderer);
    }

    let bins = renderer.bins();
    assert_eq!(bins[8].current_height, 100.0);
    assert_eq!(bins[20].current_height, 0.0);
    assert_eq!(bins[20].peak_height, 0.0);
    assert!(log.borrow().gradients.len() > 0);
}

#[test]
fn test_silence_after_tone_settles() {
    let analyser = Rc::new(RefCell::new(
        ByteFrequencyAnalyser::new(AnalyserConfig::default()).unwrap(),
    ));
    let mut renderer = renderer(RenderConfig::default(), 400, 100);
    let (surface, _log) = RecordingSurface::new();
    renderer
        .attach(Some(Rc::clone(&analyser)), Some(surface))
        .unwrap();

    analyser.borrow_mut().push_samples(&tone(4, FFT_SIZE));
    run(&mut renderer, 10);
    assert!(renderer.bins()[4].peak_height > 0.0);

    analyser.borrow_mut().reset();
    run(&mut renderer, 400);
    assert!(renderer
        .bins()
        .iter()
        .all(|b| b.current_height == 0.0 && b.peak_height == 0.0));
}

#[test]
fn test_owned_analyser_fed_through_renderer() {
    let analyser = ByteFrequencyAnalyser::new(AnalyserConfig::default()).unwrap();
    let mut renderer = renderer(RenderConfig::default(), 400, 100);
    let (surface, _log) = RecordingSurface::new();
    renderer.attach(Some(analyser), Some(surface)).unwrap();

    for _ in 0..30 {
        if let Some(source) = renderer.source_mut() {
            source.push_samples(&tone(12, FFT_SIZE));
        }
        step(&mut renderer);
    }
    assert_eq!(renderer.bins()[12].current_height, 100.0);
    assert_eq!(renderer.source().map(|s| s.bin_count()), Some(32));
}

#[test]
fn test_dropped_analyser_detaches_renderer() {
    let owner = Rc::new(RefCell::new(
        ByteFrequencyAnalyser::new(AnalyserConfig::default()).unwrap(),
    ));
    let mut renderer = renderer(RenderConfig::default(), 400, 100);
    let (surface, log) = RecordingSurface::new();
    renderer
        .attach(Some(Rc::downgrade(&owner)), Some(surface))
        .unwrap();
    run(&mut renderer, 3);
    assert_eq!(renderer.frames_painted(), 3);

    drop(owner);
    log.borrow_mut().clear();
    run(&mut renderer, 5);

    assert_eq!(renderer.state(), RendererState::Detached);
    assert_eq!(log.borrow().paint_calls(), 0);
}

#[test]
fn test_busy_analyser_skips_frame_and_resumes() {
    let analyser = Rc::new(RefCell::new(
        ByteFrequencyAnalyser::new(AnalyserConfig::default()).unwrap(),
    ));
    let mut renderer = renderer(RenderConfig::default(), 400, 100);
    let (surface, log) = RecordingSurface::new();
    renderer
        .attach(Some(Rc::clone(&analyser)), Some(surface))
        .unwrap();
    step(&mut renderer);
    assert_eq!(renderer.frames_painted(), 1);

    let held = analyser.borrow_mut();
    log.borrow_mut().clear();
    run(&mut renderer, 3);
    assert_eq!(renderer.state(), RendererState::Attached);
    assert_eq!(renderer.frames_painted(), 1);
    assert_eq!(log.borrow().paint_calls(), 0);
    assert_eq!(renderer.scheduler().pending().len(), 1);
    drop(held);

    analyser.borrow_mut().push_samples(&tone(8, FFT_SIZE));
    step(&mut renderer);
    assert_eq!(renderer.frames_painted(), 2);
    assert_eq!(renderer.bins().len(), 32);
    assert!(renderer.bins()[8].current_height > 0.0);
}
