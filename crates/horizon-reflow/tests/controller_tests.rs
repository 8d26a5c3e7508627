//! Tests for the controller, its update queue and configuration loading.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use horizon_reflow::config::CollectionConfig;
use horizon_reflow::controller::{CollectionController, UpdateRequest};
use horizon_reflow::diff::DiffStrategy;
use horizon_reflow::error::{ConfigError, Error, SourceError};
use horizon_reflow::model::{SequenceModel, Tagged};
use horizon_reflow::palette::Color;
use horizon_reflow::source::{ColorService, ItemSource, TaggedSource};
use horizon_reflow::view::{CollectionView, Easing, SwatchAdapter};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("horizon_reflow=debug"))
        .with_test_writer()
        .try_init();
}

type SwatchController = CollectionController<Color, CollectionView<Color, SwatchAdapter>>;

fn swatch_controller(colors: Vec<Color>) -> SwatchController {
    let model = Arc::new(SequenceModel::new(colors));
    let view = CollectionView::new(model.clone(), SwatchAdapter);
    CollectionController::new(model, view)
}

fn shown(controller: &SwatchController) -> Vec<Option<Color>> {
    controller
        .view()
        .visible_cells()
        .map(|cell| cell.background)
        .collect()
}

#[test]
fn test_swatch_flow() {
    init_tracing();
    let mut colors = ColorService::with_seed(1234);
    let mut controller = swatch_controller(colors.initial());

    let shuffled = colors.shuffled(&controller.current());
    let ops = controller.update(shuffled.clone()).unwrap();
    assert_eq!(ops.moves().len(), 3);

    let grown = colors
        .with_one_replaced_and_one_added(&controller.current())
        .unwrap();
    let ops = controller.update(grown.clone()).unwrap();
    assert_eq!(ops.insertions().len(), 2);
    assert_eq!(ops.removals().len(), 1);

    let shrunk = colors.with_one_removed(&controller.current());
    controller.update(shrunk.clone()).unwrap();

    controller.view_mut().finish_animations();
    assert_eq!(shown(&controller), shrunk.into_iter().map(Some).collect::<Vec<_>>());
}

#[test]
fn test_showcase_update() {
    let mut controller = swatch_controller(vec![Color::RED, Color::GREEN, Color::BLUE]);
    let ops = controller.update(ColorService::showcase()).unwrap();

    // Green jumps ahead of red, orange and yellow are new.
    assert_eq!(ops.insertions().len(), 2);
    assert!(ops.removals().is_empty());
    assert_eq!(ops.moves().len(), 3);

    controller.view_mut().finish_animations();
    assert_eq!(
        shown(&controller),
        ColorService::showcase().into_iter().map(Some).collect::<Vec<_>>()
    );
}

#[test]
fn test_return_to_initial_colors() {
    let colors = ColorService::with_seed(42);
    let initial = colors.initial();
    let mut controller = swatch_controller(initial.clone());
    controller.update(ColorService::showcase()).unwrap();

    let ops = controller.update(colors.initial()).unwrap();
    assert_eq!(ops.insertions().len(), 0);
    assert_eq!(ops.removals().len(), 2);
    controller.view_mut().finish_animations();
    assert_eq!(shown(&controller), initial.into_iter().map(Some).collect::<Vec<_>>());
}

#[test]
fn test_palette_exhaustion_is_reported() {
    let mut colors = ColorService::with_seed(3);
    let mut controller = swatch_controller(colors.initial());
    for _ in 0..2 {
        let next = colors
            .with_one_replaced_and_one_added(&controller.current())
            .unwrap();
        controller.update(next).unwrap();
    }

    // Five of six palette colors are showing.
    let err: Error = colors
        .with_one_replaced_and_one_added(&controller.current())
        .unwrap_err()
        .into();
    assert!(matches!(
        err,
        Error::Source(SourceError::PaletteExhausted { needed: 2, .. })
    ));
}

#[test]
fn test_tagged_source_shuffles_as_moves() {
    let mut source = TaggedSource::new(ColorService::with_seed(77));
    let model = Arc::new(SequenceModel::new(source.initial()));
    let view = CollectionView::new(model.clone(), SwatchAdapter);
    let mut controller = CollectionController::new(model, view);

    for _ in 0..10 {
        let next = source.shuffled(&controller.current());
        let ops = controller.update(next).unwrap();
        assert!(ops.insertions().is_empty());
        assert!(ops.removals().is_empty());
    }
    let ids: Vec<_> = controller.current().iter().map(Tagged::id).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_updates_from_other_threads() {
    init_tracing();
    let mut controller = swatch_controller(vec![Color::RED]);
    let summaries = Arc::new(Mutex::new(Vec::new()));
    let recv = summaries.clone();
    controller
        .updated
        .connect(move |summary| recv.lock().push(summary.after));

    let producers: Vec<_> = (0..4)
        .map(|_| {
            let sender = controller.sender();
            thread::spawn(move || {
                sender
                    .transform(|colors| {
                        let mut colors = colors.to_vec();
                        colors.push(Color::from_rgb8(0, 0, colors.len() as u8));
                        colors
                    })
                    .unwrap();
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(controller.process_pending().unwrap(), 4);
    assert_eq!(controller.current().len(), 5);
    assert_eq!(*summaries.lock(), vec![2, 3, 4, 5]);
}

#[test]
fn test_queue_waits_for_requests() {
    let mut controller = swatch_controller(vec![]);
    let sender = controller.sender();
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        sender
            .send(UpdateRequest::Replace(vec![Color::BLUE, Color::YELLOW]))
            .unwrap();
    });

    assert!(controller
        .process_next_timeout(Duration::from_secs(5))
        .unwrap());
    producer.join().unwrap();
    assert_eq!(controller.view().len(), 2);
}

#[test]
fn test_reload_data_request() {
    let mut controller = swatch_controller(vec![Color::RED]);
    controller.model().replace(vec![Color::GREEN, Color::BLUE]);
    controller.sender().reload_data().unwrap();
    controller.process_pending().unwrap();
    assert_eq!(shown(&controller), vec![Some(Color::GREEN), Some(Color::BLUE)]);
}

#[test]
fn test_config_file_drives_controller_and_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reflow.toml");
    std::fs::write(
        &path,
        r#"
strategy = "count"
skip_stationary_moves = true

[layout]
width = 400.0
cell_height = 50.0

[animation]
duration_ms = 0
easing = "linear"
"#,
    )
    .unwrap();

    let config = CollectionConfig::load(&path).unwrap();
    assert_eq!(config.animation.easing, Easing::Linear);

    let model = Arc::new(SequenceModel::new(vec![Color::RED, Color::GREEN]));
    let view = CollectionView::new(model.clone(), SwatchAdapter).with_config(&config);
    let mut controller = CollectionController::new(model, view).with_config(&config);
    assert_eq!(controller.strategy(), DiffStrategy::Count);

    let ops = controller.update(vec![Color::GREEN, Color::RED]).unwrap();
    assert_eq!(ops.reloads().len(), 2);
    assert!(ops.moves().is_empty());
    assert!(!controller.view().is_animating());
    assert_eq!(
        controller.view().cell_at(1).map(|cell| cell.frame().y),
        Some(50.0)
    );
    assert_eq!(shown(&controller), vec![Some(Color::GREEN), Some(Color::RED)]);
}

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = CollectionConfig::default();
    config.strategy = DiffStrategy::Count;
    config.animation.duration_ms = 120;
    config.save(&path).unwrap();

    assert_eq!(CollectionConfig::load(&path).unwrap(), config);
}

#[test]
fn test_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "strategy = 3").unwrap();
    assert!(matches!(
        CollectionConfig::load(&path),
        Err(ConfigError::Parse(_))
    ));

    let missing = dir.path().join("missing.toml");
    let err: Error = CollectionConfig::load(&missing).unwrap_err().into();
    assert!(err.to_string().contains("missing.toml"));
}
