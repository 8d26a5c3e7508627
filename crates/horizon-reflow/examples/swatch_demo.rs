//! Headless swatch demo.
//!
//! Runs the shuffle, replace-and-add and remove flow against an in-memory
//! collection view and prints every frame of the resulting animations.
//!
//! Run with: cargo run -p horizon-reflow --example swatch_demo [config.toml]
//!
//! Set `RUST_LOG=horizon_reflow=debug` to see the operation sets.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use horizon_reflow::prelude::*;

const FRAME: Duration = Duration::from_millis(60);

type SwatchView = CollectionView<Color, SwatchAdapter>;

fn print_frame(view: &SwatchView) {
    let cells: Vec<String> = view
        .visible_cells()
        .chain(view.retiring_cells())
        .map(|cell| {
            format!(
                "{}@{:.0}({:.2})",
                cell.label,
                cell.frame().y,
                cell.opacity()
            )
        })
        .collect();
    println!("  {}", cells.join("  "));
}

fn run(
    controller: &mut CollectionController<Color, SwatchView>,
    title: &str,
    next: Vec<Color>,
) -> horizon_reflow::Result<()> {
    println!("{title}: {next:?}");
    let operations = controller.update(next)?;
    println!("  {operations}");

    print_frame(controller.view());
    while controller.view_mut().advance(FRAME) {
        print_frame(controller.view());
    }
    Ok(())
}

fn main() -> horizon_reflow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CollectionConfig::load(path)?,
        None => CollectionConfig::default(),
    };

    let mut colors = ColorService::with_seed(7);
    let model = Arc::new(SequenceModel::new(colors.initial()));
    let view = CollectionView::new(model.clone(), SwatchAdapter).with_config(&config);
    let mut controller = CollectionController::new(model, view).with_config(&config);

    println!("initial: {:?}", controller.current());
    print_frame(controller.view());

    let shuffled = colors.shuffled(&controller.current());
    run(&mut controller, "shuffle", shuffled)?;

    let grown = colors.with_one_replaced_and_one_added(&controller.current())?;
    run(&mut controller, "replace and add", grown)?;

    let shrunk = colors.with_one_removed(&controller.current());
    run(&mut controller, "remove", shrunk)?;

    run(&mut controller, "showcase", ColorService::showcase())?;

    match colors.with_one_replaced_and_one_added(&controller.current()) {
        Ok(next) => run(&mut controller, "replace and add", next)?,
        Err(err) => println!("replace and add skipped: {err}"),
    }

    run(&mut controller, "initial", colors.initial())?;
    Ok(())
}
