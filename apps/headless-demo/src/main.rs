//! Drives a browser engine through a scripted session without a window.
//!
//! Images are "decoded" on worker threads and arrive out of order; the
//! engine applies them on the main loop. Run with `RUST_LOG=debug` to see
//! rotations and snap decisions.

use media_pager::prelude::*;
use std::rc::Rc;
use std::thread;
use std::time::Duration as StdDuration;

const ITEM_COUNT: usize = 7;
const FRAME: StdDuration = StdDuration::from_millis(16);

/// Stand-in for a decoded image.
#[derive(Debug)]
struct Thumbnail {
    index: usize,
    bytes: usize,
}

/// Loads thumbnails on short-lived worker threads.
struct ThreadedLoader {
    count: usize,
}

impl MediaSource for ThreadedLoader {
    type Image = Thumbnail;

    fn item_count(&self) -> usize {
        self.count
    }

    fn request_image(&self, index: usize, completion: ContentCompletion<Thumbnail>) {
        thread::spawn(move || {
            // Later indices decode faster so deliveries race the gesture.
            let delay = 120u64.saturating_sub(index as u64 * 15);
            thread::sleep(StdDuration::from_millis(delay));
            let thumbnail = Thumbnail {
                index,
                bytes: 4096 + index * 512,
            };
            completion.complete(index, Some(thumbnail));
        });
    }
}

struct FocusPrinter;

impl FocusObserver for FocusPrinter {
    fn focus_changed(&self, index: usize) {
        println!("focus -> item {index}");
    }
}

enum Step {
    Swipe { pixels: f32, velocity: f32 },
    Next,
    Previous,
    Style(BrowserStyle),
    Reload,
}

fn run_frames(engine: &mut BrowserEngine<ThreadedLoader>) {
    loop {
        let animating = engine.on_frame(Instant::now());
        thread::sleep(FRAME);
        if !animating {
            break;
        }
    }
}

fn swipe(engine: &mut BrowserEngine<ThreadedLoader>, pixels: f32, velocity: f32) {
    const MOVES: i64 = 8;
    engine.handle_drag(DragSample::began(Point::ZERO, 0));
    for step in 1..=MOVES {
        let translation = Point::new(pixels * step as f32 / MOVES as f32, 0.0);
        engine.handle_drag(DragSample::changed(translation, step * 16));
        engine.on_frame(Instant::now());
    }
    let end = Point::new(pixels, 0.0);
    let response = engine.handle_drag(
        DragSample::ended(end, (MOVES + 1) * 16).with_velocity(Point::new(velocity, 0.0)),
    );
    log::info!("swipe {pixels}px at {velocity}px/s -> {response:?}");
}

fn report(engine: &BrowserEngine<ThreadedLoader>) {
    let loaded: Vec<String> = engine
        .slots()
        .iter()
        .map(|slot| match slot.content() {
            Some(thumbnail) => format!("#{}({}b)", thumbnail.index, thumbnail.bytes),
            None => "-".to_string(),
        })
        .collect();
    println!(
        "focused {} of {} | slots {:?} | loaded [{}]",
        engine.focused_index(),
        engine.item_count(),
        engine.slots().map(|slot| slot.index()),
        loaded.join(", ")
    );
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    let config = BrowserConfig::new().with_snap_duration(Duration::from_millis(220));
    let mut engine = BrowserEngine::new(
        ThreadedLoader { count: ITEM_COUNT },
        config,
        Size::new(1080.0, 1920.0),
    )?;
    let printer = Rc::new(FocusPrinter);
    engine.set_focus_observer(&printer);

    let script = [
        Step::Swipe {
            pixels: -700.0,
            velocity: -900.0,
        },
        Step::Swipe {
            pixels: -200.0,
            velocity: -1500.0,
        },
        Step::Swipe {
            pixels: 80.0,
            velocity: 0.0,
        },
        Step::Previous,
        Step::Previous,
        Step::Previous,
        Step::Style(BrowserStyle::Linear),
        Step::Next,
        Step::Reload,
        Step::Previous,
    ];

    run_frames(&mut engine);
    report(&engine);
    for step in script {
        match step {
            Step::Swipe { pixels, velocity } => swipe(&mut engine, pixels, velocity),
            Step::Next => {
                let moved = engine.show_next()?;
                log::info!("show next: {moved}");
            }
            Step::Previous => {
                let moved = engine.show_previous()?;
                log::info!("show previous: {moved}");
            }
            Step::Style(style) => {
                let config = engine.config().clone().with_style(style);
                engine.set_config(config)?;
                log::info!("style now {style:?}");
            }
            Step::Reload => engine.reload(),
        }
        run_frames(&mut engine);
        report(&engine);
    }

    // Let stragglers land before the last report.
    thread::sleep(StdDuration::from_millis(150));
    engine.pump_content();
    report(&engine);
    Ok(())
}
