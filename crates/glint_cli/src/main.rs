use anyhow::{Context, Result};
use glint_core::demo::demo_scene;
use glint_renderer::{ImageBuffer, JobStatus, LocalQueue, Scheduler, Settings, World};
use std::path::PathBuf;
use std::time::Instant;

/// Command line arguments: `glint [settings.json] [output.png]`
struct Args {
    settings: Option<PathBuf>,
    output: PathBuf,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut settings = None;
        let mut output = None;

        for arg in std::env::args().skip(1) {
            if arg == "-h" || arg == "--help" {
                println!("Usage: glint [settings.json] [output.png]");
                std::process::exit(0);
            }
            let path = PathBuf::from(&arg);
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json && settings.is_none() {
                settings = Some(path);
            } else if output.is_none() {
                output = Some(path);
            } else {
                anyhow::bail!("Unexpected argument: {}", arg);
            }
        }

        Ok(Self {
            settings,
            output: output.unwrap_or_else(|| PathBuf::from("render.png")),
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Glint");

    let args = Args::parse()?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    log::info!("{:?}", settings);

    let scene = demo_scene();
    let world = World::from_scene(&scene);

    let scheduler = Scheduler::new();
    let mut queue = LocalQueue::new();
    let mut image = ImageBuffer::new(settings.width, settings.height);

    let start = Instant::now();
    scheduler.render(&mut image, &settings, &mut queue);

    // Report roughly every tenth of the frame
    let mut last_reported = 0;
    while let Some(status) = queue.pump(&world, &mut image) {
        if let JobStatus::Pending { completed, total } = status {
            let percent = completed * 100 / total;
            if percent >= last_reported + 10 {
                log::info!("Rendering: {}% ({}/{} chunks)", percent, completed, total);
                last_reported = percent;
            }
        }
    }
    log::info!("Rendered in {:.2?}", start.elapsed());

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
