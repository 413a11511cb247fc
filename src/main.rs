mod cli;

use std::path::{Path, PathBuf};

use aircanvas::capture::{FrameSource, ReplaySource, frame_channel};
use aircanvas::config::{AirCanvasConfig, StrokeColor};
use aircanvas::export;
use aircanvas::gallery::Gallery;
use aircanvas::gesture;
use aircanvas::session::Session;
use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigAction, GalleryAction, ToolArg};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config {
        Some(path) => AirCanvasConfig::load(path),
        None => AirCanvasConfig::load_default(),
    };

    match cli.command {
        Commands::Replay {
            file,
            output,
            save_to_gallery,
            width,
            height,
            tool,
            color,
            brush_width,
        } => {
            let overrides = ReplayOverrides {
                width,
                height,
                tool,
                color,
                brush_width,
            };
            run_replay(&file, output, save_to_gallery, overrides, config)
        }
        Commands::Classify { file } => run_classify(&file),
        Commands::Gallery { action } => run_gallery(action, &config),
        Commands::Config { action } => run_config(action, cli.config, &config),
    }
}

struct ReplayOverrides {
    width: Option<u32>,
    height: Option<u32>,
    tool: Option<ToolArg>,
    color: Option<String>,
    brush_width: Option<u32>,
}

fn run_replay(
    file: &Path,
    output: Option<PathBuf>,
    save_to_gallery: bool,
    overrides: ReplayOverrides,
    mut config: AirCanvasConfig,
) -> anyhow::Result<()> {
    if let Some(width) = overrides.width {
        config.canvas_width = width;
    }
    if let Some(height) = overrides.height {
        config.canvas_height = height;
    }

    let mut session = Session::new(&config)?;
    if let Some(tool) = overrides.tool {
        session.set_tool(tool.into());
    }
    if let Some(hex) = overrides.color {
        let color = StrokeColor::from_hex(&hex)
            .with_context(|| format!("Invalid color: {hex}"))?;
        if !session.set_color(color) {
            bail!("Color {} is not in the palette", color.to_hex());
        }
    }
    if let Some(width) = overrides.brush_width {
        session.set_brush_width(width);
    }

    // The tracker side runs on its own thread, as a live camera would
    let mut source = ReplaySource::open(file)?;
    let (tx, mut rx) = frame_channel();
    let tracker = std::thread::spawn(move || {
        loop {
            match source.next_frame() {
                Ok(Some(frame)) => {
                    if !tx.send(frame) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tx.fail(err);
                    break;
                }
            }
        }
    });

    let mut actions = 0;
    let result = session.run(&mut rx, |frame, outcome| {
        log::debug!(
            "{}ms: {} ({:.2})",
            frame.timestamp_ms,
            outcome.result.gesture,
            outcome.result.confidence
        );
        if let Some(action) = outcome.action {
            log::info!("{}: {:?}", outcome.result.gesture.description(), action);
            actions += 1;
        }
    });
    drop(rx);
    if tracker.join().is_err() {
        log::error!("Replay thread panicked");
    }

    let path = match output {
        Some(path) => path,
        None => export::default_export_path(&config)
            .context("Could not determine the download folder")?,
    };
    // Strokes drawn before a tracking failure are still written out
    export::save_png(&session.export_raster(), &path)?;
    let frames = match result {
        Ok(frames) => frames,
        Err(err) => {
            log::warn!("Replay stopped early, partial drawing saved to {}", path.display());
            return Err(err);
        }
    };
    println!(
        "{} frames, {} actions, {} strokes -> {}",
        frames,
        actions,
        session.engine().strokes().len(),
        path.display()
    );

    if save_to_gallery {
        let mut gallery = open_gallery(&config)?;
        let entry = gallery.save(&session.export_png()?)?;
        println!("Saved to gallery as {}", entry.id);
    }
    Ok(())
}

fn run_classify(file: &Path) -> anyhow::Result<()> {
    let mut source = ReplaySource::open(file)?;
    while let Some(frame) = source.next_frame()? {
        let result = gesture::classify(&frame.landmarks);
        match result.position {
            Some(p) => println!(
                "{:>8} {:<10} {:.2} ({:.3}, {:.3})",
                frame.timestamp_ms, result.gesture, result.confidence, p.x, p.y
            ),
            None => println!(
                "{:>8} {:<10} {:.2}",
                frame.timestamp_ms, result.gesture, result.confidence
            ),
        }
    }
    Ok(())
}

fn open_gallery(config: &AirCanvasConfig) -> anyhow::Result<Gallery> {
    let dir = config
        .gallery_dir()
        .context("Could not determine the gallery directory")?;
    Gallery::open(&dir)
}

fn run_gallery(action: GalleryAction, config: &AirCanvasConfig) -> anyhow::Result<()> {
    let mut gallery = open_gallery(config)?;
    match action {
        GalleryAction::List => {
            if gallery.list().is_empty() {
                println!("Gallery is empty ({})", gallery.dir().display());
            }
            for entry in gallery.list() {
                println!("{:<16} {}", entry.id, entry.display_time());
            }
        }
        GalleryAction::Delete { id } => {
            if !gallery.delete(&id)? {
                bail!("No image with id {id} in gallery");
            }
            println!("Deleted {id}");
        }
        GalleryAction::Export { id, output } => {
            let image = gallery.get(&id)?;
            let path = match output {
                Some(path) => path,
                None => export::default_export_path(config)
                    .context("Could not determine the download folder")?,
            };
            export::write_atomic(&path, &image.pixel_data)?;
            println!("Exported {} -> {}", image.id, path.display());
        }
    }
    Ok(())
}

fn run_config(
    action: ConfigAction,
    path: Option<PathBuf>,
    config: &AirCanvasConfig,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::Init { force } => {
            let path = path
                .or_else(AirCanvasConfig::default_path)
                .context("Could not determine the config directory")?;
            if path.exists() && !force {
                bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            config.write(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
