//! Saving rendered drawings to disk

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::config::AirCanvasConfig;
use crate::render::image::encode_png;

/// File name for a download, e.g. `air-canvas-1718000000000.png`
pub fn default_file_name() -> String {
    format!("air-canvas-{}.png", chrono::Utc::now().timestamp_millis())
}

/// Full download path in the configured folder
pub fn default_export_path(config: &AirCanvasConfig) -> Option<PathBuf> {
    let mut path = config.export_dir()?;
    path.push(default_file_name());
    Some(path)
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// so readers never see a partial file
pub fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut file = tempfile::Builder::new()
        .prefix(".aircanvas-")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(bytes)?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Encode `img` as PNG and write it to `path`
pub fn save_png(img: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    let png = encode_png(img)?;
    write_atomic(path, &png)?;
    log::info!(
        "Saved {}x{} drawing to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name_shape() {
        let name = default_file_name();
        assert!(name.starts_with("air-canvas-"));
        assert!(name.ends_with(".png"));
        let millis = &name["air-canvas-".len()..name.len() - ".png".len()];
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn test_default_export_path_uses_configured_dir() {
        let config = AirCanvasConfig {
            export_dir: Some(PathBuf::from("/srv/out")),
            ..Default::default()
        };
        let path = default_export_path(&config).unwrap();
        assert_eq!(path.parent(), Some(Path::new("/srv/out")));
    }

    #[test]
    fn test_save_png_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.png");
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        save_png(&img, &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_save_png_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"stale").unwrap();
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([9, 8, 7, 255]));
        save_png(&img, &path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgba8(), img);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        // No temporary files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
