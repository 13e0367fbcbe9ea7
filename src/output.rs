use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};
use image::{ExtendedColorType, ImageEncoder, RgbaImage, codecs::png::PngEncoder};
use tracing::{debug, info, instrument, warn};

#[instrument]
pub fn ensure_directory(dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
    debug!(dir = %dir.display(), "output directory ready");
    Ok(())
}

/// Writes `image` to `path` as an RGBA PNG.
///
/// The bytes go to a staging file beside `path` which is renamed over the
/// target only once it has been fully written and synced, so a failed run
/// never leaves a truncated file at `path`.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), Error> {
    let staging = staging_path(path);

    let written = encode_to_file(image, &staging).and_then(|()| {
        fs::rename(&staging, path).with_context(|| {
            format!("Failed to move the encoded PNG into '{}'", path.display())
        })
    });

    if let Err(error) = written {
        if let Err(cleanup) = fs::remove_file(&staging)
            && staging.exists()
        {
            warn!(staging = %staging.display(), %cleanup, "could not remove staging file");
        }
        return Err(error);
    }

    info!(path = %path.display(), "wrote icon");
    Ok(())
}

fn encode_to_file(image: &RgbaImage, path: &Path) -> Result<(), Error> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    PngEncoder::new(&mut writer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| Error::msg(format!("Failed to encode PNG '{}': {}", path.display(), e)))?;

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| Error::msg(format!("Failed to flush '{}': {}", path.display(), e.error())))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync '{}'", path.display()))?;
    debug!(path = %path.display(), "encoded staging file");

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use std::process;

    use image::Rgba;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("crab-icon-output-{}-{}", process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sample() -> RgbaImage {
        let mut image = RgbaImage::new(4, 4);
        image.put_pixel(1, 2, Rgba([233, 69, 96, 255]));
        image
    }

    #[test]
    fn staging_file_sits_next_to_target() {
        assert_eq!(
            staging_path(Path::new("icons/icon.png")),
            PathBuf::from("icons/.icon.png.partial")
        );
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let dir = scratch_dir("idempotent").join("nested");

        ensure_directory(&dir).unwrap();
        ensure_directory(&dir).unwrap();

        assert!(dir.is_dir());
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn ensure_directory_fails_over_a_file() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("icons");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = ensure_directory(&blocker).unwrap_err();

        assert!(err.to_string().contains("icons"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn write_png_round_trips_pixels() {
        let dir = scratch_dir("roundtrip");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("icon.png");

        write_png(&sample(), &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8(), sample());
        assert!(!staging_path(&path).exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn write_png_replaces_existing_file() {
        let dir = scratch_dir("replace");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("icon.png");
        fs::write(&path, b"stale bytes").unwrap();

        write_png(&sample(), &path).unwrap();

        assert_eq!(image::open(&path).unwrap().to_rgba8(), sample());
        fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn write_png_replaces_read_only_file() {
        let dir = scratch_dir("readonly");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("icon.png");
        fs::write(&path, b"stale bytes").unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        write_png(&sample(), &path).unwrap();

        assert_eq!(image::open(&path).unwrap().to_rgba8(), sample());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let dir = scratch_dir("occupied");
        // a directory where the PNG should go makes the final rename fail
        let path = dir.join("icon.png");
        fs::create_dir_all(path.join("child")).unwrap();

        let err = write_png(&sample(), &path).unwrap_err();

        assert!(err.to_string().contains("icon.png"));
        assert!(!staging_path(&path).exists());
        assert!(path.join("child").is_dir());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = scratch_dir("absent");
        let path = dir.join("icon.png");

        assert!(write_png(&sample(), &path).is_err());
        assert!(!path.exists());
    }
}
