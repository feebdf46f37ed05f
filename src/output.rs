//! PNG output and sprite file naming

use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::extract::Sprite;

/// Default filename prefix for extracted sprites.
pub const DEFAULT_PREFIX: &str = "icon_";

/// Save an RGBA image to a PNG file.
///
/// Parent directories are created if they don't exist.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// File name for the sprite at `index`: `{prefix}{index}.png`.
///
/// | prefix   | index | file          |
/// |----------|-------|---------------|
/// | `icon_`  | 0     | `icon_0.png`  |
/// | `icon_`  | 12    | `icon_12.png` |
/// | `coin-`  | 3     | `coin-3.png`  |
pub fn sprite_file_name(prefix: &str, index: usize) -> String {
    format!("{}{}.png", prefix, index)
}

/// Destination for extracted sprites.
pub trait SpriteSink {
    /// Persist one sprite. Sprites arrive in index order.
    fn write_sprite(&mut self, sprite: &Sprite) -> Result<()>;
}

/// Writes each sprite as a PNG in one directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Open a sink on `dir`, creating the directory (and parents) if absent.
    pub fn create(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, prefix: prefix.into(), written: Vec::new() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the sprite at `index` is (or will be) written to.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(sprite_file_name(&self.prefix, index))
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SpriteSink for DirectorySink {
    fn write_sprite(&mut self, sprite: &Sprite) -> Result<()> {
        let path = self.path_for(sprite.index);
        save_png(&sprite.image, &path)?;
        debug!(path = %path.display(), width = sprite.image.width(), height = sprite.image.height(), "wrote sprite");
        self.written.push(path);
        Ok(())
    }
}

/// Collects sprites in memory. Useful when the caller wants the images, not files.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub images: Vec<RgbaImage>,
}

impl SpriteSink for MemorySink {
    fn write_sprite(&mut self, sprite: &Sprite) -> Result<()> {
        self.images.push(sprite.image.clone());
        Ok(())
    }
}

/// Write every sprite to `sink` in order. Returns how many were written.
///
/// The first failure aborts the run; sprites already written stay on disk.
pub fn write_all<I, S>(sprites: I, sink: &mut S) -> Result<usize>
where
    I: IntoIterator<Item = Sprite>,
    S: SpriteSink + ?Sized,
{
    let mut count = 0;
    for sprite in sprites {
        sink.write_sprite(&sprite)?;
        count += 1;
    }
    Ok(count)
}
