//! Path-based load and save.
//!
//! A load reads the whole file and decodes it before returning, so a failed
//! load never disturbs an image the caller already holds. A failed save may
//! leave a partially written file behind.

use std::fs;
use std::path::Path;

use enough::Unstoppable;
use log::debug;

use crate::decode::DecodeRequest;
use crate::error::BmpError;
use crate::image::{Image, Image8, Image24};

fn read(path: &Path) -> Result<Vec<u8>, BmpError> {
    let data = fs::read(path)?;
    debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), BmpError> {
    fs::write(path, bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Load an 8-bit grayscale BMP.
pub fn load_image8(path: impl AsRef<Path>) -> Result<Image8, BmpError> {
    let data = read(path.as_ref())?;
    DecodeRequest::new(&data).decode8(Unstoppable)
}

/// Load a 24-bit color BMP.
pub fn load_image24(path: impl AsRef<Path>) -> Result<Image24, BmpError> {
    let data = read(path.as_ref())?;
    DecodeRequest::new(&data).decode24(Unstoppable)
}

/// Load an 8-bit or 24-bit BMP, chosen by the header.
pub fn load_image(path: impl AsRef<Path>) -> Result<Image, BmpError> {
    let data = read(path.as_ref())?;
    DecodeRequest::new(&data).decode(Unstoppable)
}

pub fn save_image8(path: impl AsRef<Path>, image: &Image8) -> Result<(), BmpError> {
    write(path.as_ref(), &image.encode(Unstoppable)?)
}

pub fn save_image24(path: impl AsRef<Path>, image: &Image24) -> Result<(), BmpError> {
    write(path.as_ref(), &image.encode(Unstoppable)?)
}

pub fn save_image(path: impl AsRef<Path>, image: &Image) -> Result<(), BmpError> {
    write(path.as_ref(), &image.encode(Unstoppable)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("bmplab-{}-{name}", std::process::id()))
    }

    #[test]
    fn save_then_load_gray() {
        let path = temp_path("gray.bmp");
        let mut img = Image8::new(7, 3, 0).unwrap();
        img.set(2, 6, 99);
        save_image8(&path, &img).unwrap();
        let loaded = load_image8(&path).unwrap();
        assert_eq!(loaded.pixels(), img.pixels());
        assert!(matches!(load_image(&path).unwrap(), Image::Gray8(_)));
        assert!(matches!(
            load_image24(&path),
            Err(BmpError::UnsupportedFormat(_))
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_color() {
        let path = temp_path("color.bmp");
        let img = Image24::new(3, 5, RGB8::new(1, 2, 3)).unwrap();
        save_image(&path, &img.clone().into()).unwrap();
        let loaded = load_image24(&path).unwrap();
        assert_eq!(loaded.pixels(), img.pixels());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_image8(temp_path("does-not-exist.bmp")),
            Err(BmpError::Io(_))
        ));
    }
}
