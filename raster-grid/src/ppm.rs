//! Binary RGB pixmap ("P6") export. Alpha is dropped.

use crate::Raster;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const MAGIC: &str = "P6";
const MAX_CHANNEL_VALUE: u32 = 255;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("could not write into file {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("failed while writing {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Writes the header, then one 3-byte RGB record per pixel, top row first.
pub fn write_ppm<W: Write>(raster: &Raster, mut out: W) -> io::Result<()> {
    write!(
        out,
        "{MAGIC}\n{} {} {MAX_CHANNEL_VALUE}\n",
        raster.width(),
        raster.height()
    )?;
    for color in raster.colors_iter() {
        out.write_all(&color.to_rgb_bytes())?;
    }
    out.flush()
}

pub fn save_ppm(raster: &Raster, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = ByteCounter::new(BufWriter::new(file));
    write_ppm(raster, &mut out).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Saved {}x{} image to {} ({} bytes)",
        raster.width(),
        raster.height(),
        path.display(),
        out.count
    );
    Ok(())
}

struct ByteCounter<W> {
    inner: W,
    count: usize,
}

impl<W: Write> ByteCounter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for ByteCounter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
