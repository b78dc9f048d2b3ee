#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use byteorder::{LittleEndian, WriteBytesExt};
use emberfall::AssetConfig;
use emberfall::AssetError;
use emberfall::AssetManager;
use emberfall::io::common::loader::RawAssetLoader;
use emberfall::io::fs::loader::FsLoader;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use tempfile::TempDir;

/// A data directory in a temp dir, filled by the fixture writers below.
pub struct DataDir {
    pub dir: TempDir,
}

impl DataDir {
    pub fn new() -> Result<Self, anyhow::Error> {
        Ok(Self { dir: TempDir::new()? })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &[u8]) -> Result<PathBuf, anyhow::Error> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn config(&self) -> AssetConfig {
        AssetConfig::new(self.root())
    }

    /// A manager whose file reads are counted.
    pub fn counting_manager(&self) -> (AssetManager, Arc<CountingLoader>) {
        let loader = Arc::new(CountingLoader::new(FsLoader::new(&self.config())));
        (AssetManager::with_loader(self.config(), loader.clone()), loader)
    }
}

/// Counts how often every file is read, i.e. how often a decoder ran on it.
pub struct CountingLoader {
    inner: FsLoader,
    reads: AtomicUsize,
}

impl CountingLoader {
    pub fn new(inner: FsLoader) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl RawAssetLoader for CountingLoader {
    fn locate(&self, logical_path: &str, extensions: &[&str]) -> Result<PathBuf, AssetError> {
        self.inner.locate(logical_path, extensions)
    }

    fn load_raw_owned(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        // widen the window in which concurrent callers could race the decode
        std::thread::sleep(std::time::Duration::from_millis(20));
        self.inner.load_raw_owned(path)
    }
}

fn name32(name: &str) -> [u8; 32] {
    let mut raw = [0u8; 32];
    raw[..name.len()].copy_from_slice(name.as_bytes());
    raw
}

/// A model with one sub-mesh: a unit quad authored as two triangles whose uv indices are local to every triangle
/// (0..6), while the four positions are shared.
pub fn quad_model(name: &str, texture_name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"EMD1");
    buf.write_u16::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(0).unwrap();
    buf.write_u16::<LittleEndian>(0).unwrap();
    buf.extend_from_slice(&name32(name));

    buf.write_u16::<LittleEndian>(4).unwrap();
    buf.write_u16::<LittleEndian>(1).unwrap();
    buf.write_u16::<LittleEndian>(6).unwrap();
    buf.write_u16::<LittleEndian>(2).unwrap();
    buf.extend_from_slice(&name32(texture_name));

    for (x, y) in [(0.0f32, 0.0f32), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
        buf.write_i16::<LittleEndian>(-1).unwrap();
        for c in [x, y, 0.0] {
            buf.write_f32::<LittleEndian>(c).unwrap();
        }
    }

    buf.write_i16::<LittleEndian>(-1).unwrap();
    for c in [0.0f32, 0.0, 1.0] {
        buf.write_f32::<LittleEndian>(c).unwrap();
    }

    for uv in 0..6 {
        buf.write_f32::<LittleEndian>(uv as f32).unwrap();
        buf.write_f32::<LittleEndian>(0.5).unwrap();
    }

    for (positions, uvs) in [([0u16, 1, 2, 0], [0u16, 1, 2, 0]), ([0, 2, 3, 0], [3, 4, 5, 0])] {
        buf.write_u8(3).unwrap();
        buf.write_u8(0).unwrap();
        for p in positions {
            buf.write_u16::<LittleEndian>(p).unwrap();
        }
        for _ in 0..4 {
            buf.write_u16::<LittleEndian>(0).unwrap();
        }
        for t in uvs {
            buf.write_u16::<LittleEndian>(t).unwrap();
        }
    }

    buf
}

/// An uncompressed top-down truecolor image, `rgb` given in RGB order.
pub fn truecolor_rgb(width: u16, height: u16, rgb: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"ETC1");
    buf.write_u16::<LittleEndian>(width).unwrap();
    buf.write_u16::<LittleEndian>(height).unwrap();
    buf.write_u8(3).unwrap();
    buf.write_u8(0).unwrap();
    for px in rgb.chunks_exact(3) {
        buf.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    buf
}

pub fn compressed_rgba(width: u16, height: u16, rgba: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(rgba).unwrap();
    let payload = encoder.finish().unwrap();

    let mut buf = Vec::new();
    buf.extend_from_slice(b"EZT1");
    buf.write_u16::<LittleEndian>(width).unwrap();
    buf.write_u16::<LittleEndian>(height).unwrap();
    buf.write_u8(4).unwrap();
    buf.write_u8(0).unwrap();
    buf.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
    buf.extend_from_slice(&payload);
    buf
}

pub fn paletted_rgb(width: u16, height: u16, palette: &[[u8; 3]], indices: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"EPX8");
    buf.write_u16::<LittleEndian>(width).unwrap();
    buf.write_u16::<LittleEndian>(height).unwrap();
    buf.write_u16::<LittleEndian>(palette.len() as u16).unwrap();
    buf.write_u8(3).unwrap();
    buf.write_u8(0).unwrap();
    for entry in palette {
        buf.extend_from_slice(entry);
    }
    buf.extend_from_slice(indices);
    buf
}
