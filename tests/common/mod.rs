#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use deckpress::{DeckPipeline, PipelineBuilder, PipelineError, RunConfig, RunSummary, RunTarget};
use image::{Rgba, RgbaImage};
use lopdf::Document as LopdfDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An asset directory and an output directory that live as long as the test.
pub struct Workspace {
    assets: TempDir,
    output: TempDir,
}

impl Workspace {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            assets: tempfile::tempdir()?,
            output: tempfile::tempdir()?,
        })
    }

    pub fn assets(&self) -> &Path {
        self.assets.path()
    }

    pub fn output(&self) -> &Path {
        self.output.path()
    }

    /// Writes a solid-colored PNG at `path` under the asset root.
    pub fn add_card(&self, path: &str, size: u32, color: [u8; 4]) -> std::io::Result<PathBuf> {
        let target = self.assets.path().join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        RgbaImage::from_pixel(size, size, Rgba(color))
            .save(&target)
            .map_err(std::io::Error::other)?;
        Ok(target)
    }

    pub fn pipeline(&self, config: RunConfig) -> Result<DeckPipeline, PipelineError> {
        PipelineBuilder::new()
            .with_config(config)
            .with_asset_root(self.assets())
            .with_output_dir(self.output())
            .with_max_in_flight(2)
            .build()
    }

    pub fn run(&self, config: RunConfig, target: RunTarget) -> Result<RunSummary, PipelineError> {
        let pipeline = self.pipeline(config)?;
        tokio::runtime::Runtime::new()?.block_on(pipeline.run(target))
    }

    pub fn output_file(&self, path: &str) -> PathBuf {
        self.output.path().join(path)
    }

    pub fn read_png(&self, path: &str) -> Result<RgbaImage, Box<dyn std::error::Error>> {
        Ok(image::open(self.output_file(path))?.to_rgba8())
    }

    pub fn read_pdf(&self, path: &str) -> Result<LopdfDocument, Box<dyn std::error::Error>> {
        Ok(LopdfDocument::load(self.output_file(path))?)
    }

    /// Sorted file names directly inside an output directory.
    pub fn list_output(&self, dir: &str) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.output_file(dir))? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

/// Color at the center of a card whose top-left corner is `(x, y)`.
pub fn card_center(image: &RgbaImage, x: i64, y: i64, card: u32) -> [u8; 4] {
    let cx = (x + i64::from(card / 2)) as u32;
    let cy = (y + i64::from(card / 2)) as u32;
    image.get_pixel(cx, cy).0
}
