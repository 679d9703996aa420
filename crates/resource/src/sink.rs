use deckpress_traits::{OutputError, OutputSink};
use std::path::{Component, Path, PathBuf};

/// Writes generated files beneath a root directory.
#[derive(Debug)]
pub struct FilesystemOutputSink {
    root: PathBuf,
}

impl FilesystemOutputSink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, OutputError> {
        let relative = Path::new(path);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir));
        if escapes || path.is_empty() {
            return Err(OutputError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl OutputSink for FilesystemOutputSink {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), OutputError> {
        let target = self.resolve(path)?;
        let failed = |e: std::io::Error| OutputError::WriteFailed {
            path: target.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(failed)?;
        }
        std::fs::write(&target, bytes).map_err(failed)?;
        log::debug!("Wrote {} ({} bytes)", target.display(), bytes.len());
        Ok(())
    }

    fn reset_dir(&self, dir: &str) -> Result<(), OutputError> {
        let target = self.resolve(dir)?;
        let failed = |e: std::io::Error| OutputError::WriteFailed {
            path: target.display().to_string(),
            message: e.to_string(),
        };
        match std::fs::remove_dir_all(&target) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(failed(e)),
        }
        std::fs::create_dir_all(&target).map_err(failed)
    }

    fn name(&self) -> &'static str {
        "FilesystemOutputSink"
    }
}
