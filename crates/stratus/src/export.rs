//! Export functionality for Stratus diagrams.
//!
//! This module provides the [`Exporter`] trait that turns a declared
//! [`Diagram`] into the bytes of an output file, and [`write_output`], which
//! writes those bytes to disk. It is the final stage in the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! DiagramBuilder
//!     ↓ build
//! Semantic Model
//!     ↓ lower (dot)
//! Graphviz graph
//!     ↓ export (graphviz)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`graphviz::GraphvizExporter`]: runs the Graphviz engine, or prints the
//!   DOT source for [`OutputFormat::Dot`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. Nothing is written unless the exporter
//! succeeded, and the output file is replaced atomically, so a failed run
//! never leaves a partial file behind.

pub mod dot;
pub mod graphviz;

use std::{
    fmt, fs,
    io::{self, Write},
    path::Path,
};

use log::debug;

use stratus_core::semantic::{Diagram, OutputFormat};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Produces the content of the output file for `diagram` in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineUnavailable`] if the rendering engine cannot be
    /// started and [`Error::EngineFailed`] if it rejects the input.
    fn export(&mut self, diagram: &Diagram, format: OutputFormat) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`StratusError::Render`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`StratusError::Render`]: crate::StratusError::Render
#[derive(Debug)]
pub enum Error {
    /// The rendering engine could not be started, typically because the
    /// Graphviz binaries are not installed.
    EngineUnavailable(io::Error),
    /// The rendering engine ran and reported a failure.
    EngineFailed(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngineUnavailable(err) => write!(f, "rendering engine unavailable: {err}"),
            Self::EngineFailed(msg) => write!(f, "rendering engine failed: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EngineUnavailable(err) | Self::Io(err) => Some(err),
            Self::EngineFailed(_) => None,
        }
    }
}

/// Exports `diagram` and writes the result to `path`.
///
/// A pre-existing file at `path` is replaced.
///
/// # Errors
///
/// Returns the exporter's error, or [`Error::Io`] if the file cannot be
/// written. In both cases `path` is left as it was.
pub fn write_output(
    exporter: &mut dyn Exporter,
    diagram: &Diagram,
    format: OutputFormat,
    path: &Path,
) -> Result<(), Error> {
    let bytes = exporter.export(diagram, format)?;
    debug!(bytes = bytes.len(), format:% = format; "Diagram exported");
    write_atomically(path, &bytes)
}

/// Writes `bytes` to a temporary file next to `path`, then moves it over `path`.
///
/// The result carries the permissions of the file it replaces, or the usual
/// umask-filtered permissions for a new file.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = temp_builder().tempfile_in(dir).map_err(Error::Io)?;
    if let Ok(existing) = fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(Error::Io)?;
    }
    file.write_all(bytes).map_err(Error::Io)?;
    file.persist(path).map_err(|err| Error::Io(err.error))?;
    Ok(())
}

#[cfg(unix)]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

#[cfg(test)]
mod tests {
    use stratus_core::kind::NodeKind;

    use super::*;

    struct FixedExporter(Vec<u8>);

    impl Exporter for FixedExporter {
        fn export(&mut self, _: &Diagram, _: OutputFormat) -> Result<Vec<u8>, Error> {
            Ok(self.0.clone())
        }
    }

    struct FailingExporter;

    impl Exporter for FailingExporter {
        fn export(&mut self, _: &Diagram, _: OutputFormat) -> Result<Vec<u8>, Error> {
            Err(Error::EngineFailed("syntax error in line 1".to_string()))
        }
    }

    fn sample_diagram() -> Diagram {
        let mut diagram = Diagram::new("Sample");
        diagram.add_node(NodeKind::Ec2, "App", None).unwrap();
        diagram
    }

    #[test]
    fn test_write_output_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut exporter = FixedExporter(b"image".to_vec());
        write_output(&mut exporter, &sample_diagram(), OutputFormat::Png, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"image");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_output_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        fs::write(&path, b"a much longer previous rendering").unwrap();

        let mut exporter = FixedExporter(b"new".to_vec());
        write_output(&mut exporter, &sample_diagram(), OutputFormat::Png, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_failed_export_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let result = write_output(
            &mut FailingExporter,
            &sample_diagram(),
            OutputFormat::Png,
            &path,
        );

        assert!(matches!(result, Err(Error::EngineFailed(_))));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        let mut exporter = FixedExporter(b"image".to_vec());
        let result = write_output(&mut exporter, &sample_diagram(), OutputFormat::Png, &path);

        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        for expected in [0o644, 0o640] {
            let path = dir.path().join(format!("out-{expected:o}.png"));
            fs::write(&path, b"old").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(expected)).unwrap();

            let mut exporter = FixedExporter(b"new".to_vec());
            write_output(&mut exporter, &sample_diagram(), OutputFormat::Png, &path).unwrap();

            assert_eq!(mode(&path), expected);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_follows_umask() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference");
        fs::write(&reference, b"plain write").unwrap();

        let path = dir.path().join("out.png");
        let mut exporter = FixedExporter(b"image".to_vec());
        write_output(&mut exporter, &sample_diagram(), OutputFormat::Png, &path).unwrap();

        assert_eq!(mode(&path), mode(&reference));
    }
}
