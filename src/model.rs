// 🧠 Predictive Asset - availability gate for the prediction endpoint
//
// The persisted model is checked at startup but never evaluated:
// classification stays threshold based. A model that fails to load
// makes every prediction request answer 500 "Model not loaded".

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// HDF5 format signature, found at offset 0 or a power of two from 512 onwards
const HDF5_SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    Loaded { path: PathBuf, size_bytes: u64 },
    Unavailable { reason: String },
}

impl ModelStatus {
    /// Check the model artifact, logging the outcome. Never fails.
    pub fn load(path: &Path) -> Self {
        match load_artifact(path) {
            Ok(size_bytes) => {
                tracing::info!(path = ?path, size_bytes, "Model loaded successfully");
                ModelStatus::Loaded {
                    path: path.to_path_buf(),
                    size_bytes,
                }
            }
            Err(e) => {
                tracing::error!(path = ?path, "Error loading model: {:#}", e);
                ModelStatus::Unavailable {
                    reason: format!("{:#}", e),
                }
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelStatus::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelStatus::Loaded { .. })
    }
}

fn load_artifact(path: &Path) -> Result<u64> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to read model file: {:?}", path))?;
    let size_bytes = file
        .metadata()
        .with_context(|| format!("Failed to stat model file: {:?}", path))?
        .len();

    if size_bytes == 0 {
        bail!("Model file is empty: {:?}", path);
    }
    if !has_hdf5_signature(&mut file, size_bytes)
        .with_context(|| format!("Failed to read model file: {:?}", path))?
    {
        bail!("Model file is not an HDF5 archive: {:?}", path);
    }

    Ok(size_bytes)
}

/// Read only the candidate signature offsets; the rest of the file is never read
fn has_hdf5_signature<R: Read + Seek>(reader: &mut R, len: u64) -> std::io::Result<bool> {
    let mut buf = [0u8; HDF5_SIGNATURE.len()];
    let mut offset = 0u64;
    while offset + buf.len() as u64 <= len {
        reader.seek(SeekFrom::Start(offset))?;
        reader.read_exact(&mut buf)?;
        if buf == HDF5_SIGNATURE {
            return Ok(true);
        }
        offset = if offset == 0 { 512 } else { offset * 2 };
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hdf5_bytes(prefix: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; prefix];
        bytes.extend_from_slice(&HDF5_SIGNATURE);
        bytes.extend_from_slice(&[0u8; 64]);
        bytes
    }

    fn has_signature(bytes: &[u8]) -> bool {
        has_hdf5_signature(&mut Cursor::new(bytes), bytes.len() as u64).unwrap()
    }

    /// Counts bytes handed out so tests can check how much of a file was read
    struct CountingReader<R> {
        inner: R,
        bytes_read: usize,
    }

    impl<R: Read> Read for CountingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.bytes_read += n;
            Ok(n)
        }
    }

    impl<R: Seek> Seek for CountingReader<R> {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_signature_offsets() {
        assert!(has_signature(&hdf5_bytes(0)));
        assert!(has_signature(&hdf5_bytes(512)));
        assert!(has_signature(&hdf5_bytes(2048)));
        assert!(!has_signature(&hdf5_bytes(100)));
        assert!(!has_signature(b"not a model"));
    }

    #[test]
    fn test_signature_check_reads_only_candidate_offsets() {
        // 4 MiB of padding with the signature at 2048
        let mut bytes = hdf5_bytes(2048);
        bytes.resize(4 * 1024 * 1024, 0);
        let len = bytes.len() as u64;

        let mut reader = CountingReader {
            inner: Cursor::new(bytes),
            bytes_read: 0,
        };
        assert!(has_hdf5_signature(&mut reader, len).unwrap());
        // offsets 0, 512, 1024 and 2048
        assert_eq!(reader.bytes_read, 4 * HDF5_SIGNATURE.len());
    }

    #[test]
    fn test_load_valid_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.h5");
        std::fs::write(&path, hdf5_bytes(0)).unwrap();

        let status = ModelStatus::load(&path);
        assert!(status.is_loaded());
        assert_eq!(
            status,
            ModelStatus::Loaded {
                path,
                size_bytes: 72
            }
        );
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let status = ModelStatus::load(Path::new("/nonexistent/model.h5"));
        assert!(!status.is_loaded());
    }

    #[test]
    fn test_garbage_and_empty_model_are_unavailable() {
        let dir = tempfile::tempdir().unwrap();

        let garbage = dir.path().join("garbage.h5");
        std::fs::write(&garbage, b"{\"layers\": []}").unwrap();
        assert!(!ModelStatus::load(&garbage).is_loaded());

        let empty = dir.path().join("empty.h5");
        std::fs::write(&empty, b"").unwrap();
        match ModelStatus::load(&empty) {
            ModelStatus::Unavailable { reason } => assert!(reason.contains("empty")),
            other => panic!("expected unavailable, got {:?}", other),
        }
    }
}
