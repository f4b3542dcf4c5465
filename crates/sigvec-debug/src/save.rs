//! Raw buffer dumps to files
//!
//! A dump is exactly the bytes of the buffer in memory order with no header,
//! so it can be read back by any tool that knows the sample type.

use bytemuck::Pod;
use sigvec_core::{Error, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::mem;
use std::path::Path;

fn open_error(path: &Path, source: std::io::Error) -> Error {
    tracing::warn!(path = %path.display(), error = %source, "failed to open dump file");
    Error::FileOpen {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `bytes` to `path`, creating or truncating it
///
/// Nothing is written when the file cannot be opened.
pub fn save_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|source| open_error(path, source))?;
    file.write_all(bytes)?;
    file.flush()?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved raw dump");
    Ok(())
}

/// Write the in-memory bytes of a sample slice to `path`
pub fn save_slice<T: Pod>(path: impl AsRef<Path>, data: &[T]) -> Result<()> {
    save_file(path, bytemuck::cast_slice(data))
}

/// Read a raw dump of `T` samples back from `path`
///
/// The file length must be a whole number of samples.
pub fn load_slice<T: Pod>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let size = mem::size_of::<T>();
    if size == 0 {
        return Err(Error::InvalidParameter(
            "cannot load zero-sized samples".to_string(),
        ));
    }

    let mut file = File::open(path).map_err(|source| open_error(path, source))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    if bytes.len() % size != 0 {
        return Err(Error::InvalidInput(format!(
            "{} holds {} bytes, not a multiple of the {size}-byte sample size",
            path.display(),
            bytes.len()
        )));
    }

    let mut samples = vec![T::zeroed(); bytes.len() / size];
    bytemuck::cast_slice_mut::<T, u8>(&mut samples).copy_from_slice(&bytes);
    tracing::debug!(path = %path.display(), samples = samples.len(), "loaded raw dump");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigvec_core::Cf32;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sigvec-save-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_save_truncates() {
        let path = temp_path("truncate.bin");
        save_file(&path, &[1, 2, 3, 4, 5, 6]).unwrap();
        save_file(&path, &[9, 8]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 8]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_failure_is_reported() {
        let path = temp_path("missing-dir").join("dump.bin");
        let err = save_file(&path, &[1, 2, 3]).unwrap_err();
        match err {
            Error::FileOpen { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("Wrong error type: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_complex_slice_round_trip() {
        let path = temp_path("complex.bin");
        let x = vec![Cf32::new(1.0, -1.0), Cf32::new(0.25, 8.0)];
        save_slice(&path, &x).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 16);
        let back: Vec<Cf32> = load_slice(&path).unwrap();
        assert_eq!(back, x);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_partial_sample() {
        let path = temp_path("partial.bin");
        save_file(&path, &[0u8; 6]).unwrap();
        assert!(matches!(load_slice::<f32>(&path), Err(Error::InvalidInput(_))));
        std::fs::remove_file(&path).unwrap();
    }
}
