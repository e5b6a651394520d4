//! Zip archive assembly shared by the bucket backends.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use mediastore_core::error::{AppError, ErrorKind};
use mediastore_core::result::AppResult;

/// Build a single zip archive from `(entry name, content)` pairs.
///
/// Entry names are the full source object paths, which keeps entries
/// unique even when basenames collide.
pub fn build_zip(entries: &[(String, Vec<u8>)]) -> AppResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| zip_error(name, e))?;
        writer.write_all(content).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write zip entry '{name}'"),
                e,
            )
        })?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to finalize zip", e))?;
    Ok(cursor.into_inner())
}

fn zip_error(name: &str, e: zip::result::ZipError) -> AppError {
    AppError::with_source(
        ErrorKind::Storage,
        format!("Failed to add zip entry '{name}'"),
        e,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_build_zip_round_trip() {
        let entries = vec![
            ("calls/a.wav".to_string(), b"aaaa".to_vec()),
            ("calls/b.wav".to_string(), b"bbbb".to_vec()),
        ];
        let data = build_zip(&entries).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = Vec::new();
        archive
            .by_name("calls/a.wav")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"aaaa");
    }

    #[test]
    fn test_empty_archive() {
        let data = build_zip(&[]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
