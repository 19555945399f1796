use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default read size for streaming digests (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1_048_576;

/// Length of a hex-encoded BLAKE3 digest.
#[cfg(test)]
pub(crate) const DIGEST_HEX_LEN: usize = 64;

#[cfg(test)]
pub(crate) fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Stream a file through BLAKE3 in `chunk_size` reads.
///
/// The file is never held in memory as a whole, so this is safe for
/// arbitrarily large inputs.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
pub fn hash_file_streaming(path: &Path, chunk_size: usize) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// Like [`hash_file_streaming`], but a read failure yields `None`.
#[must_use]
pub fn try_hash_file(path: &Path, chunk_size: usize) -> Option<String> {
    match hash_file_streaming(path, chunk_size) {
        Ok(digest) => Some(digest),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "digest unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_hash_bytes() {
        let hash1 = hash_bytes(b"Hello, World!");
        let hash2 = hash_bytes(b"Hello, World!");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), DIGEST_HEX_LEN);

        assert_ne!(hash1, hash_bytes(b"Different data"));
    }

    #[test]
    fn test_known_digest() {
        // BLAKE3 of the empty input
        assert_eq!(
            hash_bytes(b""),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_streaming_matches_one_shot() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.txt");
        let content: Vec<u8> = (0..10_000u32).flat_map(u32::to_le_bytes).collect();
        std::fs::write(&file_path, &content)?;

        let expected = hash_bytes(&content);
        // Chunk sizes that do and do not divide the file length evenly
        for chunk in [1, 7, 4096, DEFAULT_CHUNK_SIZE] {
            assert_eq!(hash_file_streaming(&file_path, chunk)?, expected);
        }

        Ok(())
    }

    #[test]
    fn test_missing_file_has_no_digest() {
        let dir = tempdir().unwrap();
        assert!(try_hash_file(&dir.path().join("nope"), DEFAULT_CHUNK_SIZE).is_none());
        assert!(hash_file_streaming(&dir.path().join("nope"), DEFAULT_CHUNK_SIZE).is_err());
    }
}
