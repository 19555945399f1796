use std::io;

/// Compress bytes using zstd compression
///
/// # Errors
///
/// Returns an error if compression fails
pub fn compress_bytes(data: &[u8], level: i32) -> io::Result<Vec<u8>> {
    zstd::encode_all(data, level)
}

/// Decompress bytes compressed with zstd
///
/// # Errors
///
/// Returns an error if the input is not a valid zstd frame
pub fn decompress_bytes(data: &[u8]) -> io::Result<Vec<u8>> {
    zstd::decode_all(data)
}
