use bincode::error::{DecodeError, EncodeError};

/// Get the bincode configuration
fn get_config() -> impl bincode::config::Config {
    // Legacy configuration for serde compatibility; the allocation limit
    // keeps corrupt length prefixes from exhausting memory
    bincode::config::legacy().with_limit::<{ 100 * 1024 * 1024 }>() // 100MB limit
}

/// Serialize data using bincode v2.0 with serde
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn serialize<T: serde::Serialize>(data: &T) -> Result<Vec<u8>, EncodeError> {
    bincode::serde::encode_to_vec(data, get_config())
}

/// Deserialize a value from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed, so several values
/// can be read back to back from one buffer.
///
/// # Errors
///
/// Returns an error if the data is malformed or truncated
pub fn deserialize_prefix<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
) -> Result<(T, usize), DecodeError> {
    bincode::serde::decode_from_slice(bytes, get_config())
}

/// Serde adapter storing a path as its raw OS bytes.
///
/// Plain `PathBuf` serialization rejects names that are not valid UTF-8;
/// on unix any file name round-trips through this encoding. Elsewhere the
/// path must be UTF-8.
///
/// Use with `#[serde(with = "crate::utils::serialization::os_path")]`.
pub mod os_path {
    use serde::de::{self, SeqAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::path::{Path, PathBuf};

    /// Write `path` as a byte string.
    ///
    /// # Errors
    ///
    /// Fails on non-unix platforms when `path` is not valid UTF-8.
    pub fn serialize<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            serializer.serialize_bytes(path.as_os_str().as_bytes())
        }
        #[cfg(not(unix))]
        {
            let text = path
                .to_str()
                .ok_or_else(|| serde::ser::Error::custom("path is not valid UTF-8"))?;
            serializer.serialize_bytes(text.as_bytes())
        }
    }

    /// Read a path written by [`serialize`].
    ///
    /// # Errors
    ///
    /// Fails if the input is not a byte string, or on non-unix platforms
    /// when the bytes are not valid UTF-8.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
        deserializer.deserialize_byte_buf(PathVisitor)
    }

    struct PathVisitor;

    impl<'de> Visitor<'de> for PathVisitor {
        type Value = PathBuf;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("path bytes")
        }

        fn visit_bytes<E: de::Error>(self, bytes: &[u8]) -> Result<PathBuf, E> {
            self.visit_byte_buf(bytes.to_vec())
        }

        fn visit_byte_buf<E: de::Error>(self, bytes: Vec<u8>) -> Result<PathBuf, E> {
            from_bytes(bytes)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PathBuf, A::Error> {
            let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(byte) = seq.next_element::<u8>()? {
                bytes.push(byte);
            }
            from_bytes(bytes)
        }
    }

    #[cfg(unix)]
    #[allow(clippy::unnecessary_wraps)]
    fn from_bytes<E: de::Error>(bytes: Vec<u8>) -> Result<PathBuf, E> {
        use std::os::unix::ffi::OsStringExt;
        Ok(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
    }

    #[cfg(not(unix))]
    fn from_bytes<E: de::Error>(bytes: Vec<u8>) -> Result<PathBuf, E> {
        String::from_utf8(bytes)
            .map(PathBuf::from)
            .map_err(|_| E::custom("path is not valid UTF-8"))
    }
}
