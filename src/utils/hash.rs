//! Content hashing for source network files.

use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Placeholder recorded when the source file cannot be hashed
pub const UNKNOWN_HASH: &str = "unknown";

const CHUNK_SIZE: usize = 4096;

/// Compute the lowercase hex MD5 digest of a file, streamed in fixed-size chunks.
///
/// Returns [`UNKNOWN_HASH`] if the file cannot be opened or read.
pub fn md5_file_digest(path: &Path) -> String {
    match try_md5_file_digest(path) {
        Ok(digest) => digest,
        Err(e) => {
            log::warn!("Could not hash '{}': {}", path.display(), e);
            UNKNOWN_HASH.to_string()
        }
    }
}

fn try_md5_file_digest(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
