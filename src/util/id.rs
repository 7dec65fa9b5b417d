//! Random identifiers for shapes.

use std::fmt::Write;

use rand::RngCore;

/// Generate a random identifier: 16 random bytes rendered as lowercase hex in
/// `8-4-4-4-12` groups.
///
/// No version or variant bits are set.
pub fn uuid() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);

    let mut id = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            id.push('-');
        }
        // Writing to a String cannot fail.
        let _ = write!(id, "{byte:02x}");
    }
    id
}
