//! Timer identifier generation

/// Byte lengths of the hyphen-separated groups
const GROUPS: [usize; 5] = [4, 2, 2, 2, 6];

/// Generate a fresh timer GUID.
///
/// Sixteen random bytes rendered as lowercase hex in 4-2-2-2-6 byte groups,
/// e.g. `3f2a9c01-7d44-0b9e-c2d1-5e6f708192a3`. No UUID version or variant
/// bits are set.
pub fn new_guid() -> String {
    let bytes: [u8; 16] = rand::random();
    format_guid(&bytes)
}

fn format_guid(bytes: &[u8; 16]) -> String {
    let mut offset = 0;
    GROUPS
        .iter()
        .map(|len| {
            let group: String = bytes[offset..offset + len].iter().map(|b| format!("{b:02x}")).collect();
            offset += len;
            group
        })
        .collect::<Vec<_>>()
        .join("-")
}
