//! Operations on the packed representation of slices.

/// Unpack `length` binary voxels from `bin` into one byte per voxel in
/// `grey`, mapping set bits to `max_value` and cleared bits to `min_value`.
/// Bits are taken most significant first, so that bit 7 of the first byte
/// is voxel 0.
///
/// # Panics
///
/// If `bin` holds fewer than `length` bits or `grey` is shorter than
/// `length`.
///
/// # Example
///
/// ```
/// # use viewnix::transform::bin_to_grey;
/// let mut grey = [0u8; 8];
/// bin_to_grey(&[0b1011_0000], 8, &mut grey, 0, 1);
/// assert_eq!(grey, [1, 0, 1, 1, 0, 0, 0, 0]);
/// ```
pub fn bin_to_grey(bin: &[u8], length: usize, grey: &mut [u8], min_value: u8, max_value: u8) {
    assert!(bin.len() * 8 >= length, "binary buffer too short");
    for (i, out) in grey[..length].iter_mut().enumerate() {
        *out = if bin[i / 8] & (0x80 >> (i % 8)) != 0 {
            max_value
        } else {
            min_value
        };
    }
}

/// Invert the raw data of a slice in place. Every byte is complemented,
/// which negates a binary mask bit by bit, including any padding bits of
/// the last byte.
pub fn invert(buffer: &mut [u8]) {
    for b in buffer {
        *b = !*b;
    }
}
