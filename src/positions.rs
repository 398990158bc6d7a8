//! Mapping of encoded fragments to bit positions.
use std::iter::FusedIterator;
use std::slice::ChunksExact;

/// `Iterator` that yields the bit positions `h_i(x)` addressed by a fragment `x`.
///
/// The fragment is split into consecutive 2-byte segments. Every segment is read as a big-endian
/// `u16` value `v` and produces the position `v % m`. A trailing odd byte is ignored, so a
/// fragment of length `n` produces exactly `n / 2` positions. The caller therefore controls the
/// number of "hash functions" by choosing the fragment length.
///
/// Different segments may map to the same position.
///
/// # Examples
/// ```
/// use blooms::positions::Positions;
///
/// let positions: Vec<usize> = Positions::new(&[0x00, 0x00, 0xff, 0xff, 0x01], 32).collect();
/// assert_eq!(positions, vec![0, 31]);
/// ```
#[derive(Clone, Debug)]
pub struct Positions<'a> {
    m: usize,
    segments: ChunksExact<'a, u8>,
}

impl<'a> Positions<'a> {
    /// Number of bytes consumed per position.
    pub const SEGMENT_LEN: usize = 2;

    /// Create new `Positions` with the following parameters:
    ///
    /// - `fragment`: the encoded value, i.e. `x` in `h_i(x)`
    /// - `m`: number of addressable bits, all results are `< m`
    ///
    /// Panics if `m` is 0.
    pub fn new(fragment: &'a [u8], m: usize) -> Self {
        assert!(m > 0, "m must be greater than 0");
        Self {
            m,
            segments: fragment.chunks_exact(Self::SEGMENT_LEN),
        }
    }
}

impl Iterator for Positions<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.segments
            .next()
            .map(|s| usize::from(u16::from_be_bytes([s[0], s[1]])) % self.m)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.segments.size_hint()
    }
}

impl ExactSizeIterator for Positions<'_> {}

impl FusedIterator for Positions<'_> {}
