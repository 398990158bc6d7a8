//! Saturation and capacity estimates.
use super::Blooms;
use crate::encoder::Encoder;
use crate::positions::Positions;

/// Number of distinct segment values.
const SEGMENT_VALUES: usize = 1 << 16;

impl<E> Blooms<E>
where
    E: Encoder,
{
    /// Probability that a uniformly random fragment of `fragment_len` bytes is reported as
    /// present, i.e. the false positive rate for random fragments of that length.
    ///
    /// Fragments shorter than 2 bytes are always reported as present, so their saturation is
    /// `1`.
    pub fn saturation(&self, fragment_len: usize) -> f64 {
        let k = fragment_len / Positions::SEGMENT_LEN;
        self.segment_hit_rate().powf(k as f64)
    }

    /// Guess how many random fragments of `fragment_len` bytes have to be inserted into an empty
    /// filter of this size to reach `saturation`.
    ///
    /// Returns `0` for fragments shorter than 2 bytes, since these never set a bit, and infinity
    /// for a saturation of `1` or more.
    pub fn capacity(&self, fragment_len: usize, saturation: f64) -> f64 {
        let k = fragment_len / Positions::SEGMENT_LEN;
        if k == 0 || saturation <= 0. {
            return 0.;
        }
        if saturation >= 1. {
            return f64::INFINITY;
        }

        // fraction of reachable bits that are set
        let p = saturation.powf(1. / (k as f64));
        let m = self.bit_len().min(SEGMENT_VALUES) as f64;

        (1. - p).ln() / ((k as f64) * (1. - 1. / m).ln())
    }

    /// Measure saturation empirically by querying `samples` random fragments of `fragment_len`
    /// bytes.
    ///
    /// Panics if `samples` is 0.
    #[cfg(feature = "rand")]
    pub fn sample_saturation<R>(&self, rng: &mut R, fragment_len: usize, samples: usize) -> f64
    where
        R: rand::Rng,
    {
        assert!(samples > 0, "samples must be greater than 0");

        let mut fragment = vec![0u8; fragment_len];
        let members = (0..samples)
            .filter(|_| {
                rng.fill(&mut fragment[..]);
                self.contains_fragment(&fragment)
            })
            .count();

        members as f64 / samples as f64
    }

    /// Probability that a single uniformly distributed 16-bit segment hits a set bit.
    ///
    /// If `m` does not divide 65536, low positions are hit by one more segment value than high
    /// ones. Positions at or above 65536 are never hit.
    fn segment_hit_rate(&self) -> f64 {
        let m = self.bit_len();
        let per_pos = SEGMENT_VALUES / m;
        let extra = SEGMENT_VALUES % m;

        let hits: usize = (0..m.min(SEGMENT_VALUES))
            .filter(|pos| self.bits.get(*pos))
            .map(|pos| per_pos + usize::from(pos < extra))
            .sum();

        hits as f64 / SEGMENT_VALUES as f64
    }
}
