use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Blooms;

pub(crate) fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub(crate) fn random_fragment<R>(rng: &mut R, len: usize) -> Vec<u8>
where
    R: Rng,
{
    let mut fragment = vec![0u8; len];
    rng.fill(&mut fragment[..]);
    fragment
}

/// Filter of `size` bytes with `n` random 4-byte fragments inserted.
pub(crate) fn random_filter<R>(rng: &mut R, size: usize, n: usize) -> Blooms
where
    R: Rng,
{
    let mut bf = Blooms::new(size).expect("size must be positive");
    for _ in 0..n {
        bf.insert(&random_fragment(rng, 4));
    }
    bf
}
