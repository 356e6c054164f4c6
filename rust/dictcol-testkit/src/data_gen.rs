//! Data generation utilities for testing.
//!
//! All generators are deterministic for a given seed.

/// Syllables combined into vocabulary words. Many words end up sharing
/// leading syllables, which gives prefix queries non-trivial fan-out.
const SYLLABLES: &[&str] = &[
    "ap", "ple", "ban", "an", "a", "cher", "ry", "lau", "se", "ki", "wi", "gr", "ape", "lem", "on",
];

/// Generates a vocabulary of `cardinality` words (duplicates are possible for
/// large cardinalities, the vocabulary is not deduplicated).
///
/// # Arguments
///
/// * `cardinality` - Number of words to generate.
/// * `seed` - Seed of the random generator.
pub fn generate_vocabulary(cardinality: usize, seed: u64) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..cardinality)
        .map(|_| {
            let syllables = rng.usize(1..=4);
            (0..syllables)
                .map(|_| SYLLABLES[rng.usize(..SYLLABLES.len())])
                .collect::<String>()
        })
        .collect()
}

/// Generates `count` rows drawn uniformly from a vocabulary of `cardinality` words.
///
/// Returns an empty column when `count == 0`. `cardinality` must be non-zero
/// unless `count` is zero.
pub fn generate_rows(count: usize, cardinality: usize, seed: u64) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    assert_ne!(cardinality, 0);
    let vocabulary = generate_vocabulary(cardinality, seed);
    let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(1));
    (0..count)
        .map(|_| vocabulary[rng.usize(..vocabulary.len())].clone())
        .collect()
}

/// Generates `count` rows that share a `stem_len`-byte stem followed by a short
/// random suffix. Used to exercise prefixes wider than one compare register.
pub fn generate_long_rows(count: usize, stem_len: usize, seed: u64) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let stem = (0..stem_len)
        .map(|i| (b'a' + (i % 26) as u8) as char)
        .collect::<String>();
    (0..count)
        .map(|_| {
            let suffix_len = rng.usize(0..4);
            let suffix = (0..suffix_len)
                .map(|_| rng.alphabetic())
                .collect::<String>();
            // Occasionally perturb the last stem byte so that long prefixes
            // have both matching and non-matching candidates.
            if rng.u8(..) % 5 == 0 {
                let mut s = stem[..stem_len.saturating_sub(1)].to_string();
                s.push('#');
                s.push_str(&suffix);
                s
            } else {
                format!("{stem}{suffix}")
            }
        })
        .collect()
}

/// Generates `len` random identifiers in `0..max_id`.
pub fn random_ids(len: usize, max_id: u32, seed: u64) -> Vec<u32> {
    assert_ne!(max_id, 0);
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.u32(..max_id)).collect()
}
