use ea_types::*;
use itertools::Itertools;
use rand::{seq::IteratorRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const ALPHABET: &[u8] = b"ACGT";

pub fn test_sequences() -> Vec<(Seq<'static>, Seq<'static>)> {
    let pairs: [(Seq<'static>, Seq<'static>); 10] = [
        (b"", b""),
        (b"", b"ACGT"),
        (b"ACGT", b""),
        (b"kitten", b"sitting"),
        (b"ACTGACCAGT", b"CCGACAGGA"),
        (b"AGTTTTAT", b"ACCGATTTTTA"),
        (b"CTCTCTTCTCTCTCTA", b"CCTCTCTCTCTCCTCTC"),
        (b"AGTGGGTTGCCTTCATTCCG", b"AGTGGTGTCTTCAGGCCTTCATTCCG"),
        (b"GCACGTCGCCCCCCGCCCGCG", b"GCCCGCCCGCCCGCCCCCGCCCCC"),
        (b"TTGGGTCAATCAGCCAGTTTTTA", b"TTTGAGTGGGTCATCACCGATTTTAT"),
    ];
    pairs.to_vec()
}

/// A uniformly random sequence of length `n` over `alphabet`.
pub fn random_sequence(n: usize, alphabet: &[u8], rng: &mut impl Rng) -> Sequence {
    assert!(!alphabet.is_empty(), "Alphabet may not be empty.");
    (0..n)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Apply `e` random substitutions, insertions and deletions to `seq`.
pub fn random_mutate(seq: Seq, e: usize, alphabet: &[u8], rng: &mut impl Rng) -> Sequence {
    assert!(!alphabet.is_empty(), "Alphabet may not be empty.");
    let mut seq = seq.to_vec();
    for _ in 0..e {
        let c = alphabet[rng.gen_range(0..alphabet.len())];
        match rng.gen_range(0..3) {
            0 if !seq.is_empty() => {
                let i = rng.gen_range(0..seq.len());
                seq[i] = c;
            }
            1 if !seq.is_empty() => {
                seq.remove(rng.gen_range(0..seq.len()));
            }
            _ => {
                let i = rng.gen_range(0..=seq.len());
                seq.insert(i, c);
            }
        }
    }
    seq
}

/// A pair of length `n` and a mutated copy with `n * e` edits.
pub fn generate_pair(n: usize, e: f32, seed: u64) -> (Sequence, Sequence) {
    let rng = &mut ChaCha8Rng::seed_from_u64(seed);
    let a = random_sequence(n, ALPHABET, rng);
    let b = random_mutate(&a, (n as f32 * e).round() as usize, ALPHABET, rng);
    (a, b)
}

/// Set to true to run the full grid instead of a random quarter of it.
const FIXED: bool = false;

pub fn gen_seqs() -> impl Iterator<Item = ((Sequence, Sequence), (usize, f32, u64))> {
    let rng = &mut ChaCha8Rng::from_entropy();
    let mut ns = vec![
        0usize, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 30, 40, 50,
        60, 70, 80, 90, 100, 150, 200,
    ];
    let mut es = vec![0.0f32, 0.01, 0.05, 0.10, 0.20, 0.30, 0.50, 1.0];

    if !FIXED {
        let nl = ns.len();
        ns = ns.into_iter().choose_multiple(rng, nl / 4);
        let el = es.len();
        es = es.into_iter().choose_multiple(rng, el / 4);
    }

    // Each run uses a new seed for increased coverage over time.
    let seed = if FIXED { 31415 } else { rng.gen() };
    ns.into_iter()
        .cartesian_product(es)
        .map(move |(n, e)| (generate_pair(n, e, seed), (n, e, seed)))
}

pub fn test_aligner_on_input(a: Seq, b: Seq, aligner: &mut impl Aligner, params: &str) {
    // useful in case of panics inside the alignment code.
    eprintln!("{params}");
    let cost = triple_accel::levenshtein_exp(a, b) as Cost;
    let (aligner_cost, cigar) = aligner
        .align(a, b)
        .unwrap_or_else(|e| panic!("{params}: {e}"));
    assert_eq!(
        cost,
        aligner_cost,
        "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\nAligner\n{aligner:?}",
        seq_to_string(a),
        seq_to_string(b),
    );
    assert_eq!(
        cigar.verify(&LinearCost::unit(), a, b),
        cost,
        "\n{params}\ncigar: {cigar}"
    );
}

/// Test a unit cost aligner on the hardcoded sequences and a grid of random
/// pairs:
/// - The cost must match `triple_accel::levenshtein_exp`.
/// - The returned cigar must be valid and have the same cost.
pub fn test_aligner(mut aligner: impl Aligner) {
    for (a, b) in test_sequences() {
        test_aligner_on_input(
            a,
            b,
            &mut aligner,
            &format!(
                "hardcoded test_sequences: a {:?} b {:?}",
                seq_to_string(a),
                seq_to_string(b)
            ),
        );
    }
    for ((a, b), (n, e, seed)) in gen_seqs() {
        test_aligner_on_input(
            &a,
            &b,
            &mut aligner,
            &format!("seed {seed:>20} n {n:>5} e {e:>.2}"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_seeded() {
        assert_eq!(generate_pair(50, 0.2, 7), generate_pair(50, 0.2, 7));
        let (a, b) = generate_pair(100, 0.0, 1);
        assert_eq!(a.len(), 100);
        assert_eq!(a, b);
        assert!(a.iter().all(|c| ALPHABET.contains(c)));
    }

    #[test]
    fn mutations_bound_distance() {
        for seed in 0..20 {
            let (a, b) = generate_pair(40, 0.25, seed);
            assert!(triple_accel::levenshtein_exp(&a, &b) <= 10);
        }
    }
}
