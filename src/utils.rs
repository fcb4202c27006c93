//! Small helpers shared across agents

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{Error, Result};

/// Build an RNG from an optional seed, falling back to the process-wide source
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Pick one move uniformly at random
///
/// # Errors
///
/// Returns [`Error::NoValidMoves`] when `moves` is empty.
pub fn choose_move(moves: &[usize], rng: &mut StdRng) -> Result<usize> {
    moves.choose(rng).copied().ok_or(Error::NoValidMoves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rngs_agree() {
        let moves = [1, 2, 3, 5, 8];
        let mut a = build_rng(Some(11));
        let mut b = build_rng(Some(11));
        for _ in 0..20 {
            assert_eq!(
                choose_move(&moves, &mut a).unwrap(),
                choose_move(&moves, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn empty_moves_is_an_error() {
        let mut rng = build_rng(Some(0));
        assert!(matches!(
            choose_move(&[], &mut rng),
            Err(Error::NoValidMoves)
        ));
    }
}
