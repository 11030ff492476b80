//! Dice sources. The rules engine never calls a global RNG; every roll comes
//! from the `DiceSource` the game was built with.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait DiceSource: Send {
    /// Next die face. Faces outside 1..=6 are rejected by the turn controller.
    fn roll(&mut self) -> u8;
}

/// Uniform six-sided die.
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    /// Seeded for reproducible games, or from OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl DiceSource for RandomDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Replays a fixed list of faces, cycling when exhausted.
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    pub fn new(faces: Vec<u8>) -> Self {
        Self { faces, next: 0 }
    }

    /// Faces handed out so far.
    pub fn rolls_made(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> u8 {
        if self.faces.is_empty() {
            // Surfaces as an invalid roll.
            return 0;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_dice_in_range() {
        let mut dice = RandomDice::new(Some(7));
        let mut seen = [false; 6];
        for _ in 0..600 {
            let face = dice.roll();
            assert!((1..=6).contains(&face));
            seen[usize::from(face - 1)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_random_dice_seeded_is_reproducible() {
        let mut a = RandomDice::new(Some(42));
        let mut b = RandomDice::new(Some(42));
        let xs: Vec<u8> = (0..50).map(|_| a.roll()).collect();
        let ys: Vec<u8> = (0..50).map(|_| b.roll()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::new(vec![6, 2, 5]);
        let faces: Vec<u8> = (0..7).map(|_| dice.roll()).collect();
        assert_eq!(faces, vec![6, 2, 5, 6, 2, 5, 6]);
        assert_eq!(dice.rolls_made(), 7);
    }

    #[test]
    fn test_empty_script_yields_invalid_face() {
        let mut dice = ScriptedDice::new(vec![]);
        assert_eq!(dice.roll(), 0);
    }
}
