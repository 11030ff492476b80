//! Token pickers for automated play. They stand in for the human choosing
//! which token to move; they are not opponents with a strategy.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::games::ludo::{Game, TokenId};

/// Chooses one of the movable tokens for the current player.
pub trait TokenPicker: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` only when `movable` is empty.
    fn pick(&self, game: &Game, movable: &[TokenId], rng: &mut StdRng) -> Option<TokenId>;
}

/// Always the lowest-numbered movable token.
pub struct FirstMovable;

impl TokenPicker for FirstMovable {
    fn name(&self) -> &'static str {
        "first"
    }

    fn pick(&self, _game: &Game, movable: &[TokenId], _rng: &mut StdRng) -> Option<TokenId> {
        movable.first().copied()
    }
}

/// Uniformly random movable token.
pub struct RandomMovable;

impl TokenPicker for RandomMovable {
    fn name(&self) -> &'static str {
        "random"
    }

    fn pick(&self, _game: &Game, movable: &[TokenId], rng: &mut StdRng) -> Option<TokenId> {
        movable.choose(rng).copied()
    }
}

/// Prefers the token furthest along, so tokens finish rather than pile up.
pub struct FurthestAlong;

impl TokenPicker for FurthestAlong {
    fn name(&self) -> &'static str {
        "furthest"
    }

    fn pick(&self, game: &Game, movable: &[TokenId], _rng: &mut StdRng) -> Option<TokenId> {
        let player = game.session().current_player();
        movable
            .iter()
            .copied()
            .max_by_key(|id| player.token(*id).steps())
    }
}

pub const PICKER_NAMES: [&str; 3] = ["first", "random", "furthest"];

/// Look up a picker by its CLI name.
pub fn picker_by_name(name: &str) -> Option<Box<dyn TokenPicker>> {
    match name {
        "first" => Some(Box::new(FirstMovable)),
        "random" => Some(Box::new(RandomMovable)),
        "furthest" => Some(Box::new(FurthestAlong)),
        _ => None,
    }
}
