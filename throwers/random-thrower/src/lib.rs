use darts_core::{BoardPoint, Ring, ThrowContext, Thrower};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RandomThrower aims at one segment and lands somewhere around it.
///
/// `spread` is the largest miss distance in board radii, so 0.0 never misses
/// and 1.0 can land anywhere on or off the board.
pub struct RandomThrower {
    name: String,
    target: BoardPoint,
    spread: f64,
    rng: StdRng,
}

impl RandomThrower {
    pub fn new(name: impl Into<String>, target: BoardPoint, spread: f64, seed: u64) -> Self {
        Self {
            name: name.into(),
            target,
            spread: spread.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Aims for treble twenty like most pub players do.
    pub fn pub_player(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, BoardPoint::aim_at(20, Ring::Triple), 0.25, seed)
    }
}

impl Thrower for RandomThrower {
    fn name(&self) -> &str {
        &self.name
    }

    fn aim(&mut self, _ctx: &ThrowContext) -> BoardPoint {
        if self.spread == 0.0 {
            return self.target;
        }
        let distance = self.rng.random_range(0.0..=self.spread);
        let angle = self.rng.random_range(0.0..360.0);
        let offset = BoardPoint::polar(distance, angle);
        BoardPoint::new(self.target.x + offset.x, self.target.y + offset.y)
    }
}
