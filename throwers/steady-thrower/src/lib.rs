use darts_core::{BoardPoint, Ring, ThrowContext, Thrower};

/// SteadyThrower works through a fixed list of targets, one per dart, and
/// starts over when the list runs out.
pub struct SteadyThrower {
    name: String,
    targets: Vec<BoardPoint>,
    next: usize,
}

impl SteadyThrower {
    pub fn new(name: impl Into<String>, targets: Vec<BoardPoint>) -> Self {
        Self {
            name: name.into(),
            targets,
            next: 0,
        }
    }

    /// Treble twenty, single twenty, double twenty.
    pub fn twenties(name: impl Into<String>) -> Self {
        Self::new(
            name,
            vec![
                BoardPoint::aim_at(20, Ring::Triple),
                BoardPoint::aim_at(20, Ring::Single),
                BoardPoint::aim_at(20, Ring::Double),
            ],
        )
    }
}

impl Thrower for SteadyThrower {
    fn name(&self) -> &str {
        &self.name
    }

    fn aim(&mut self, _ctx: &ThrowContext) -> BoardPoint {
        if self.targets.is_empty() {
            return BoardPoint::aim_at(0, Ring::Miss);
        }
        let point = self.targets[self.next % self.targets.len()];
        self.next = (self.next + 1) % self.targets.len();
        point
    }
}
