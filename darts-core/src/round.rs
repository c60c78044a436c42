//! Per-round score table: one row per participant, one column per round.

/// A column label above the round table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundHeader {
    /// 1-based round number.
    pub number: usize,
    pub(crate) is_current: bool,
    pub(crate) is_past: bool,
}

impl RoundHeader {
    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn is_past(&self) -> bool {
        self.is_past
    }
}

/// One cell of a participant's round history.
///
/// `value` and `resolved` are canonical. The remaining flags and the cached
/// cumulative total are derived by [`crate::flags::project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundScoreEntry {
    index: usize,
    value: u32,
    resolved: bool,
    pub(crate) is_future: bool,
    pub(crate) is_current: bool,
    pub(crate) is_active_cell: bool,
    total: Option<u32>,
}

impl RoundScoreEntry {
    fn new(index: usize, current_round: usize) -> Self {
        Self {
            index,
            value: 0,
            resolved: false,
            is_future: index >= current_round,
            is_current: false,
            is_active_cell: false,
            total: None,
        }
    }

    /// Position of this cell in the row. Never changes.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Points scored in this round.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// True once a throw or a manual turn advance has landed on this cell.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn is_future(&self) -> bool {
        self.is_future
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn is_active_cell(&self) -> bool {
        self.is_active_cell
    }

    /// Running total up to and including this round, hidden for future cells.
    pub fn cumulative_total(&self) -> Option<u32> {
        self.total
    }

    /// Text shown in the cell: the running total, or nothing while future.
    pub fn display_total(&self) -> String {
        self.total.map(|t| t.to_string()).unwrap_or_default()
    }
}

/// A player taking part in the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    name: String,
    pub(crate) score: u32,
    pub(crate) round_score: u32,
    pub(crate) is_active: bool,
    pub(crate) is_highlighted: bool,
    rounds: Vec<RoundScoreEntry>,
}

impl Participant {
    fn new(name: String, score: u32) -> Self {
        Self {
            name,
            score,
            round_score: 0,
            is_active: false,
            is_highlighted: false,
            rounds: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mirror of the player's aggregate ledger score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Mirror of the value scored in the round being played.
    pub fn round_score(&self) -> u32 {
        self.round_score
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_highlighted(&self) -> bool {
        self.is_highlighted
    }

    /// Active or temporarily highlighted.
    pub fn highlight_state(&self) -> bool {
        self.is_active || self.is_highlighted
    }

    pub fn rounds(&self) -> &[RoundScoreEntry] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&RoundScoreEntry> {
        self.rounds.get(index)
    }

    /// Sum of the values of rounds `0..=index`.
    pub fn sum_through(&self, index: usize) -> u32 {
        self.rounds
            .iter()
            .take(index.saturating_add(1))
            .map(|entry| entry.value)
            .fold(0, u32::saturating_add)
    }

    /// Recompute cached totals for `from..` since every later cell depends on
    /// the earlier ones.
    pub(crate) fn refresh_totals_from(&mut self, from: usize) {
        let mut running = self
            .rounds
            .iter()
            .take(from)
            .map(|e| e.value)
            .fold(0, u32::saturating_add);
        for entry in self.rounds.iter_mut().skip(from) {
            running = running.saturating_add(entry.value);
            entry.total = if entry.is_future { None } else { Some(running) };
        }
    }

    pub(crate) fn rounds_mut(&mut self) -> &mut [RoundScoreEntry] {
        &mut self.rounds
    }

    fn grow(&mut self, rounds: usize, current_round: usize) {
        while self.rounds.len() < rounds {
            let index = self.rounds.len();
            self.rounds.push(RoundScoreEntry::new(index, current_round));
        }
    }
}

/// Ordered participants plus the round headers they share.
#[derive(Debug, Clone, Default)]
pub struct RoundTable {
    participants: Vec<Participant>,
    headers: Vec<RoundHeader>,
}

impl RoundTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn headers(&self) -> &[RoundHeader] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Participant> {
        self.participants.get(position)
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name == name)
    }

    /// Number of round columns currently materialized.
    pub fn capacity(&self) -> usize {
        self.headers.len()
    }

    /// Grow headers and every row to at least `rounds` entries (minimum 1).
    ///
    /// Cells created for rounds already behind `current_round` start out
    /// visible; everything else starts as future.
    pub fn ensure_capacity(&mut self, rounds: usize, current_round: usize) {
        let rounds = rounds.max(1);
        while self.headers.len() < rounds {
            let number = self.headers.len() + 1;
            self.headers.push(RoundHeader {
                number,
                is_current: false,
                is_past: false,
            });
        }
        for participant in &mut self.participants {
            participant.grow(rounds, current_round);
        }
    }

    /// Append a participant. Returns false if the name is empty or taken.
    pub(crate) fn add(&mut self, name: &str, score: u32, current_round: usize) -> bool {
        if name.is_empty() || self.position(name).is_some() {
            return false;
        }
        let mut participant = Participant::new(name.to_string(), score);
        participant.grow(self.headers.len().max(current_round + 1), current_round);
        self.participants.push(participant);
        true
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<(usize, Participant)> {
        let position = self.position(name)?;
        Some((position, self.participants.remove(position)))
    }

    pub(crate) fn participant_mut(&mut self, name: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.name == name)
    }

    pub(crate) fn participants_mut(&mut self) -> &mut [Participant] {
        &mut self.participants
    }

    pub(crate) fn headers_mut(&mut self) -> &mut [RoundHeader] {
        &mut self.headers
    }

    /// Add a clamped delta to one cell and refresh the totals that depend on
    /// it. Returns the cell's new value.
    pub(crate) fn add_to_entry(
        &mut self,
        position: usize,
        round: usize,
        delta: i32,
    ) -> Option<u32> {
        let participant = self.participants.get_mut(position)?;
        let entry = participant.rounds.get_mut(round)?;
        entry.value = entry.value.saturating_add_signed(delta);
        let value = entry.value;
        participant.refresh_totals_from(round);
        Some(value)
    }

    /// Mark a cell as played, even if it scored nothing. Returns its value.
    pub(crate) fn resolve_entry(&mut self, position: usize, round: usize) -> Option<u32> {
        let entry = self.participants.get_mut(position)?.rounds.get_mut(round)?;
        entry.resolved = true;
        Some(entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(names: &[&str]) -> RoundTable {
        let mut table = RoundTable::new();
        table.ensure_capacity(1, 0);
        for name in names {
            table.add(name, 0, 0);
        }
        table
    }

    #[test]
    fn ensure_capacity_grows_headers_and_rows() {
        let mut table = table_with(&["anna", "bert"]);
        table.ensure_capacity(4, 0);

        assert_eq!(table.capacity(), 4);
        let numbers: Vec<_> = table.headers().iter().map(|h| h.number).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
        for participant in table.participants() {
            assert_eq!(participant.rounds().len(), 4);
            assert!(participant.rounds().iter().all(|e| e.value() == 0));
            assert!(participant.rounds().iter().all(|e| e.is_future()));
        }
    }

    #[test]
    fn ensure_capacity_never_shrinks() {
        let mut table = table_with(&["anna"]);
        table.ensure_capacity(5, 0);
        table.ensure_capacity(2, 0);
        assert_eq!(table.capacity(), 5);
        assert_eq!(table.participants()[0].rounds().len(), 5);
    }

    #[test]
    fn late_joiner_gets_past_rounds_visible() {
        let mut table = table_with(&["anna"]);
        table.ensure_capacity(3, 2);
        table.add("bert", 0, 2);

        let bert = table.participant("bert").unwrap();
        assert_eq!(bert.rounds().len(), 3);
        assert!(!bert.rounds()[0].is_future());
        assert!(!bert.rounds()[1].is_future());
        assert!(bert.rounds()[2].is_future());
    }

    #[test]
    fn duplicate_and_empty_names_are_rejected() {
        let mut table = table_with(&["anna"]);
        assert!(!table.add("anna", 0, 0));
        assert!(!table.add("", 0, 0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn retroactive_edit_refreshes_later_totals() {
        let mut table = RoundTable::new();
        table.ensure_capacity(3, 3);
        table.add("anna", 0, 3);
        for round in 0..3 {
            table.add_to_entry(0, round, 10);
        }
        let totals: Vec<_> = table.participants()[0]
            .rounds()
            .iter()
            .map(|e| e.cumulative_total())
            .collect();
        assert_eq!(totals, [Some(10), Some(20), Some(30), None]);

        table.add_to_entry(0, 0, 5);
        let anna = &table.participants()[0];
        assert_eq!(anna.rounds()[1].cumulative_total(), Some(25));
        assert_eq!(anna.rounds()[2].cumulative_total(), Some(35));
        assert_eq!(anna.rounds()[2].display_total(), "35");
    }

    #[test]
    fn running_total_saturates() {
        let mut table = RoundTable::new();
        table.ensure_capacity(3, 3);
        table.add("anna", 0, 3);
        for round in 0..3 {
            table.add_to_entry(0, round, i32::MAX);
        }
        let anna = &table.participants()[0];
        let totals: Vec<_> = anna.rounds().iter().map(|e| e.cumulative_total()).collect();
        assert_eq!(
            totals,
            [Some(i32::MAX as u32), Some(u32::MAX - 1), Some(u32::MAX), None]
        );
        assert_eq!(anna.sum_through(2), u32::MAX);
    }

    #[test]
    fn resolve_entry_keeps_value() {
        let mut table = table_with(&["anna"]);
        table.add_to_entry(0, 0, 12);
        assert_eq!(table.resolve_entry(0, 0), Some(12));
        assert!(table.participants()[0].rounds()[0].is_resolved());
        assert_eq!(table.resolve_entry(0, 5), None);
    }

    #[test]
    fn entry_value_clamps_at_zero() {
        let mut table = table_with(&["anna"]);
        table.add_to_entry(0, 0, 7);
        assert_eq!(table.add_to_entry(0, 0, -20), Some(0));
    }

    #[test]
    fn future_cell_hides_total() {
        let table = table_with(&["anna"]);
        let entry = &table.participants()[0].rounds()[0];
        assert_eq!(entry.cumulative_total(), None);
        assert_eq!(entry.display_total(), "");
    }

    #[test]
    fn sum_through_adds_inclusive_prefix() {
        let mut table = table_with(&["anna"]);
        table.ensure_capacity(3, 0);
        table.add_to_entry(0, 0, 3);
        table.add_to_entry(0, 1, 4);
        table.add_to_entry(0, 2, 5);
        let anna = &table.participants()[0];
        assert_eq!(anna.sum_through(0), 3);
        assert_eq!(anna.sum_through(1), 7);
        assert_eq!(anna.sum_through(2), 12);
        assert_eq!(anna.sum_through(9), 12);
    }
}
