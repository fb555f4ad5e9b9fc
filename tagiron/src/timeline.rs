use tracing::debug;

use crate::{GameState, TimelineIndexOutOfRange};

/// The linear history of game states, with a cursor on the current one.
///
/// Traveling back only moves the cursor. The states after the cursor are dropped when
/// the next state is recorded.
#[derive(Clone, Debug)]
pub struct Timeline {
    // Never empty
    states: Vec<GameState>,
    cursor: usize,
}

impl Timeline {
    pub fn new(initial: GameState) -> Self {
        Self {
            states: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &GameState {
        &self.states[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All recorded states, including the ones after the cursor.
    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    /// Discards everything after the cursor and appends `next` as the new current state.
    pub fn record(&mut self, next: GameState) {
        let discarded = self.states.len() - self.cursor - 1;
        self.states.truncate(self.cursor + 1);
        self.states.push(next);
        self.cursor = self.states.len() - 1;
        debug!(cursor = self.cursor, discarded, "Recorded state");
    }

    /// Moves the cursor without discarding anything.
    pub fn travel_to(&mut self, index: usize) -> Result<(), TimelineIndexOutOfRange> {
        if index >= self.states.len() {
            return Err(TimelineIndexOutOfRange {
                index,
                len: self.states.len(),
            });
        }
        debug!(from = self.cursor, to = index, "Traveled");
        self.cursor = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_catalog, hand};

    fn timeline_with_additions(num_additions: usize) -> Timeline {
        let initial = GameState::new(hand!("1r 3b 5 7r 9b"), default_catalog().unwrap());
        let mut timeline = Timeline::new(initial);
        for _ in 0..num_additions {
            let next = timeline.current().add_question_card(0).unwrap();
            timeline.record(next);
        }
        timeline
    }

    #[test]
    fn record_advances_cursor() {
        let timeline = timeline_with_additions(3);
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline.cursor(), 3);
        assert_eq!(timeline.current().field().len(), 3);
    }

    #[test]
    fn travel_keeps_the_future() {
        let mut timeline = timeline_with_additions(3);
        timeline.travel_to(1).unwrap();
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline.current().field().len(), 1);
        timeline.travel_to(3).unwrap();
        assert_eq!(timeline.current().field().len(), 3);
        assert_eq!(
            timeline.travel_to(4),
            Err(TimelineIndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(timeline.cursor(), 3);
    }

    #[test]
    fn record_after_travel_discards_the_future() {
        let mut timeline = timeline_with_additions(3);
        timeline.travel_to(1).unwrap();
        let branch = timeline.current().delete_question_card(0).unwrap();
        timeline.record(branch);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.cursor(), 2);
        assert!(timeline.current().field().is_empty());
        assert_eq!(timeline.current().trash().len(), 1);
        // The earlier states are untouched
        assert_eq!(timeline.states()[1].field().len(), 1);
        assert!(timeline.states()[0].field().is_empty());
    }
}
