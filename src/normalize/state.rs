//! Sibling-level traversal state.
//!
//! Legacy pages group topics with line breaks, not containers. Remembering
//! what the previous sibling signalled is enough to tell a deliberate gap
//! (two breaks) from normal spacing (one break) from the break that ends a
//! topic line.

use super::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalState {
    /// Nothing seen yet at this level.
    #[default]
    Start,
    /// Previous signal was a topic link.
    AfterTopic,
    /// Previous signal was a line break.
    AfterBreak,
    /// Previous signal was anything else that emitted (or consumed) content.
    AfterOther,
}

impl TraversalState {
    /// Block a line break produces in this state.
    pub fn break_block(self) -> Option<Block> {
        match self {
            TraversalState::AfterBreak => Some(Block::GroupSpacer),
            TraversalState::Start | TraversalState::AfterOther => Some(Block::MinorBreak),
            TraversalState::AfterTopic => None,
        }
    }

    /// State after a line break, whatever it produced.
    pub fn after_break(self) -> Self {
        TraversalState::AfterBreak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_transitions() {
        assert_eq!(TraversalState::Start.break_block(), Some(Block::MinorBreak));
        assert_eq!(TraversalState::AfterOther.break_block(), Some(Block::MinorBreak));
        assert_eq!(TraversalState::AfterBreak.break_block(), Some(Block::GroupSpacer));
        assert_eq!(TraversalState::AfterTopic.break_block(), None);
    }

    #[test]
    fn test_three_breaks() {
        // br br br after a topic: nothing, spacer, spacer.
        let mut state = TraversalState::AfterTopic;
        let mut out = Vec::new();
        for _ in 0..3 {
            out.push(state.break_block());
            state = state.after_break();
        }
        assert_eq!(
            out,
            vec![None, Some(Block::GroupSpacer), Some(Block::GroupSpacer)]
        );
    }
}
