//! Comment composer state machine.

use courant_shared::RecordId;

/// Which post, if any, the comment input is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerState {
    #[default]
    Closed,
    Open(RecordId),
}

/// The comment input box: the post it is open on plus the draft text.
///
/// `Closed -> Open(id) -> Closed`; toggling the id that is already
/// open collapses the input, toggling a different id moves it there
/// directly with no intermediate `Closed`.
#[derive(Debug, Default)]
pub struct Composer {
    state: ComposerState,
    draft: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn is_open_for(&self, id: RecordId) -> bool {
        self.state == ComposerState::Open(id)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Toggle the composer for `id`.
    pub fn toggle(&mut self, id: RecordId) {
        self.state = match self.state {
            ComposerState::Open(current) if current == id => ComposerState::Closed,
            _ => ComposerState::Open(id),
        };
    }

    /// Close and clear the draft, called after a successful submit.
    pub fn reset(&mut self) {
        self.state = ComposerState::Closed;
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_the_open_post_collapses() {
        let mut composer = Composer::new();
        let five = RecordId::new();

        composer.toggle(five);
        assert!(composer.is_open_for(five));

        composer.toggle(five);
        assert_eq!(composer.state(), ComposerState::Closed);
    }

    #[test]
    fn toggling_another_post_moves_directly() {
        let mut composer = Composer::new();
        let five = RecordId::new();
        let nine = RecordId::new();

        composer.toggle(five);
        composer.toggle(nine);
        assert_eq!(composer.state(), ComposerState::Open(nine));
    }

    #[test]
    fn reset_clears_state_and_draft() {
        let mut composer = Composer::new();
        composer.toggle(RecordId::new());
        composer.set_draft("half-typed");

        composer.reset();
        assert_eq!(composer.state(), ComposerState::Closed);
        assert!(composer.draft().is_empty());
    }
}
