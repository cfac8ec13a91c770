use crate::types::{Author, UserId};

/// The signed-in user's identity, as reported by the identity provider.
///
/// Constructed once at sign-in and passed explicitly into each screen
/// core that needs to stamp an author onto new records or comments.
/// There is deliberately no module-level "current user"; dropping the
/// session at sign-out is all the cleanup there is.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Author,
}

impl Session {
    pub fn new(user: Author) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }
}
