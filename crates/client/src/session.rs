//! Explicit authentication context.
//!
//! Views receive the current session instead of reading a global; the
//! not-authenticated case is a real variant, not a missing value.

use api_types::user::UserView;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        user_id: String,
        username: String,
    },
}

impl Session {
    pub fn from_login(user: &UserView) -> Self {
        Self::Authenticated {
            user_id: user.id.clone(),
            username: user.username.clone(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user_id, .. } => Some(user_id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Back to anonymous, e.g. on logout or account deletion.
    pub fn clear(&mut self) {
        *self = Self::Anonymous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_user_id() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn login_then_clear_roundtrip() {
        let mut session = Session::Authenticated {
            user_id: "abc".to_string(),
            username: "alice".to_string(),
        };
        assert_eq!(session.user_id(), Some("abc"));
        session.clear();
        assert_eq!(session, Session::Anonymous);
    }
}
