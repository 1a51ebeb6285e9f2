use std::fmt;

use crate::identity::IdentityRecord;

/// Where the visitor stands, derived from the Session Store.
///
/// Never stored on its own: always computed from whether bootstrapping has
/// resolved and from the identity record (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Bootstrapping has not resolved yet
    Unknown,
    Anonymous,
    /// Signed in, profile setup still pending
    AuthenticatedIncomplete,
    AuthenticatedComplete,
}

impl SessionState {
    pub fn derive(resolved: bool, identity: Option<&IdentityRecord>) -> Self {
        if !resolved {
            return SessionState::Unknown;
        }
        match identity {
            None => SessionState::Anonymous,
            Some(record) if record.profile_setup => SessionState::AuthenticatedComplete,
            Some(_) => SessionState::AuthenticatedIncomplete,
        }
    }

    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            SessionState::AuthenticatedIncomplete | SessionState::AuthenticatedComplete
        )
    }

    pub fn is_profile_complete(self) -> bool {
        self == SessionState::AuthenticatedComplete
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Unknown => "unknown",
            SessionState::Anonymous => "anonymous",
            SessionState::AuthenticatedIncomplete => "authenticated (profile incomplete)",
            SessionState::AuthenticatedComplete => "authenticated",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(profile_setup: bool) -> IdentityRecord {
        IdentityRecord {
            id: "u1".into(),
            email: "ada@example.com".into(),
            first_name: None,
            last_name: None,
            profile_setup,
            image: None,
            color: None,
        }
    }

    #[test]
    fn test_unresolved_is_unknown_even_with_identity() {
        assert_eq!(SessionState::derive(false, None), SessionState::Unknown);
        assert_eq!(
            SessionState::derive(false, Some(&record(true))),
            SessionState::Unknown
        );
    }

    #[test]
    fn test_resolved_states() {
        assert_eq!(SessionState::derive(true, None), SessionState::Anonymous);
        assert_eq!(
            SessionState::derive(true, Some(&record(false))),
            SessionState::AuthenticatedIncomplete
        );
        assert_eq!(
            SessionState::derive(true, Some(&record(true))),
            SessionState::AuthenticatedComplete
        );
    }

    #[test]
    fn test_predicates() {
        assert!(!SessionState::Unknown.is_authenticated());
        assert!(!SessionState::Anonymous.is_authenticated());
        assert!(SessionState::AuthenticatedIncomplete.is_authenticated());
        assert!(!SessionState::AuthenticatedIncomplete.is_profile_complete());
        assert!(SessionState::AuthenticatedComplete.is_profile_complete());
    }
}
