//--------------------------------------------------------------------------------------------------
// Token scopes
//--------------------------------------------------------------------------------------------------

/// Unrestricted access.
pub const SCOPE_ALL: &str = "mender.*";

/// Granted only while the user store is empty, for creating the first user.
pub const SCOPE_INITIAL_USER_CREATE: &str = "mender.users.initial.create";

/// The scopes the authorizer knows how to reason about. Anything else on the wire maps to
/// `Unknown`, which is never granted anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    All,
    InitialUserCreate,
    Unknown,
}

impl Scope {
    pub fn parse(scope: &str) -> Self {
        match scope {
            SCOPE_ALL => Scope::All,
            SCOPE_INITIAL_USER_CREATE => Scope::InitialUserCreate,
            _ => Scope::Unknown,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Scope::All => Some(SCOPE_ALL),
            Scope::InitialUserCreate => Some(SCOPE_INITIAL_USER_CREATE),
            Scope::Unknown => None,
        }
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
