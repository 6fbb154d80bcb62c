use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Global role assigned to every user account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Engineer,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Engineer => "Engineer",
            Role::Viewer => "Viewer",
        }
    }

    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Engineer, Role::Viewer]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}' (expected Admin, Engineer or Viewer)", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "engineer" => Ok(Role::Engineer),
            "viewer" => Ok(Role::Viewer),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" engineer ".parse::<Role>(), Ok(Role::Engineer));
        assert_eq!("Viewer".parse::<Role>(), Ok(Role::Viewer));
    }

    #[test]
    fn rejects_unknown_roles() {
        assert!("owner".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn display_matches_stored_form() {
        for role in Role::all() {
            assert_eq!(role.to_string().parse::<Role>(), Ok(*role));
        }
    }
}
