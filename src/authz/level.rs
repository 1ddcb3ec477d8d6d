use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Admin privilege tier. Privilege ordering is owner > super_admin >
/// event_admin, but the levels do not inherit from each other: every
/// policy rule names the levels it applies to explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    Owner,
    SuperAdmin,
    EventAdmin,
}

impl AdminLevel {
    /// Every level, for guards that accept any admin.
    pub const ALL: [AdminLevel; 3] = [
        AdminLevel::Owner,
        AdminLevel::SuperAdmin,
        AdminLevel::EventAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminLevel::Owner => "owner",
            AdminLevel::SuperAdmin => "super_admin",
            AdminLevel::EventAdmin => "event_admin",
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(AdminLevel::Owner),
            "super_admin" => Ok(AdminLevel::SuperAdmin),
            "event_admin" => Ok(AdminLevel::EventAdmin),
            _ => Err(()),
        }
    }
}
