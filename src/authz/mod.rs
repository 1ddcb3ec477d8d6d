pub mod guard;
pub mod level;
pub mod policy;
pub mod resolver;

pub use guard::{require_level, AdminContext};
pub use level::AdminLevel;
pub use policy::{RoleListing, RolePolicy, SetRoleOutcome};
pub use resolver::RoleResolver;
