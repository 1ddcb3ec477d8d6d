// Two security tiers: public routes need no credential, protected
// routes pass through the admin guard before any business logic runs.
pub mod protected;
pub mod public;
