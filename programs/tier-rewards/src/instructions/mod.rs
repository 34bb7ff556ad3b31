pub mod initialize;
pub mod manage_roles;
pub mod pause;
pub mod administer_tiers;
pub mod submit_score;
pub mod batch_submit_scores;
pub mod queries;

// Remaining-account plumbing for batches
pub mod participant_accounts;

pub use initialize::*;
pub use manage_roles::*;
pub use pause::*;
pub use administer_tiers::*;
pub use submit_score::*;
pub use batch_submit_scores::*;
pub use queries::*;
