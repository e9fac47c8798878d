//! Instruction handlers for Agora Court

pub mod constants;
pub mod participation_helpers;
pub mod settlement_helpers;
pub mod token_helpers;

pub mod claim;
pub mod close_dispute;
pub mod edit_court;
pub mod initialize_case;
pub mod initialize_court;
pub mod initialize_dispute;
pub mod initialize_record;
pub mod interact;
pub mod reveal_vote;
pub mod select_vote;

#[allow(ambiguous_glob_reexports)]
pub use claim::*;
#[allow(ambiguous_glob_reexports)]
pub use close_dispute::*;
#[allow(ambiguous_glob_reexports)]
pub use edit_court::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_case::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_court::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_dispute::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_record::*;
#[allow(ambiguous_glob_reexports)]
pub use interact::*;
#[allow(ambiguous_glob_reexports)]
pub use reveal_vote::*;
#[allow(ambiguous_glob_reexports)]
pub use select_vote::*;
