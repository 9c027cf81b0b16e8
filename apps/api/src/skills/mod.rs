//! Skill taxonomy and the resume parse worker.
//!
//! The taxonomy is a global, append-mostly catalog (`skills`) joined to
//! per-user proficiency rows (`user_skills`). Every write here is an atomic
//! upsert so concurrent parse jobs for the same user cannot corrupt it.

pub mod extract;
pub mod prompts;
pub mod taxonomy;
pub mod worker;
