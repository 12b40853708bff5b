// Proposal drafting for saved opportunities.
// One completion call per request; the draft is returned, not stored.

pub mod generator;
pub mod handlers;
pub mod prompts;
