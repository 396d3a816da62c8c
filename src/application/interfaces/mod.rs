mod credential_selector;
mod topic_generator;

pub use credential_selector::*;
pub use topic_generator::*;
