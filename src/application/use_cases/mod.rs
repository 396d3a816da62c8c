mod topic_session;

pub use topic_session::*;
