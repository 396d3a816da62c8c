mod completion_request;
mod session;
mod thesis_topic;

pub use completion_request::*;
pub use session::*;
pub use thesis_topic::*;
