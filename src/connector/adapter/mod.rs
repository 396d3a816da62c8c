mod credential_store;
mod gemini_client;
mod mock_topic_generator;
mod terminal_credential_selector;
mod terminal_input;

pub use credential_store::*;
pub use gemini_client::*;
pub use mock_topic_generator::*;
pub use terminal_credential_selector::*;
pub use terminal_input::*;
