pub mod generate_controller;
pub mod interactive_controller;
pub mod topic_cards;

pub use generate_controller::GenerateController;
pub use interactive_controller::InteractiveController;
