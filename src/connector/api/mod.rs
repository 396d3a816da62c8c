pub mod container;
pub mod controller;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use controller::{GenerateController, InteractiveController};
pub use router::Router;
