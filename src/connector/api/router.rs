use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{GenerateController, InteractiveController};

pub struct Router<'a> {
    generate_controller: GenerateController<'a>,
    interactive_controller: InteractiveController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            generate_controller: GenerateController::new(container),
            interactive_controller: InteractiveController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Generate { keywords, format } => {
                self.generate_controller.generate(keywords, format).await
            }
            Commands::Interactive => self.interactive_controller.run().await,
        }
    }
}
