use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest thesis topics for a set of keywords
    Generate {
        /// Keywords describing the research area (joined with spaces)
        keywords: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Enter keywords line by line; re-select the API key when it is rejected
    Interactive,
}
