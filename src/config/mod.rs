pub mod settings;

pub use settings::{RemapEntry, Settings};

#[cfg(feature = "cli")]
mod cli {
    use clap::Parser;

    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "setforge")]
    #[command(about = "Aggregates champion build statistics into item set documents")]
    pub struct CliConfig {
        /// Base URL of the statistics provider.
        #[arg(long, default_value = "https://stats.example.com/lol")]
        pub base_url: String,

        /// Champions to process, comma-delimited.
        #[arg(long, value_delimiter = ',', required = true)]
        pub champions: Vec<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        /// Path to the TOML settings file; defaults apply when absent.
        #[arg(long, default_value = "./setforge.toml")]
        pub settings_path: String,

        #[arg(long, default_value = "5")]
        pub concurrent_requests: usize,

        /// Per-fetch timeout in seconds.
        #[arg(long, default_value = "10")]
        pub timeout_seconds: u64,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("base_url", &self.base_url)?;
            validate_path("output_path", &self.output_path)?;
            validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
            validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
