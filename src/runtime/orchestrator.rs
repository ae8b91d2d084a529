use anyhow::{bail, Result};
use colored::Colorize;
use tracing::{info, warn};

use crate::{
    agent::HttpAgent,
    app::{load_config, load_config_from, Config},
    cli::{handle_command, hold_clipboard, Cli},
    platform::SystemClipboard,
    repl::run_repl,
    session::ConversationController,
};

use super::NonInteractiveRunner;

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    ///
    /// Configuration is resolved once here; `--base-url` wins over every file
    /// and environment layer.
    pub fn new(cli: Cli) -> Result<Self> {
        // An explicit --config must exist and parse; implicit files are best effort
        let mut config = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                load_config_from(std::slice::from_ref(path))?
            }
            None => load_config().unwrap_or_else(|e| {
                warn!("Failed to load config: {:#}. Using defaults.", e);
                Config::default()
            }),
        };

        if let Some(base_url) = &cli.base_url {
            config.agent.base_url = base_url.clone();
        }

        Ok(Self { cli, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        // Handle subcommands
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config).await? {
                return Ok(());
            }
        }

        let agent = HttpAgent::new(&self.config.agent)?;
        let mut clipboard = SystemClipboard::new();
        info!(base_url = %self.config.agent.base_url, "dialogue agent configured");

        if !self.cli.messages.is_empty() {
            let runner = NonInteractiveRunner::new(Box::new(agent), self.cli.copy);
            let result = runner.execute(&self.cli.messages, &mut clipboard).await?;
            println!("{}", runner.format_result(&result, self.cli.output_format));
            hold_clipboard(clipboard);

            if result.failures > 0 {
                std::process::exit(1);
            }
            return Ok(());
        }

        println!(
            "{} {}",
            "Connecting to".dimmed(),
            self.config.agent.base_url.green()
        );
        let mut controller = ConversationController::new();
        run_repl(&mut controller, &agent, &mut clipboard, &self.config.ui).await
    }
}
