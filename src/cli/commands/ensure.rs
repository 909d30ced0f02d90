use super::CommandHandler;
use crate::config::ToolPaths;
use crate::trust::{EnsureTrusted, KeychainTrustStore, TrustOutcome};
use crate::Result;
use std::path::PathBuf;
use tracing::debug;

/// Handler for the `ensure` command
pub struct EnsureCommand {
    pub cert_file: PathBuf,
    pub json: bool,
    pub tools: ToolPaths,
}

impl CommandHandler for EnsureCommand {
    fn execute(&self) -> Result<()> {
        let certificate = std::fs::read(&self.cert_file)?;
        debug!(
            "Read {} bytes from {}",
            certificate.len(),
            self.cert_file.display()
        );

        let workflow = EnsureTrusted::new(KeychainTrustStore::new(&self.tools));
        let outcome = workflow.ensure_trusted(&certificate)?;
        println!("{}", render_outcome(outcome, self.json));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ensure"
    }
}

impl EnsureCommand {
    /// Create new ensure command
    pub fn new(cert_file: PathBuf, json: bool, tools: ToolPaths) -> Self {
        Self {
            cert_file,
            json,
            tools,
        }
    }
}

fn render_outcome(outcome: TrustOutcome, json: bool) -> String {
    if json {
        serde_json::json!({ "outcome": outcome }).to_string()
    } else {
        match outcome {
            TrustOutcome::AlreadyTrusted => "already trusted".to_string(),
            TrustOutcome::Added => "added".to_string(),
        }
    }
}
