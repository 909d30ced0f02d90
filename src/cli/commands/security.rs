use super::CommandHandler;
use crate::command_executor::SecurityTool;
use crate::settings::{Settings, Subcommand};
use crate::Result;

/// Handler for the `verify`, `add` and `remove` commands
pub struct SecurityCommand {
    pub subcommand: Subcommand,
    pub settings: Settings,
    pub tool: SecurityTool,
}

impl CommandHandler for SecurityCommand {
    fn execute(&self) -> Result<()> {
        let output = self.tool.run(self.subcommand, &self.settings)?;
        print!("{output}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.subcommand {
            Subcommand::VerifyCert => "verify",
            Subcommand::AddTrustedCert => "add",
            Subcommand::RemoveTrustedCert => "remove",
        }
    }
}

impl SecurityCommand {
    /// Create new security command
    pub fn new(subcommand: Subcommand, settings: Settings, tool: SecurityTool) -> Self {
        Self {
            subcommand,
            settings,
            tool,
        }
    }
}
