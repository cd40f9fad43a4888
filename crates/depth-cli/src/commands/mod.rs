//! Command dispatch and handler modules.

mod resolve;

use miette::Result;

use crate::cli::Cli;

/// Route a parsed CLI invocation to the command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    resolve::exec(cli).await
}
