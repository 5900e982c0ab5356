//! completion command - Print a completion script for the `xcodeproj` CLI

use std::io::Write;

use anyhow::{Context as _, Result};
use clap::CommandFactory;

use crate::cli::args::{Cli, Shell};

/// Print the completion script for `shell` on stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_script(shell, &mut out)?;
    out.flush().context("Failed to write completion script")
}

fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut command = Cli::command();
    let bin = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, bin, out);
    Ok(())
}
