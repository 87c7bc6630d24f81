use clap::{CommandFactory, Parser};
use std::io::stdout;

#[derive(Debug, Parser)]
pub struct Opt {
	/// shell to generate the completion script for
	shell: clap_complete::Shell
}

/// Print the completion script of the whole `stickerpanel` command.
pub fn run(opt: Opt) -> anyhow::Result<()> {
	let mut command = crate::Opt::command();
	clap_complete::generate(opt.shell, &mut command, crate::CARGO_PKG_NAME, &mut stdout().lock());
	Ok(())
}
