//! precompile_helper: reuse a cached precompiled header or rebuild it.
//!
//! Invoked by a build orchestrator once per compile with a source folder, a
//! build folder and the full compiler command line. When the cached
//! precompiled header in `<destfolder>/pch` is still valid the helper prints
//! one line and exits 0; otherwise it runs the compiler.

#![warn(missing_docs)]

mod check;

use std::process;

use clap::Parser;

/// Reuse or regenerate a cached precompiled header.
#[derive(Parser, Debug)]
#[command(name = "precompile_helper", version, about = "Precompiled header cache helper")]
pub struct Cli {
    /// Narrate every decision on stdout.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a `precompile_helper.toml` configuration file.
    #[arg(long)]
    pub config: Option<String>,

    /// Source folder, build folder, then the compiler and its arguments.
    ///
    /// Options are only recognized before the source folder; everything from
    /// there on is taken verbatim.
    #[arg(
        required = true,
        num_args = 3..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "SRCFOLDER DESTFOLDER COMPILER"
    )]
    pub operands: Vec<String>,
}

impl Cli {
    /// Splits the operands into folders and compiler command line.
    pub fn helper_args(&self) -> HelperArgs {
        let mut operands = self.operands.iter().cloned();
        HelperArgs {
            srcfolder: operands.next().unwrap_or_default(),
            destfolder: operands.next().unwrap_or_default(),
            compiler: operands.collect(),
        }
    }
}

/// Positional arguments of a helper run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperArgs {
    /// Folder containing the reference header. Surrounding quotes are stripped.
    pub srcfolder: String,
    /// Build folder that holds the `pch` cache. Surrounding quotes are stripped.
    pub destfolder: String,
    /// Compiler executable followed by its arguments, passed through verbatim.
    pub compiler: Vec<String>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to narrate every decision.
    pub verbose: bool,
    /// Optional path to a config file.
    pub config: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let helper = cli.helper_args();
    let global = GlobalArgs {
        verbose: cli.verbose,
        config: cli.config,
    };

    match check::run(&helper, &global) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
