//! A single helper run: settings, staleness check, then reuse or compile.

use std::path::Path;

use pch_common::OsFileSystem;
use pch_config::{CompilerConfig, HelperConfig, LaunchSetting};
use pch_engine::{run_helper, ArtifactSet, Event, Reporter, TerminalReporter};
use pch_launch::{Invocation, LaunchMode, Launcher, OutputFilter, ProcessLauncher};

use crate::{GlobalArgs, HelperArgs};

/// Runs the helper with the real filesystem, terminal and compiler.
///
/// Returns the exit code: 0 on a cache hit, the launcher's code otherwise.
pub fn run(args: &HelperArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global)?;
    let mut reporter = TerminalReporter::new(global.verbose);
    let mut launcher = process_launcher(&config.compiler);
    execute(args, &config, &mut reporter, &mut launcher)
}

/// The run itself, with output and process launching supplied by the caller.
pub fn execute(
    args: &HelperArgs,
    config: &HelperConfig,
    reporter: &mut dyn Reporter,
    launcher: &mut dyn Launcher,
) -> Result<i32, Box<dyn std::error::Error>> {
    reporter.emit(Event::Banner {
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    let artifacts = ArtifactSet::new(
        Path::new(unquote_arg(&args.srcfolder)),
        Path::new(unquote_arg(&args.destfolder)),
        &config.layout,
    );
    let invocation = Invocation::from_argv(args.compiler.clone())?;

    let outcome = run_helper(
        &artifacts,
        &invocation,
        config,
        &OsFileSystem,
        reporter,
        launcher,
    )?;
    Ok(outcome.exit_code())
}

/// Loads the config file named by `--config`, or the defaults.
pub fn load_settings(global: &GlobalArgs) -> Result<HelperConfig, pch_config::ConfigError> {
    match &global.config {
        Some(path) => pch_config::load_config(Path::new(path)),
        None => Ok(HelperConfig::default()),
    }
}

/// Builds the real launcher described by the `[compiler]` settings.
pub fn process_launcher(compiler: &CompilerConfig) -> ProcessLauncher {
    let mode = match compiler.launch {
        LaunchSetting::Auto => LaunchMode::platform_default(),
        LaunchSetting::Replace => LaunchMode::Replace,
        LaunchSetting::Relay => LaunchMode::Relay,
    };
    ProcessLauncher::new(mode)
        .with_filter(OutputFilter {
            strip_carriage_returns: compiler.strip_carriage_returns,
        })
        .with_exit_status_propagation(compiler.propagate_exit_status)
}

/// Strips one pair of surrounding double quotes.
///
/// The argument must start and end with `"` and have at least one character
/// in between; `""` is returned unchanged.
pub fn unquote_arg(arg: &str) -> &str {
    if arg.len() > 2 && arg.starts_with('"') && arg.ends_with('"') {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}
