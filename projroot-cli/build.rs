//! Build script for projroot-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("projroot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect project root discovery and formatter configuration")
        .long_about(
            "Locate the project root a formatter would use for a set of sources, \
             and show the configuration, target versions and ignore rules that apply",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tool")
                .long("tool")
                .help("Tool whose [tool.<NAME>] section is read")
                .value_name("NAME")
                .global(true)
                .default_value("black")
                .env("PROJROOT_TOOL"),
        )
        .subcommands(vec![
            Command::new("find-root")
                .about("Locate the project root for a set of sources")
                .long_about(
                    "Walk up from the common base of the sources to the first directory \
                     holding .git, .hg or a pyproject.toml with the tool's section",
                ),
            Command::new("show-config")
                .about("Show the normalized formatter configuration")
                .long_about("Print the tool section with normalized option names as TOML or JSON"),
            Command::new("target-versions")
                .about("Infer target Python versions from a requires-python value")
                .long_about("List the supported Python versions admitted by requires-python"),
            Command::new("user-config")
                .about("Show the user-level configuration path")
                .long_about("Print where the user-level configuration file is looked up"),
            Command::new("check-ignore")
                .about("Check paths against the project root's .gitignore")
                .long_about("Print the paths ignored by the .gitignore at the project root"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("projroot.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
