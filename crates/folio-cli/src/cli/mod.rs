use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::GlobalFlags;
pub use root_commands::Commands;

/// Top-level CLI parser for the `folio` binary.
#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Folio - resolve, extract and export stories from a story index"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Story index document (overrides sources.index_path)
    #[arg(long, global = true)]
    pub index: Option<String>,

    /// Directory holding the JSON modules (overrides sources.modules_root)
    #[arg(long, global = true)]
    pub modules: Option<String>,

    /// Project annotations JSON file
    #[arg(long, global = true)]
    pub annotations: Option<String>,

    /// Single-line JSON output
    #[arg(long, global = true)]
    pub compact: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            index: self.index.clone(),
            modules: self.modules.clone(),
            annotations: self.annotations.clone(),
            compact: self.compact,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::Cli;
    use super::root_commands::{Commands, ExportVersion};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "folio",
            "--index",
            "static/index.json",
            "--compact",
            "--verbose",
            "extract",
        ])
        .expect("cli should parse");

        assert_eq!(cli.index.as_deref(), Some("static/index.json"));
        assert!(cli.compact);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Extract(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["folio", "export", "v3", "--modules", "stories", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.modules.as_deref(), Some("stories"));
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Export(ref args) if args.version == ExportVersion::V3
        ));
    }

    #[test]
    fn export_rejects_unknown_version() {
        assert!(Cli::try_parse_from(["folio", "export", "v9"]).is_err());
    }

    #[test]
    fn story_takes_id_and_args() {
        let cli = Cli::try_parse_from([
            "folio",
            "story",
            "button--primary",
            "--force-initial-args",
            "--args",
            r#"{"label":"Hi"}"#,
        ])
        .expect("cli should parse");

        let Commands::Story(args) = cli.command else {
            panic!("expected story command");
        };
        assert_eq!(args.id, "button--primary");
        assert!(args.force_initial_args);
        assert_eq!(args.args.as_deref(), Some(r#"{"label":"Hi"}"#));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["folio", "--annotations", "preview.json", "index"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.annotations.as_deref(), Some("preview.json"));
    }
}
