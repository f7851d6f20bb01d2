//! Command-line interface definitions for `tslocale-check`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Validate `.ts` message catalogs.
#[derive(Parser, Debug)]
#[command(name = "tslocale-check")]
#[command(version, about)]
#[command(long_about = concat!(
    "Validate .ts message catalogs.\n\n",
    "The check command parses each catalog, reports duplicate entries, ",
    "placeholder mismatches and untranslated messages, and exits non-zero ",
    "when a catalog cannot be loaded. The resolve command loads catalogs and ",
    "prints how a single message renders in a given language, which is handy ",
    "for confirming a translation before shipping it.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Check every catalog in a directory:\n",
    "    $ tslocale-check check resources/i18n/*.ts\n\n",
    "  Fail on warnings as well as errors:\n",
    "    $ tslocale-check check --deny-warnings resources/i18n/app_de.ts\n\n",
    "  Render a message in German:\n",
    "    $ tslocale-check resolve -c resources/i18n/app_de.ts -l de_DE \\\n",
    "        --context QObject \"Set folder to %1\" /home/user",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse catalogs and report load diagnostics.
    Check(CheckArgs),

    /// Render one message through loaded catalogs.
    Resolve(ResolveArgs),
}

/// Arguments for the check command.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Catalog files to check.
    #[arg(required = true, value_name = "FILE")]
    pub catalogs: Vec<Utf8PathBuf>,

    /// Treat warnings as failures.
    #[arg(long)]
    pub deny_warnings: bool,

    /// Treat unfinished translations as untranslated.
    #[arg(long)]
    pub exclude_unfinished: bool,

    /// Only print warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the resolve command.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Catalog file to load; repeat for several.
    #[arg(short, long = "catalog", value_name = "FILE")]
    pub catalogs: Vec<Utf8PathBuf>,

    /// Language to activate before resolving.
    #[arg(short, long)]
    pub language: String,

    /// Message context.
    #[arg(long, default_value = "")]
    pub context: String,

    /// Source text of the message.
    pub source: String,

    /// Positional values for `%1`, `%2`, ...
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_check_defaults() {
        let cli = Cli::parse_from(["tslocale-check", "check", "app_de.ts"]);

        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.catalogs, vec![Utf8PathBuf::from("app_de.ts")]);
                assert!(!args.deny_warnings);
                assert!(!args.exclude_unfinished);
                assert!(!args.quiet);
                assert!(!args.json);
            }
            Command::Resolve(_) => panic!("expected Check command"),
        }
    }

    #[rstest]
    fn check_requires_a_catalog() {
        assert!(Cli::try_parse_from(["tslocale-check", "check"]).is_err());
    }

    #[rstest]
    fn parses_resolve_with_arguments() {
        let cli = Cli::parse_from([
            "tslocale-check",
            "resolve",
            "-c",
            "app_de.ts",
            "--catalog",
            "app_fr.ts",
            "-l",
            "de_DE",
            "--context",
            "QObject",
            "[VISION] Decoding image batch %1/%2 (%3%)",
            "4",
            "10",
            "40",
        ]);

        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.catalogs.len(), 2);
                assert_eq!(args.language, "de_DE");
                assert_eq!(args.context, "QObject");
                assert_eq!(args.source, "[VISION] Decoding image batch %1/%2 (%3%)");
                assert_eq!(args.args, vec!["4", "10", "40"]);
            }
            Command::Check(_) => panic!("expected Resolve command"),
        }
    }

    #[rstest]
    fn resolve_context_defaults_to_global() {
        let cli = Cli::parse_from(["tslocale-check", "resolve", "-l", "en_US", "Ready"]);

        match cli.command {
            Command::Resolve(args) => assert_eq!(args.context, ""),
            Command::Check(_) => panic!("expected Resolve command"),
        }
    }
}
