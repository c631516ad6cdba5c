use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `curalink` binary.
#[derive(Debug, Parser)]
#[command(
    name = "curalink",
    version,
    about = "CuraLink - patient and researcher collaboration backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file path, or `:memory:` (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load publications, clinical trials, and experts from a JSON file
    Import {
        /// Path to a JSON document with `publications`, `clinical_trials`, `experts`
        file: String,
    },
}

impl Cli {
    /// The subcommand to run, with `serve` as the default.
    #[must_use]
    pub fn command_or_default(&self) -> Commands {
        match &self.command {
            Some(Commands::Serve { host, port }) => Commands::Serve {
                host: host.clone(),
                port: *port,
            },
            Some(Commands::Import { file }) => Commands::Import { file: file.clone() },
            None => Commands::Serve {
                host: None,
                port: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["curalink"]).expect("cli should parse");
        assert!(matches!(
            cli.command_or_default(),
            Commands::Serve {
                host: None,
                port: None
            }
        ));
    }

    #[test]
    fn serve_overrides_parse() {
        let cli = Cli::try_parse_from([
            "curalink",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
        ])
        .expect("cli should parse");
        match cli.command_or_default() {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            Commands::Import { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "curalink",
            "import",
            "catalog.json",
            "--database",
            ":memory:",
            "--verbose",
        ])
        .expect("cli should parse");
        assert!(cli.verbose);
        assert_eq!(cli.database.as_deref(), Some(":memory:"));
        assert!(matches!(cli.command, Some(Commands::Import { ref file }) if file == "catalog.json"));
    }

    #[test]
    fn import_requires_file() {
        assert!(Cli::try_parse_from(["curalink", "import"]).is_err());
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(Cli::try_parse_from(["curalink", "serve", "--port", "99999"]).is_err());
    }
}
