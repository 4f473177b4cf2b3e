use agrolead::{Config, cli, observability};
use agrolead_lead::{LeadFormType, Locale};
use anyhow::Result;
use clap::{Parser, Subcommand};

/// agrolead - lead capture for cocoa ingredient buyers
#[derive(Parser)]
#[command(name = "agrolead")]
#[command(about = "Lead form engine and submission service", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the field layout of a lead form as JSON
    Fields {
        /// quote, sample, specs, partnership or transit
        form_type: LeadFormType,

        /// Label language (defaults to i18n.default_locale)
        #[arg(long)]
        locale: Option<Locale>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            config.validate().map_err(anyhow::Error::msg)?;
            observability::init_observability(
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                &config.observability.log_level,
                config.observability.json,
            )?;

            cli::server::serve(config, host, port).await?;
        }
        Commands::Fields { form_type, locale } => {
            let locale = locale.unwrap_or_else(|| config.i18n.locale());
            cli::fields::print(form_type, locale)?;
        }
    }

    Ok(())
}
