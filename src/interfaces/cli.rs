use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cardex")]
#[command(about = "A command-line poker venue and tournament directory.")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long, global = true)]
    pub theme: Option<String>,

    /// Disable the progress spinner
    #[arg(long, global = true)]
    pub no_spinner: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List casinos in a country
    Casinos {
        /// Two-letter country code (e.g. SK)
        #[arg(short, long)]
        country: String,

        /// Filter by name or address (diacritic-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show one casino by id or slug
    Casino {
        /// Numeric venue id, or a name slug (slug lookup needs --country)
        selector: String,

        /// Country to resolve a slug in
        #[arg(short, long)]
        country: Option<String>,
    },

    /// List tournament festivals
    Events {
        /// Filter by venue name or city
        #[arg(short, long)]
        search: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// List running cash games
    Cash {
        /// Only games at this venue id
        #[arg(long)]
        venue: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show configuration and cache status
    Status,

    /// Generate config sample
    GenerateConfig,
}
