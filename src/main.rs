use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use topstats::{
    Config, cli, config, error,
    types::{ItemType, TimeRange, TopItemsRequest},
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show your top tracks or artists
    Stats(StatsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Rank tracks or artists
    #[clap(long = "type", value_enum, default_value_t = ItemType::Tracks)]
    pub item_type: ItemType,

    /// Time window: about 4 weeks, 6 months or a year
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub range: TimeRange,

    /// Number of items, 1 to 50
    #[clap(long, default_value_t = 20, allow_negative_numbers = true)]
    pub limit: i64,

    /// Show audio feature statistics (tracks only)
    #[clap(long)]
    pub features: bool,

    /// Save the tracks as a new public playlist (tracks only)
    #[clap(long)]
    pub playlist: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    // An invalid limit is reported before the environment is even read
    if let Command::Stats(opt) = &cli.command {
        if let Err(e) = utils::validate_limit(opt.limit) {
            error!("{}", e);
        }
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Auth => cli::auth(&config).await,
        Command::Stats(opt) => {
            let request = TopItemsRequest {
                item_type: opt.item_type,
                time_range: opt.range,
                limit: opt.limit,
            };
            cli::stats(&config, request, opt.features, opt.playlist).await
        }
        Command::Completions(_) => {}
    }
}
