use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use vinylcli::{
    cli, config, server,
    types::{CoverChange, Record, RecordChanges},
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
    /// Add a record to the collection
    Add(AddOptions),

    /// Display the collection
    List,

    /// Search the collection
    Search(SearchOptions),

    /// Edit a record
    Edit(EditOptions),

    /// Delete a record
    Delete(DeleteOptions),

    /// Sort the collection and save the new order
    Sort(SortOptions),

    /// Handle cover art
    Covers(CoversOptions),

    /// Run the web interface
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AddOptions {
    /// Artist name
    #[clap(long)]
    pub artist: String,

    /// Album title
    #[clap(long)]
    pub album: String,

    #[clap(long, default_value = "")]
    pub genre: String,

    /// Release year
    #[clap(long, default_value = "")]
    pub year: String,

    /// Format (LP, 7", CD, etc.)
    #[clap(long, default_value = "")]
    pub format: String,

    #[clap(long, default_value = "")]
    pub notes: String,

    /// Download cover art from this URL
    #[clap(long)]
    pub cover_url: Option<String>,

    /// Look up and download cover art automatically
    #[clap(long)]
    pub fetch_cover: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Match artist names containing this term
    #[clap(long)]
    pub artist: Option<String>,

    /// Match album titles containing this term
    #[clap(long)]
    pub album: Option<String>,

    /// Match genres containing this term
    #[clap(long)]
    pub genre: Option<String>,

    /// Match this exact year
    #[clap(long)]
    pub year: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditOptions {
    /// Record number as shown by `vinylcli list`
    pub number: usize,

    #[clap(long)]
    pub artist: Option<String>,

    #[clap(long)]
    pub album: Option<String>,

    #[clap(long)]
    pub genre: Option<String>,

    #[clap(long)]
    pub year: Option<String>,

    #[clap(long)]
    pub format: Option<String>,

    #[clap(long)]
    pub notes: Option<String>,

    /// Download cover art from this URL (overrides other cover options)
    #[clap(long)]
    pub cover_url: Option<String>,

    /// Remove the record's cover
    #[clap(long, conflicts_with = "cover_url")]
    pub clear_cover: bool,

    /// Look up and download cover art automatically
    #[clap(long, conflicts_with_all = ["cover_url", "clear_cover"])]
    pub fetch_cover: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOptions {
    /// Record number as shown by `vinylcli list`
    pub number: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct SortOptions {
    /// Field to sort by
    #[clap(value_enum)]
    pub key: cli::SortKey,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle cover art")]
pub struct CoversOptions {
    #[command(subcommand)]
    pub command: CoversSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CoversSubcommand {
    /// Find records with missing covers and download what can be found
    Repair,

    /// Delete a record's cover file and clear its cover path
    Clear(DeleteOptions),
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    config::load_env().await;

    let cli = Cli::parse();

    match cli.command {
        Command::Add(opt) => {
            let record = Record {
                artist: opt.artist,
                album: opt.album,
                genre: opt.genre,
                year: opt.year,
                format: opt.format,
                notes: opt.notes,
                cover_path: None,
            };
            cli::add(record, opt.cover_url, opt.fetch_cover).await
        }

        Command::List => cli::list().await,

        Command::Search(opt) => cli::search(opt.artist, opt.album, opt.genre, opt.year).await,

        Command::Edit(opt) => {
            let changes = RecordChanges {
                artist: opt.artist,
                album: opt.album,
                genre: opt.genre,
                year: opt.year,
                format: opt.format,
                notes: opt.notes,
                cover_path: if opt.clear_cover {
                    CoverChange::Clear
                } else {
                    CoverChange::Unspecified
                },
            };
            cli::edit(opt.number, changes, opt.fetch_cover, opt.cover_url).await
        }

        Command::Delete(opt) => cli::delete(opt.number).await,

        Command::Sort(opt) => cli::sort(opt.key).await,

        Command::Covers(opt) => match opt.command {
            CoversSubcommand::Repair => cli::repair_covers().await,
            CoversSubcommand::Clear(c) => cli::clear_cover(c.number).await,
        },

        Command::Serve => server::start_web_server().await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
