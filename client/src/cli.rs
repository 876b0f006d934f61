use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Othello Opening Book")]
#[clap(about = "Builds, scores and queries an othello opening book", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Import(ImportCommand),
    Propagate(ConfigArgs),
    Grow(GrowCommand),
    Stats(ConfigArgs),
    Lookup(LookupCommand),
}

#[derive(Args)]
pub struct ConfigArgs {
    #[clap(short, long, default_value_t = String::from("book.conf"))]
    pub config: String,
}

#[derive(Args)]
#[clap(about = "Adds every position of the games in a file, one transcript per line", long_about = None)]
pub struct ImportCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,

    pub games: String,
}

#[derive(Args)]
#[clap(about = "Extends the book below a position", long_about = None)]
pub struct GrowCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,

    /// Moves leading to the root, e.g. f5d6. Defaults to the initial position.
    #[clap(short, long, default_value_t = String::new())]
    pub moves: String,

    #[clap(short = 'n', long)]
    pub max_expansions: Option<usize>,
}

#[derive(Args)]
#[clap(about = "Prints the book entry and stored replies of a position as JSON", long_about = None)]
pub struct LookupCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,

    pub moves: String,
}
