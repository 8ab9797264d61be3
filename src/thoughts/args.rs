use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thoughts::index::{SortKey, SortOrder};

#[derive(Parser, Debug)]
#[command(name = "thoughts")]
#[command(about = "Markdown notes kept in a folder you choose", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Notes folder for this run (overrides the configured one)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose the notes folder and remember it
    Init {
        /// Folder holding the notes
        folder: PathBuf,
    },

    /// Create a new thought
    #[command(alias = "add", alias = "n")]
    Create {
        /// Title of the thought
        title: String,

        /// Body text (`#word` adds a tag)
        body: String,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List thoughts
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text to look for in titles, bodies and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Only thoughts with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// created, updated, title or custom (custom is folder order here)
        #[arg(long)]
        sort: Option<SortKey>,

        /// asc or desc
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// View one or more thoughts
    #[command(alias = "v")]
    View {
        /// Indexes (e.g. 1 3) or words from a title
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Change the title, body or tags of thoughts
    #[command(alias = "e")]
    Edit {
        /// Indexes (e.g. 1 3) or words from a title
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long)]
        body: Option<String>,

        /// Replace the tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Remove all explicit tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },

    /// Move thoughts to the trash folder
    #[command(alias = "rm")]
    Delete {
        /// Indexes (e.g. 1 3) or words from a title
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// List every tag in use
    Tags,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. sort-by)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
