use clap::Parser;
use std::path::PathBuf;
use thoughts::api::{ConfigAction, ThoughtUpdate, ThoughtsApi};
use thoughts::config::config_dir;
use thoughts::error::Result;
use thoughts::index::{SortKey, SortOrder};
use thoughts::logging::init_logging;
use thoughts::store::fs_folder::FsPicker;

mod args;
mod cli;

use args::{Cli, Commands};
use cli::print::{
    print_config, print_full_thoughts, print_messages, print_tags, print_thoughts,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type Api = ThoughtsApi<FsPicker>;

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut api = ThoughtsApi::new(FsPicker::new(), config_dir()?)?;

    // These two do not need the notes folder loaded.
    let command = match cli.command {
        Some(Commands::Init { folder }) => return handle_init(&mut api, folder).await,
        Some(Commands::Config { key, value }) => return handle_config(&mut api, key, value),
        other => other,
    };

    api.open(cli.root.as_deref()).await?;

    match command {
        Some(Commands::Create { title, body, tags }) => {
            handle_create(&mut api, title, body, tags).await
        }
        Some(Commands::List {
            search,
            tag,
            sort,
            order,
        }) => handle_list(&api, search, tag, sort, order),
        Some(Commands::View { selectors }) => handle_view(&api, selectors),
        Some(Commands::Edit {
            selectors,
            title,
            body,
            tags,
            clear_tags,
        }) => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            let update = ThoughtUpdate { title, body, tags };
            handle_edit(&mut api, selectors, update).await
        }
        Some(Commands::Delete { selectors }) => handle_delete(&mut api, selectors).await,
        Some(Commands::Tags) => handle_tags(&api),
        Some(Commands::Init { .. }) | Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&api, None, None, None, None),
    }
}

async fn handle_init(api: &mut Api, folder: PathBuf) -> Result<()> {
    let result = api.init(&folder).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_create(
    api: &mut Api,
    title: String,
    body: String,
    tags: Vec<String>,
) -> Result<()> {
    let result = api.create_thought(title, body, tags).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    api: &Api,
    search: Option<String>,
    tag: Option<String>,
    sort: Option<SortKey>,
    order: Option<SortOrder>,
) -> Result<()> {
    let result = api.list_thoughts(search, tag, sort, order)?;
    print_thoughts(&result.listed_thoughts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &Api, selectors: Vec<String>) -> Result<()> {
    let result = api.view_thoughts(&selectors)?;
    print_full_thoughts(&result.listed_thoughts);
    print_messages(&result.messages);
    Ok(())
}

async fn handle_edit(api: &mut Api, selectors: Vec<String>, update: ThoughtUpdate) -> Result<()> {
    let result = api.update_thoughts(&selectors, &update).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_delete(api: &mut Api, selectors: Vec<String>) -> Result<()> {
    let result = api.delete_thoughts(&selectors).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(api: &Api) -> Result<()> {
    let result = api.tags()?;
    print_tags(&result.tags);
    Ok(())
}

fn handle_config(api: &mut Api, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = api.config_action(action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
