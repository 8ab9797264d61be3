use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::ThoughtIndex;
use crate::store::thought_store::ThoughtStore;
use crate::store::{FolderHandle, FolderPicker};

/// Acquires `selection` and hydrates from it.
pub async fn open<P: FolderPicker>(
    store: &mut ThoughtStore<P::Handle>,
    index: &mut ThoughtIndex,
    picker: &P,
    selection: &Path,
) -> Result<CmdResult> {
    store.acquire(picker, selection).await?;
    run(store, index).await
}

/// Hydration: replaces the whole index with what is on disk.
pub async fn run<H: FolderHandle>(
    store: &ThoughtStore<H>,
    index: &mut ThoughtIndex,
) -> Result<CmdResult> {
    let thoughts = store.load_all().await?;
    let count = thoughts.len();
    index.replace_all(thoughts);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Loaded {} thoughts", count)));
    Ok(result)
}
