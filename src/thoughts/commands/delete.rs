use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{ThoughtIndex, ThoughtSelector};
use crate::store::thought_store::ThoughtStore;
use crate::store::FolderHandle;

use super::helpers::resolve_selectors;

/// Moves each selected thought's file to the trash and drops it from the
/// index. Stops at the first failure; thoughts handled before it stay
/// deleted.
pub async fn run<H: FolderHandle>(
    store: &ThoughtStore<H>,
    index: &mut ThoughtIndex,
    selectors: &[ThoughtSelector],
) -> Result<CmdResult> {
    let resolved = resolve_selectors(index, selectors)?;
    let mut result = CmdResult::default();

    for dt in resolved {
        let name = store.soft_delete(&dt.thought).await?;
        index.remove(&dt.thought.id);
        result.add_message(CmdMessage::success(format!(
            "Thought deleted ({}): {}",
            dt.index, dt.thought.title
        )));
        result.file_names.push(name);
        result.affected_thoughts.push(dt.thought);
    }

    Ok(result)
}
