use std::collections::HashMap;

use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{DisplayThought, ThoughtIndex, ThoughtQuery};

use super::helpers::indexed_thoughts;

/// Filters and sorts the index. Every entry keeps its canonical display
/// index, so the numbers shown can be passed to `view`, `edit` or `delete`.
pub fn run(index: &ThoughtIndex, query: &ThoughtQuery) -> Result<CmdResult> {
    let positions: HashMap<String, usize> = indexed_thoughts(index)
        .into_iter()
        .map(|dt| (dt.thought.id, dt.index))
        .collect();

    let listed = index
        .query(query)
        .into_iter()
        .filter_map(|t| {
            positions.get(&t.id).map(|&i| DisplayThought {
                index: i,
                thought: t.clone(),
            })
        })
        .collect();

    Ok(CmdResult::default().with_listed_thoughts(listed))
}
