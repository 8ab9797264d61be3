use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::ThoughtIndex;

pub fn run(index: &ThoughtIndex) -> Result<CmdResult> {
    Ok(CmdResult::default().with_tags(index.all_tags()))
}
