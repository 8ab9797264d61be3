use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{ThoughtIndex, ThoughtSelector};

use super::helpers::resolve_selectors;

pub fn run(index: &ThoughtIndex, selectors: &[ThoughtSelector]) -> Result<CmdResult> {
    let thoughts = resolve_selectors(index, selectors)?;
    Ok(CmdResult::default().with_listed_thoughts(thoughts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Thought;

    #[test]
    fn returns_selected_thoughts() {
        let mut index = ThoughtIndex::new();
        index.replace_all(vec![
            Thought::new("One".into(), "first".into(), vec![]),
            Thought::new("Two".into(), "second".into(), vec![]),
        ]);

        let result = run(&index, &[ThoughtSelector::Title("two".into())]).unwrap();
        assert_eq!(result.listed_thoughts.len(), 1);
        assert_eq!(result.listed_thoughts[0].thought.body, "second");
        assert_eq!(result.listed_thoughts[0].index, 2);
    }
}
