use crate::error::{Result, ThoughtsError};
use crate::index::{index_thoughts, DisplayThought, ThoughtIndex, ThoughtSelector};

pub fn indexed_thoughts(index: &ThoughtIndex) -> Vec<DisplayThought> {
    index_thoughts(index.iter())
}

/// Resolves selectors to display entries, in selector order, without
/// duplicates. A title selector matches every thought whose title contains
/// the term, ignoring case.
pub fn resolve_selectors(
    index: &ThoughtIndex,
    selectors: &[ThoughtSelector],
) -> Result<Vec<DisplayThought>> {
    let indexed = indexed_thoughts(index);
    let mut resolved: Vec<DisplayThought> = Vec::new();

    for selector in selectors {
        let matches: Vec<&DisplayThought> = match selector {
            ThoughtSelector::Index(n) => indexed.iter().filter(|dt| dt.index == *n).collect(),
            ThoughtSelector::Title(term) => {
                let term = term.to_lowercase();
                indexed
                    .iter()
                    .filter(|dt| dt.thought.title.to_lowercase().contains(&term))
                    .collect()
            }
        };

        if matches.is_empty() {
            return Err(match selector {
                ThoughtSelector::Index(n) => ThoughtsError::Api(format!("Index {} not found", n)),
                ThoughtSelector::Title(_) => {
                    ThoughtsError::Api(format!("No thought matches {}", selector))
                }
            });
        }

        for dt in matches {
            if !resolved.iter().any(|r| r.thought.id == dt.thought.id) {
                resolved.push(dt.clone());
            }
        }
    }

    Ok(resolved)
}
