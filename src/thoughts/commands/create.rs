use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ThoughtsError};
use crate::index::ThoughtIndex;
use crate::model::Thought;
use crate::store::thought_store::ThoughtStore;
use crate::store::FolderHandle;

/// Title and body must both have content. Tags are trimmed.
pub async fn run<H: FolderHandle>(
    store: &ThoughtStore<H>,
    index: &mut ThoughtIndex,
    title: String,
    body: String,
    tags: Vec<String>,
) -> Result<CmdResult> {
    if title.trim().is_empty() {
        return Err(ThoughtsError::Api("Title is required".to_string()));
    }
    if body.trim().is_empty() {
        return Err(ThoughtsError::Api("Body is required".to_string()));
    }

    let tags = tags.into_iter().map(|t| t.trim().to_string()).collect();
    let thought = Thought::new(title.trim().to_string(), body, tags);
    let name = store.save(&thought).await?;
    index.insert(thought.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Thought created: {}",
        thought.title
    )));
    result.file_names.push(name);
    result.affected_thoughts.push(thought);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{fixture, tags};

    #[tokio::test]
    async fn writes_file_and_indexes() {
        let mut fx = fixture().await;
        let result = run(
            &fx.store,
            &mut fx.index,
            "Groceries".into(),
            "eggs, milk #errands".into(),
            tags(&[" home "]),
        )
        .await
        .unwrap();

        assert_eq!(result.file_names, vec!["groceries.md"]);
        assert_eq!(fx.index.len(), 1);
        assert_eq!(result.affected_thoughts[0].tags, tags(&["home", "errands"]));
        assert_eq!(
            fx.root.get("groceries.md").unwrap(),
            "# Groceries\n\neggs, milk #errands\n\nTags: home, errands"
        );
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let mut fx = fixture().await;
        let result = run(&fx.store, &mut fx.index, "  ".into(), "b".into(), vec![]).await;
        assert!(result.is_err());
        assert!(fx.root.file_names().is_empty());
        assert!(fx.index.is_empty());
    }

    #[tokio::test]
    async fn blank_body_is_rejected() {
        let mut fx = fixture().await;
        let result = run(&fx.store, &mut fx.index, "T".into(), "\n".into(), vec![]).await;
        assert!(matches!(result, Err(ThoughtsError::Api(ref m)) if m == "Body is required"));
    }

    #[tokio::test]
    async fn failed_write_leaves_index_untouched() {
        let mut fx = fixture().await;
        fx.root.set_fail_writes(true);
        let result = run(&fx.store, &mut fx.index, "T".into(), "b".into(), vec![]).await;
        assert!(result.is_err());
        assert!(fx.index.is_empty());
    }
}
