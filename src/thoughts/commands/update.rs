use tracing::warn;

use crate::commands::{CmdMessage, CmdResult, ThoughtUpdate};
use crate::error::{Result, ThoughtsError};
use crate::index::{ThoughtIndex, ThoughtSelector};
use crate::naming::file_name_for;
use crate::store::thought_store::ThoughtStore;
use crate::store::FolderHandle;

use super::helpers::resolve_selectors;

/// Applies the same edit to every selected thought and saves it.
///
/// A title change moves the thought to a new file name. With `rename_files`
/// off the old file stays where it is and will load as a separate thought
/// next time; the result carries a warning naming it. With `rename_files` on
/// the old file is moved to the trash. A new title is refused when more than
/// one thought is selected or when its file name belongs to another thought.
pub async fn run<H: FolderHandle>(
    store: &ThoughtStore<H>,
    index: &mut ThoughtIndex,
    selectors: &[ThoughtSelector],
    update: &ThoughtUpdate,
    rename_files: bool,
) -> Result<CmdResult> {
    if update.is_empty() {
        return Err(ThoughtsError::Api("Nothing to update".to_string()));
    }
    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(ThoughtsError::Api("Title is required".to_string()));
        }
    }

    let resolved = resolve_selectors(index, selectors)?;
    let ext = store.directory().file_ext().to_string();

    // File names come from titles, so a new title must land on exactly one
    // thought and must not take over another thought's file.
    if let Some(title) = &update.title {
        if resolved.len() > 1 {
            return Err(ThoughtsError::Api(format!(
                "A new title can only be given to one thought at a time ({} selected)",
                resolved.len()
            )));
        }
        let target = file_name_for(title, &ext);
        for dt in &resolved {
            let taken = index
                .iter()
                .find(|t| t.id != dt.thought.id && file_name_for(&t.title, &ext) == target);
            if let Some(other) = taken {
                return Err(ThoughtsError::Api(format!(
                    "{} already holds thought \"{}\"",
                    target, other.title
                )));
            }
        }
    }

    let mut result = CmdResult::default();

    for dt in resolved {
        let previous_title = dt.thought.title.clone();
        let mut thought = dt.thought;
        update.apply(&mut thought);
        thought.touch();

        let old_name = file_name_for(&previous_title, &ext);
        let new_name = if rename_files {
            let (new_name, retired) = store.rename(&thought, &previous_title).await?;
            if let Some(retired) = retired {
                result.add_message(CmdMessage::info(format!(
                    "Moved {} to the trash",
                    retired
                )));
            }
            new_name
        } else {
            let new_name = store.save(&thought).await?;
            if new_name != old_name {
                warn!(old = %old_name, new = %new_name, "title change left previous file");
                result.add_message(CmdMessage::warning(format!(
                    "Previous file {} was left in place and will load as a separate thought",
                    old_name
                )));
            }
            new_name
        };

        index.update(thought.clone());
        result.add_message(CmdMessage::success(format!(
            "Thought updated ({}): {}",
            dt.index, thought.title
        )));
        result.file_names.push(new_name);
        result.affected_thoughts.push(thought);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{fixture, tags, Fixture};
    use crate::commands::{create, MessageLevel};

    async fn with_note(title: &str, body: &str) -> Fixture {
        let mut fx = fixture().await;
        create::run(&fx.store, &mut fx.index, title.into(), body.into(), vec![])
            .await
            .unwrap();
        fx
    }

    fn body(text: &str) -> ThoughtUpdate {
        ThoughtUpdate {
            body: Some(text.into()),
            ..Default::default()
        }
    }

    fn title(text: &str) -> ThoughtUpdate {
        ThoughtUpdate {
            title: Some(text.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn body_edit_rewrites_same_file() {
        let mut fx = with_note("Plan", "old").await;
        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Index(1)],
            &body("new #later"),
            false,
        )
        .await
        .unwrap();

        assert_eq!(fx.root.file_names(), vec!["plan.md"]);
        assert!(fx.root.get("plan.md").unwrap().contains("new #later"));
        assert_eq!(result.affected_thoughts[0].tags, tags(&["later"]));
        assert!(!result.has_level(MessageLevel::Warning));
    }

    #[tokio::test]
    async fn title_edit_orphans_and_warns() {
        let mut fx = with_note("Old", "text").await;
        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Title("old".into())],
            &title("New"),
            false,
        )
        .await
        .unwrap();

        assert_eq!(fx.root.file_names(), vec!["new.md", "old.md"]);
        assert!(result.has_level(MessageLevel::Warning));
        assert_eq!(fx.index.len(), 1);
        assert_eq!(fx.index.iter().next().unwrap().title, "New");
    }

    #[tokio::test]
    async fn title_edit_with_rename_retires_old_file() {
        let mut fx = with_note("Old", "text").await;
        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Index(1)],
            &title("New"),
            true,
        )
        .await
        .unwrap();

        assert_eq!(fx.root.file_names(), vec!["new.md"]);
        assert!(fx.root.child("deleted").unwrap().contains("old.md"));
        assert!(!result.has_level(MessageLevel::Warning));
    }

    #[tokio::test]
    async fn tag_edit_replaces_explicit_tags() {
        let mut fx = fixture().await;
        create::run(
            &fx.store,
            &mut fx.index,
            "T".into(),
            "body #inline".into(),
            tags(&["a", "b"]),
        )
        .await
        .unwrap();

        let update = ThoughtUpdate {
            tags: Some(tags(&["c"])),
            ..Default::default()
        };
        let result = run(&fx.store, &mut fx.index, &[ThoughtSelector::Index(1)], &update, false)
            .await
            .unwrap();

        assert_eq!(result.affected_thoughts[0].tags, tags(&["c", "inline"]));
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let mut fx = with_note("Plan", "old").await;
        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Index(1)],
            &ThoughtUpdate::default(),
            false,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn title_edit_on_several_thoughts_is_rejected() {
        let mut fx = with_note("Alpha", "alpha body").await;
        create::run(&fx.store, &mut fx.index, "Beta".into(), "beta body".into(), vec![])
            .await
            .unwrap();

        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Index(1), ThoughtSelector::Index(2)],
            &title("Merged"),
            false,
        )
        .await;

        assert!(matches!(result, Err(ThoughtsError::Api(_))));
        assert_eq!(fx.root.file_names(), vec!["alpha.md", "beta.md"]);
        assert!(fx.root.get("alpha.md").unwrap().contains("alpha body"));
        assert!(fx.root.get("beta.md").unwrap().contains("beta body"));
        let titles: Vec<_> = fx.index.iter().map(|t| t.title.clone()).collect();
        assert!(titles.contains(&"Alpha".to_string()));
        assert!(titles.contains(&"Beta".to_string()));
    }

    #[tokio::test]
    async fn title_edit_onto_another_thoughts_file_is_rejected() {
        let mut fx = with_note("Alpha", "alpha body").await;
        create::run(&fx.store, &mut fx.index, "Beta".into(), "beta body".into(), vec![])
            .await
            .unwrap();

        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Title("alpha".into())],
            &title("beta"),
            true,
        )
        .await;

        assert!(matches!(result, Err(ThoughtsError::Api(_))));
        assert!(fx.root.get("beta.md").unwrap().contains("beta body"));
        assert!(fx.root.get("alpha.md").unwrap().contains("alpha body"));
    }

    #[tokio::test]
    async fn title_edit_to_same_file_name_is_allowed() {
        let mut fx = with_note("Plan", "text").await;
        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Index(1)],
            &title("plan"),
            false,
        )
        .await
        .unwrap();

        assert_eq!(fx.root.file_names(), vec!["plan.md"]);
        assert!(!result.has_level(MessageLevel::Warning));
        assert_eq!(fx.index.iter().next().unwrap().title, "plan");
    }

    #[tokio::test]
    async fn unknown_selector_writes_nothing() {
        let mut fx = with_note("Plan", "old").await;
        let result = run(
            &fx.store,
            &mut fx.index,
            &[ThoughtSelector::Index(7)],
            &body("x"),
            false,
        )
        .await;
        assert!(result.is_err());
        assert!(fx.root.get("plan.md").unwrap().contains("old"));
    }
}
