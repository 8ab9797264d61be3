//! Identity and file naming.
//!
//! File names are derived from the *current* title: every character outside
//! `[a-z0-9]` (after ASCII lowercasing) becomes `_`, one for one. Distinct
//! titles can map to the same slug ("My Note!" and "my note?" both give
//! `my_note_`); the second save silently overwrites the first.

use uuid::Uuid;

const ID_LEN: usize = 9;

/// Short opaque token used as an in-memory join key. Not a storage key.
pub fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

/// Lowercases and replaces each non-alphanumeric character with `_`.
pub fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// File name for a title. `file_ext` is expected to carry its leading dot.
pub fn file_name_for(title: &str, file_ext: &str) -> String {
    format!("{}{}", slugify(title), file_ext)
}

/// Normalizes an extension to start with a dot.
pub fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
