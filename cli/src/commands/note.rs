use anyhow::{Result, bail};

use fitlife_core::models::{NewNote, NoteEdit};

use super::Store;
use super::helpers::{confirm, not_found, print_note};

pub(crate) fn cmd_note_list(store: &Store, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.notes())?);
        return Ok(());
    }

    if store.notes().is_empty() {
        eprintln!("No notes");
        return Ok(());
    }
    for note in store.notes() {
        print_note(note);
    }
    Ok(())
}

pub(crate) fn cmd_note_add(
    store: &mut Store,
    title: String,
    content: String,
    category: String,
    json: bool,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Note title cannot be empty");
    }
    let note = store.add_note(NewNote {
        title,
        content,
        category,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print!("Saved ");
        print_note(&note);
    }
    Ok(())
}

pub(crate) fn cmd_note_edit(
    store: &mut Store,
    id: i64,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let edit = NoteEdit {
        title,
        content,
        category,
    };
    if edit.is_empty() {
        bail!("Nothing to update. Provide at least one of --title, --content, or --category");
    }

    let Some(note) = store.edit_note(id, edit)? else {
        not_found("Note", id, json);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print!("Updated ");
        print_note(&note);
    }
    Ok(())
}

pub(crate) fn cmd_note_delete(store: &mut Store, id: i64, yes: bool, json: bool) -> Result<()> {
    if !store.notes().iter().any(|n| n.id == id) {
        not_found("Note", id, json);
    }
    if !yes && !confirm("Are you sure you want to delete this note?")? {
        eprintln!("Cancelled");
        return Ok(());
    }

    store.delete_note(id)?;
    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted note {id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_store;

    #[test]
    fn test_add_edit_delete_note() {
        let mut store = test_store();
        cmd_note_add(
            &mut store,
            "Stretching".to_string(),
            "Ten minutes after every run".to_string(),
            "workout".to_string(),
            false,
        )
        .unwrap();
        let note = store.notes().last().unwrap().clone();

        cmd_note_edit(
            &mut store,
            note.id,
            Some("Mobility".to_string()),
            None,
            None,
            false,
        )
        .unwrap();
        let edited = store.notes().last().unwrap();
        assert_eq!(edited.id, note.id);
        assert_eq!(edited.title, "Mobility");
        assert_eq!(edited.content, "Ten minutes after every run");

        cmd_note_delete(&mut store, note.id, true, true).unwrap();
        assert_eq!(store.notes().len(), 3);
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut store = test_store();
        let result = cmd_note_add(
            &mut store,
            String::new(),
            "body".to_string(),
            "general".to_string(),
            false,
        );
        assert!(result.is_err());
    }
}
