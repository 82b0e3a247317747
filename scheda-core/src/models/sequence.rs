//! Helpers shared by the ordered child collections of the plan tree.

use crate::error::ValidationError;

/// An entity addressed by an id that is unique among its siblings.
pub trait Identified {
    fn id(&self) -> &str;
}

pub(crate) fn find<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub(crate) fn find_mut<'a, T: Identified>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

pub(crate) fn push_unique<T: Identified>(
    items: &mut Vec<T>,
    item: T,
) -> Result<&mut T, ValidationError> {
    if find(items, item.id()).is_some() {
        return Err(ValidationError::DuplicateId(item.id().to_string()));
    }
    items.push(item);
    let last = items.len() - 1;
    Ok(&mut items[last])
}

pub(crate) fn remove<T: Identified>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let pos = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(pos))
}

/// Moves the item at `from` so that it ends up at position `to`.
pub(crate) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), ValidationError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(ValidationError::IndexOutOfRange { index, len });
        }
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str);

    impl Identified for Item {
        fn id(&self) -> &str {
            self.0
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.0).collect()
    }

    #[test]
    fn test_push_unique_rejects_duplicates() {
        let mut items = vec![Item("a")];
        assert!(push_unique(&mut items, Item("b")).is_ok());
        assert_eq!(
            push_unique(&mut items, Item("a")).err(),
            Some(ValidationError::DuplicateId("a".to_string()))
        );
        assert_eq!(ids(&items), vec!["a", "b"]);
    }

    #[test]
    fn test_move_item() {
        let mut items = vec![Item("a"), Item("b"), Item("c")];
        move_item(&mut items, 0, 2).unwrap();
        assert_eq!(ids(&items), vec!["b", "c", "a"]);

        move_item(&mut items, 2, 0).unwrap();
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_item_out_of_range() {
        let mut items = vec![Item("a")];
        assert_eq!(
            move_item(&mut items, 0, 3),
            Err(ValidationError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_remove() {
        let mut items = vec![Item("a"), Item("b")];
        assert_eq!(remove(&mut items, "a").map(|i| i.0), Some("a"));
        assert!(remove(&mut items, "a").is_none());
        assert_eq!(ids(&items), vec!["b"]);
    }
}
