//! The in-memory mirror of server-authoritative list/task data.
//!
//! The mirror is always a permutation/subset consistent with the last
//! successful fetch plus any optimistic mutations not yet rolled back.
//! It is `Clone`, and the engine snapshots it before each optimistic
//! mutation so a failed store round-trip can restore the pre-call state.

use deck_types::{ListId, Task, TaskId, TaskPatch, TodoList};

/// The ordered in-memory list collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mirror {
    lists: Vec<TodoList>,
}

impl Mirror {
    /// Create an empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lists in current display order.
    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    /// The list identifiers in current display order.
    pub fn ids(&self) -> Vec<ListId> {
        self.lists.iter().map(|l| l.id).collect()
    }

    /// Number of lists held.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether the mirror holds no lists.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Look up a list by identifier.
    pub fn list(&self, id: ListId) -> Option<&TodoList> {
        self.lists.iter().find(|l| l.id == id)
    }

    fn list_mut(&mut self, id: ListId) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    /// Replace the whole collection from a fetch.
    pub fn replace_all(&mut self, lists: Vec<TodoList>) {
        self.lists = lists;
    }

    /// Replace a single list in place, keeping its position.
    ///
    /// Returns `false` if the list is unknown.
    pub fn replace_list(&mut self, list: TodoList) -> bool {
        match self.list_mut(list.id) {
            Some(slot) => {
                *slot = list;
                true
            }
            None => false,
        }
    }

    /// Append a list at the end of the display order.
    pub fn insert_list(&mut self, list: TodoList) {
        self.lists.push(list);
    }

    /// Rename a list. Returns `false` if the list is unknown.
    pub fn rename_list(&mut self, id: ListId, name: &str) -> bool {
        match self.list_mut(id) {
            Some(list) => {
                list.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a list. Returns `false` if the list is unknown.
    pub fn remove_list(&mut self, id: ListId) -> bool {
        let before = self.lists.len();
        self.lists.retain(|l| l.id != id);
        self.lists.len() != before
    }

    /// Reorder the collection to match `ids`.
    ///
    /// Callers must have validated that `ids` is a permutation of the
    /// current identifiers; unknown ids are skipped defensively rather
    /// than panicking.
    pub fn reorder(&mut self, ids: &[ListId]) {
        let mut remaining = std::mem::take(&mut self.lists);
        for id in ids {
            if let Some(pos) = remaining.iter().position(|l| l.id == *id) {
                self.lists.push(remaining.remove(pos));
            }
        }
        self.lists.append(&mut remaining);
    }

    /// Insert a task at the end of a list. Returns `false` if the list is
    /// unknown.
    pub fn insert_task(&mut self, list_id: ListId, task: Task) -> bool {
        match self.list_mut(list_id) {
            Some(list) => {
                list.tasks.push(task);
                true
            }
            None => false,
        }
    }

    /// Look up a task within a list.
    pub fn task(&self, list_id: ListId, task_id: TaskId) -> Option<&Task> {
        self.list(list_id).and_then(|l| l.task(task_id))
    }

    /// Patch a task within a list. Returns `false` if either is unknown.
    pub fn patch_task(&mut self, list_id: ListId, task_id: TaskId, patch: &TaskPatch) -> bool {
        match self
            .list_mut(list_id)
            .and_then(|l| l.tasks.iter_mut().find(|t| t.id == task_id))
        {
            Some(task) => {
                patch.apply_to(task);
                true
            }
            None => false,
        }
    }

    /// Remove a task from a list. Returns `false` if either is unknown.
    pub fn remove_task(&mut self, list_id: ListId, task_id: TaskId) -> bool {
        match self.list_mut(list_id) {
            Some(list) => {
                let before = list.tasks.len();
                list.tasks.retain(|t| t.id != task_id);
                list.tasks.len() != before
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror_with(names: &[&str]) -> Mirror {
        let mut mirror = Mirror::new();
        for name in names {
            mirror.insert_list(TodoList::new(ListId::new(), *name));
        }
        mirror
    }

    #[test]
    fn insert_preserves_append_order() {
        let mirror = mirror_with(&["A", "B", "C"]);
        let names: Vec<_> = mirror.lists().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn rename_known_list() {
        let mut mirror = mirror_with(&["A"]);
        let id = mirror.ids()[0];

        assert!(mirror.rename_list(id, "Renamed"));
        assert_eq!(mirror.list(id).unwrap().name, "Renamed");
    }

    #[test]
    fn rename_unknown_list_is_rejected() {
        let mut mirror = mirror_with(&["A"]);
        assert!(!mirror.rename_list(ListId::new(), "Renamed"));
    }

    #[test]
    fn remove_list_shrinks_collection() {
        let mut mirror = mirror_with(&["A", "B"]);
        let id = mirror.ids()[0];

        assert!(mirror.remove_list(id));
        assert_eq!(mirror.len(), 1);
        assert!(!mirror.remove_list(id));
    }

    #[test]
    fn reorder_applies_given_sequence() {
        let mut mirror = mirror_with(&["A", "B", "C"]);
        let ids = mirror.ids();

        mirror.reorder(&[ids[2], ids[0], ids[1]]);

        let names: Vec<_> = mirror.lists().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn reorder_is_idempotent() {
        let mut mirror = mirror_with(&["A", "B"]);
        let ids = mirror.ids();
        let target = vec![ids[1], ids[0]];

        mirror.reorder(&target);
        let after_first = mirror.clone();
        mirror.reorder(&target);

        assert_eq!(mirror, after_first);
    }

    #[test]
    fn task_mutations_touch_only_their_list() {
        let mut mirror = mirror_with(&["A", "B"]);
        let (a, b) = (mirror.ids()[0], mirror.ids()[1]);
        let untouched = mirror.list(a).unwrap().clone();

        let task = Task::new(TaskId::new(), "buy milk");
        let task_id = task.id;
        assert!(mirror.insert_task(b, task));

        assert_eq!(mirror.list(a).unwrap(), &untouched);
        assert_eq!(mirror.task(b, task_id).unwrap().text, "buy milk");

        assert!(mirror.patch_task(b, task_id, &TaskPatch::complete(true)));
        assert!(mirror.task(b, task_id).unwrap().completed);
        assert_eq!(mirror.list(a).unwrap(), &untouched);

        assert!(mirror.remove_task(b, task_id));
        assert!(mirror.list(b).unwrap().tasks.is_empty());
    }

    #[test]
    fn task_mutations_on_unknown_entities_are_rejected() {
        let mut mirror = mirror_with(&["A"]);
        let a = mirror.ids()[0];

        assert!(!mirror.insert_task(ListId::new(), Task::new(TaskId::new(), "x")));
        assert!(!mirror.patch_task(a, TaskId::new(), &TaskPatch::complete(true)));
        assert!(!mirror.remove_task(a, TaskId::new()));
    }

    #[test]
    fn replace_list_keeps_position() {
        let mut mirror = mirror_with(&["A", "B", "C"]);
        let b = mirror.ids()[1];
        let mut refreshed = TodoList::new(b, "B refreshed");
        refreshed.tasks.push(Task::new(TaskId::new(), "new task"));

        assert!(mirror.replace_list(refreshed));
        assert_eq!(mirror.lists()[1].name, "B refreshed");
        assert_eq!(mirror.lists()[1].tasks.len(), 1);
    }

    #[test]
    fn snapshot_restore_roundtrip() {
        let mut mirror = mirror_with(&["A", "B"]);
        let snapshot = mirror.clone();
        let a = mirror.ids()[0];

        mirror.remove_list(a);
        assert_ne!(mirror, snapshot);

        mirror = snapshot.clone();
        assert_eq!(mirror, snapshot);
    }
}
