//! Todo list state and persistence.
//!
//! `TodoStore` owns the canonical, insertion-ordered todo list together with
//! the storage it is flushed to. Every operation that changes the list writes
//! the whole list back under [`STORAGE_KEY`]; operations that turn out to be
//! no-ops leave storage untouched.
//!
//! Ids never go backwards. The store remembers the highest id it has seen or
//! issued, and new ids are also kept at or above the current wall-clock time
//! in milliseconds, so an id freed by deleting the newest todo is not handed
//! out again by a later process either.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::todo::{now_millis, Todo};

/// Key the serialized todo list is stored under.
pub const STORAGE_KEY: &str = "dn-todos";

/// In-memory todo list backed by a [`Storage`].
pub struct TodoStore {
    todos: Vec<Todo>,
    /// Highest id loaded or issued so far.
    last_id: u64,
    /// Lower bound for the next id.
    id_floor: fn() -> u64,
    storage: Box<dyn Storage>,
}

/// Milliseconds since the Unix epoch, the scale ids have always used.
fn wall_clock_id() -> u64 {
    u64::try_from(now_millis().timestamp_millis()).unwrap_or(0)
}

impl TodoStore {
    /// Load the todo list from storage, starting empty if nothing was stored.
    ///
    /// Malformed stored data is an error rather than a fresh start, so a
    /// later save can never clobber it.
    pub fn load(storage: impl Storage + 'static) -> Result<Self> {
        let todos = match storage.get_item(STORAGE_KEY)? {
            Some(buf) => serde_json::from_str::<Vec<Todo>>(&buf).map_err(|source| {
                Error::CorruptStore {
                    key: STORAGE_KEY.to_string(),
                    source,
                }
            })?,
            None => Vec::new(),
        };
        let last_id = todos.iter().map(|t| t.id).max().unwrap_or(0);
        debug!(count = todos.len(), last_id, "loaded todos");
        Ok(TodoStore {
            todos,
            last_id,
            id_floor: wall_clock_id,
            storage: Box::new(storage),
        })
    }

    /// Replace the wall clock used as the id floor.
    #[cfg(test)]
    pub(crate) fn with_id_floor(mut self, id_floor: fn() -> u64) -> Self {
        self.id_floor = id_floor;
        self
    }

    /// Serialize the full list and replace the stored copy.
    pub fn save(&mut self) -> Result<()> {
        let data = serde_json::to_string(&self.todos)?;
        self.storage.set_item(STORAGE_KEY, &data)?;
        debug!(count = self.todos.len(), "saved todos");
        Ok(())
    }

    /// All todos in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Get a todo by ID.
    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// The ID the next [`add`](Self::add) will use.
    ///
    /// Fails with [`Error::IdSpaceExhausted`] once `u64::MAX` has been used.
    pub fn next_id(&self) -> Result<u64> {
        let after_last = self
            .last_id
            .checked_add(1)
            .ok_or(Error::IdSpaceExhausted)?;
        Ok(after_last.max((self.id_floor)()))
    }

    /// Append a new todo with the trimmed `text`.
    ///
    /// Returns the new ID, or `None` when the text is empty after trimming.
    pub fn add(&mut self, text: &str) -> Result<Option<u64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = self.next_id()?;
        self.todos.push(Todo::new(id, text));
        self.last_id = id;
        self.save()?;
        info!(id, "added todo");
        Ok(Some(id))
    }

    /// Flip the completion flag of the todo with `id`.
    ///
    /// Returns `false` without touching storage if no such todo exists.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        todo.completed = !todo.completed;
        let completed = todo.completed;
        self.save()?;
        info!(id, completed, "toggled todo");
        Ok(true)
    }

    /// Remove the todo with `id`.
    ///
    /// Returns `false` without touching storage if no such todo exists.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let Some(idx) = self.todos.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        self.todos.remove(idx);
        self.save()?;
        info!(id, "deleted todo");
        Ok(true)
    }

    /// Remove every completed todo, returning how many were removed.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let removed = before - self.todos.len();
        if removed > 0 {
            self.save()?;
            info!(removed, "cleared completed todos");
        }
        Ok(removed)
    }
}
