//! Read-only projections over the todo list.
//!
//! Everything here is recomputed from the canonical list whenever it is
//! needed; nothing is cached between renders.

use crate::filter::Filter;
use crate::todo::Todo;

/// Todos matching `filter`, in list order.
pub fn filtered(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|t| filter.matches(t)).collect()
}

/// Number of todos not yet completed.
pub fn active_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|t| !t.completed).count()
}

/// Number of completed todos.
pub fn completed_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|t| t.completed).count()
}

/// Placeholder shown when a filter selects nothing.
pub fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "// NO TASKS YET. ADD ONE ABOVE.",
        Filter::Active => "// NO ACTIVE TASKS.",
        Filter::Completed => "// NO COMPLETED TASKS.",
    }
}

/// One render's worth of derived state.
#[derive(Debug)]
pub struct TodoView<'a> {
    pub visible: Vec<&'a Todo>,
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

impl<'a> TodoView<'a> {
    pub fn project(todos: &'a [Todo], filter: Filter) -> Self {
        TodoView {
            visible: filtered(todos, filter),
            active: active_count(todos),
            completed: completed_count(todos),
            total: todos.len(),
        }
    }
}
