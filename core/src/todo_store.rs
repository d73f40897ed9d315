use parking_lot::Mutex;
use serde_json::Value;

/// Single-writer cell owning the process-wide task list.
///
/// Entries are kept exactly as a client saved them, whatever their shape.
/// Every operation takes the lock exactly once, so a replace and the read
/// that reports its result can never interleave with another writer.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: Mutex<Vec<Value>>,
}

impl TodoStore {
    pub fn new(initial: Vec<Value>) -> Self {
        Self {
            todos: Mutex::new(initial),
        }
    }

    /// Copy of the current list
    pub fn snapshot(&self) -> Vec<Value> {
        self.todos.lock().clone()
    }

    /// Swap in `todos` wholesale and return the stored list
    pub fn replace(&self, todos: Vec<Value>) -> Vec<Value> {
        let mut guard = self.todos.lock();
        *guard = todos;
        guard.clone()
    }

    pub fn len(&self) -> usize {
        self.todos.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.lock().is_empty()
    }
}
