//! In-memory backend and recorders for screen tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{Backend, Order};
use crate::error::{FolioError, Result};
use crate::screen::{Confirm, Notifier, Toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Select,
    Insert,
    Update,
    Delete,
    Upload,
}

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    calls: Vec<(Call, String)>,
    failing: HashSet<Call>,
    uploads: Vec<(String, String)>,
    next_id: i64,
}

/// Rows are kept newest first; inserts go to the front.
pub struct FakeBackend {
    state: RefCell<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                next_id: 1000,
                ..State::default()
            }),
        }
    }

    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.state.borrow_mut().tables.insert(table.to_string(), rows);
        self
    }

    /// Make every later call of this kind fail.
    pub fn fail(&self, call: Call) {
        self.state.borrow_mut().failing.insert(call);
    }

    pub fn calls(&self) -> Vec<(Call, String)> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|(c, _)| *c == call)
            .count()
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .borrow()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// (bucket, path) of every stored object.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.state.borrow().uploads.clone()
    }

    fn record(&self, call: Call, target: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push((call, target.to_string()));
        if state.failing.contains(&call) {
            return Err(FolioError::ApiError {
                status: 500,
                message: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Backend for FakeBackend {
    async fn select<T: DeserializeOwned>(&self, table: &str, _order: Order) -> Result<Vec<T>> {
        self.record(Call::Select, table)?;
        self.rows(table)
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(FolioError::from))
            .collect()
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<()> {
        self.record(Call::Insert, table)?;
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let mut row = record.clone();
        if let Value::Object(map) = &mut row {
            map.insert("id".to_string(), Value::from(state.next_id));
        }
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .insert(0, row);
        Ok(())
    }

    async fn update(&self, table: &str, id: i64, record: &Value) -> Result<()> {
        self.record(Call::Update, table)?;
        let mut state = self.state.borrow_mut();
        let row = state
            .tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| r["id"] == Value::from(id)))
            .ok_or_else(|| FolioError::NotFound {
                what: format!("Row in {table}"),
                id,
            })?;
        if let (Value::Object(target), Value::Object(patch)) = (row, record) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: i64) -> Result<()> {
        self.record(Call::Delete, table)?;
        let mut state = self.state.borrow_mut();
        let rows = state.tables.entry(table.to_string()).or_default();
        let before = rows.len();
        rows.retain(|r| r["id"] != Value::from(id));
        if rows.len() == before {
            return Err(FolioError::NotFound {
                what: format!("Row in {table}"),
                id,
            });
        }
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        self.record(Call::Upload, bucket)?;
        self.state
            .borrow_mut()
            .uploads
            .push((bucket.to_string(), path.to_string()));
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("fake://{bucket}/{path}")
    }
}

/// Collects notifications instead of printing them.
#[derive(Default)]
pub struct Recorder {
    toasts: RefCell<Vec<Toast>>,
    progress: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn all(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn progress_lines(&self) -> Vec<String> {
        self.progress.borrow().clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }

    fn progress(&self, line: &str) {
        self.progress.borrow_mut().push(line.to_string());
    }
}

/// Fixed answer to every confirmation.
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
