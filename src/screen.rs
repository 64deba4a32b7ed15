//! Generic CRUD screen shared by every entity: fetch, view, create, edit, delete.
//!
//! A screen owns the last fetched rows and nothing else. Every successful
//! mutation throws them away and fetches again; failures leave them alone.

use std::collections::HashMap;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::client::{Backend, Order};
use crate::config::Buckets;
use crate::error::{FolioError, Result};
use crate::output;
use crate::render::{Column, DetailModal, Field, Rendered, TableView};
use crate::upload;

/// A record type stored in one backend table.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    const TABLE: &'static str;
    /// Lowercase singular, used in prompts.
    const NOUN: &'static str;
    /// Capitalized singular, used in notifications.
    const LABEL: &'static str;
    const PLURAL: &'static str;

    type Draft: Draft;

    fn id(&self) -> i64;
    fn heading(&self) -> String;
    fn columns() -> Vec<Column<Self>>;
    fn fields() -> Vec<Field<Self>>;
    /// Form state pre-populated from this record.
    fn to_draft(&self) -> Self::Draft;
}

/// Editable form state for an entity.
pub trait Draft: Default {
    /// First failing required-field check, as a user-facing message.
    fn validate(&self) -> Result<()>;

    /// Checks run before updating a stored record. Rules that only apply to
    /// new records can be relaxed here.
    fn validate_edit(&self) -> Result<()> {
        self.validate()
    }

    /// Local files to push to storage before the record is written.
    fn uploads(&self, _buckets: &Buckets) -> Vec<PendingUpload> {
        Vec::new()
    }

    /// Column values to insert or update, with uploaded URLs substituted.
    fn to_record(&self, uploaded: &UploadedUrls) -> Value;
}

pub fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FolioError::Validation(message.to_string()));
    }
    Ok(())
}

pub fn require_any(values: &[String], message: &str) -> Result<()> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return Err(FolioError::Validation(message.to_string()));
    }
    Ok(())
}

/// Drop blank entries left over from empty form rows.
pub fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

pub struct PendingUpload {
    /// Record column the resulting URL(s) belong to.
    pub field: &'static str,
    pub bucket: String,
    pub files: Vec<PathBuf>,
}

/// Public URLs produced by uploads, keyed by record column.
#[derive(Default, Debug)]
pub struct UploadedUrls(HashMap<&'static str, Vec<String>>);

impl UploadedUrls {
    pub fn push(&mut self, field: &'static str, url: String) {
        self.0.entry(field).or_default().push(url);
    }

    pub fn first(&self, field: &str) -> Option<String> {
        self.0.get(field).and_then(|urls| urls.first().cloned())
    }

    pub fn all(&self, field: &str) -> Vec<String> {
        self.0.get(field).cloned().unwrap_or_default()
    }

    fn urls(&self) -> impl Iterator<Item = &String> {
        self.0.values().flatten()
    }
}

/// A create or edit form: its draft, whether it is showing, and the last error.
pub struct Form<D> {
    pub draft: D,
    pub error: Option<String>,
    open: bool,
}

impl<D: Draft> Form<D> {
    pub fn open(draft: D) -> Self {
        Self {
            draft,
            error: None,
            open: true,
        }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn reset_and_close(&mut self) {
        self.draft = D::default();
        self.error = None;
        self.open = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Where transient notifications go.
pub trait Notifier {
    fn notify(&self, toast: Toast);

    /// Transient status line, such as the table placeholder while fetching.
    fn progress(&self, _line: &str) {}
}

/// Prints notifications to stderr so tables and JSON on stdout stay clean.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast {
            Toast::Success(message) => {
                if !output::is_quiet() {
                    eprintln!("{}", output::success_line(&message));
                }
            }
            Toast::Error(message) => eprintln!("{}", output::error_line(&message)),
        }
    }

    fn progress(&self, line: &str) {
        if !output::is_quiet() && io::stderr().is_terminal() {
            eprintln!("{line}");
        }
    }
}

/// Yes/no confirmation before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Asks on stdin unless `assume_yes` is set. Anything but `y` means no.
pub struct Prompt {
    pub assume_yes: bool,
}

impl Confirm for Prompt {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(_) => input.trim().eq_ignore_ascii_case("y"),
            Err(_) => false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Done,
    Cancelled,
    Failed(String),
}

impl Outcome {
    /// Failures were already shown, so they become `Reported`.
    pub fn into_result(self) -> Result<bool> {
        match self {
            Outcome::Done => Ok(true),
            Outcome::Cancelled => Ok(false),
            Outcome::Failed(message) => Err(FolioError::Reported(message)),
        }
    }
}

pub struct Screen<'a, B, E> {
    backend: &'a B,
    notifier: &'a dyn Notifier,
    buckets: Buckets,
    rows: Vec<E>,
    loading: bool,
}

impl<'a, B: Backend, E: Entity> Screen<'a, B, E> {
    pub fn new(backend: &'a B, notifier: &'a dyn Notifier, buckets: Buckets) -> Self {
        Self {
            backend,
            notifier,
            buckets,
            rows: Vec::new(),
            loading: false,
        }
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn find(&self, id: i64) -> Option<&E> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Fetch every row, newest first. On failure the previous rows stay.
    pub async fn refresh(&mut self) -> Outcome {
        self.loading = true;
        self.notifier.progress(&self.table().to_string());
        let result = self.backend.select::<E>(E::TABLE, Order::NEWEST_FIRST).await;
        self.loading = false;

        match result {
            Ok(rows) => {
                tracing::debug!(table = E::TABLE, count = rows.len(), "fetched");
                self.rows = rows;
                Outcome::Done
            }
            Err(e) => {
                tracing::error!(table = E::TABLE, error = %e, "fetch failed");
                let message = format!("Failed to fetch {}", E::PLURAL);
                self.notifier.notify(Toast::Error(message.clone()));
                Outcome::Failed(message)
            }
        }
    }

    pub fn table(&self) -> Rendered {
        let columns = E::columns();
        TableView::new(&columns, &self.rows)
            .row_key(|row| row.id().to_string())
            .loading(self.loading)
            .empty_message(format!("No {} found", E::PLURAL))
            .render()
    }

    /// Detail view of one fetched row; `None` when the id is not among them.
    pub fn detail(&self, id: i64) -> Option<String> {
        let fields = E::fields();
        let mut modal = DetailModal::new(&fields).title(|row: &E| row.heading());
        modal.open(self.find(id).cloned());
        modal.render()
    }

    /// Edit form pre-populated from a fetched row.
    pub fn edit_form(&self, id: i64) -> Option<Form<E::Draft>> {
        self.find(id).map(|row| Form::open(row.to_draft()))
    }

    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> Outcome {
        let prompt = format!("Are you sure you want to delete this {}?", E::NOUN);
        if !confirm.confirm(&prompt) {
            return Outcome::Cancelled;
        }

        match self.backend.delete(E::TABLE, id).await {
            Ok(()) => {
                self.notifier
                    .notify(Toast::Success(format!("{} deleted successfully", E::LABEL)));
                self.refresh().await;
                Outcome::Done
            }
            Err(e) => {
                tracing::error!(table = E::TABLE, id, error = %e, "delete failed");
                let message = format!("Failed to delete {}: {}", E::NOUN, e.user_message());
                self.notifier.notify(Toast::Error(message.clone()));
                Outcome::Failed(message)
            }
        }
    }

    pub async fn create(&mut self, form: &mut Form<E::Draft>) -> Outcome {
        let result = self.save(&form.draft, None).await;
        self.finish(form, result, "created").await
    }

    pub async fn edit(&mut self, id: i64, form: &mut Form<E::Draft>) -> Outcome {
        let result = self.save(&form.draft, Some(id)).await;
        self.finish(form, result, "updated").await
    }

    async fn save(&self, draft: &E::Draft, id: Option<i64>) -> Result<()> {
        match id {
            Some(_) => draft.validate_edit()?,
            None => draft.validate()?,
        }

        let mut uploaded = UploadedUrls::default();
        for pending in draft.uploads(&self.buckets) {
            for file in &pending.files {
                let url = upload::upload_file(self.backend, &pending.bucket, file).await?;
                uploaded.push(pending.field, url);
            }
        }

        let record = draft.to_record(&uploaded);
        let result = match id {
            Some(id) => self.backend.update(E::TABLE, id, &record).await,
            None => self.backend.insert(E::TABLE, &record).await,
        };

        if result.is_err() {
            for url in uploaded.urls() {
                tracing::warn!(table = E::TABLE, %url, "record write failed; uploaded file left orphaned");
            }
        }

        result
    }

    async fn finish(
        &mut self,
        form: &mut Form<E::Draft>,
        result: Result<()>,
        verb: &str,
    ) -> Outcome {
        match result {
            Ok(()) => {
                self.notifier
                    .notify(Toast::Success(format!("{} {verb} successfully!", E::LABEL)));
                form.reset_and_close();
                self.refresh().await;
                Outcome::Done
            }
            Err(e) => {
                let message = e.user_message();
                tracing::debug!(table = E::TABLE, error = %e, "save failed");
                form.error = Some(message.clone());
                self.notifier.notify(Toast::Error(message.clone()));
                Outcome::Failed(message)
            }
        }
    }
}
