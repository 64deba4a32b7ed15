use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Custom cell renderer.
pub type CellFn<T> = fn(&T) -> String;

/// Row identity function.
pub type RowKeyFn<T> = fn(&T) -> String;

/// A table column: which field to show, under which header, and optionally how.
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub render: Option<CellFn<T>>,
}

impl<T> Column<T> {
    /// Column showing the raw field value.
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            render: None,
        }
    }

    /// Column with a custom cell renderer.
    pub fn with(key: &'static str, label: &'static str, render: CellFn<T>) -> Self {
        Self {
            key,
            label,
            render: Some(render),
        }
    }
}

/// What a [`TableView`] turned into.
#[derive(Debug, PartialEq)]
pub enum Rendered {
    Spinner,
    Empty(String),
    Table(String),
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Spinner => write!(f, "Loading..."),
            Rendered::Empty(message) => write!(f, "{message}"),
            Rendered::Table(table) => write!(f, "{table}"),
        }
    }
}

/// Renders an ordered slice of records through a list of column descriptors.
///
/// No sorting, filtering or pagination: rows come out in the order given.
pub struct TableView<'a, T> {
    columns: &'a [Column<T>],
    rows: &'a [T],
    row_key: Option<RowKeyFn<T>>,
    loading: bool,
    empty_message: String,
}

impl<'a, T: Serialize> TableView<'a, T> {
    pub fn new(columns: &'a [Column<T>], rows: &'a [T]) -> Self {
        Self {
            columns,
            rows,
            row_key: None,
            loading: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn row_key(mut self, key: RowKeyFn<T>) -> Self {
        self.row_key = Some(key);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Identity of each row; the 1-based position when no key function is set.
    pub fn row_keys(&self) -> Vec<String> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| match self.row_key {
                Some(key) => key(row),
                None => (index + 1).to_string(),
            })
            .collect()
    }

    pub fn render(&self) -> Rendered {
        if self.loading {
            return Rendered::Spinner;
        }

        if self.rows.is_empty() {
            return Rendered::Empty(self.empty_message.clone());
        }

        let mut builder = Builder::default();

        let mut header = vec!["#".to_string()];
        header.extend(self.columns.iter().map(|c| c.label.to_string()));
        builder.push_record(header);

        for (key, row) in self.row_keys().into_iter().zip(self.rows) {
            let json = serde_json::to_value(row).unwrap_or(Value::Null);
            let mut record = vec![key];
            record.extend(self.columns.iter().map(|column| match column.render {
                Some(render) => render(row),
                None => cell_text(json.get(column.key)),
            }));
            builder.push_record(record);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        Rendered::Table(table.to_string())
    }
}

/// Plain text for a raw JSON field.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| cell_text(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}
