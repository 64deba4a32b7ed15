use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use super::table::{cell_text, CellFn};

pub type TitleFn<T> = fn(&T) -> String;

/// Width of a field block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// `Label: value` on one line.
    Half,
    /// Label on its own line, value indented below.
    Full,
}

/// A labeled block in a detail view.
pub struct Field<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub render: Option<CellFn<T>>,
    pub hide: bool,
    pub span: Span,
}

impl<T> Field<T> {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            render: None,
            hide: false,
            span: Span::Half,
        }
    }

    pub fn with(key: &'static str, label: &'static str, render: CellFn<T>) -> Self {
        Self {
            render: Some(render),
            ..Self::new(key, label)
        }
    }

    pub fn full(mut self) -> Self {
        self.span = Span::Full;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }
}

enum ModalState<T> {
    Closed,
    Open(T),
}

/// Single-record detail view. Renders nothing unless open with a record.
pub struct DetailModal<'a, T> {
    fields: &'a [Field<T>],
    title: Option<TitleFn<T>>,
    state: ModalState<T>,
}

impl<'a, T: Serialize> DetailModal<'a, T> {
    pub fn new(fields: &'a [Field<T>]) -> Self {
        Self {
            fields,
            title: None,
            state: ModalState::Closed,
        }
    }

    pub fn title(mut self, title: TitleFn<T>) -> Self {
        self.title = Some(title);
        self
    }

    /// Opening with no record leaves the modal closed.
    pub fn open(&mut self, record: Option<T>) {
        self.state = match record {
            Some(record) => ModalState::Open(record),
            None => ModalState::Closed,
        };
    }

    #[cfg(test)]
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn render(&self) -> Option<String> {
        let ModalState::Open(record) = &self.state else {
            return None;
        };

        let title = match self.title {
            Some(title) => title(record),
            None => "View Details".to_string(),
        };

        let json = serde_json::to_value(record).unwrap_or(Value::Null);
        let visible: Vec<&Field<T>> = self.fields.iter().filter(|f| !f.hide).collect();
        let width = visible
            .iter()
            .filter(|f| f.span == Span::Half)
            .map(|f| f.label.len() + 1)
            .max()
            .unwrap_or(0);

        let mut out = format!("{}\n{}\n", title.bold(), "=".repeat(title.chars().count()));

        for field in visible {
            let mut value = match field.render {
                Some(render) => render(record),
                None => cell_text(json.get(field.key)),
            };
            if value.trim().is_empty() {
                value = "N/A".to_string();
            }

            match field.span {
                Span::Half => {
                    let label = format!("{}:", field.label);
                    out.push_str(&format!("{label:<width$} {value}\n"));
                }
                Span::Full => {
                    out.push_str(&format!("\n{}:\n", field.label));
                    for line in value.lines() {
                        out.push_str(&format!("  {line}\n"));
                    }
                }
            }
        }

        Some(out)
    }
}
