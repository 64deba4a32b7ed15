use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::decode;
use crate::error::Result;
use crate::output::{format_date_only, truncate};
use crate::render::{Column, Field};
use crate::screen::{require, Draft, Entity, UploadedUrls};

/// One "about me" section.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AboutMe {
    pub id: i64,
    #[serde(default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub description: String,
    pub created_at: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct AboutMeDraft {
    pub title: String,
    pub description: String,
}

impl Entity for AboutMe {
    const TABLE: &'static str = "about_me";
    const NOUN: &'static str = "section";
    const LABEL: &'static str = "About me";
    const PLURAL: &'static str = "about me sections";

    type Draft = AboutMeDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn heading(&self) -> String {
        self.title.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Title"),
            Column::with("description", "Description", |a: &Self| {
                truncate(&a.description, 70)
            }),
            Column::with("created_at", "Added", |a: &Self| {
                a.created_at.as_deref().map(format_date_only).unwrap_or_default()
            }),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("title", "Title"),
            Field::new("description", "Description").full(),
        ]
    }

    fn to_draft(&self) -> AboutMeDraft {
        AboutMeDraft {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

impl Draft for AboutMeDraft {
    fn validate(&self) -> Result<()> {
        require(&self.title, "Title is required")?;
        require(&self.description, "Description is required")
    }

    fn to_record(&self, _uploaded: &UploadedUrls) -> Value {
        json!({
            "title": self.title.trim(),
            "description": self.description.trim(),
        })
    }
}
