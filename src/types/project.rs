use std::collections::HashSet;
use std::path::PathBuf;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::decode;
use crate::config::Buckets;
use crate::error::{FolioError, Result};
use crate::output::{bullets, format_date, join_list, truncate};
use crate::render::{Column, Field};
use crate::screen::{non_blank, require, Draft, Entity, PendingUpload, UploadedUrls};

/// Earliest selectable project year.
pub const FIRST_YEAR: i32 = 1970;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Project {
    pub id: i64,
    #[serde(default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub description: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub location: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub project_link: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub application_type: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub year: String,
    #[serde(default, deserialize_with = "decode::string_list")]
    pub tools: Vec<String>,
    #[serde(default, deserialize_with = "decode::text")]
    pub logo: String,
    pub created_at: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub project_link: String,
    pub application_type: String,
    pub year: String,
    pub tools: Vec<String>,
    /// New logo to upload; replaces `logo_url` when set.
    pub logo_file: Option<PathBuf>,
    pub logo_url: Option<String>,
    /// Year and link as stored, for edits. Only changed values are re-checked.
    pub stored_year: Option<String>,
    pub stored_link: Option<String>,
}

impl Entity for Project {
    const TABLE: &'static str = "projects";
    const NOUN: &'static str = "project";
    const LABEL: &'static str = "Project";
    const PLURAL: &'static str = "projects";

    type Draft = ProjectDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn heading(&self) -> String {
        self.title.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Title"),
            Column::with("project_link", "Link", |p: &Self| truncate(&p.project_link, 30)),
            Column::with("description", "Description", |p: &Self| {
                truncate(&p.description, 40)
            }),
            Column::new("application_type", "Type"),
            Column::new("location", "Location"),
            Column::new("year", "Year"),
            Column::with("tools", "Tools", |p: &Self| truncate(&join_list(&p.tools), 30)),
            Column::with("logo", "Logo", |p: &Self| {
                let shown = if p.logo.is_empty() { "-" } else { "yes" };
                shown.to_string()
            }),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("id", "ID").hidden(),
            Field::new("application_type", "Type"),
            Field::new("location", "Location"),
            Field::new("year", "Year"),
            Field::new("project_link", "Link"),
            Field::new("logo", "Logo"),
            Field::with("created_at", "Created", |p: &Self| {
                p.created_at.as_deref().map(format_date).unwrap_or_default()
            }),
            Field::new("description", "Description").full(),
            Field::with("tools", "Tools", |p: &Self| bullets(&p.tools)).full(),
        ]
    }

    fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            project_link: self.project_link.clone(),
            application_type: self.application_type.clone(),
            year: self.year.clone(),
            tools: self.tools.clone(),
            logo_file: None,
            logo_url: Some(self.logo.clone()).filter(|url| !url.is_empty()),
            stored_year: Some(self.year.clone()),
            stored_link: Some(self.project_link.clone()),
        }
    }
}

impl Draft for ProjectDraft {
    fn validate(&self) -> Result<()> {
        self.require_text()?;
        validate_year(&self.year)?;
        validate_link(&self.project_link)?;
        if self.logo_file.is_none() && self.logo_url.is_none() {
            return Err(FolioError::Validation("Logo is required".into()));
        }
        Ok(())
    }

    /// Stored rows may predate the year range, link check or logo rule.
    fn validate_edit(&self) -> Result<()> {
        self.require_text()?;
        if self.stored_year.as_deref() != Some(self.year.as_str()) {
            validate_year(&self.year)?;
        }
        if self.stored_link.as_deref() != Some(self.project_link.as_str()) {
            validate_link(&self.project_link)?;
        }
        Ok(())
    }

    fn uploads(&self, buckets: &Buckets) -> Vec<PendingUpload> {
        self.logo_file
            .iter()
            .map(|file| PendingUpload {
                field: "logo",
                bucket: buckets.logo.clone(),
                files: vec![file.clone()],
            })
            .collect()
    }

    fn to_record(&self, uploaded: &UploadedUrls) -> Value {
        let logo = uploaded.first("logo").or_else(|| self.logo_url.clone());
        json!({
            "title": self.title.trim(),
            "description": self.description.trim(),
            "location": self.location.trim(),
            "project_link": self.project_link.trim(),
            "application_type": self.application_type.trim(),
            "year": self.year.trim(),
            "tools": non_blank(&self.tools),
            "logo": logo,
        })
    }
}

impl ProjectDraft {
    fn require_text(&self) -> Result<()> {
        require(&self.title, "Title is required")?;
        require(&self.description, "Description is required")?;
        require(&self.location, "Location is required")?;
        require(&self.application_type, "Application type is required")?;
        require(&self.year, "Year is required")?;
        require(&self.project_link, "Project link is required")
    }
}

fn validate_link(link: &str) -> Result<()> {
    Url::parse(link.trim())
        .map(|_| ())
        .map_err(|_| FolioError::Validation("Project link must be a valid URL".into()))
}

fn validate_year(year: &str) -> Result<()> {
    let latest = chrono::Local::now().year();
    match year.trim().parse::<i32>() {
        Ok(y) if (FIRST_YEAR..=latest).contains(&y) => Ok(()),
        _ => Err(FolioError::Validation(format!(
            "Year must be between {FIRST_YEAR} and {latest}"
        ))),
    }
}

/// Figures shown above the project table.
#[derive(Serialize, Debug, PartialEq)]
pub struct ProjectStats {
    pub total_projects: usize,
    /// 0 when no project has a numeric year.
    pub latest_year: i32,
    pub total_technologies: usize,
    pub unique_locations: usize,
}

impl ProjectStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        Self {
            total_projects: projects.len(),
            latest_year: projects
                .iter()
                .filter_map(|p| p.year.trim().parse::<i32>().ok())
                .max()
                .unwrap_or(0),
            total_technologies: projects.iter().map(|p| p.tools.len()).sum(),
            unique_locations: projects
                .iter()
                .map(|p| p.location.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}
