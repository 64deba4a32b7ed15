use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::decode;
use crate::error::Result;
use crate::output::{bullets, format_month};
use crate::render::{Column, Field};
use crate::screen::{non_blank, require, require_any, Draft, Entity, UploadedUrls};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WorkExperience {
    pub id: i64,
    #[serde(default, deserialize_with = "decode::text")]
    pub title_role: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub company: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub location: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub date_started: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub date_ended: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub job_type: String,
    #[serde(default, deserialize_with = "decode::string_list")]
    pub job_responsibility: Vec<String>,
    pub created_at: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct WorkExperienceDraft {
    pub title_role: String,
    pub company: String,
    pub location: String,
    pub date_started: String,
    pub date_ended: String,
    pub job_type: String,
    pub job_responsibility: Vec<String>,
}

impl Entity for WorkExperience {
    const TABLE: &'static str = "work_experiences";
    const NOUN: &'static str = "experience";
    const LABEL: &'static str = "Experience";
    const PLURAL: &'static str = "work experiences";

    type Draft = WorkExperienceDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn heading(&self) -> String {
        format!("{} at {}", self.title_role, self.company)
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title_role", "Job Title"),
            Column::new("company", "Company"),
            Column::with("date_started", "Start", |e: &Self| format_month(&e.date_started)),
            Column::with("date_ended", "End", |e: &Self| format_month(&e.date_ended)),
            Column::new("location", "Location"),
            Column::new("job_type", "Type"),
            Column::with("job_responsibility", "Responsibilities", |e: &Self| {
                e.job_responsibility.len().to_string()
            }),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("company", "Company"),
            Field::new("location", "Location"),
            Field::new("job_type", "Job Type"),
            Field::with("date_started", "Period", |e: &Self| {
                format!(
                    "{} - {}",
                    format_month(&e.date_started),
                    format_month(&e.date_ended)
                )
            }),
            Field::with("job_responsibility", "Responsibilities", |e: &Self| {
                bullets(&e.job_responsibility)
            })
            .full(),
        ]
    }

    fn to_draft(&self) -> WorkExperienceDraft {
        WorkExperienceDraft {
            title_role: self.title_role.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            date_started: self.date_started.clone(),
            date_ended: self.date_ended.clone(),
            job_type: self.job_type.clone(),
            job_responsibility: self.job_responsibility.clone(),
        }
    }
}

impl Draft for WorkExperienceDraft {
    fn validate(&self) -> Result<()> {
        require(&self.title_role, "Job title is required")?;
        require(&self.company, "Company is required")?;
        require(&self.location, "Location is required")?;
        require(&self.date_started, "Start date is required")?;
        require(&self.date_ended, "End date is required")?;
        require(&self.job_type, "Job type is required")?;
        require_any(
            &self.job_responsibility,
            "At least one responsibility is required",
        )
    }

    fn to_record(&self, _uploaded: &UploadedUrls) -> Value {
        json!({
            "title_role": self.title_role.trim(),
            "company": self.company.trim(),
            "location": self.location.trim(),
            "date_started": self.date_started.trim(),
            "date_ended": self.date_ended.trim(),
            "job_type": self.job_type.trim(),
            "job_responsibility": non_blank(&self.job_responsibility),
        })
    }
}
