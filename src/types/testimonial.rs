use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::decode;
use crate::error::Result;
use crate::output::{format_date, format_date_only, truncate};
use crate::render::{Column, Field};
use crate::screen::{require, Draft, Entity, UploadedUrls};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Testimonial {
    pub id: i64,
    #[serde(default, deserialize_with = "decode::text")]
    pub name: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub role: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub testimonial: String,
    pub created_at: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct TestimonialDraft {
    pub name: String,
    pub role: String,
    pub testimonial: String,
}

impl Entity for Testimonial {
    const TABLE: &'static str = "testimonial";
    const NOUN: &'static str = "testimonial";
    const LABEL: &'static str = "Testimonial";
    const PLURAL: &'static str = "testimonials";

    type Draft = TestimonialDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn heading(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name"),
            Column::new("role", "Role"),
            Column::with("testimonial", "Testimonial", |t: &Self| truncate(&t.testimonial, 60)),
            Column::with("created_at", "Added", |t: &Self| {
                t.created_at.as_deref().map(format_date_only).unwrap_or_default()
            }),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("name", "Name"),
            Field::new("role", "Role"),
            Field::new("testimonial", "Testimonial").full(),
            Field::with("created_at", "Created", |t: &Self| {
                t.created_at.as_deref().map(format_date).unwrap_or_default()
            }),
        ]
    }

    fn to_draft(&self) -> TestimonialDraft {
        TestimonialDraft {
            name: self.name.clone(),
            role: self.role.clone(),
            testimonial: self.testimonial.clone(),
        }
    }
}

impl Draft for TestimonialDraft {
    fn validate(&self) -> Result<()> {
        require(&self.name, "Name is required")?;
        require(&self.role, "Role is required")?;
        require(&self.testimonial, "Testimonial is required")
    }

    fn to_record(&self, _uploaded: &UploadedUrls) -> Value {
        json!({
            "name": self.name.trim(),
            "role": self.role.trim(),
            "testimonial": self.testimonial.trim(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_order() {
        let mut draft = TestimonialDraft::default();
        assert_eq!(draft.validate().unwrap_err().to_string(), "Name is required");
        draft.name = "Ada".into();
        assert_eq!(draft.validate().unwrap_err().to_string(), "Role is required");
        draft.role = "CTO".into();
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Testimonial is required"
        );
        draft.testimonial = "Great".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_record_is_trimmed() {
        let draft = TestimonialDraft {
            name: " Ada ".into(),
            role: "CTO".into(),
            testimonial: "Great\n".into(),
        };
        assert_eq!(
            draft.to_record(&UploadedUrls::default()),
            json!({"name": "Ada", "role": "CTO", "testimonial": "Great"})
        );
    }
}
