use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::decode;
use crate::config::Buckets;
use crate::error::Result;
use crate::output::{bullets, join_list, truncate};
use crate::render::{Column, Field};
use crate::screen::{non_blank, require, Draft, Entity, PendingUpload, UploadedUrls};

/// Landing-page hero block.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HeroContent {
    pub id: i64,
    #[serde(default, deserialize_with = "decode::text")]
    pub super_text: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub sub_text: String,
    #[serde(default, deserialize_with = "decode::string_list")]
    pub phones: Vec<String>,
    #[serde(
        rename = "debs_hero",
        default,
        deserialize_with = "decode::string_list"
    )]
    pub images: Vec<String>,
    #[serde(
        default,
        deserialize_with = "decode::optional_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub resume: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct HeroDraft {
    pub super_text: String,
    pub sub_text: String,
    pub phones: Vec<String>,
    /// Already-stored image URLs, kept ahead of new uploads.
    pub images: Vec<String>,
    pub image_files: Vec<PathBuf>,
    pub resume_url: Option<String>,
    pub resume_file: Option<PathBuf>,
}

impl Entity for HeroContent {
    const TABLE: &'static str = "hero_info";
    const NOUN: &'static str = "hero";
    const LABEL: &'static str = "Hero";
    const PLURAL: &'static str = "hero entries";

    type Draft = HeroDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn heading(&self) -> String {
        self.super_text.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::with("super_text", "Super Text", |h: &Self| truncate(&h.super_text, 40)),
            Column::with("sub_text", "Sub Text", |h: &Self| truncate(&h.sub_text, 50)),
            Column::with("phones", "Phones", |h: &Self| join_list(&h.phones)),
            Column::with("debs_hero", "Images", |h: &Self| h.images.len().to_string()),
            Column::with("resume", "Resume", |h: &Self| {
                let shown = if h.resume.is_some() { "yes" } else { "-" };
                shown.to_string()
            }),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("sub_text", "Sub Text").full(),
            Field::with("phones", "Phones", |h: &Self| join_list(&h.phones)),
            Field::new("resume", "Resume"),
            Field::with("debs_hero", "Images", |h: &Self| bullets(&h.images)).full(),
        ]
    }

    fn to_draft(&self) -> HeroDraft {
        HeroDraft {
            super_text: self.super_text.clone(),
            sub_text: self.sub_text.clone(),
            phones: self.phones.clone(),
            images: self.images.clone(),
            image_files: Vec::new(),
            resume_url: self.resume.clone(),
            resume_file: None,
        }
    }
}

impl Draft for HeroDraft {
    fn validate(&self) -> Result<()> {
        require(&self.super_text, "Super text is required")?;
        require(&self.sub_text, "Sub text is required")
    }

    fn uploads(&self, buckets: &Buckets) -> Vec<PendingUpload> {
        let mut uploads = Vec::new();
        if !self.image_files.is_empty() {
            uploads.push(PendingUpload {
                field: "debs_hero",
                bucket: buckets.hero_images.clone(),
                files: self.image_files.clone(),
            });
        }
        if let Some(file) = &self.resume_file {
            uploads.push(PendingUpload {
                field: "resume",
                bucket: buckets.resume.clone(),
                files: vec![file.clone()],
            });
        }
        uploads
    }

    /// `resume` is only sent when there is one, so tables without that
    /// column still accept the record.
    fn to_record(&self, uploaded: &UploadedUrls) -> Value {
        let mut images = self.images.clone();
        images.extend(uploaded.all("debs_hero"));

        let mut record = Map::new();
        record.insert("super_text".into(), self.super_text.trim().into());
        record.insert("sub_text".into(), self.sub_text.trim().into());
        record.insert("phones".into(), non_blank(&self.phones).into());
        record.insert("debs_hero".into(), images.into());

        if let Some(resume) = uploaded
            .first("resume")
            .or_else(|| self.resume_url.clone())
        {
            record.insert("resume".into(), resume.into());
        }

        Value::Object(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_legacy_row() {
        let hero: HeroContent = serde_json::from_value(json!({
            "id": 1,
            "super_text": "Hi, I'm Deb",
            "sub_text": "I build things",
            "phones": "[\"+234 800\"]",
            "debs_hero": ["https://cdn/a.png"],
        }))
        .unwrap();
        assert_eq!(hero.phones, vec!["+234 800"]);
        assert_eq!(hero.images, vec!["https://cdn/a.png"]);
        assert!(hero.resume.is_none());

        let back = serde_json::to_value(&hero).unwrap();
        assert!(back.get("resume").is_none());
        assert_eq!(back["debs_hero"], json!(["https://cdn/a.png"]));
    }

    #[test]
    fn test_empty_resume_is_none() {
        let hero: HeroContent =
            serde_json::from_value(json!({"id": 1, "resume": ""})).unwrap();
        assert!(hero.resume.is_none());
    }

    #[test]
    fn test_validation() {
        let mut draft = HeroDraft::default();
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Super text is required"
        );
        draft.super_text = "Hi".into();
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Sub text is required"
        );
        draft.sub_text = "There".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_uploads_split_by_bucket() {
        let draft = HeroDraft {
            image_files: vec!["a.png".into(), "b.png".into()],
            resume_file: Some("cv.pdf".into()),
            ..HeroDraft::default()
        };
        let uploads = draft.uploads(&Buckets::default());
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].bucket, "debs_hero");
        assert_eq!(uploads[0].files.len(), 2);
        assert_eq!(uploads[1].bucket, "resume");
        assert!(HeroDraft::default().uploads(&Buckets::default()).is_empty());
    }

    #[test]
    fn test_record_appends_new_images() {
        let draft = HeroDraft {
            super_text: "Hi".into(),
            sub_text: "There".into(),
            phones: vec!["123".into(), " ".into()],
            images: vec!["https://cdn/old.png".into()],
            ..HeroDraft::default()
        };
        let mut uploaded = UploadedUrls::default();
        uploaded.push("debs_hero", "https://cdn/new.png".into());

        let record = draft.to_record(&uploaded);
        assert_eq!(
            record["debs_hero"],
            json!(["https://cdn/old.png", "https://cdn/new.png"])
        );
        assert_eq!(record["phones"], json!(["123"]));
        assert!(record.get("resume").is_none());
    }
}
