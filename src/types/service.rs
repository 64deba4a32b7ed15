use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::decode;
use crate::error::Result;
use crate::output::{bullets, join_list, truncate};
use crate::render::{Column, Field};
use crate::screen::{non_blank, require, require_any, Draft, Entity, UploadedUrls};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Service {
    pub id: i64,
    #[serde(default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub description: String,
    #[serde(default, deserialize_with = "decode::string_list")]
    pub roles: Vec<String>,
    pub created_at: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct ServiceDraft {
    pub title: String,
    pub description: String,
    pub roles: Vec<String>,
}

impl Entity for Service {
    const TABLE: &'static str = "services";
    const NOUN: &'static str = "service";
    const LABEL: &'static str = "Service";
    const PLURAL: &'static str = "services";

    type Draft = ServiceDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn heading(&self) -> String {
        self.title.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Title"),
            Column::with("description", "Description", |s: &Self| {
                truncate(&s.description, 50)
            }),
            Column::with("roles", "Type", |s: &Self| join_list(&s.roles)),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("title", "Title"),
            Field::new("description", "Description").full(),
            Field::with("roles", "Roles", |s: &Self| bullets(&s.roles)).full(),
        ]
    }

    fn to_draft(&self) -> ServiceDraft {
        ServiceDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            roles: self.roles.clone(),
        }
    }
}

impl Draft for ServiceDraft {
    fn validate(&self) -> Result<()> {
        require(&self.title, "Title is required")?;
        require(&self.description, "Description is required")?;
        require_any(&self.roles, "At least one role is required")
    }

    fn to_record(&self, _uploaded: &UploadedUrls) -> Value {
        json!({
            "title": self.title.trim(),
            "description": self.description.trim(),
            "roles": non_blank(&self.roles),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_stored_as_string_decode() {
        let service: Service = serde_json::from_value(json!({
            "id": 3,
            "title": "Web",
            "description": "Sites",
            "roles": "[\"Frontend\",\"Backend\"]"
        }))
        .unwrap();
        assert_eq!(service.roles, vec!["Frontend", "Backend"]);
    }

    #[test]
    fn test_blank_roles_fail_validation() {
        let draft = ServiceDraft {
            title: "Web".into(),
            description: "Sites".into(),
            roles: vec!["".into(), "  ".into()],
        };
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "At least one role is required"
        );
    }

    #[test]
    fn test_record_drops_blank_roles() {
        let draft = ServiceDraft {
            title: "Web".into(),
            description: "Sites".into(),
            roles: vec!["Frontend".into(), "".into()],
        };
        assert_eq!(
            draft.to_record(&UploadedUrls::default())["roles"],
            json!(["Frontend"])
        );
    }
}
