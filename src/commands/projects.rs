use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{set, set_list, Context};
use crate::cli::{ProjectCommands, ProjectCreateArgs, ProjectUpdateArgs};
use crate::client::{Backend, Order};
use crate::error::Result;
use crate::output;
use crate::screen::Entity;
use crate::types::{Project, ProjectDraft, ProjectStats};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<ProjectCreateArgs> for ProjectDraft {
    fn from(args: ProjectCreateArgs) -> Self {
        Self {
            title: args.title.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            location: args.location.unwrap_or_default(),
            project_link: args.link.unwrap_or_default(),
            application_type: args.application_type.unwrap_or_default(),
            year: args.year.unwrap_or_default(),
            tools: args.tools,
            logo_file: args.logo,
            logo_url: None,
            stored_year: None,
            stored_link: None,
        }
    }
}

impl ProjectUpdateArgs {
    fn apply(self, draft: &mut ProjectDraft) {
        set(&mut draft.title, self.title);
        set(&mut draft.description, self.description);
        set(&mut draft.location, self.location);
        set(&mut draft.project_link, self.link);
        set(&mut draft.application_type, self.application_type);
        set(&mut draft.year, self.year);
        set_list(&mut draft.tools, self.tools);
        if self.logo.is_some() {
            draft.logo_file = self.logo;
        }
    }
}

pub async fn run<B: Backend>(ctx: &Context<'_, B>, action: ProjectCommands) -> Result<()> {
    match action {
        ProjectCommands::List => super::list::<B, Project>(ctx).await,
        ProjectCommands::View { id } => super::view::<B, Project>(ctx, id).await,
        ProjectCommands::Create(args) => super::create::<B, Project>(ctx, args.into()).await,
        ProjectCommands::Update(args) => {
            let id = args.id;
            super::update::<B, Project, _>(ctx, id, |draft| args.apply(draft)).await
        }
        ProjectCommands::Delete { id } => super::delete::<B, Project>(ctx, id).await,
        ProjectCommands::Stats => stats(ctx.backend).await,
    }
}

pub async fn stats<B: Backend>(backend: &B) -> Result<()> {
    let projects: Vec<Project> = backend.select(Project::TABLE, Order::NEWEST_FIRST).await?;
    let stats = ProjectStats::from_projects(&projects);

    if output::is_json_output() {
        output::print_json(&stats);
        return Ok(());
    }

    let latest_year = match stats.latest_year {
        0 => "-".to_string(),
        year => year.to_string(),
    };
    let rows = vec![
        StatRow {
            metric: "Total projects",
            value: stats.total_projects.to_string(),
        },
        StatRow {
            metric: "Latest year",
            value: latest_year,
        },
        StatRow {
            metric: "Total technologies",
            value: stats.total_technologies.to_string(),
        },
        StatRow {
            metric: "Unique locations",
            value: stats.unique_locations.to_string(),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Draft;
    use std::path::PathBuf;

    fn create_args() -> ProjectCreateArgs {
        ProjectCreateArgs {
            title: Some("Folio".into()),
            description: None,
            location: Some("Lagos".into()),
            link: Some("https://example.com".into()),
            application_type: Some("Web App".into()),
            year: Some("2024".into()),
            tools: vec!["Rust".into()],
            logo: Some(PathBuf::from("logo.png")),
        }
    }

    #[test]
    fn test_create_args_leave_missing_fields_blank() {
        let draft = ProjectDraft::from(create_args());
        assert_eq!(draft.title, "Folio");
        assert!(draft.description.is_empty());
        assert_eq!(draft.logo_file, Some(PathBuf::from("logo.png")));
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Description is required"
        );
    }

    #[test]
    fn test_update_args_keep_existing_values() {
        let mut draft = ProjectDraft::from(create_args());
        draft.logo_file = None;
        draft.logo_url = Some("https://cdn/logo.png".into());

        let args = ProjectUpdateArgs {
            id: 1,
            title: None,
            description: Some("New".into()),
            location: None,
            link: None,
            application_type: None,
            year: None,
            tools: vec![],
            logo: None,
        };
        args.apply(&mut draft);

        assert_eq!(draft.title, "Folio");
        assert_eq!(draft.description, "New");
        assert_eq!(draft.tools, vec!["Rust"]);
        assert!(draft.logo_file.is_none());
        assert_eq!(draft.logo_url.as_deref(), Some("https://cdn/logo.png"));
    }
}
