use super::{set, set_list, Context};
use crate::cli::{ExperienceCommands, ExperienceCreateArgs, ExperienceUpdateArgs};
use crate::client::Backend;
use crate::error::Result;
use crate::types::{WorkExperience, WorkExperienceDraft};

impl From<ExperienceCreateArgs> for WorkExperienceDraft {
    fn from(args: ExperienceCreateArgs) -> Self {
        Self {
            title_role: args.title.unwrap_or_default(),
            company: args.company.unwrap_or_default(),
            location: args.location.unwrap_or_default(),
            date_started: args.start.unwrap_or_default(),
            date_ended: args.end.unwrap_or_default(),
            job_type: args.job_type.unwrap_or_default(),
            job_responsibility: args.responsibilities,
        }
    }
}

impl ExperienceUpdateArgs {
    fn apply(self, draft: &mut WorkExperienceDraft) {
        set(&mut draft.title_role, self.title);
        set(&mut draft.company, self.company);
        set(&mut draft.location, self.location);
        set(&mut draft.date_started, self.start);
        set(&mut draft.date_ended, self.end);
        set(&mut draft.job_type, self.job_type);
        set_list(&mut draft.job_responsibility, self.responsibilities);
    }
}

pub async fn run<B: Backend>(ctx: &Context<'_, B>, action: ExperienceCommands) -> Result<()> {
    match action {
        ExperienceCommands::List => super::list::<B, WorkExperience>(ctx).await,
        ExperienceCommands::View { id } => super::view::<B, WorkExperience>(ctx, id).await,
        ExperienceCommands::Create(args) => {
            super::create::<B, WorkExperience>(ctx, args.into()).await
        }
        ExperienceCommands::Update(args) => {
            let id = args.id;
            super::update::<B, WorkExperience, _>(ctx, id, |draft| args.apply(draft)).await
        }
        ExperienceCommands::Delete { id } => super::delete::<B, WorkExperience>(ctx, id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_map_to_columns() {
        let draft = WorkExperienceDraft::from(ExperienceCreateArgs {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            location: None,
            start: Some("2021-03-01".into()),
            end: Some("Present".into()),
            job_type: Some("Contract".into()),
            responsibilities: vec!["Build".into()],
        });
        assert_eq!(draft.title_role, "Engineer");
        assert_eq!(draft.date_started, "2021-03-01");
        assert_eq!(draft.date_ended, "Present");
        assert!(draft.location.is_empty());
        assert_eq!(draft.job_responsibility, vec!["Build"]);
    }

    #[test]
    fn test_update_args_only_touch_given_fields() {
        let mut draft = WorkExperienceDraft {
            title_role: "Engineer".into(),
            job_responsibility: vec!["Build".into()],
            ..WorkExperienceDraft::default()
        };
        ExperienceUpdateArgs {
            id: 1,
            title: None,
            company: Some("Initech".into()),
            location: None,
            start: None,
            end: None,
            job_type: None,
            responsibilities: vec![],
        }
        .apply(&mut draft);

        assert_eq!(draft.title_role, "Engineer");
        assert_eq!(draft.company, "Initech");
        assert_eq!(draft.job_responsibility, vec!["Build"]);
    }
}
