use super::{set, Context};
use crate::cli::{AboutCommands, AboutCreateArgs, AboutUpdateArgs};
use crate::client::Backend;
use crate::error::Result;
use crate::types::{AboutMe, AboutMeDraft};

impl From<AboutCreateArgs> for AboutMeDraft {
    fn from(args: AboutCreateArgs) -> Self {
        Self {
            title: args.title.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
        }
    }
}

pub async fn run<B: Backend>(ctx: &Context<'_, B>, action: AboutCommands) -> Result<()> {
    match action {
        AboutCommands::List => super::list::<B, AboutMe>(ctx).await,
        AboutCommands::View { id } => super::view::<B, AboutMe>(ctx, id).await,
        AboutCommands::Create(args) => super::create::<B, AboutMe>(ctx, args.into()).await,
        AboutCommands::Update(AboutUpdateArgs {
            id,
            title,
            description,
        }) => {
            super::update::<B, AboutMe, _>(ctx, id, |draft| {
                set(&mut draft.title, title);
                set(&mut draft.description, description);
            })
            .await
        }
        AboutCommands::Delete { id } => super::delete::<B, AboutMe>(ctx, id).await,
    }
}
