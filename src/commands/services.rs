use super::{set, set_list, Context};
use crate::cli::{ServiceCommands, ServiceCreateArgs, ServiceUpdateArgs};
use crate::client::Backend;
use crate::error::Result;
use crate::types::{Service, ServiceDraft};

impl From<ServiceCreateArgs> for ServiceDraft {
    fn from(args: ServiceCreateArgs) -> Self {
        Self {
            title: args.title.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            roles: args.roles,
        }
    }
}

impl ServiceUpdateArgs {
    fn apply(self, draft: &mut ServiceDraft) {
        set(&mut draft.title, self.title);
        set(&mut draft.description, self.description);
        set_list(&mut draft.roles, self.roles);
    }
}

pub async fn run<B: Backend>(ctx: &Context<'_, B>, action: ServiceCommands) -> Result<()> {
    match action {
        ServiceCommands::List => super::list::<B, Service>(ctx).await,
        ServiceCommands::View { id } => super::view::<B, Service>(ctx, id).await,
        ServiceCommands::Create(args) => super::create::<B, Service>(ctx, args.into()).await,
        ServiceCommands::Update(args) => {
            let id = args.id;
            super::update::<B, Service, _>(ctx, id, |draft| args.apply(draft)).await
        }
        ServiceCommands::Delete { id } => super::delete::<B, Service>(ctx, id).await,
    }
}
