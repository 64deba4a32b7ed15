use super::{set, set_list, Context};
use crate::cli::{HeroCommands, HeroCreateArgs, HeroUpdateArgs};
use crate::client::Backend;
use crate::error::Result;
use crate::types::{HeroContent, HeroDraft};

impl From<HeroCreateArgs> for HeroDraft {
    fn from(args: HeroCreateArgs) -> Self {
        Self {
            super_text: args.super_text.unwrap_or_default(),
            sub_text: args.sub_text.unwrap_or_default(),
            phones: args.phones,
            images: Vec::new(),
            image_files: args.images,
            resume_url: None,
            resume_file: args.resume,
        }
    }
}

impl HeroUpdateArgs {
    fn apply(self, draft: &mut HeroDraft) {
        set(&mut draft.super_text, self.super_text);
        set(&mut draft.sub_text, self.sub_text);
        set_list(&mut draft.phones, self.phones);
        if self.clear_images {
            draft.images.clear();
        }
        draft.image_files = self.images;
        if self.resume.is_some() {
            draft.resume_file = self.resume;
        }
    }
}

pub async fn run<B: Backend>(ctx: &Context<'_, B>, action: HeroCommands) -> Result<()> {
    match action {
        HeroCommands::List => super::list::<B, HeroContent>(ctx).await,
        HeroCommands::View { id } => super::view::<B, HeroContent>(ctx, id).await,
        HeroCommands::Create(args) => super::create::<B, HeroContent>(ctx, args.into()).await,
        HeroCommands::Update(args) => {
            let id = args.id;
            super::update::<B, HeroContent, _>(ctx, id, |draft| args.apply(draft)).await
        }
        HeroCommands::Delete { id } => super::delete::<B, HeroContent>(ctx, id).await,
    }
}
