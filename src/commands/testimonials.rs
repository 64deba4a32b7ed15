use super::{set, Context};
use crate::cli::{TestimonialCommands, TestimonialCreateArgs, TestimonialUpdateArgs};
use crate::client::Backend;
use crate::error::Result;
use crate::types::{Testimonial, TestimonialDraft};

impl From<TestimonialCreateArgs> for TestimonialDraft {
    fn from(args: TestimonialCreateArgs) -> Self {
        Self {
            name: args.name.unwrap_or_default(),
            role: args.role.unwrap_or_default(),
            testimonial: args.text.unwrap_or_default(),
        }
    }
}

impl TestimonialUpdateArgs {
    fn apply(self, draft: &mut TestimonialDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.role, self.role);
        set(&mut draft.testimonial, self.text);
    }
}

pub async fn run<B: Backend>(ctx: &Context<'_, B>, action: TestimonialCommands) -> Result<()> {
    match action {
        TestimonialCommands::List => super::list::<B, Testimonial>(ctx).await,
        TestimonialCommands::View { id } => super::view::<B, Testimonial>(ctx, id).await,
        TestimonialCommands::Create(args) => {
            super::create::<B, Testimonial>(ctx, args.into()).await
        }
        TestimonialCommands::Update(args) => {
            let id = args.id;
            super::update::<B, Testimonial, _>(ctx, id, |draft| args.apply(draft)).await
        }
        TestimonialCommands::Delete { id } => super::delete::<B, Testimonial>(ctx, id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Buckets;
    use crate::output;
    use crate::testing::FakeBackend;

    #[tokio::test]
    async fn test_create_inserts_trimmed_row() {
        output::set_quiet(true);
        let backend = FakeBackend::new();
        let ctx = Context::new(&backend, Buckets::default(), true);

        let args = TestimonialCreateArgs {
            name: Some(" Ada ".into()),
            role: Some("CTO".into()),
            text: Some("A pleasure".into()),
        };
        run(&ctx, TestimonialCommands::Create(args)).await.unwrap();

        let rows = backend.rows("testimonial");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Ada");
        assert_eq!(rows[0]["testimonial"], "A pleasure");
    }
}
