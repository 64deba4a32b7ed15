//! Command handlers. Each entity module maps its CLI arguments onto a draft
//! and hands off to the generic helpers below.

pub mod about;
pub mod auth;
pub mod experiences;
pub mod hero;
pub mod init;
pub mod projects;
pub mod services;
pub mod testimonials;

use crate::client::Backend;
use crate::config::Buckets;
use crate::error::{FolioError, Result};
use crate::output;
use crate::screen::{Entity, Form, Prompt, Screen, TerminalNotifier};

/// Everything a command needs to talk to the backend and the user.
pub struct Context<'a, B> {
    pub backend: &'a B,
    pub buckets: Buckets,
    pub notifier: TerminalNotifier,
    pub prompt: Prompt,
}

impl<'a, B: Backend> Context<'a, B> {
    pub fn new(backend: &'a B, buckets: Buckets, assume_yes: bool) -> Self {
        Self {
            backend,
            buckets,
            notifier: TerminalNotifier,
            prompt: Prompt { assume_yes },
        }
    }

    fn screen<E: Entity>(&self) -> Screen<'_, B, E> {
        Screen::new(self.backend, &self.notifier, self.buckets.clone())
    }
}

pub async fn list<B: Backend, E: Entity>(ctx: &Context<'_, B>) -> Result<()> {
    let mut screen = ctx.screen::<E>();
    screen.refresh().await.into_result()?;
    show_rows(&screen);
    Ok(())
}

pub async fn view<B: Backend, E: Entity>(ctx: &Context<'_, B>, id: i64) -> Result<()> {
    let mut screen = ctx.screen::<E>();
    screen.refresh().await.into_result()?;

    let not_found = || FolioError::NotFound {
        what: E::LABEL.to_string(),
        id,
    };

    if output::is_json_output() {
        let row = screen.find(id).ok_or_else(not_found)?;
        output::print_json(row);
    } else {
        let text = screen.detail(id).ok_or_else(not_found)?;
        print!("{text}");
    }

    Ok(())
}

pub async fn create<B: Backend, E: Entity>(ctx: &Context<'_, B>, draft: E::Draft) -> Result<()> {
    let mut screen = ctx.screen::<E>();
    let mut form = Form::open(draft);
    screen.create(&mut form).await.into_result()?;
    after_mutation(&screen);
    Ok(())
}

/// Pre-populate the edit form from the stored row, apply `changes`, then save.
pub async fn update<B, E, F>(ctx: &Context<'_, B>, id: i64, changes: F) -> Result<()>
where
    B: Backend,
    E: Entity,
    F: FnOnce(&mut E::Draft),
{
    let mut screen = ctx.screen::<E>();
    screen.refresh().await.into_result()?;

    let mut form = screen.edit_form(id).ok_or_else(|| FolioError::NotFound {
        what: E::LABEL.to_string(),
        id,
    })?;
    changes(&mut form.draft);

    screen.edit(id, &mut form).await.into_result()?;
    after_mutation(&screen);
    Ok(())
}

pub async fn delete<B: Backend, E: Entity>(ctx: &Context<'_, B>, id: i64) -> Result<()> {
    let mut screen = ctx.screen::<E>();
    if screen.delete(id, &ctx.prompt).await.into_result()? {
        after_mutation(&screen);
    } else {
        output::print_message("Aborted.");
    }
    Ok(())
}

fn show_rows<B: Backend, E: Entity>(screen: &Screen<'_, B, E>) {
    if output::is_json_output() {
        output::print_json(screen.rows());
    } else {
        println!("{}", screen.table());
    }
}

fn after_mutation<B: Backend, E: Entity>(screen: &Screen<'_, B, E>) {
    if !output::is_quiet() {
        show_rows(screen);
    }
}

/// Overwrite `target` only when a new value was given.
pub(crate) fn set(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Replace a list only when at least one new item was given.
pub(crate) fn set_list(target: &mut Vec<String>, values: Vec<String>) {
    if !values.is_empty() {
        *target = values;
    }
}
