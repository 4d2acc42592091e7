//! Subcommand execution. Every command takes its transport and output sink
//! as parameters so it runs the same against the real backend and in tests.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use dashboard::columns::SortOrder;
use dashboard::notify::Notifier;
use dashboard::{CreatePolicy, NavMenu, Registry, ResourcePage, ResourceSpec, SubmitOutcome, Transport};

use crate::cli::{CliError, CreateArgs, ExportArgs, ListArgs, parse_field};
use crate::render;

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;

/// Everything a command needs besides its own arguments.
pub struct Context<'a> {
    pub menu: &'a NavMenu,
    pub registry: &'a Registry,
    pub transport: Arc<dyn Transport>,
    pub policy: CreatePolicy,
    pub notifier: &'a dyn Notifier,
}

impl Context<'_> {
    fn spec(&self, name: &str) -> Result<&ResourceSpec, CliError> {
        self.registry
            .get(name)
            .ok_or_else(|| CliError::UnknownResource(name.to_owned()))
    }

    /// A page for `name`, mounted and loaded.
    async fn loaded_page(&self, name: &str) -> Result<ResourcePage, CliError> {
        let spec = self.spec(name)?;
        let mut page = ResourcePage::new(spec, self.transport.clone(), self.policy);
        page.mount().await;
        if !page.list().is_loaded() {
            return Err(CliError::NotLoaded(spec.name));
        }
        Ok(page)
    }
}

pub fn menu(ctx: &Context<'_>, out: &mut impl Write) -> Result<(), CliError> {
    out.write_all(render::menu(ctx.menu).as_bytes())?;
    Ok(())
}

pub fn resources(ctx: &Context<'_>, out: &mut impl Write) -> Result<(), CliError> {
    out.write_all(render::resources(ctx.registry).as_bytes())?;
    Ok(())
}

pub async fn list(ctx: &Context<'_>, args: &ListArgs, out: &mut impl Write) -> Result<(), CliError> {
    let mut page = ctx.loaded_page(&args.resource).await?;
    for key in &args.hidden {
        page.list_mut().set_column_visible(key, false)?;
    }
    if let Some(key) = &args.sort {
        let order = if args.desc { SortOrder::Descending } else { SortOrder::Ascending };
        page.list_mut().sort_by(key, order)?;
    }
    if let Some(table) = page.list().table() {
        out.write_all(render::table(page.spec().list_title, &table).as_bytes())?;
    }
    Ok(())
}

pub async fn create(ctx: &Context<'_>, args: &CreateArgs, out: &mut impl Write) -> Result<(), CliError> {
    let spec = ctx.spec(&args.resource)?;
    let mut page = ResourcePage::new(spec, ctx.transport.clone(), ctx.policy);
    for raw in &args.fields {
        let (name, value) = parse_field(raw)?;
        page.form_mut().set(name, value)?;
    }

    match page.submit(ctx.notifier).await {
        SubmitOutcome::Created(record) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            Ok(())
        }
        SubmitOutcome::Invalid(e) => Err(CliError::Invalid(e)),
        SubmitOutcome::Failed(e) => Err(CliError::Create(e)),
        SubmitOutcome::Busy => Err(CliError::Busy),
    }
}

pub async fn export(ctx: &Context<'_>, args: &ExportArgs, out: &mut impl Write) -> Result<(), CliError> {
    let page = ctx.loaded_page(&args.resource).await?;
    let export = page.list().export(page.spec().export_filename)?;
    let path = export.write_to(Path::new(&args.out))?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}
