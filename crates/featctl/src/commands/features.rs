//! Feature command handlers.

use std::path::Path;

use dialoguer::Confirm;
use tabled::Tabled;

use featctl_core::{Feature, FeatureForm, FeatureId, FeatureList, FeatureTab, RegistryClient};

use crate::cli::{FeaturesArgs, FeaturesCommand, GlobalOpts, OutputFormat, TabArg};
use crate::error::{CliError, from_api_error};
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    feature_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Source")]
    data_source: String,
    #[tabled(rename = "Owners")]
    owners: String,
}

impl From<&Feature> for FeatureRow {
    fn from(f: &Feature) -> Self {
        Self {
            id: feature_id(f),
            name: f.name.clone(),
            feature_type: f.feature_type.clone(),
            status: f.status.clone(),
            data_source: f.data_source.clone(),
            owners: f.owners.clone(),
        }
    }
}

fn feature_id(f: &Feature) -> String {
    f.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn detail(f: &Feature) -> String {
    [
        format!("ID:          {}", feature_id(f)),
        format!("Name:        {}", f.name),
        format!("Description: {}", f.description.as_deref().unwrap_or("-")),
        format!("Type:        {}", f.feature_type),
        format!("Status:      {}", f.status),
        format!("Source:      {}", f.data_source),
        format!("Owners:      {}", f.owners),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &RegistryClient,
    args: FeaturesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FeaturesCommand::List {
            page,
            limit,
            keyword,
            tab,
        } => list(client, page, limit, &keyword, tab, global).await,

        FeaturesCommand::Get { id } => {
            let id = FeatureId::from(id);
            let feature = client
                .get(&id)
                .await
                .map_err(|e| get_error(e, &id, client))?;
            let out = output::render_single(&global.output, &feature, detail, feature_id);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FeaturesCommand::Create {
            name,
            description,
            status,
            feature_type,
            data_source,
            owners,
            from_file,
        } => {
            let mut form = FeatureForm::new();
            if let Some(ref path) = from_file {
                let feature = read_feature_file(path)?;
                form = FeatureForm::from_existing(&Feature { id: None, ..feature }, false);
            }
            apply_field_flags(
                &mut form,
                name,
                description,
                status,
                feature_type,
                data_source,
                owners,
            );
            submit(form, client, global).await
        }

        FeaturesCommand::Update {
            id,
            name,
            description,
            status,
            feature_type,
            data_source,
            owners,
            from_file,
        } => {
            let id = FeatureId::from(id);
            let base = if let Some(ref path) = from_file {
                read_feature_file(path)?
            } else {
                client
                    .get(&id)
                    .await
                    .map_err(|e| get_error(e, &id, client))?
            };
            let existing = Feature {
                id: Some(id),
                ..base
            };
            let mut form = FeatureForm::from_existing(&existing, false);
            apply_field_flags(
                &mut form,
                name,
                description,
                status,
                feature_type,
                data_source,
                owners,
            );
            submit(form, client, global).await
        }

        FeaturesCommand::Delete { id } => delete(client, &FeatureId::from(id), global).await,
    }
}

// ── List ────────────────────────────────────────────────────────────

async fn list(
    client: &RegistryClient,
    page: u32,
    limit: u32,
    keyword: &str,
    tab: TabArg,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut table = FeatureList::with_page_size(limit);
    table.set_query(keyword);
    // Tab choice is recorded but does not alter the request yet; one
    // fetch covers the whole one-shot invocation.
    table.set_tab(match tab {
        TabArg::My => FeatureTab::Mine,
        TabArg::All => FeatureTab::All,
    });
    table.go_to_page(client, Some(page)).await;

    if let Some(err) = table.take_last_error() {
        return Err(from_api_error(err, client.base_url().as_str()));
    }

    let out = output::render_list(&global.output, table.rows(), |f| FeatureRow::from(f), feature_id);
    output::print_output(&out, global.quiet);

    if matches!(global.output, OutputFormat::Table) && !global.quiet {
        eprintln!(
            "{} — page {} of {} ({} total)",
            table.tab().label(),
            table.page(),
            page_count(table.total(), table.limit()),
            table.total()
        );
    }
    Ok(())
}

fn page_count(total: u64, limit: u32) -> u64 {
    total.div_ceil(u64::from(limit.max(1))).max(1)
}

// ── Create / Update ─────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn apply_field_flags(
    form: &mut FeatureForm,
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
    feature_type: Option<String>,
    data_source: Option<String>,
    owners: Option<String>,
) {
    if let Some(v) = name {
        form.set_name(v);
    }
    if let Some(v) = description {
        form.set_description(v);
    }
    if let Some(v) = status {
        form.set_status(v);
    }
    if let Some(v) = feature_type {
        form.set_feature_type(v);
    }
    if let Some(v) = data_source {
        form.set_data_source(v);
    }
    if let Some(v) = owners {
        form.set_owners(v);
    }
}

async fn submit(
    mut form: FeatureForm,
    client: &RegistryClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    form.submit(client).await?;

    let notices = form.drain_notices();
    output::print_notices(&notices, output::should_color(&global.color), global.quiet);

    if !form.should_navigate_away() {
        // Submission reached the registry and was rejected; route the
        // typed error so status kinds keep their exit codes.
        return Err(form.take_last_error().map_or_else(
            || CliError::Validation {
                field: "form".into(),
                reason: "submission did not complete".into(),
            },
            |err| from_api_error(err, client.base_url().as_str()),
        ));
    }

    let out = output::render_single(&global.output, form.draft(), detail, feature_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

fn read_feature_file(path: &Path) -> Result<Feature, CliError> {
    let text = std::fs::read_to_string(path)?;
    let feature: Feature = serde_json::from_str(&text)?;
    Ok(feature)
}

// ── Delete ──────────────────────────────────────────────────────────

async fn delete(
    client: &RegistryClient,
    id: &FeatureId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !global.yes {
        if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
            return Err(CliError::NonInteractiveRequiresYes {
                action: format!("delete feature {id}"),
            });
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete feature '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| CliError::Validation {
                field: "interactive".into(),
                reason: format!("prompt failed: {e}"),
            })?;
        if !confirmed {
            return Ok(());
        }
    }

    let mut table = FeatureList::new();
    let outcome = table.delete(client, id).await;

    let notices = table.drain_notices();
    output::print_notices(&notices, output::should_color(&global.color), global.quiet);
    if let Err(err) = outcome {
        return Err(get_error(err, id, client));
    }
    if let Some(err) = table.take_last_error() {
        // Delete succeeded but the follow-up reload did not.
        return Err(from_api_error(err, client.base_url().as_str()));
    }

    // Show the refreshed list so the caller sees server truth.
    let out = output::render_list(&global.output, table.rows(), |f| FeatureRow::from(f), feature_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Error shaping ───────────────────────────────────────────────────

fn get_error(err: featctl_core::ApiError, id: &FeatureId, client: &RegistryClient) -> CliError {
    if err.is_not_found() {
        CliError::NotFound {
            identifier: id.to_string(),
        }
    } else {
        from_api_error(err, client.base_url().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(37, 10), 4);
    }

    #[test]
    fn detail_renders_missing_description_as_dash() {
        let f = Feature::named("trips_count");
        assert!(detail(&f).contains("Description: -"));
    }
}
