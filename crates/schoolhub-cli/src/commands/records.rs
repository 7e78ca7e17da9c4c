//! Generic list/show/create/update/delete over every resource.
//!
//! Resources are addressed on the command line by their cache key
//! (`students`, `hostel-buildings`, ...). `with_resources!` expands a
//! callback macro over the full resource list so dispatch and the
//! catalogue stay in sync.

use std::path::Path;

use anyhow::{Context, anyhow, bail};
use dialoguer::Confirm;
use schoolhub_cache::FetchPolicy;
use schoolhub_client::{ApiClient, Resource, resources};
use schoolhub_core::ListQuery;
use schoolhub_store::{EmptyState, FormSubmitter, SubmitError, effect_channel};
use serde::Serialize;
use serde_json::Value;

use super::{print_effects, require_session};

macro_rules! with_resources {
    ($callback:ident ! ( $($args:tt)* )) => {
        $callback!(
            ($($args)*)
            Students,
            Parents,
            Teachers,
            Departments,
            Subjects,
            Classes,
            Sections,
            Exams,
            ExamResults,
            FeeStructures,
            FeePayments,
            Books,
            BookIssues,
            Vehicles,
            TransportRoutes,
            TransportAllocations,
            HostelBuildings,
            HostelRooms,
            HostelAllocations,
            Staff,
            LeaveRequests,
            InventoryItems,
            Suppliers,
            PurchaseOrders,
            Notices,
            Messages
        )
    };
}

macro_rules! dispatch {
    (($key:expr, $alias:ident => $body:block) $($resource:ident),*) => {
        match $key {
            $(
                key if key == <resources::$resource as Resource>::KEY => {
                    type $alias = resources::$resource;
                    $body
                }
            )*
            other => Err(unknown_resource(other)),
        }
    };
}

macro_rules! catalogue_entries {
    (() $($resource:ident),*) => {
        vec![$((
            <resources::$resource as Resource>::KEY,
            <resources::$resource as Resource>::LABEL,
        )),*]
    };
}

/// `(key, label)` for every resource the CLI can address.
pub fn catalogue() -> Vec<(&'static str, &'static str)> {
    with_resources!(catalogue_entries!())
}

fn unknown_resource(key: &str) -> anyhow::Error {
    anyhow!("Unknown resource '{key}'. Run `schoolhub resources` to see the available ones.")
}

pub fn print_catalogue() {
    let entries = catalogue();
    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, label) in entries {
        println!("{key:<width$}  {label}");
    }
}

pub async fn list(
    client: &ApiClient,
    resource: &str,
    query: &ListQuery,
    policy: FetchPolicy,
) -> anyhow::Result<()> {
    require_session(client)?;
    with_resources!(dispatch!(resource, R => { list_as::<R>(client, query, policy).await }))
}

pub async fn show(
    client: &ApiClient,
    resource: &str,
    id: &str,
    policy: FetchPolicy,
) -> anyhow::Result<()> {
    require_session(client)?;
    with_resources!(dispatch!(resource, R => {
        let entity = client.resource::<R>().get_with(id, policy).await?;
        print_json(&entity)
    }))
}

pub async fn create(client: &ApiClient, resource: &str, file: &Path) -> anyhow::Result<()> {
    require_session(client)?;
    with_resources!(dispatch!(resource, R => { create_as::<R>(client, file).await }))
}

pub async fn update(
    client: &ApiClient,
    resource: &str,
    id: &str,
    file: &Path,
) -> anyhow::Result<()> {
    require_session(client)?;
    with_resources!(dispatch!(resource, R => { update_as::<R>(client, id, file).await }))
}

pub async fn delete(client: &ApiClient, resource: &str, id: &str, yes: bool) -> anyhow::Result<()> {
    require_session(client)?;
    with_resources!(dispatch!(resource, R => { delete_as::<R>(client, id, yes).await }))
}

async fn list_as<R: Resource>(
    client: &ApiClient,
    query: &ListQuery,
    policy: FetchPolicy,
) -> anyhow::Result<()> {
    let page = client.resource::<R>().list_with(query, policy).await?;

    if page.is_empty() {
        let empty = EmptyState::for_resource::<R>(query);
        println!("{}\n{}", empty.title, empty.message);
        if empty.is_search() {
            println!("\nRun the command again without --search to see everything.");
        } else {
            println!("\n{}: schoolhub create {} --file <form.json>", empty.action, R::KEY);
        }
        return Ok(());
    }

    for item in &page.data {
        println!("{}", summary_line(&serde_json::to_value(item)?));
    }
    if let Some(meta) = &page.pagination {
        println!(
            "\nPage {} of {} ({} {} total)",
            meta.page,
            meta.page_count(),
            meta.total,
            R::LABEL.to_lowercase()
        );
    }
    Ok(())
}

async fn create_as<R: Resource>(client: &ApiClient, file: &Path) -> anyhow::Result<()> {
    let form: R::Form = read_form(file)?;
    let (effects, mut rx) = effect_channel();
    let submitter = FormSubmitter::for_create::<R>(client.cache().clone(), effects);

    let result = submitter
        .submit(&form, || async { client.resource::<R>().create(&form).await })
        .await;
    print_effects(&mut rx);
    print_json(&submit_result(result)?)
}

async fn update_as<R: Resource>(client: &ApiClient, id: &str, file: &Path) -> anyhow::Result<()> {
    let form: R::Form = read_form(file)?;
    let (effects, mut rx) = effect_channel();
    let submitter = FormSubmitter::for_update::<R>(client.cache().clone(), effects);

    let result = submitter
        .submit(&form, || async { client.resource::<R>().update(id, &form).await })
        .await;
    print_effects(&mut rx);
    print_json(&submit_result(result)?)
}

async fn delete_as<R: Resource>(client: &ApiClient, id: &str, yes: bool) -> anyhow::Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete {} {id}?", R::SINGULAR.to_lowercase()))
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Cancelled");
        return Ok(());
    }

    client.resource::<R>().delete(id).await?;
    println!("✅ {} deleted successfully", R::SINGULAR);
    Ok(())
}

fn submit_result<T>(result: Result<T, SubmitError>) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(SubmitError::Invalid(errors)) => bail!("Please fix the following:\n{errors}"),
        Err(SubmitError::Api(e)) => bail!(e.user_message()),
    }
}

fn read_form<F: serde::de::DeserializeOwned>(file: &Path) -> anyhow::Result<F> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid form", file.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per list row: the id, a display name, and the status if any.
pub fn summary_line(item: &Value) -> String {
    let text = |key: &str| item.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());

    let id = text("id").unwrap_or("-");
    let name = ["name", "title", "subject", "itemName", "orderNumber", "registrationNumber"]
        .iter()
        .find_map(|key| text(key).map(str::to_string))
        .or_else(|| match (text("firstName"), text("lastName")) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.to_string()),
            _ => None,
        });

    let mut line = id.to_string();
    if let Some(name) = name {
        line.push_str("  ");
        line.push_str(&name);
    }
    if let Some(status) = text("status") {
        line.push_str(&format!("  [{status}]"));
    }
    line
}
