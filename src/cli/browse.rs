//! Browsing commands (list, show, search, check)
//!
//! Each command loads the doc set fresh from its source.

use anyhow::Result;

use super::output::Output;
use crate::domain::{DocSet, DocsController, Fragment, Location, SearchOutcome};
use crate::storage::{Config, DocSource};

fn load(output: &Output, config: &Config, source: &DocSource) -> Result<DocSet> {
    output.verbose_ctx("docs", &format!("Loading documentation from {}", source));
    let docs = source.load(&config.project)?;
    output.verbose_ctx(
        "docs",
        &format!(
            "Loaded {} sections in {} categories",
            docs.registry().len(),
            docs.registry().categories().len()
        ),
    );
    Ok(docs)
}

/// List categories and their sections
pub fn list(output: &Output, config: &Config, source: &DocSource) -> Result<()> {
    let docs = load(output, config, source)?;
    let registry = docs.registry();

    if output.is_json() {
        let categories: Vec<_> = registry
            .categories()
            .iter()
            .map(|category| {
                serde_json::json!({
                    "id": category.id,
                    "title": category.title,
                    "expanded": docs.expanded_defaults().contains(&category.id),
                    "sections": category.items,
                })
            })
            .collect();
        output.data(&serde_json::json!({
            "title": docs.title(),
            "default": registry.default_id(),
            "categories": categories,
        }));
    } else {
        println!("{} ({} sections)", docs.title(), registry.len());
        for category in registry.categories() {
            println!();
            println!("{}", category.title);
            for section in &category.items {
                let marker = if &section.id == registry.default_id() {
                    "*"
                } else {
                    " "
                };
                println!(" {} {:<22} {}", marker, section.id, section.title);
            }
        }
    }

    Ok(())
}

/// Show the content for a fragment, falling back to the default section
pub fn show(
    output: &Output,
    config: &Config,
    source: &DocSource,
    fragment: Option<&str>,
) -> Result<()> {
    let docs = load(output, config, source)?;
    let fragment = Fragment::parse(fragment.unwrap_or_default());

    if let Some(id) = fragment.id() {
        if !docs.registry().contains(id) {
            output.verbose_ctx(
                "show",
                &format!(
                    "Unknown section '{}', showing '{}'",
                    id,
                    docs.registry().default_id()
                ),
            );
        }
    }

    let controller = DocsController::start(
        docs,
        Location::new(fragment),
        config.project.controller_options(),
    );
    let block = controller.render_active();
    output.verbose_ctx("show", &format!("Active section: {}", controller.active()));

    if output.is_json() {
        let category = controller
            .registry()
            .category_of(controller.active().as_str())
            .map(|c| c.title.as_str());
        output.data(&serde_json::json!({
            "fragment": Fragment::for_id(controller.active()).to_string(),
            "category": category,
            "description": controller.active_section().description,
            "content": block,
        }));
    } else {
        print!("{}", block);
    }

    Ok(())
}

/// Search sections by title, description and category
pub fn search(output: &Output, config: &Config, source: &DocSource, query: &str) -> Result<()> {
    let docs = load(output, config, source)?;
    output.verbose_ctx("search", &format!("Searching for: {:?}", query));

    let outcome = docs.query(query);

    if output.is_json() {
        output.data(&outcome.entries());
        return Ok(());
    }

    match outcome {
        SearchOutcome::Inactive => println!("Empty query; nothing to search for."),
        SearchOutcome::Results(entries) if entries.is_empty() => {
            println!("No sections match '{}'", query.trim());
        }
        SearchOutcome::Results(entries) => {
            println!("Search results for '{}':", query.trim());
            println!("{:<22} {:<24} CATEGORY", "ID", "TITLE");
            println!("{}", "-".repeat(70));
            for entry in &entries {
                println!("{:<22} {:<24} {}", entry.id, entry.title, entry.category);
            }
            println!();
            println!("Found {} result(s)", entries.len());
        }
    }

    Ok(())
}

/// Validate the manifest and report what it contains
pub fn check(output: &Output, config: &Config, source: &DocSource) -> Result<()> {
    let docs = load(output, config, source)?;
    let registry = docs.registry();

    if output.is_json() {
        output.data(&serde_json::json!({
            "valid": true,
            "source": source.to_string(),
            "title": docs.title(),
            "categories": registry.categories().len(),
            "sections": registry.len(),
            "default": registry.default_id(),
            "project": config.project_root,
        }));
    } else {
        output.success(&format!(
            "{}: {} categories, {} sections, default '{}'",
            source,
            registry.categories().len(),
            registry.len(),
            registry.default_id()
        ));
        if let Some(root) = &config.project_root {
            println!("Project: {}", root.display());
        }
    }

    Ok(())
}
