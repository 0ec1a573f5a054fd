//! Plain-text views over the catalog.
//!
//! Renderers write into any `fmt::Write` so the binary can buffer output and
//! tests can inspect it as a `String`.

use crate::catalog::{ToolRecord, ToolStore};
use crate::dimensions::DimensionIndex;
use crate::facets::{FacetOptions, category_label, dimension_label, license_label};
use std::fmt::{self, Write};

const LIST_DIMENSION_TAGS: usize = 3;

/// One line per tool: id, name, free marker and up to three dimension tags.
pub fn render_tool_list(records: &[&ToolRecord], writer: &mut impl Write) -> fmt::Result {
    if records.is_empty() {
        return writeln!(writer, "No tools found matching your criteria.");
    }
    let id_width = records
        .iter()
        .map(|record| record.id.as_str().chars().count())
        .max()
        .unwrap_or(0);
    for record in records {
        write!(writer, "{:<id_width$}  {}", record.id.as_str(), record.name)?;
        if record.is_free() {
            write!(writer, " [free]")?;
        }
        let tags: Vec<&str> = record
            .dimension_names()
            .take(LIST_DIMENSION_TAGS)
            .collect();
        if !tags.is_empty() {
            write!(writer, "  ({})", tags.join(", "))?;
        }
        writeln!(writer)?;
    }
    writeln!(writer)?;
    writeln!(writer, "{} tool(s)", records.len())
}

/// Full view of one tool followed by its related tools.
pub fn render_tool_detail(
    record: &ToolRecord,
    related: &[&ToolRecord],
    writer: &mut impl Write,
) -> fmt::Result {
    writeln!(writer, "{}", record.name)?;
    writeln!(writer, "{}", "=".repeat(record.name.chars().count().max(4)))?;
    let dimensions: Vec<&str> = record.dimension_names().collect();
    if !dimensions.is_empty() {
        writeln!(writer, "dimensions : {}", dimensions.join(", "))?;
    }
    let categories: Vec<String> = record.category_names().map(category_label).collect();
    if !categories.is_empty() {
        writeln!(writer, "tier       : {}", categories.join(", "))?;
    }
    if let Some(url) = &record.url {
        writeln!(writer, "website    : {url}")?;
    }
    if let Some(license) = &record.license {
        writeln!(writer, "license    : {}", license_label(license))?;
    }
    if !record.how_to_use.is_empty() {
        writeln!(writer, "usage      : {}", record.how_to_use.join(", "))?;
    }
    if record.is_free() {
        writeln!(writer, "access     : free")?;
    }
    if let Some(description) = &record.description {
        writeln!(writer)?;
        writeln!(writer, "{description}")?;
    }

    if !related.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Related tools")?;
        writeln!(writer, "-------------")?;
        for tool in related {
            writeln!(writer, "- {} ({})", tool.name, tool.id)?;
        }
    }
    Ok(())
}

pub fn render_not_found(id: &str, writer: &mut impl Write) -> fmt::Result {
    writeln!(writer, "Tool not found: {id}")
}

/// The filter vocabulary, with display labels where the raw value differs.
pub fn render_facets(
    options: &FacetOptions,
    dimensions: &[String],
    writer: &mut impl Write,
) -> fmt::Result {
    writeln!(writer, "Software tier")?;
    for category in &options.categories {
        writeln!(writer, "  {category:<32} {}", category_label(category))?;
    }
    writeln!(writer)?;
    writeln!(writer, "How to use")?;
    for usage in &options.usage {
        writeln!(writer, "  {usage}")?;
    }
    writeln!(writer)?;
    writeln!(writer, "License")?;
    for license in &options.licenses {
        writeln!(writer, "  {license}  ({})", license_label(license))?;
    }
    writeln!(writer)?;
    writeln!(writer, "Free access")?;
    for free in options.free {
        writeln!(writer, "  {}", if free { "Yes" } else { "No" })?;
    }
    writeln!(writer)?;
    writeln!(writer, "Quality dimensions")?;
    for dimension in dimensions {
        writeln!(writer, "  {dimension:<32} {}", dimension_label(dimension))?;
    }
    Ok(())
}

/// Dimension overview: counts plus the first few tool names per dimension.
pub fn render_dimensions(
    index: &DimensionIndex,
    store: &ToolStore,
    writer: &mut impl Write,
) -> fmt::Result {
    if index.is_empty() {
        return writeln!(writer, "No quality dimensions found.");
    }
    for (pos, entry) in index.entries().iter().enumerate() {
        if pos > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "{} ({} tools)", entry.label(), entry.count())?;
        for id in entry.preview() {
            let name = store
                .get(id.as_str())
                .map(|record| record.name.as_str())
                .unwrap_or(id.as_str());
            writeln!(writer, "  - {name}")?;
        }
        if entry.remaining() > 0 {
            writeln!(writer, "  + {} more...", entry.remaining())?;
        }
    }
    Ok(())
}
