//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::document::RequestDocument;
use crate::handler::{RequestHandler, process_document};
use crate::{AppConfig, CliError};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

// =============================================================================
// INPUT / OUTPUT
// =============================================================================

/// Read at most `max_bytes` of UTF-8 text. One byte more is read so that an
/// oversized source is reported instead of silently cut short.
fn read_bounded(source: impl Read, max_bytes: u64, origin: &str) -> Result<String, CliError> {
    let mut bytes = Vec::new();
    source
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Err(CliError::InvalidFile(format!(
            "{origin} is larger than the {max_bytes} byte input limit"
        )));
    }
    String::from_utf8(bytes)
        .map_err(|e| CliError::InvalidFile(format!("{origin} is not UTF-8: {e}")))
}

/// Read the raw document text from a file, or from stdin when `input` is `None`.
fn read_input(input: Option<&Path>, max_bytes: u64) -> Result<String, CliError> {
    let Some(path) = input else {
        return read_bounded(std::io::stdin().lock(), max_bytes, "stdin");
    };

    let origin = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| CliError::InvalidFile(format!("cannot open {origin}: {e}")))?;
    // a directory opens fine on unix and only fails on read
    if !file.metadata()?.is_file() {
        return Err(CliError::InvalidFile(format!("{origin} is not a regular file")));
    }
    tracing::debug!(path = %origin, "reading document");
    read_bounded(file, max_bytes, &origin)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            if !dir.is_dir() || path.file_name().is_none() {
                return Err(CliError::InvalidFile(format!(
                    "cannot write {}: no such directory or file name",
                    path.display()
                )));
            }
            let mut file = File::create(path)?;
            writeln!(file, "{text}")?;
            tracing::info!(path = %path.display(), "responses written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}

// =============================================================================
// PROCESS COMMAND
// =============================================================================

/// Answer every stat request of a document and return the response array as JSON.
pub fn render_responses(document_text: &str, config: &AppConfig) -> Result<String, CliError> {
    let document: RequestDocument = serde_json::from_str(document_text)?;
    let responses = process_document(&document, config.routing)?;
    to_json(&responses, config.output.pretty)
}

/// Read a document, answer it and write the responses.
pub fn cmd_process(
    config: &AppConfig,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let text = read_input(input, config.limits.max_input_bytes)?;
    let rendered = render_responses(&text, config)?;
    write_output(output, &rendered)
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Size of the network a document describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub stops: usize,
    pub buses: usize,
    pub distances: usize,
    pub stat_requests: usize,
    /// Present only when a routing graph could be built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_vertices: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_edges: Option<usize>,
    /// Buses left out of the routing graph.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_buses: Vec<String>,
}

/// Populate a document's network without answering its requests.
pub fn summarize(document: &RequestDocument, config: &AppConfig) -> Result<NetworkSummary, CliError> {
    let handler = RequestHandler::from_document(document, config.routing)?;
    let catalogue = handler.catalogue();
    let graph = handler.graph();

    Ok(NetworkSummary {
        stops: catalogue.stop_count(),
        buses: catalogue.bus_count(),
        distances: catalogue.distance_count(),
        stat_requests: document.stat_requests.len(),
        graph_vertices: graph.map(|g| g.vertex_count()),
        graph_edges: graph.map(|g| g.edge_count()),
        skipped_buses: graph
            .into_iter()
            .flat_map(|g| g.skipped_buses())
            .filter_map(|(id, _)| catalogue.bus(id).map(|bus| bus.name.clone()))
            .collect(),
    })
}

/// Show network status.
pub fn cmd_status(config: &AppConfig, input: Option<&Path>, json: bool) -> Result<(), CliError> {
    let text = read_input(input, config.limits.max_input_bytes)?;
    let document: RequestDocument = serde_json::from_str(&text)?;
    let summary = summarize(&document, config)?;

    if json {
        println!("{}", to_json(&summary, config.output.pretty)?);
        return Ok(());
    }

    println!("Transit Network Status");
    println!("======================");
    println!("Stops:         {}", summary.stops);
    println!("Buses:         {}", summary.buses);
    println!("Distances:     {}", summary.distances);
    println!("Stat Requests: {}", summary.stat_requests);
    match (summary.graph_vertices, summary.graph_edges) {
        (Some(vertices), Some(edges)) => {
            println!("Graph:         {} vertices, {} edges", vertices, edges);
        }
        _ => println!("Graph:         not built"),
    }
    if !summary.skipped_buses.is_empty() {
        println!("Skipped Buses: {}", summary.skipped_buses.join(", "));
    }

    Ok(())
}
