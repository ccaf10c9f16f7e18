//! End-to-end render orchestration
//!
//! One render is: fetch the preset document, normalize it against the
//! catalog, compute the layout, resolve every icon concurrently, then
//! composite and encode. The store and icon source are injected through
//! traits so tests run fully in memory.

use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::catalog::ItemCatalog;
use crate::compositor::{composite, Theme};
use crate::fetch::{resolve_grid_tasks, resolve_list_tasks, DrawTask, IconSource};
use crate::layout::compute_layout;
use crate::models::PresetRecord;
use crate::normalize::normalize;
use crate::output::{encode_png, OutputError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read preset document: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed preset document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of raw preset documents, keyed by preset id.
#[allow(async_fn_in_trait)]
pub trait PresetStore: Sync {
    /// `Ok(None)` means the id does not exist; errors are reserved for
    /// transport and parse failures.
    async fn fetch(&self, id: &str) -> Result<Option<PresetRecord>, StoreError>;
}

/// Preset documents stored as one JSON file per id under a root
/// directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PresetStore for JsonFileStore {
    async fn fetch(&self, id: &str) -> Result<Option<PresetRecord>, StoreError> {
        let path = self.root.join(format!("{id}.json"));
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("preset '{0}' does not exist")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Render one preset card and return the encoded PNG bytes.
///
/// Icon resolution for all six sections runs concurrently; each
/// section's tasks keep their slot order regardless of fetch timing.
pub async fn render<P: PresetStore, S: IconSource>(
    store: &P,
    catalog: &ItemCatalog,
    icons: &S,
    theme: &Theme,
    preset_id: &str,
    debug_overlay: bool,
) -> Result<Vec<u8>, RenderError> {
    let record = store
        .fetch(preset_id)
        .await?
        .ok_or_else(|| RenderError::NotFound(preset_id.to_string()))?;
    let preset = normalize(&record, catalog);
    let layout = compute_layout(&preset, theme.panel_height());

    let relic_primary = preset.relics.filled_primary();
    let relic_alternative = preset.relics.filled_alternative();
    let familiar_primary = preset.familiars.filled_primary();
    let familiar_alternative = preset.familiars.filled_alternative();

    // An absent alternates block means the matching list is empty, so
    // the zone it falls back to never receives a task.
    let relic_alt_zone = layout
        .relics
        .alternates
        .map(|alt| alt.zone)
        .unwrap_or(layout.relics.zone);
    let familiar_alt_zone = layout
        .familiars
        .alternates
        .map(|alt| alt.zone)
        .unwrap_or(layout.familiars.zone);

    let (inventory, equipment, mut relics, relic_alt, mut familiars, familiar_alt) = futures::join!(
        resolve_grid_tasks(&preset.inventory, &layout.inventory, catalog, icons),
        resolve_grid_tasks(&preset.equipment, &layout.equipment, catalog, icons),
        resolve_list_tasks(&relic_primary, &layout.relics.zone, catalog, icons),
        resolve_list_tasks(&relic_alternative, &relic_alt_zone, catalog, icons),
        resolve_list_tasks(&familiar_primary, &layout.familiars.zone, catalog, icons),
        resolve_list_tasks(&familiar_alternative, &familiar_alt_zone, catalog, icons),
    );
    relics.extend(relic_alt);
    familiars.extend(familiar_alt);

    let canvas = composite(
        &layout,
        theme,
        &preset.preset_name,
        &inventory,
        &equipment,
        &relics,
        &familiars,
        debug_overlay,
    );
    let bytes = encode_png(&canvas)?;
    info!(
        "rendered preset '{preset_id}': {}x{}, {} tasks, {} bytes",
        layout.canvas_width,
        layout.canvas_height,
        task_count(&[&inventory, &equipment, &relics, &familiars]),
        bytes.len()
    );
    Ok(bytes)
}

fn task_count(sections: &[&Vec<DrawTask>]) -> usize {
    sections.iter().map(|s| s.len()).sum()
}
