//! Concurrent icon resolution with a two-tier fallback
//!
//! Target rectangles are computed synchronously from the original slot
//! index; only the byte fetch and decode run concurrently. Results are
//! joined by index, so the task list keeps the input's visual order no
//! matter how fetches interleave.

use futures::future::join_all;
use image::RgbaImage;
use log::warn;
use thiserror::Error;

use crate::catalog::ItemCatalog;
use crate::layout::{Rect, Zone};
use crate::models::NormalizedSlot;

/// Errors from a single icon fetch attempt. Never escapes the pipeline:
/// a failed fetch falls back to the shared unknown-item icon, and a
/// failed fallback drops the slot silently.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("cannot read icon file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot decode icon: {0}")]
    Decode(#[from] image::ImageError),
}

/// Source of icon image bytes, keyed by URI.
///
/// Injected so tests can use deterministic in-memory fakes; production
/// uses [`HttpIconSource`].
#[allow(async_fn_in_trait)]
pub trait IconSource: Sync {
    async fn fetch(&self, uri: &str) -> Result<RgbaImage, FetchError>;
}

/// Outcome of the primary -> fallback -> drop chain for one slot.
#[derive(Debug)]
pub enum IconOutcome {
    /// The item's own icon loaded.
    Resolved(RgbaImage),
    /// The primary fetch failed; the shared unknown-item icon loaded.
    Fallback(RgbaImage),
    /// Both fetches failed; the slot renders with no icon.
    Dropped,
}

/// A fully resolved unit ready for painting: image plus target
/// geometry, merged by slot index.
#[derive(Debug, Clone)]
pub struct DrawTask {
    pub image: RgbaImage,
    pub rect: Rect,
    /// Display name, present for list rows only.
    pub label: Option<String>,
}

/// Fetch one item's icon, applying the two-tier fallback.
pub async fn fetch_with_fallback<S: IconSource>(
    source: &S,
    catalog: &ItemCatalog,
    slot: &NormalizedSlot,
) -> IconOutcome {
    let primary_err = match source.fetch(&slot.item.icon_uri).await {
        Ok(image) => return IconOutcome::Resolved(image),
        Err(e) => e,
    };

    let unknown = catalog.unknown();
    if unknown.icon_uri == slot.item.icon_uri {
        // The failed fetch already was the fallback icon.
        warn!(
            "fallback icon unavailable ({primary_err}); dropping '{}'",
            slot.item.label
        );
        return IconOutcome::Dropped;
    }

    match source.fetch(&unknown.icon_uri).await {
        Ok(image) => {
            warn!(
                "icon for '{}' unavailable ({primary_err}); using fallback",
                slot.item.label
            );
            IconOutcome::Fallback(image)
        }
        Err(fallback_err) => {
            warn!(
                "icon for '{}' unavailable ({primary_err}) and fallback failed \
                 ({fallback_err}); dropping slot",
                slot.item.label
            );
            IconOutcome::Dropped
        }
    }
}

async fn resolve_indexed<'a, S: IconSource>(
    entries: Vec<(usize, &'a NormalizedSlot, Option<String>)>,
    zone: &Zone,
    catalog: &ItemCatalog,
    source: &S,
) -> Vec<DrawTask> {
    let futures = entries.into_iter().map(|(index, slot, label)| {
        // Geometry depends only on the original index, never on fetch
        // completion order.
        let rect = zone.cell_rect(index);
        async move {
            match fetch_with_fallback(source, catalog, slot).await {
                IconOutcome::Resolved(image) | IconOutcome::Fallback(image) => Some(DrawTask {
                    image,
                    rect,
                    label,
                }),
                IconOutcome::Dropped => None,
            }
        }
    });
    // join_all keeps submission order, which is input-index order.
    join_all(futures).await.into_iter().flatten().collect()
}

/// Resolve draw tasks for a positional grid: every filled index maps to
/// its own cell; empty slots produce no task.
pub async fn resolve_grid_tasks<S: IconSource>(
    slots: &[Option<NormalizedSlot>],
    zone: &Zone,
    catalog: &ItemCatalog,
    source: &S,
) -> Vec<DrawTask> {
    let entries = slots
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.as_ref().map(|s| (i, s, None)))
        .collect();
    resolve_indexed(entries, zone, catalog, source).await
}

/// Resolve draw tasks for a list zone: rows are already contiguous, and
/// each task carries the item display name for the row label.
pub async fn resolve_list_tasks<S: IconSource>(
    rows: &[&NormalizedSlot],
    zone: &Zone,
    catalog: &ItemCatalog,
    source: &S,
) -> Vec<DrawTask> {
    let entries = rows
        .iter()
        .enumerate()
        .map(|(i, slot)| (i, *slot, Some(slot.item.display_name.clone())))
        .collect();
    resolve_indexed(entries, zone, catalog, source).await
}

/// Production icon source: HTTP(S) URIs are fetched with reqwest, plain
/// paths are read from disk.
#[derive(Debug, Clone, Default)]
pub struct HttpIconSource {
    client: reqwest::Client,
}

impl HttpIconSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IconSource for HttpIconSource {
    async fn fetch(&self, uri: &str) -> Result<RgbaImage, FetchError> {
        let bytes = if uri.starts_with("http://") || uri.starts_with("https://") {
            let response = self
                .client
                .get(uri)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| FetchError::Request(e.to_string()))?;
            response
                .bytes()
                .await
                .map_err(|e| FetchError::Request(e.to_string()))?
                .to_vec()
        } else {
            tokio::fs::read(uri).await?
        };
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}
