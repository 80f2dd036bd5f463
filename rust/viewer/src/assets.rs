// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Asynchronous asset loading
//!
//! Loads run without borrowing the viewer. The viewer hands out a
//! [`LoadTicket`] when a load starts; the finished [`LoadOutcome`] is given
//! back to the viewer, which drops it if the ticket no longer matches the
//! live session or the current structure.

use crate::catalog::FurnitureType;
use crate::error::AssetError;
use futures_util::future::{FutureExt, LocalBoxFuture};
use plan_lite_structure::SceneNode;
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Source of decoded mesh assets
pub trait AssetSource {
    fn load<'a>(&'a self, key: &'a str) -> LocalBoxFuture<'a, Result<SceneNode, AssetError>>;
}

/// What a ticket is loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Furniture(FurnitureType),
    /// Pre-built structure model
    Structure { asset_id: String },
}

impl LoadRequest {
    pub fn asset_key(&self) -> &str {
        match self {
            LoadRequest::Furniture(t) => t.entry().asset_key,
            LoadRequest::Structure { asset_id } => asset_id,
        }
    }
}

/// Liveness token for one outstanding load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) session: Uuid,
    pub(crate) structure_epoch: u64,
    pub request: LoadRequest,
}

/// A finished load, ready to hand back to the viewer
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<SceneNode, AssetError>,
}

/// Run the load described by `ticket`
pub async fn fetch(source: &dyn AssetSource, ticket: LoadTicket) -> LoadOutcome {
    let result = source.load(ticket.request.asset_key()).await;
    if let Err(e) = &result {
        tracing::warn!(key = ticket.request.asset_key(), error = %e, "Asset load failed");
    }
    LoadOutcome { ticket, result }
}

/// In-memory asset store keyed by asset key
#[derive(Debug, Default, Clone)]
pub struct MemoryAssetSource {
    assets: FxHashMap<String, SceneNode>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, node: SceneNode) {
        self.assets.insert(key.into(), node);
    }

    pub fn with(mut self, key: impl Into<String>, node: SceneNode) -> Self {
        self.insert(key, node);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn load<'a>(&'a self, key: &'a str) -> LocalBoxFuture<'a, Result<SceneNode, AssetError>> {
        async move {
            self.assets
                .get(key)
                .cloned()
                .ok_or_else(|| AssetError::NotFound(key.to_string()))
        }
        .boxed_local()
    }
}
