// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furniture placement and interaction engine
//!
//! The [`Viewer`] loads a structure (generated from a floor plan, or a
//! pre-built model), then lets a user place, select, drag, rotate, recolor
//! and delete furniture against the structure's collision boxes. It does not
//! render: a host feeds it pointer, key and frame events, runs the asset
//! loads it asks for, and draws from its state or snapshots.
//!
//! # Usage
//!
//! ```rust,ignore
//! use plan_lite_viewer::{assets, FurnitureType, Viewer, ViewerConfig};
//!
//! let mut viewer = Viewer::new(ViewerConfig::default());
//! viewer.load_plan(&plan)?;
//! viewer.set_active_furniture_type(Some(FurnitureType::Chair));
//! for ticket in viewer.take_load_requests() {
//!     let outcome = assets::fetch(&source, ticket).await;
//!     viewer.complete_load(outcome);
//! }
//! ```

pub mod assets;
pub mod catalog;
pub mod collision;
pub mod color;
pub mod config;
pub mod controls;
pub mod error;
pub mod furniture;
pub mod interaction;
pub mod picking;
pub mod selection;
pub mod snapshot;
pub mod viewer;

// Re-export commonly used types and functions
pub use assets::{fetch, AssetSource, LoadOutcome, LoadRequest, LoadTicket, MemoryAssetSource};
pub use catalog::{CatalogEntry, FurnitureCatalog, FurnitureType, RecolorMask};
pub use collision::CollisionWorld;
pub use color::{ColorOverride, DEFAULT_COLOR_KEY};
pub use config::ViewerConfig;
pub use controls::OrbitControls;
pub use error::{AssetError, Result, ViewerError};
pub use furniture::FurnitureItem;
pub use interaction::{InteractionState, Key, KeyEvent, PointerEvent, PointerKind};
pub use picking::{PickHit, PickTarget};
pub use selection::SelectionHighlight;
pub use snapshot::{FurnitureSnapshot, ViewerSnapshot};
pub use viewer::{LoadedStructure, Preview, Viewer};
