// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The viewer controller
//!
//! `Viewer` owns every piece of mutable interaction state: the loaded
//! structure, placed furniture, selection, interaction state, camera
//! controls and pointer capture. It is driven through a fixed set of entry
//! points: structure loads, the state transitions, `on_pointer_event`,
//! `on_key_event` and `on_frame`. It never renders; hosts read its state
//! (or subscribe to snapshots) and draw it.
//!
//! Invariants kept by every entry point:
//! - `Moving { id }` implies `selected_id() == Some(id)` and the item exists.
//! - Camera controls are suspended exactly while the state is `Moving`.
//! - After `dispose`, every entry point is a no-op.

use crate::assets::{LoadOutcome, LoadRequest, LoadTicket};
use crate::catalog::{FurnitureCatalog, FurnitureType};
use crate::collision::CollisionWorld;
use crate::color::{apply_color, reset_colors, ColorOverride};
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::error::{Result, ViewerError};
use crate::furniture::FurnitureItem;
use crate::interaction::{DragState, InteractionState, Key, KeyEvent, PointerEvent, PointerKind, PointerTracker};
use crate::picking::{pick, pick_floor, PickTarget};
use crate::selection::SelectionHighlight;
use crate::snapshot::{FurnitureSnapshot, ViewerSnapshot};
use nalgebra::{Point2, Point3};
use plan_lite_geometry::{ray_plane_y, Camera, Mesh, Viewport};
use plan_lite_structure::{
    build_structure, load_static_structure, BuiltStructure, CameraFraming, MaterialRoleTable, Plan,
    SceneNode, StaticStructure,
};
use uuid::Uuid;

/// Structure currently shown by the viewer
#[derive(Debug, Clone)]
pub enum LoadedStructure {
    Procedural(BuiltStructure),
    Static(StaticStructure),
}

#[derive(Debug)]
struct StructureScene {
    source: LoadedStructure,
    walkable: Vec<Mesh>,
    collision: CollisionWorld,
    floor_height: f64,
}

/// Semi-transparent, non-colliding copy of the active furniture type
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub furniture_type: FurnitureType,
    pub node: SceneNode,
    /// False while the pointer is not over a walkable floor
    pub visible: bool,
}

type ChangeListener = Box<dyn FnMut(&ViewerSnapshot)>;

pub struct Viewer {
    config: ViewerConfig,
    viewport: Viewport,
    controls: OrbitControls,
    catalog: FurnitureCatalog,
    roles: MaterialRoleTable,
    scene: Option<StructureScene>,
    furniture: Vec<FurnitureItem>,
    selected: Option<Uuid>,
    highlight: SelectionHighlight,
    state: InteractionState,
    active_type: Option<FurnitureType>,
    preview: Option<Preview>,
    drag: Option<DragState>,
    pointer: PointerTracker,
    /// Loads queued for the host, not yet taken
    pending_loads: Vec<LoadTicket>,
    /// Furniture types with a load outstanding
    requested: Vec<FurnitureType>,
    session: Uuid,
    structure_epoch: u64,
    disposed: bool,
    listener: Option<ChangeListener>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        Self {
            config,
            viewport,
            controls: OrbitControls::new(),
            catalog: FurnitureCatalog::new(),
            roles: MaterialRoleTable::new(),
            scene: None,
            furniture: Vec::new(),
            selected: None,
            highlight: SelectionHighlight::new(),
            state: InteractionState::Idle,
            active_type: None,
            preview: None,
            drag: None,
            pointer: PointerTracker::default(),
            pending_loads: Vec::new(),
            requested: Vec::new(),
            session: Uuid::new_v4(),
            structure_epoch: 0,
            disposed: false,
            listener: None,
        }
    }

    // ---- accessors -------------------------------------------------------

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn interaction(&self) -> InteractionState {
        self.state
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn active_furniture_type(&self) -> Option<FurnitureType> {
        self.active_type
    }

    pub fn furniture(&self) -> &[FurnitureItem] {
        &self.furniture
    }

    pub fn furniture_item(&self, id: Uuid) -> Option<&FurnitureItem> {
        self.furniture.iter().find(|f| f.id == id)
    }

    pub fn structure(&self) -> Option<&LoadedStructure> {
        self.scene.as_ref().map(|s| &s.source)
    }

    pub fn collision(&self) -> Option<&CollisionWorld> {
        self.scene.as_ref().map(|s| &s.collision)
    }

    pub fn floor_height(&self) -> f64 {
        self.scene.as_ref().map_or(0.0, |s| s.floor_height)
    }

    pub fn highlight(&self) -> &SelectionHighlight {
        &self.highlight
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn camera(&self) -> Camera {
        self.controls.camera()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resize the canvas. A collapsed size keeps the last valid viewport.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            tracing::debug!(width, height, "Ignoring collapsed viewport");
            return;
        }
        self.viewport = viewport;
    }

    /// Pointer the host should keep captured, if any
    pub fn captured_pointer(&self) -> Option<i32> {
        self.pointer.captured
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn catalog(&self) -> &FurnitureCatalog {
        &self.catalog
    }

    pub fn set_material_roles(&mut self, roles: MaterialRoleTable) {
        self.roles = roles;
    }

    /// Called with a fresh snapshot after every furniture-affecting change
    pub fn set_change_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&ViewerSnapshot) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            items: self.furniture.iter().map(FurnitureSnapshot::from).collect(),
            selected_id: self.selected,
            interaction: self.state,
            active_type: self.active_type,
        }
    }

    /// Screen position for floating selection controls: the top center of
    /// the selected object's bounds. `None` without a selection or when the
    /// point is off camera.
    pub fn selection_anchor(&self) -> Option<Point2<f64>> {
        let item = self.furniture_item(self.selected?)?;
        let bounds = item.pick_bounds();
        let center = bounds.center();
        let top = Point3::new(center.x, bounds.max.y, center.z);
        self.camera().project_to_screen(&top, &self.viewport)
    }

    // ---- structure loading -----------------------------------------------

    /// Generate and show the structure for a plan. Furniture from the
    /// previous structure is discarded.
    pub fn load_plan(&mut self, plan: &Plan) -> Result<()> {
        self.ensure_live()?;
        let built = build_structure(plan, &self.config.builder)?;
        let scene = StructureScene {
            walkable: built.floor_meshes().cloned().collect(),
            collision: CollisionWorld::new(built.collision_bounds.clone()),
            floor_height: 0.0,
            source: LoadedStructure::Procedural(built),
        };
        self.replace_structure(scene);
        Ok(())
    }

    /// Show an already decoded pre-built model
    pub fn load_static(&mut self, node: SceneNode, asset_id: &str) -> Result<()> {
        self.ensure_live()?;
        let loaded = load_static_structure(node, &self.roles, asset_id, &self.config.static_loader);
        let scene = StructureScene {
            walkable: loaded.walkable.clone(),
            collision: CollisionWorld::new(loaded.collision_bounds.clone()),
            floor_height: loaded.floor_height,
            source: LoadedStructure::Static(loaded),
        };
        self.replace_structure(scene);
        Ok(())
    }

    /// Start an asynchronous static-model load. Any earlier structure load
    /// still in flight becomes stale.
    pub fn begin_static_load(&mut self, asset_id: &str) -> Result<LoadTicket> {
        self.ensure_live()?;
        self.structure_epoch += 1;
        Ok(LoadTicket {
            session: self.session,
            structure_epoch: self.structure_epoch,
            request: LoadRequest::Structure {
                asset_id: asset_id.to_string(),
            },
        })
    }

    fn replace_structure(&mut self, scene: StructureScene) {
        self.discard_furniture();
        self.structure_epoch += 1;

        let framing = match &scene.source {
            LoadedStructure::Procedural(built) => built.framing,
            LoadedStructure::Static(loaded) => loaded.framing,
        };
        tracing::info!(
            colliders = scene.collision.len(),
            walkable = scene.walkable.len(),
            floor_height = scene.floor_height,
            "Structure loaded"
        );
        self.scene = Some(scene);
        self.frame_camera(&framing);
        self.notify();
    }

    fn frame_camera(&mut self, framing: &CameraFraming) {
        self.controls.frame(framing);
    }

    // ---- asset loading ---------------------------------------------------

    /// Ticket for loading a furniture template, unless it is cached or
    /// already requested
    pub fn request_template(&mut self, furniture_type: FurnitureType) -> Option<LoadTicket> {
        if self.disposed
            || self.catalog.is_cached(furniture_type)
            || self.requested.contains(&furniture_type)
        {
            return None;
        }
        self.requested.push(furniture_type);
        Some(LoadTicket {
            session: self.session,
            structure_epoch: self.structure_epoch,
            request: LoadRequest::Furniture(furniture_type),
        })
    }

    /// Loads the viewer needs and the host has not yet started
    pub fn take_load_requests(&mut self) -> Vec<LoadTicket> {
        std::mem::take(&mut self.pending_loads)
    }

    fn queue_template(&mut self, furniture_type: FurnitureType) {
        if let Some(ticket) = self.request_template(furniture_type) {
            self.pending_loads.push(ticket);
        }
    }

    /// Hand back a finished load. Returns false when the outcome was
    /// dropped (disposed viewer, foreign session, superseded structure, or
    /// a failed structure load).
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> bool {
        let LoadOutcome { ticket, result } = outcome;
        if self.disposed || ticket.session != self.session {
            tracing::debug!(request = ?ticket.request, "Ignoring load for a disposed viewer");
            return false;
        }

        match ticket.request {
            LoadRequest::Furniture(furniture_type) => {
                self.requested.retain(|t| *t != furniture_type);
                match result {
                    Ok(node) => self.catalog.install(furniture_type, node),
                    Err(e) => {
                        tracing::warn!(%furniture_type, error = %e, "Using placeholder for furniture");
                        self.catalog.install_placeholder(furniture_type);
                    }
                }
                if matches!(self.state, InteractionState::Placing { furniture_type: t } if t == furniture_type) {
                    self.refresh_preview();
                }
                true
            }
            LoadRequest::Structure { asset_id } => {
                if ticket.structure_epoch != self.structure_epoch {
                    tracing::debug!(asset = %asset_id, "Ignoring superseded structure load");
                    return false;
                }
                match result {
                    Ok(node) => self.load_static(node, &asset_id).is_ok(),
                    Err(e) => {
                        tracing::warn!(asset = %asset_id, error = %e, "Static structure load failed");
                        false
                    }
                }
            }
        }
    }

    /// Cache an already decoded template without going through a ticket
    pub fn install_template(&mut self, furniture_type: FurnitureType, node: SceneNode) {
        if self.disposed {
            return;
        }
        self.requested.retain(|t| *t != furniture_type);
        self.catalog.install(furniture_type, node);
        if matches!(self.state, InteractionState::Placing { furniture_type: t } if t == furniture_type) {
            self.refresh_preview();
        }
    }

    // ---- state transitions -----------------------------------------------

    /// `None` returns to idle; a type enters placement with a preview.
    pub fn set_active_furniture_type(&mut self, furniture_type: Option<FurnitureType>) {
        if self.disposed {
            return;
        }
        if self.state.is_moving() {
            self.end_move();
        }
        self.active_type = furniture_type;
        self.state = InteractionState::resting(furniture_type);
        if let Some(t) = furniture_type {
            if !self.catalog.is_cached(t) {
                self.queue_template(t);
            }
        }
        self.refresh_preview();
        tracing::debug!(state = self.state.name(), "Active furniture type changed");
        self.notify();
    }

    /// Place the active furniture type at a floor point
    pub fn place_at(&mut self, point: Point3<f64>) -> Option<Uuid> {
        let furniture_type = self.active_type?;
        self.place(furniture_type, point)
    }

    /// Place a new item and select it. `None` when the template is not
    /// loaded yet (a load is queued) or the item would hit a wall.
    pub fn place(&mut self, furniture_type: FurnitureType, point: Point3<f64>) -> Option<Uuid> {
        if self.disposed {
            return None;
        }
        let Some(node) = self.catalog.instantiate(furniture_type) else {
            tracing::debug!(%furniture_type, "Template not loaded, placement deferred");
            self.queue_template(furniture_type);
            return None;
        };
        let item = FurnitureItem::new(furniture_type, node, point);
        if self.collides(&item, point, 0.0) {
            tracing::debug!(%furniture_type, ?point, "Placement rejected by collision");
            return None;
        }
        let id = item.id;
        self.furniture.push(item);
        self.set_selection(Some(id));
        tracing::debug!(%furniture_type, %id, "Placed furniture");
        self.notify();
        Some(id)
    }

    /// Select an item (or clear with `None`). Returns false for unknown ids.
    pub fn select(&mut self, id: Option<Uuid>) -> bool {
        if self.disposed {
            return false;
        }
        if let Some(id) = id {
            if self.furniture_item(id).is_none() {
                return false;
            }
        }
        self.set_selection(id);
        self.notify();
        true
    }

    /// Enter `Moving` for the selected item. False without a selection.
    pub fn begin_move_selected(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let Some(id) = self.selected else {
            return false;
        };
        if self.state.is_moving() {
            return true;
        }
        self.controls.suspend();
        self.state = InteractionState::Moving { id };
        self.preview = None;
        self.drag = None;
        tracing::debug!(%id, "Move started");
        self.notify();
        true
    }

    /// Leave `Moving` (or re-enter the resting state) and restore controls
    pub fn cancel_interaction(&mut self) {
        if self.disposed {
            return;
        }
        if self.state.is_moving() {
            self.end_move();
        } else {
            self.state = InteractionState::resting(self.active_type);
            self.refresh_preview();
        }
        self.notify();
    }

    /// Yaw the selected item. False without a selection, while moving, or
    /// when the rotated item would hit a wall.
    pub fn rotate_selected(&mut self, delta_degrees: f64) -> bool {
        if self.disposed || self.state.is_moving() {
            return false;
        }
        let Some(item) = self.selected.and_then(|id| self.furniture_item(id)) else {
            return false;
        };
        let position = item.position();
        let yaw = item.yaw() + delta_degrees.to_radians();
        if self.collides(item, position, yaw) {
            tracing::debug!(delta_degrees, "Rotation rejected by collision");
            return false;
        }
        if let Some(item) = self.selected_item_mut() {
            item.set_transform(position, yaw);
        }
        self.refresh_highlight();
        self.notify();
        true
    }

    /// Move the selected item to a floor point. False when rejected.
    pub fn move_selected_to(&mut self, point: Point3<f64>) -> bool {
        if self.disposed {
            return false;
        }
        let moved = self.try_move_selected(point);
        if moved {
            self.notify();
        }
        moved
    }

    pub fn remove_furniture(&mut self, id: Uuid) -> bool {
        if self.disposed {
            return false;
        }
        let Some(index) = self.furniture.iter().position(|f| f.id == id) else {
            return false;
        };
        self.furniture.remove(index);
        if self.selected == Some(id) {
            self.set_selection(None);
        }
        tracing::debug!(%id, "Removed furniture");
        self.notify();
        true
    }

    pub fn clear_furniture(&mut self) {
        if self.disposed {
            return;
        }
        self.discard_furniture();
        self.notify();
    }

    /// Apply or reset the selected item's color override
    pub fn set_selected_color(&mut self, color: ColorOverride) -> bool {
        if self.disposed {
            return false;
        }
        let Some(item) = self.selected_item_mut() else {
            return false;
        };
        match color {
            ColorOverride::Custom(rgb) => {
                apply_color(item, rgb);
            }
            ColorOverride::Default => {
                reset_colors(item);
            }
        }
        self.notify();
        true
    }

    pub fn reset_selected_colors(&mut self) -> bool {
        self.set_selected_color(ColorOverride::Default)
    }

    /// Tear down: restores camera controls, releases capture, drops all
    /// furniture and the structure. Outstanding loads are ignored on return.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.state.is_moving() {
            self.end_move();
        }
        self.controls.resume();
        self.pointer = PointerTracker::default();
        self.drag = None;
        self.furniture.clear();
        self.selected = None;
        self.highlight.clear();
        self.preview = None;
        self.scene = None;
        self.pending_loads.clear();
        self.requested.clear();
        self.state = InteractionState::Idle;
        self.active_type = None;
        self.listener = None;
        self.disposed = true;
        tracing::info!("Viewer disposed");
    }

    // ---- input -----------------------------------------------------------

    pub fn on_pointer_event(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        match event.kind {
            PointerKind::Down => {
                self.pointer.down = Some((event.pointer_id, event.position));
                self.pointer.hover = Some(event.position);
                if let InteractionState::Moving { id } = self.state {
                    self.start_drag(id, &event);
                }
            }
            PointerKind::Move => {
                self.pointer.hover = Some(event.position);
                self.pointer.pending = Some(event.position);
            }
            PointerKind::Up => {
                if self.drag.map(|d| d.pointer_id) == Some(event.pointer_id) {
                    self.apply_drag(&event.position);
                    self.finish_drag();
                    return;
                }
                let click =
                    self.pointer
                        .is_click(event.pointer_id, &event.position, self.config.click_tolerance_px);
                self.pointer.release();
                if click {
                    self.handle_click(&event.position);
                }
            }
            PointerKind::Cancel | PointerKind::Leave => {
                if event.kind == PointerKind::Leave {
                    self.pointer.hover = None;
                    if let Some(preview) = self.preview.as_mut() {
                        preview.visible = false;
                    }
                }
                self.pointer.pending = None;
                if self.drag.map(|d| d.pointer_id) == Some(event.pointer_id) {
                    self.finish_drag();
                } else {
                    self.pointer.release();
                }
            }
        }
    }

    pub fn on_key_event(&mut self, event: KeyEvent) {
        if self.disposed {
            return;
        }
        match event.key {
            Key::Escape => self.cancel_interaction(),
            Key::Delete | Key::Backspace => {
                if let Some(id) = self.selected {
                    self.remove_furniture(id);
                }
            }
            Key::Char(c) if c.eq_ignore_ascii_case(&'r') => {
                let step = self.config.rotation_step_degrees;
                self.rotate_selected(if event.shift { -step } else { step });
            }
            Key::Char(_) => {}
        }
    }

    /// Per-frame update: camera inertia, drag motion and preview tracking
    pub fn on_frame(&mut self, dt: f64) {
        if self.disposed {
            return;
        }
        self.controls.update(dt);
        let Some(position) = self.pointer.pending.take() else {
            return;
        };
        if self.drag.is_some() {
            if self.apply_drag(&position) {
                self.notify();
            }
        } else if matches!(self.state, InteractionState::Placing { .. }) {
            self.update_preview(&position);
        }
    }

    // ---- internals -------------------------------------------------------

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            Err(ViewerError::Disposed)
        } else {
            Ok(())
        }
    }

    fn notify(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(listener) = self.listener.as_mut() {
            listener(&snapshot);
        }
    }

    fn selected_item_mut(&mut self) -> Option<&mut FurnitureItem> {
        let id = self.selected?;
        self.furniture.iter_mut().find(|f| f.id == id)
    }

    /// Change selection; leaving the moved item ends the move
    fn set_selection(&mut self, id: Option<Uuid>) {
        if let InteractionState::Moving { id: moving } = self.state {
            if id != Some(moving) {
                self.end_move();
            }
        }
        self.selected = id;
        self.refresh_highlight();
    }

    fn refresh_highlight(&mut self) {
        let bounds = self.selected.and_then(|id| self.furniture_item(id)).map(|f| f.pick_bounds());
        match bounds {
            Some(bounds) => self.highlight.update(&bounds, self.config.highlight_padding),
            None => self.highlight.clear(),
        }
    }

    /// Remove all furniture, selection and any move in progress
    fn discard_furniture(&mut self) {
        self.set_selection(None);
        self.furniture.clear();
    }

    /// Single exit path from `Moving`
    fn end_move(&mut self) {
        self.drag = None;
        self.pointer.release();
        self.controls.resume();
        self.state = InteractionState::resting(self.active_type);
        self.refresh_preview();
        tracing::debug!(state = self.state.name(), "Move ended");
    }

    fn collides(&self, item: &FurnitureItem, position: Point3<f64>, yaw: f64) -> bool {
        match &self.scene {
            Some(scene) => scene.collision.collides(&item.bounds_at(position, yaw)),
            None => false,
        }
    }

    fn try_move_selected(&mut self, point: Point3<f64>) -> bool {
        let Some(item) = self.selected.and_then(|id| self.furniture_item(id)) else {
            return false;
        };
        let yaw = item.yaw();
        if self.collides(item, point, yaw) {
            return false;
        }
        if let Some(item) = self.selected_item_mut() {
            item.set_transform(point, yaw);
        }
        self.refresh_highlight();
        true
    }

    fn floor_plane_hit(&self, screen: &Point2<f64>) -> Option<Point3<f64>> {
        let ray = self.camera().screen_ray(screen, &self.viewport);
        ray_plane_y(&ray, self.floor_height())
    }

    fn start_drag(&mut self, id: Uuid, event: &PointerEvent) {
        let Some(hit) = self.floor_plane_hit(&event.position) else {
            return;
        };
        let Some(item) = self.furniture_item(id) else {
            return;
        };
        self.drag = Some(DragState {
            pointer_id: event.pointer_id,
            offset: item.position() - hit,
        });
        self.pointer.captured = Some(event.pointer_id);
    }

    /// Move the dragged item under the pointer, keeping the grab offset
    fn apply_drag(&mut self, screen: &Point2<f64>) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(hit) = self.floor_plane_hit(screen) else {
            return false;
        };
        let mut target = hit + drag.offset;
        target.y = self.floor_height();
        self.try_move_selected(target)
    }

    fn finish_drag(&mut self) {
        self.end_move();
        self.notify();
    }

    fn handle_click(&mut self, screen: &Point2<f64>) {
        if self.state.is_moving() {
            return;
        }
        let ray = self.camera().screen_ray(screen, &self.viewport);
        let floors: &[Mesh] = self.scene.as_ref().map_or(&[][..], |s| s.walkable.as_slice());
        let Some(hit) = pick(&ray, &self.furniture, floors) else {
            return;
        };

        match hit.target {
            PickTarget::Furniture(id) => {
                self.set_selection(Some(id));
                self.state = InteractionState::Idle;
                self.preview = None;
                self.notify();
            }
            PickTarget::Floor => match self.state {
                InteractionState::Placing { furniture_type } => {
                    self.place(furniture_type, hit.point);
                }
                _ => {
                    if self.selected.is_some() {
                        self.set_selection(None);
                        self.notify();
                    }
                }
            },
        }
    }

    /// Build, keep or drop the preview to match the state
    fn refresh_preview(&mut self) {
        let InteractionState::Placing { furniture_type } = self.state else {
            self.preview = None;
            return;
        };
        if self.preview.as_ref().map(|p| p.furniture_type) == Some(furniture_type) {
            return;
        }
        self.preview = self.catalog.instantiate(furniture_type).map(|mut node| {
            for material in node.materials_mut() {
                material.opacity = self.config.preview_opacity;
            }
            Preview {
                furniture_type,
                node,
                visible: false,
            }
        });
        if let Some(hover) = self.pointer.hover {
            self.update_preview(&hover);
        }
    }

    fn update_preview(&mut self, screen: &Point2<f64>) {
        if self.preview.is_none() {
            return;
        }
        let ray = self.camera().screen_ray(screen, &self.viewport);
        let floors: &[Mesh] = self.scene.as_ref().map_or(&[][..], |s| s.walkable.as_slice());
        let hit = pick_floor(&ray, floors);
        if let Some(preview) = self.preview.as_mut() {
            match hit {
                Some(hit) => {
                    preview.node.transform.translation = hit.point.coords;
                    preview.visible = true;
                }
                None => preview.visible = false,
            }
        }
    }
}
