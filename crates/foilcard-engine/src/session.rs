//! One editing session: store, preset catalog, pointer input and panel flags.
//!
//! [`EffectSession`] is the object an editor front end holds. It forwards
//! edits and preset requests to the [`EffectStateStore`], keeps the latest
//! rotation and pointer samples, and turns all of it into a [`RenderFrame`].

use foilcard_config::{EngineSettings, PanelState, PresetCatalog};
use foilcard_core::{EffectValues, FaceVisibility, ParamValue, Rotation};
use foilcard_registry::EffectRegistry;

use crate::clock::Clock;
use crate::error::{EngineError, Result};
use crate::render::{Pointer, RenderAdapter, RenderFrame};
use crate::store::{EffectStateStore, PresetOutcome};

/// An editing session.
#[derive(Debug)]
pub struct EffectSession {
    store: EffectStateStore,
    catalog: PresetCatalog,
    rotation: Rotation,
    faces: FaceVisibility,
    pointer: Pointer,
    panels: PanelState,
}

impl EffectSession {
    /// Session with default settings.
    pub fn new(registry: EffectRegistry, catalog: PresetCatalog, clock: impl Clock + 'static) -> Self {
        Self::from_store(EffectStateStore::new(registry, clock), catalog)
    }

    /// Session configured from engine settings, refusing malformed tables.
    pub fn with_settings(
        registry: EffectRegistry,
        catalog: PresetCatalog,
        clock: impl Clock + 'static,
        settings: &EngineSettings,
    ) -> Result<Self> {
        let store = EffectStateStore::try_new(registry, clock)?
            .with_timing(settings.timing)
            .with_conflict_policy(settings.conflict_policy);
        let mut session = Self::from_store(store, catalog);
        session.panels = settings.panels;
        Ok(session)
    }

    fn from_store(store: EffectStateStore, catalog: PresetCatalog) -> Self {
        let rotation = Rotation::default();
        Self {
            store,
            catalog,
            rotation,
            faces: FaceVisibility::from_rotation(rotation),
            pointer: Pointer::CENTER,
            panels: PanelState::default(),
        }
    }

    /// Current effect values.
    pub fn effect_values(&self) -> &EffectValues {
        self.store.values()
    }

    /// Apply a manual parameter edit. See [`EffectStateStore::set_parameter`].
    pub fn handle_effect_change(
        &mut self,
        effect_id: &str,
        param_id: &str,
        value: impl Into<ParamValue>,
    ) -> bool {
        self.store.set_parameter(effect_id, param_id, value.into())
    }

    /// Restore one effect's defaults.
    pub fn reset_effect(&mut self, effect_id: &str) -> bool {
        self.store.reset_effect(effect_id)
    }

    /// Restore every default and abandon any transition in flight.
    pub fn reset_all_effects(&mut self) {
        self.store.reset_all();
    }

    /// Start a transition to a partial value set.
    pub fn apply_preset(&mut self, values: &EffectValues, preset_id: Option<&str>) -> PresetOutcome {
        self.store.apply_preset(values, preset_id)
    }

    /// Start a transition to a preset from the catalog.
    pub fn apply_catalog_preset(&mut self, id: &str) -> Result<PresetOutcome> {
        let preset = self
            .catalog
            .get(id)
            .ok_or_else(|| EngineError::UnknownPreset(id.to_string()))?;
        Ok(self.store.apply_preset(&preset.effects, Some(&preset.id)))
    }

    /// True while a preset transition is in flight.
    pub fn is_applying_preset(&self) -> bool {
        self.store.is_applying_preset()
    }

    /// Repair the values against the registry. Returns how many were repaired.
    pub fn validate_effect_state(&mut self) -> usize {
        self.store.validate_state()
    }

    /// Advance preset transitions to the current clock time.
    pub fn poll(&mut self) -> usize {
        self.store.poll()
    }

    /// Record a rotation sample (degrees, unbounded).
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.faces = FaceVisibility::from_rotation(rotation);
    }

    /// Last rotation sample.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Face visibility for the last rotation sample.
    pub fn faces(&self) -> &FaceVisibility {
        &self.faces
    }

    /// Record a pointer sample, normalized to the card.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Pointer::new(x, y);
    }

    /// Last pointer sample.
    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Build a frame from the current state.
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::build(
            self.store.revision(),
            self.store.phase(),
            self.store.values(),
            self.faces,
            self.pointer,
        )
    }

    /// Advance transitions, then push one frame to `adapter`.
    pub fn render_to<A: RenderAdapter + ?Sized>(&mut self, adapter: &mut A) {
        self.store.poll();
        adapter.render(&self.frame());
    }

    /// Panel flags.
    pub fn panels(&self) -> &PanelState {
        &self.panels
    }

    /// Mutable panel flags.
    pub fn panels_mut(&mut self) -> &mut PanelState {
        &mut self.panels
    }

    /// Preset catalog.
    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Mutable preset catalog.
    pub fn catalog_mut(&mut self) -> &mut PresetCatalog {
        &mut self.catalog
    }

    /// The underlying store.
    pub fn store(&self) -> &EffectStateStore {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut EffectStateStore {
        &mut self.store
    }
}
