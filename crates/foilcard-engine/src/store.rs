//! The effect state store and its preset transition state machine.
//!
//! [`EffectStateStore`] owns the one [`EffectValues`] of an editing session.
//! Manual edits land immediately. Presets land through a timed transition so
//! the card never shows a mix of the old and new preset:
//!
//! ```text
//!  apply_preset ──▶ Resetting ──reset_settle──▶ Applying ──apply_settle──▶ Validating ──validate_settle──▶ Idle
//!                   (defaults)                 (defaults + preset)         (repair gaps)                   (unlock)
//! ```
//!
//! Phases advance from [`EffectStateStore::poll`], which fires whatever the
//! scheduler reports due on the injected [`Clock`]. Every phase timer carries
//! the sequence number of the transition that scheduled it, and superseding or
//! resetting cancels the pending timer, so a stale phase can never write.
//!
//! # Example
//!
//! ```rust
//! use foilcard_core::EffectValues;
//! use foilcard_engine::{EffectStateStore, ManualClock, PresetOutcome};
//! use foilcard_registry::EffectRegistry;
//!
//! let clock = ManualClock::new();
//! let mut store = EffectStateStore::new(EffectRegistry::new(), clock.clone());
//!
//! let preset = EffectValues::new().with_param("gold", "intensity", 80.0);
//! assert_eq!(store.apply_preset(&preset, Some("gold-rush")), PresetOutcome::Started);
//! assert!(store.is_applying_preset());
//!
//! clock.advance_ms(450);
//! store.poll();
//!
//! assert!(!store.is_applying_preset());
//! assert_eq!(store.values().numeric("gold", "intensity"), Some(80.0));
//! ```

use foilcard_config::{ConflictPolicy, TransitionTiming};
use foilcard_core::{CLAMP_RULES, EffectValues, ParamValue, clamp_value, validate_rules};
use foilcard_registry::EffectRegistry;
use serde::Serialize;

use crate::clock::Clock;
use crate::error::Result;
use crate::scheduler::{Scheduler, TimerHandle};

/// Phase of the preset transition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// No transition in flight.
    #[default]
    Idle,
    /// Values are at defaults, waiting for the reset to settle.
    Resetting,
    /// Preset values are committed, waiting for them to settle.
    Applying,
    /// Derived state is being re-checked before the lock is released.
    Validating,
}

impl TransitionPhase {
    /// Lower-case name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resetting => "resetting",
            Self::Applying => "applying",
            Self::Validating => "validating",
        }
    }
}

/// Tracking fields of the most recent preset application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PresetApplicationState {
    /// A transition is in flight.
    pub is_applying: bool,
    /// No independent preset application may start.
    pub is_locked: bool,
    /// Preset the current values came from; cleared by manual edits.
    pub current_preset_id: Option<String>,
    /// Clock time (ms) of the last preset start, manual edit or reset.
    pub applied_at: u64,
    /// Unique id of the last preset start, manual edit or reset.
    pub sequence_id: String,
}

/// What [`EffectStateStore::apply_preset`] did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetOutcome {
    /// Nothing was in flight; the transition started.
    Started,
    /// A transition was in flight and was cancelled in favour of this one.
    Superseded,
    /// A transition was in flight and this request was ignored.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseStep {
    Apply,
    Validate,
    Complete,
}

#[derive(Debug, Clone, Copy)]
struct PhaseEvent {
    sequence: u64,
    step: PhaseStep,
    due_ms: u64,
}

/// Owner of the effect values of one editing session.
pub struct EffectStateStore {
    registry: EffectRegistry,
    defaults: EffectValues,
    values: EffectValues,
    state: PresetApplicationState,
    phase: TransitionPhase,
    timing: TransitionTiming,
    policy: ConflictPolicy,
    clock: Box<dyn Clock>,
    scheduler: Scheduler<PhaseEvent>,
    pending_timer: Option<TimerHandle>,
    pending_preset: Option<EffectValues>,
    sequence: u64,
    manual_edits: u64,
    revision: u64,
}

impl EffectStateStore {
    /// Store with default timing and [`ConflictPolicy::Supersede`].
    ///
    /// The registry and the shipped clamp table are checked in debug builds;
    /// use [`try_new`](Self::try_new) to get the error instead.
    pub fn new(registry: EffectRegistry, clock: impl Clock + 'static) -> Self {
        debug_assert!(
            Self::check_tables(&registry).is_ok(),
            "effect registry or clamp table is malformed"
        );
        Self::build(registry, Box::new(clock))
    }

    /// Store that refuses a malformed registry or clamp table.
    pub fn try_new(registry: EffectRegistry, clock: impl Clock + 'static) -> Result<Self> {
        Self::check_tables(&registry)?;
        Ok(Self::build(registry, Box::new(clock)))
    }

    fn check_tables(registry: &EffectRegistry) -> Result<()> {
        registry.validate()?;
        validate_rules(CLAMP_RULES)?;
        registry.validate_clamp_rules(CLAMP_RULES)?;
        Ok(())
    }

    fn build(registry: EffectRegistry, clock: Box<dyn Clock>) -> Self {
        let defaults = registry.default_values();
        let now = clock.now_ms();
        Self {
            values: defaults.clone(),
            defaults,
            registry,
            state: PresetApplicationState {
                applied_at: now,
                sequence_id: format!("init-{now}"),
                ..PresetApplicationState::default()
            },
            phase: TransitionPhase::Idle,
            timing: TransitionTiming::default(),
            policy: ConflictPolicy::default(),
            clock,
            scheduler: Scheduler::new(),
            pending_timer: None,
            pending_preset: None,
            sequence: 0,
            manual_edits: 0,
            revision: 0,
        }
    }

    /// Set the transition settle delays.
    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set the conflict policy.
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Change the settle delays. Timers already scheduled keep their deadline.
    pub fn set_timing(&mut self, timing: TransitionTiming) {
        self.timing = timing;
    }

    /// Change the conflict policy.
    pub fn set_conflict_policy(&mut self, policy: ConflictPolicy) {
        self.policy = policy;
    }

    /// Current effect values.
    pub fn values(&self) -> &EffectValues {
        &self.values
    }

    /// Registry defaults, in registry order.
    pub fn defaults(&self) -> &EffectValues {
        &self.defaults
    }

    /// Tracking fields of the last preset application.
    pub fn preset_state(&self) -> &PresetApplicationState {
        &self.state
    }

    /// True while a preset transition is in flight.
    pub fn is_applying_preset(&self) -> bool {
        self.state.is_applying
    }

    /// Current transition phase.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Bumped on every change render layers should react to.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The registry this store validates against.
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Transition settle delays.
    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    /// Preset conflict policy.
    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Current clock time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Clock time at which the next phase is due.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Set one parameter from a manual edit.
    ///
    /// The value is soft-clamped and written. Returns `false` and changes
    /// nothing when the effect or parameter is unknown or the value does not
    /// fit the parameter's kind.
    ///
    /// Outside a transition a manual edit detaches the values from their
    /// preset: `current_preset_id` is cleared and a fresh sequence id is
    /// stamped. During a transition the tracking fields are left alone.
    pub fn set_parameter(&mut self, effect_id: &str, param_id: &str, value: ParamValue) -> bool {
        let Some(descriptor) = self.registry.param(effect_id, param_id) else {
            tracing::debug!(effect_id, param_id, "ignoring edit of unknown parameter");
            return false;
        };
        if !descriptor.accepts(&value) {
            tracing::debug!(
                effect_id,
                param_id,
                kind = %descriptor.kind,
                value = %value,
                "ignoring edit that does not fit the parameter"
            );
            return false;
        }

        let value = clamp_value(effect_id, param_id, value);
        self.values.set(effect_id, param_id, value);

        if !self.state.is_applying && !self.state.is_locked {
            let now = self.clock.now_ms();
            self.manual_edits += 1;
            self.state.current_preset_id = None;
            self.state.applied_at = now;
            self.state.sequence_id = format!("manual-{now}-{}", self.manual_edits);
        }
        self.revision += 1;
        true
    }

    /// Restore one effect's defaults. Returns `false` for an unknown effect.
    ///
    /// Preset tracking is left untouched.
    pub fn reset_effect(&mut self, effect_id: &str) -> bool {
        let Some(effect) = self.registry.get(effect_id) else {
            tracing::debug!(effect_id, "ignoring reset of unknown effect");
            return false;
        };
        self.values.insert_effect(effect_id, effect.default_params());
        self.revision += 1;
        true
    }

    /// Restore every default and abandon any transition in flight.
    pub fn reset_all(&mut self) {
        self.cancel_transition();
        let now = self.clock.now_ms();
        self.values = self.defaults.clone();
        self.phase = TransitionPhase::Idle;
        self.state = PresetApplicationState {
            is_applying: false,
            is_locked: false,
            current_preset_id: None,
            applied_at: now,
            sequence_id: format!("reset-{now}"),
        };
        self.revision += 1;
        tracing::debug!("all effects reset to defaults");
    }

    /// Start a preset transition.
    ///
    /// `preset` is a partial value set; everything it leaves out falls back
    /// to defaults. Unknown keys and values of the wrong kind are skipped one
    /// by one. What happens while another transition is in flight depends on
    /// the [`ConflictPolicy`].
    pub fn apply_preset(&mut self, preset: &EffectValues, preset_id: Option<&str>) -> PresetOutcome {
        let outcome = if self.state.is_locked {
            match self.policy {
                ConflictPolicy::Reject => {
                    tracing::warn!(
                        requested = preset_id.unwrap_or("<unnamed>"),
                        in_flight = self.state.current_preset_id.as_deref().unwrap_or("<unnamed>"),
                        "preset rejected, another preset is still being applied"
                    );
                    return PresetOutcome::Rejected;
                }
                ConflictPolicy::Supersede => {
                    self.cancel_transition();
                    PresetOutcome::Superseded
                }
            }
        } else {
            PresetOutcome::Started
        };

        let now = self.clock.now_ms();
        self.sequence += 1;
        self.state = PresetApplicationState {
            is_applying: true,
            is_locked: true,
            current_preset_id: preset_id.map(str::to_string),
            applied_at: now,
            sequence_id: format!("preset-{now}-{}", self.sequence),
        };

        self.values = self.defaults.clone();
        self.phase = TransitionPhase::Resetting;
        self.pending_preset = Some(preset.clone());
        self.schedule(now, self.timing.reset_settle_ms, PhaseStep::Apply);
        self.revision += 1;

        tracing::info!(
            preset = preset_id.unwrap_or("<unnamed>"),
            sequence = %self.state.sequence_id,
            ?outcome,
            "preset transition started"
        );
        outcome
    }

    /// Defaults overlaid with the valid entries of a partial preset, clamped.
    pub fn resolve_preset(&self, preset: &EffectValues) -> EffectValues {
        let mut resolved = self.defaults.clone();
        for (effect_id, param_id, value) in preset.triples() {
            match self.registry.param(effect_id, param_id) {
                Some(descriptor) if descriptor.accepts(value) => {
                    resolved.set(effect_id, param_id, clamp_value(effect_id, param_id, value.clone()));
                }
                Some(_) => {
                    tracing::debug!(effect_id, param_id, value = %value, "skipping preset value of the wrong kind");
                }
                None => {
                    tracing::debug!(effect_id, param_id, "skipping unknown preset key");
                }
            }
        }
        resolved
    }

    /// Repair the values against the registry and ask renderers to re-derive.
    ///
    /// Missing or wrongly-typed entries are replaced by defaults and the
    /// effects are put back in registry order. Returns how many parameters
    /// were repaired.
    pub fn validate_state(&mut self) -> usize {
        let mut repaired = 0;
        let mut rebuilt = EffectValues::new();

        for effect in self.registry.all_effects() {
            for param in effect.params {
                let value = match self.values.get(effect.id, param.id) {
                    Some(v) if param.accepts(v) => v.clone(),
                    _ => {
                        repaired += 1;
                        param.default_value()
                    }
                };
                rebuilt.set(effect.id, param.id, value);
            }
        }

        if repaired > 0 {
            tracing::debug!(repaired, "effect state repaired from defaults");
        }
        self.values = rebuilt;
        self.revision += 1;
        repaired
    }

    /// Fire every phase timer that is due. Returns how many fired.
    ///
    /// Phases whose delays have all elapsed chain within a single poll.
    pub fn poll(&mut self) -> usize {
        let mut fired = 0;
        let now = self.clock.now_ms();
        while let Some((handle, event)) = self.scheduler.pop_due(now) {
            if self.pending_timer == Some(handle) {
                self.pending_timer = None;
            }
            self.handle_phase(event);
            fired += 1;
        }
        fired
    }

    fn handle_phase(&mut self, event: PhaseEvent) {
        if event.sequence != self.sequence || !self.state.is_applying {
            tracing::debug!(sequence = event.sequence, "dropping stale phase timer");
            return;
        }

        match event.step {
            PhaseStep::Apply => {
                let preset = self.pending_preset.take().unwrap_or_default();
                self.values = self.resolve_preset(&preset);
                self.enter(TransitionPhase::Applying);
                self.schedule(event.due_ms, self.timing.apply_settle_ms, PhaseStep::Validate);
            }
            PhaseStep::Validate => {
                self.enter(TransitionPhase::Validating);
                self.validate_state();
                self.schedule(event.due_ms, self.timing.validate_settle_ms, PhaseStep::Complete);
            }
            PhaseStep::Complete => {
                self.state.is_applying = false;
                self.state.is_locked = false;
                self.enter(TransitionPhase::Idle);
                tracing::info!(
                    preset = self.state.current_preset_id.as_deref().unwrap_or("<unnamed>"),
                    sequence = %self.state.sequence_id,
                    "preset transition complete"
                );
            }
        }
        self.revision += 1;
    }

    fn enter(&mut self, phase: TransitionPhase) {
        tracing::debug!(from = self.phase.name(), to = phase.name(), "transition phase");
        self.phase = phase;
    }

    /// Phases are timed from when the previous one was due, so a late poll
    /// catches up in one go.
    fn schedule(&mut self, from_ms: u64, delay_ms: u64, step: PhaseStep) {
        let due_ms = from_ms.saturating_add(delay_ms);
        let handle = self.scheduler.schedule(
            due_ms,
            PhaseEvent {
                sequence: self.sequence,
                step,
                due_ms,
            },
        );
        self.pending_timer = Some(handle);
    }

    fn cancel_transition(&mut self) {
        if let Some(handle) = self.pending_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.pending_preset = None;
        // Any timer that slipped past the handle is caught by the sequence check.
        self.sequence += 1;
    }
}

impl std::fmt::Debug for EffectStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectStateStore")
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("pending_timers", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}
