//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌────────────┬─────────────┬────────────┬─────────────────┐ │
//! │  │ Mode       │ on_enter    │ on_exit    │ on_update       │ │
//! │  ├────────────┼─────────────┼────────────┼─────────────────┤ │
//! │  │ Init       │ fn(ctx, hw) │ -          │ fn -> Option<>  │ │
//! │  │ Monitoring │ fn(ctx, hw) │ fn(ctx,hw) │ fn -> Option<>  │ │
//! │  │ Alarm      │ fn(ctx, hw) │ fn(ctx,hw) │ fn -> Option<>  │ │
//! │  │ Locked     │ fn(ctx, hw) │ fn(ctx,hw) │ fn -> Option<>  │ │
//! │  └────────────┴─────────────┴────────────┴─────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** mode.
//! If it returns `Some(next)`, the engine runs `on_exit` for the
//! current mode, then `on_enter` for the next, and updates the
//! current pointer.  Every handler receives the [`ControllerState`]
//! blackboard and the peripheral bundle `H`.

pub mod context;
pub mod states;

use context::ControllerState;
use log::info;
use serde::Serialize;

use crate::app::events::AppEvent;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Operating modes of the controller.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Mode {
    Init = 0,
    Monitoring = 1,
    Alarm = 2,
    Locked = 3,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert an index back to `Mode`.  Panics on out-of-range in debug
    /// builds; returns `Locked` in release (the safe, self-clearing mode).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Init,
            1 => Self::Monitoring,
            2 => Self::Alarm,
            3 => Self::Locked,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::Locked
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn<H> = fn(&mut ControllerState, &mut H);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn<H> = fn(&mut ControllerState, &mut H) -> Option<Mode>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single mode.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor<H> {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<H>>,
    pub on_exit: Option<StateActionFn<H>>,
    pub on_update: StateUpdateFn<H>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm<H> {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [StateDescriptor<H>; Mode::COUNT],
    current: usize,
    tick_count: u64,
}

impl<H> Fsm<H> {
    pub fn new(table: [StateDescriptor<H>; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
        }
    }

    /// Run the initial `on_enter` for the starting mode.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut ControllerState, hw: &mut H) {
        info!("FSM starting in mode: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, hw);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current mode.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut ControllerState, hw: &mut H) {
        self.tick_count += 1;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx, hw);

        if let Some(next_id) = next {
            self.transition(next_id, ctx, hw);
        }
    }

    pub fn current_mode(&self) -> Mode {
        Mode::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: Mode, ctx: &mut ControllerState, hw: &mut H) {
        let next_idx = next_id as usize;
        let from = self.current_mode();

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx, hw);
        }

        self.current = next_idx;
        ctx.publish(AppEvent::ModeChanged { from, to: next_id });

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, hw);
        }
    }
}
