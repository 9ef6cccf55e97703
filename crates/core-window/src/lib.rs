//! Window coordination: frame-coalesced scheduling and byte-range decisions.
//!
//! Two cooperating pieces:
//! * [`FramePump`]: the single-slot debounced task queue. Any number of
//!   schedule calls within one tick merge into one unit of work; draining
//!   happens exactly once per tick and always sees the latest inputs.
//! * [`WindowCoordinator`]: the decision core that turns scroll position,
//!   chunk geometry, and the currently-held window into "request this byte
//!   range" or "do nothing", with value-identical consecutive requests
//!   suppressed so rapid scrolling cannot storm the host.
//!
//! Requests are fire-and-forget. There is no response correlation and no
//! error channel: the coordinator only ever reacts to whatever window the
//! host supplied most recently, and a host that never answers simply leaves
//! the viewport stale.

pub mod coordinator;
pub mod pump;

pub use coordinator::{Evaluation, ViewMetrics, WindowCoordinator, WindowRequest, ensure_row_visible};
pub use pump::{FramePump, PumpMetricsSnapshot, WorkKind};
