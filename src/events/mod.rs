//! Events emitted by the duel for presentation and telemetry layers.

mod event;

pub use event::GameEvent;
