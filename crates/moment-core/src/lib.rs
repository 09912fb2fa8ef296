//! Core domain logic for the Moment life calendar.
//!
//! This crate contains:
//! - The date engine: calendar primitives, year progress, life progress on
//!   weeks and months bases, event progress and date labels
//! - [`TimeEngine`]: one sampled "now" shared by a batch of computations
//! - The application state model and its persisted JSON format
//! - The free/premium feature gate
//!
//! Nothing here touches storage, the network or a terminal.

pub mod calendar;
mod engine;
pub mod event;
pub mod format;
pub mod gate;
pub mod life;
pub mod progress;
pub mod state;
mod types;
pub mod year;

pub use engine::{EventStatus, TimeEngine};
pub use event::{Event, EventPatch, NewEvent};
pub use gate::Feature;
pub use life::{LifeExpectancy, LifeProgress, UnitProgress};
pub use state::{AppState, DecodeError, STORAGE_KEY_APP_STATE, User};
pub use types::{EventId, Theme, ValidationError};
pub use year::YearProgress;
