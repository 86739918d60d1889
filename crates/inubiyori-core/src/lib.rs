//! Inubiyori Core - kennel engine for the dog-raising simulation
//!
//! Wraps the pure rules in `inubiyori-logic` with everything that needs
//! the outside world: a save directory, the set of live dogs, and the
//! trainer ledger that outlives them.
//!
//! # Architecture
//!
//! - **[`persistence`]**: JSON documents under one root directory
//! - **[`roster`]**: live dogs, selection, ticking, and reaping into the graveyard
//! - **[`config`]**: save location and time compression
//!
//! # Example
//!
//! ```rust,no_run
//! use inubiyori_core::prelude::*;
//!
//! let mut roster = Roster::open(&KennelConfig::default()).unwrap();
//! roster.adopt(Species::Corgi, "Mochi", unix_now()).unwrap();
//!
//! // Driven by the caller's frame loop, at most once per second
//! loop {
//!     let report = roster.tick(unix_now());
//!     for reaped in &report.reaped {
//!         println!("{} has passed away", reaped.record.grave.name);
//!     }
//!     roster.perform_action(Action::Feed);
//! #   break;
//! }
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod roster;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::KennelConfig;
    pub use crate::error::{ConfigError, PersistError, RosterError};
    pub use crate::persistence::{PersistenceStore, PetId};
    pub use crate::roster::{Reaped, Roster, TickReport};
    pub use inubiyori_logic::clock::unix_now;
    pub use inubiyori_logic::{Action, ActionOutcome, ActionReport, Species};
}
