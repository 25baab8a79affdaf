//! PokeArena Engine library.
//!
//! This crate contains all server-side code for the Pokemon battle API.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `use_cases/` - Operation orchestration over the ports
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
