//! Authoritative game server
//!
//! ## Architecture
//!
//! ```text
//! websocket ──> game::Connection ──> registry::SessionRegistry ──> session::Session
//!                    ^                        │                          │
//!                    │                        └──> store::MoveStore      │
//!                    └──────────── per-participant mpsc channel <────────┘
//! ```
//!
//! Every session sits behind its own mutex, so joins, ready toggles and moves for
//! one session are processed strictly one at a time while unrelated sessions run in
//! parallel. An accepted move is appended to the store before it is applied and
//! broadcast, which keeps the persisted log identical to what participants saw.

pub mod api;
pub mod config;
pub mod error;
pub mod game;
pub mod registry;
pub mod session;
pub mod store;
