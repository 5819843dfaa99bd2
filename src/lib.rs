//! Animated single-page portfolio.
//!
//! The target-independent modules hold the animation and widget state; the
//! `frontend` module binds them to the DOM with Yew on `wasm32`, and the
//! `server` module hosts the built site natively.

pub mod chat;
pub mod content;
pub mod entrance;
pub mod motion;
pub mod nav;
pub mod preloader;
pub mod scope;
pub mod shell;
pub mod timeline;
pub mod trigger;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
