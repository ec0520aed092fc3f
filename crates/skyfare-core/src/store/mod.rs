// ── Application state store ──

mod app_store;
mod slot;

pub use app_store::AppStore;
