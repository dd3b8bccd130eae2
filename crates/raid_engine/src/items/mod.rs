//! Item system hooks and registry.

pub mod hooks;
pub mod implementations;
pub mod registry;

pub use hooks::ItemHooks;
pub use registry::ITEM_REGISTRY;

pub fn hooks(name: &str) -> Option<&'static ItemHooks> {
    ITEM_REGISTRY.get(name)
}
