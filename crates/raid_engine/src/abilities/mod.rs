//! Ability system hooks and registry.

pub mod hooks;
pub mod implementations;
pub mod registry;

pub use hooks::AbilityHooks;
pub use registry::ABILITY_REGISTRY;

/// Hooks for an ability, by display name. Abilities without a modeled
/// effect have no entry.
pub fn hooks(name: &str) -> Option<&'static AbilityHooks> {
    ABILITY_REGISTRY.get(name)
}

#[cfg(test)]
mod tests;
