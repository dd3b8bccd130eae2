//! Abilities that set weather, terrain or a field-wide effect on entry.

use crate::error::Result;
use crate::state::{FieldAbilities, Flags, RaidState, Terrain, Weather};

fn weather(state: &mut RaidState, id: usize, weather: Weather, flags: &mut Flags) -> Result<()> {
    state.apply_weather(Some(weather), Some(id), flags)?;
    Ok(())
}

fn terrain(state: &mut RaidState, id: usize, terrain: Terrain, flags: &mut Flags) -> Result<()> {
    state.apply_terrain(Some(terrain), Some(id), flags)?;
    Ok(())
}

pub fn drizzle(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    weather(state, id, Weather::Rain, flags)
}

pub fn drought(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    weather(state, id, Weather::Sun, flags)
}

pub fn sand_stream(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    weather(state, id, Weather::Sand, flags)
}

pub fn snow_warning(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    weather(state, id, Weather::Snow, flags)
}

pub fn desolate_land(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    weather(state, id, Weather::HarshSunshine, flags)
}

pub fn primordial_sea(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    weather(state, id, Weather::HeavyRain, flags)
}

pub fn delta_stream(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    weather(state, id, Weather::StrongWinds, flags)
}

pub fn electric_surge(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    terrain(state, id, Terrain::Electric, flags)
}

pub fn grassy_surge(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    terrain(state, id, Terrain::Grassy, flags)
}

pub fn misty_surge(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    terrain(state, id, Terrain::Misty, flags)
}

pub fn psychic_surge(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    terrain(state, id, Terrain::Psychic, flags)
}

// =============================================================================
// Field-wide ability effects
// =============================================================================

fn field_effect(
    state: &mut RaidState,
    id: usize,
    effect: FieldAbilities,
    flags: &mut Flags,
) -> Result<()> {
    for raider in &mut state.raiders {
        raider.field.abilities.insert(effect);
    }
    let name = state.raider(id)?.ability.clone().unwrap_or_default();
    flags.push(id, format!("{} is in effect", name));
    Ok(())
}

pub fn sword_of_ruin(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::SWORD_OF_RUIN, flags)
}

pub fn beads_of_ruin(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::BEADS_OF_RUIN, flags)
}

pub fn tablets_of_ruin(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::TABLETS_OF_RUIN, flags)
}

pub fn vessel_of_ruin(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::VESSEL_OF_RUIN, flags)
}

pub fn fairy_aura(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::FAIRY_AURA, flags)
}

pub fn dark_aura(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::DARK_AURA, flags)
}

pub fn aura_break(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::AURA_BREAK, flags)
}

/// Cloud Nine / Air Lock: weather stays on the field but stops mattering,
/// so Protosynthesis loses its sun.
pub fn cloud_nine(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::CLOUD_NINE, flags)?;
    for other in 0..state.len() {
        state.update_qp(other, flags)?;
    }
    Ok(())
}

pub fn teraform_zero(state: &mut RaidState, id: usize, flags: &mut Flags) -> Result<()> {
    field_effect(state, id, FieldAbilities::TERAFORM_ZERO, flags)?;
    for other in 0..state.len() {
        state.update_qp(other, flags)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::Generation;
    use crate::state::Raider;

    #[test]
    fn test_ruin_reaches_every_field() {
        let raiders = vec![Raider::default(), Raider::default(), Raider::default()];
        let mut state = RaidState::new(Generation::Gen9, raiders);
        state.raiders[0].ability = Some("Sword of Ruin".to_string());
        let mut flags = Flags::new(3);
        sword_of_ruin(&mut state, 0, &mut flags).unwrap();
        assert!(state
            .raiders
            .iter()
            .all(|r| r.field.has_ability_effect(FieldAbilities::SWORD_OF_RUIN)));
        assert_eq!(flags.get(0), ["Sword of Ruin is in effect"]);
    }
}
