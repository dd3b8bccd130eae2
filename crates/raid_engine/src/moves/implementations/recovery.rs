//! Self-targeted HP moves that the catalog's healing percent cannot express.

use crate::core_data::Status;
use crate::error::Result;
use crate::mechanics::is_grounded;
use crate::moves::hooks::EffectContext;
use crate::state::{Flags, RaidState, Terrain, Volatiles};

pub fn try_rest(state: &RaidState, ctx: &EffectContext<'_>) -> Option<String> {
    let user = state.raider(ctx.user).ok()?;
    let field = &user.field;
    let terrain_blocks = is_grounded(user, field)
        && (field.has_terrain(Terrain::Electric) || field.has_terrain(Terrain::Misty));
    if user.is_full_hp()
        || user.is_asleep()
        || user.has_any_ability(&["Insomnia", "Vital Spirit", "Sweet Veil"])
        || terrain_blocks
    {
        return Some("But it failed!".to_string());
    }
    None
}

/// Full heal, then sleep for three turns in place of any other status.
pub fn rest(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let missing = state.raider(ctx.user)?.hp_lost();
    state.apply_healing(ctx.user, missing, flags)?;
    let user = state.raider_mut(ctx.user)?;
    user.status = Some(Status::Sleep);
    user.toxic_counter = 0;
    user.volatile.sleep_turns = 3;
    user.volatile.set(Volatiles::DROWSY, false);
    flags.push(ctx.user, format!("{} slept and became healthy", user.display_name()));
    Ok(())
}

/// A fifth of max HP and a status cure for each raider it reaches.
pub fn heal_cheer(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    for &id in ctx.affected {
        let raider = state.raider(id)?;
        if raider.is_fainted() {
            continue;
        }
        let amount = (raider.max_hp / 5) as i64;
        state.apply_healing(id, amount, flags)?;
        let raider = state.raider_mut(id)?;
        if let Some(status) = raider.status.take() {
            raider.toxic_counter = 0;
            raider.volatile.sleep_turns = 0;
            flags.push(id, format!("{} is no longer {}", raider.display_name(), status.name()));
        }
    }
    Ok(())
}

/// The user faints after the blast, regardless of Endure or a Focus Sash.
pub fn explosion(state: &mut RaidState, ctx: &EffectContext<'_>, flags: &mut Flags) -> Result<()> {
    let user = state.raider_mut(ctx.user)?;
    if user.is_fainted() {
        return Ok(());
    }
    user.rolls.faint(user.max_hp as i64);
    user.cur_hp = 0;
    user.times_fainted += 1;
    flags.push(ctx.user, format!("{} fainted", user.display_name()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::MoveData;
    use crate::mechanics::Generation;
    use crate::moves::MoveOptions;
    use crate::rolls::Distribution;
    use crate::state::Raider;

    fn state(hp: u32) -> RaidState {
        let make = |cur_hp| Raider {
            max_hp: 100,
            cur_hp,
            ..Default::default()
        };
        RaidState::new(Generation::Gen9, vec![make(100), make(hp), make(50)])
    }

    fn ctx_for<'a>(data: &'a MoveData, options: &'a MoveOptions, affected: &'a [usize], damage: &'a [i64]) -> EffectContext<'a> {
        EffectContext {
            move_data: data,
            user: 1,
            target: 1,
            affected,
            damage,
            is_crit: false,
            options,
        }
    }

    #[test]
    fn test_rest_heals_and_sleeps() {
        let mut s = state(30);
        s.raiders[1].status = Some(Status::Burn);
        let data = MoveData::unknown("Rest");
        let options = MoveOptions::default();
        let ctx = ctx_for(&data, &options, &[1], &[0, 0, 0]);
        assert_eq!(try_rest(&s, &ctx), None);
        let mut flags = Flags::new(3);
        rest(&mut s, &ctx, &mut flags).unwrap();
        assert_eq!(s.raiders[1].cur_hp, 100);
        assert_eq!(s.raiders[1].status, Some(Status::Sleep));
        assert_eq!(s.raiders[1].volatile.sleep_turns, 3);
        assert!(try_rest(&s, &ctx).is_some());
    }

    #[test]
    fn test_rest_fails_at_full_hp() {
        let s = state(100);
        let data = MoveData::unknown("Rest");
        let options = MoveOptions::default();
        let ctx = ctx_for(&data, &options, &[1], &[0, 0, 0]);
        assert!(try_rest(&s, &ctx).is_some());
    }

    #[test]
    fn test_heal_cheer_heals_and_cures_the_side() {
        let mut s = state(40);
        s.raiders[2].status = Some(Status::Paralysis);
        let data = MoveData::unknown("Heal Cheer");
        let options = MoveOptions::default();
        let ctx = ctx_for(&data, &options, &[1, 2], &[0, 0, 0]);
        let mut flags = Flags::new(3);
        heal_cheer(&mut s, &ctx, &mut flags).unwrap();
        assert_eq!(s.raiders[1].cur_hp, 60);
        assert_eq!(s.raiders[2].cur_hp, 70);
        assert_eq!(s.raiders[2].status, None);
        assert_eq!(s.raiders[0].cur_hp, 100);
    }

    #[test]
    fn test_explosion_faints_the_user() {
        let mut s = state(80);
        s.raiders[1].is_endure = true;
        let data = MoveData::unknown("Explosion");
        let options = MoveOptions::default();
        let ctx = ctx_for(&data, &options, &[0], &[50, 0, 0]);
        let mut flags = Flags::new(3);
        explosion(&mut s, &ctx, &mut flags).unwrap();
        assert!(s.raiders[1].is_fainted());
        assert_eq!(s.raiders[1].times_fainted, 1);
    }

    #[test]
    fn test_explosion_is_a_certain_ko_for_the_tracker() {
        let mut s = state(100);
        let holder = s.raiders[1].roll_holder();
        s.raiders[1].rolls.add_sequential_condition("Focus Sash");
        s.raiders[1]
            .rolls
            .add_rolls(&Distribution::uniform(&[40, 50, 60], 1.0), &holder)
            .unwrap();
        s.raiders[1].cur_hp = 50;

        let data = MoveData::unknown("Explosion");
        let options = MoveOptions::default();
        let ctx = ctx_for(&data, &options, &[0], &[50, 0, 0]);
        let mut flags = Flags::new(3);
        explosion(&mut s, &ctx, &mut flags).unwrap();
        assert_eq!(s.raiders[1].rolls.ko_chance(100), 100.0);
    }
}
