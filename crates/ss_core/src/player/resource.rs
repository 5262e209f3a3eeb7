//! Resource model: stamina, recovery, effort, hearing capacity and the
//! per-cycle flag resets.
//!
//! Everything here runs once per cycle regardless of which commands were
//! issued. The decrement thresholds sit below the increment threshold so
//! effort cannot oscillate around a single stamina level.

use crate::context::Side;
use crate::player_type::PlayerType;

use super::Player;

impl Player {
    /// Per-cycle stamina update. Recovery and effort degrade when stamina
    /// is low, effort climbs back when stamina is high, then stamina
    /// regenerates by `recovery * stamina_inc_max` up to the ceiling.
    pub fn update_stamina(&mut self) {
        if self.stamina <= self.param.recover_dec_thr * self.param.stamina_max {
            self.recovery = (self.recovery - self.param.recover_dec).max(self.param.recover_min);
        }
        if self.stamina <= self.param.effort_dec_thr * self.param.stamina_max {
            self.effort = (self.effort - self.param.effort_dec).max(self.player_type.effort_min);
        }
        if self.stamina >= self.param.effort_inc_thr * self.param.stamina_max {
            self.effort = (self.effort + self.param.effort_inc).min(self.player_type.effort_max);
        }
        self.stamina = (self.stamina + self.recovery * self.player_type.stamina_inc_max)
            .min(self.param.stamina_max);
    }

    /// Lifetime regeneration budget still available. Reported on the wire
    /// from version 13 on.
    pub fn stamina_capacity(&self) -> f64 {
        (self.param.stamina_max - self.consumed_stamina).max(0.0)
    }

    /// Per-cycle hearing regeneration, capped per sender class.
    pub fn update_hear_capacity(&mut self) {
        self.hear_capacity_from_teammate =
            (self.hear_capacity_from_teammate + self.param.hear_inc).min(self.param.hear_max);
        self.hear_capacity_from_opponent =
            (self.hear_capacity_from_opponent + self.param.hear_inc).min(self.param.hear_max);
    }

    pub fn can_hear_full_from(&self, sender: Side) -> bool {
        let capacity = if sender == self.side {
            self.hear_capacity_from_teammate
        } else {
            self.hear_capacity_from_opponent
        };
        capacity >= self.param.hear_decay
    }

    /// Consume capacity for a fully heard message. Returns false when the
    /// remaining capacity is below one decay unit and the message must be
    /// dropped by the audio collaborator instead.
    pub fn decrement_hear_capacity(&mut self, sender: Side) -> bool {
        if !self.can_hear_full_from(sender) {
            return false;
        }
        if sender == self.side {
            self.hear_capacity_from_teammate -= self.param.hear_decay;
        } else {
            self.hear_capacity_from_opponent -= self.param.hear_decay;
        }
        true
    }

    /// Cycle-boundary guard reset. The primary guard only clears once any
    /// active tackle lock has counted down to zero; the neck guard and the
    /// synchronized-mode barrier flag clear unconditionally. The catch ban
    /// and the arm counters tick down here as well.
    pub fn reset_command_flags(&mut self) {
        if self.tackle_cycles > 0 {
            self.tackle_cycles -= 1;
        }
        if self.tackle_cycles == 0 {
            self.command_done = false;
        }
        self.turn_neck_done = false;
        self.done_received = false;
        if self.catch_ban > 0 {
            self.catch_ban -= 1;
        }
        self.arm.tick();
    }

    /// Clear the transient action markers. Tackle markers persist for as
    /// long as the lock runs so observers keep seeing the tackling state.
    pub fn reset_state_flags(&mut self) {
        self.flags.kicking = false;
        self.flags.kick_fault = false;
        self.flags.catching = false;
        self.flags.catch_fault = false;
        if self.tackle_cycles == 0 {
            self.flags.tackling = false;
            self.flags.tackle_fault = false;
        }
    }

    /// Cleared by the integration pass after it has reported collisions.
    pub fn reset_collision_flags(&mut self) {
        self.flags.ball_collide = false;
        self.flags.player_collide = false;
        self.flags.post_collide = false;
    }

    /// Half-time reset: fresh stamina, recovery, effort and hearing.
    pub fn recover_all(&mut self) {
        self.stamina = self.param.stamina_max;
        self.recovery = self.param.recover_init;
        self.effort = self.player_type.effort_max;
        self.hear_capacity_from_teammate = self.param.hear_max;
        self.hear_capacity_from_opponent = self.param.hear_max;
    }

    /// Swap the physical type. Position and orientation are kept, all
    /// resources return to fresh-match values.
    pub fn substitute(&mut self, new_type: &PlayerType) {
        self.player_type = new_type.clone();
        self.stamina = self.param.stamina_max;
        self.recovery = self.param.recover_init;
        self.effort = new_type.effort_max;
        self.consumed_stamina = 0.0;
        self.hear_capacity_from_teammate = self.param.hear_max;
        self.hear_capacity_from_opponent = self.param.hear_max;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::context::Side;
    use crate::param::{PlayerParam, ServerParam};
    use crate::player::test_support::standing_player;
    use crate::player_type::PlayerType;
    use crate::rng::NoiseSource;

    #[test]
    fn test_recovery_degrades_to_floor() {
        let mut player = standing_player(Side::Left, 7);
        let param = ServerParam::default();
        player.stamina = 0.0;
        for _ in 0..1000 {
            player.update_stamina();
            player.stamina = 0.0;
        }
        assert_eq!(player.recovery, param.recover_min);
        assert_eq!(player.effort, player.player_type().effort_min);
    }

    #[test]
    fn test_effort_recovers_above_threshold() {
        let mut player = standing_player(Side::Left, 7);
        player.effort = 0.7;
        player.stamina = 7000.0;
        for _ in 0..200 {
            player.update_stamina();
            player.stamina = 7000.0;
        }
        assert_eq!(player.effort, player.player_type().effort_max);
    }

    #[test]
    fn test_stamina_regen_clamped_to_max() {
        let mut player = standing_player(Side::Left, 7);
        let max = player.param().stamina_max;
        player.stamina = max - 1.0;
        player.update_stamina();
        assert_eq!(player.stamina, max);
    }

    #[test]
    fn test_stamina_capacity_derives_from_consumption() {
        let mut player = standing_player(Side::Left, 7);
        let max = player.param().stamina_max;
        assert_eq!(player.stamina_capacity(), max);
        player.dash(100.0);
        assert_eq!(player.stamina_capacity(), max - 100.0);
        player.consumed_stamina = max + 500.0;
        assert_eq!(player.stamina_capacity(), 0.0);
    }

    #[test]
    fn test_hearing_gate_and_regen() {
        let mut player = standing_player(Side::Left, 7);
        assert!(player.decrement_hear_capacity(Side::Left));
        // hear_max and hear_decay default to 1: one message drains it.
        assert!(!player.can_hear_full_from(Side::Left));
        assert!(!player.decrement_hear_capacity(Side::Left));
        // Opponent counter is independent.
        assert!(player.decrement_hear_capacity(Side::Right));
        player.update_hear_capacity();
        assert!(player.can_hear_full_from(Side::Left));
        assert!(player.can_hear_full_from(Side::Right));
    }

    #[test]
    fn test_substitute_keeps_pose_resets_resources() {
        let param = ServerParam::default();
        let pparam = PlayerParam::default();
        let mut rng = NoiseSource::from_seed(11);
        let new_type = PlayerType::generate(3, &param, &pparam, &mut rng);

        let mut player = standing_player(Side::Left, 7);
        player.place(crate::geom::Vec2::new(10.0, -4.0));
        player.stamina = 123.0;
        player.consumed_stamina = 500.0;
        player.substitute(&new_type);
        assert_eq!(player.pos, crate::geom::Vec2::new(10.0, -4.0));
        assert_eq!(player.stamina, param.stamina_max);
        assert_eq!(player.effort, new_type.effort_max);
        assert_eq!(player.consumed_stamina, 0.0);
        assert_eq!(player.player_type().id, 3);
    }

    #[test]
    fn test_recover_all() {
        let mut player = standing_player(Side::Left, 7);
        player.stamina = 10.0;
        player.recovery = 0.6;
        player.effort = 0.7;
        player.decrement_hear_capacity(Side::Left);
        player.recover_all();
        assert_eq!(player.stamina, player.param().stamina_max);
        assert_eq!(player.recovery, player.param().recover_init);
        assert_eq!(player.effort, player.player_type().effort_max);
        assert!(player.can_hear_full_from(Side::Left));
    }

    proptest! {
        #[test]
        fn prop_stamina_stays_bounded(powers in prop::collection::vec(-100.0f64..=100.0, 1..60)) {
            let mut player = standing_player(Side::Left, 7);
            let max = player.param().stamina_max;
            for power in powers {
                player.dash(power);
                prop_assert!(player.stamina >= 0.0);
                prop_assert!(player.stamina <= max);
                player.update_stamina();
                prop_assert!(player.stamina >= 0.0);
                prop_assert!(player.stamina <= max);
                player.reset_command_flags();
            }
        }

        #[test]
        fn prop_hear_capacity_stays_bounded(ops in prop::collection::vec(any::<bool>(), 1..100)) {
            let mut player = standing_player(Side::Left, 7);
            let max = player.param().hear_max;
            for regen in ops {
                if regen {
                    player.update_hear_capacity();
                } else {
                    player.decrement_hear_capacity(Side::Left);
                    player.decrement_hear_capacity(Side::Right);
                }
                prop_assert!(player.hear_capacity_from_teammate >= 0);
                prop_assert!(player.hear_capacity_from_teammate <= max);
                prop_assert!(player.hear_capacity_from_opponent >= 0);
                prop_assert!(player.hear_capacity_from_opponent <= max);
            }
        }

        #[test]
        fn prop_effort_stays_in_type_bounds(staminas in prop::collection::vec(0.0f64..=8000.0, 1..100)) {
            let mut player = standing_player(Side::Left, 7);
            for stamina in staminas {
                player.stamina = stamina;
                player.update_stamina();
                prop_assert!(player.effort >= player.player_type().effort_min - 1e-12);
                prop_assert!(player.effort <= player.player_type().effort_max + 1e-12);
            }
        }
    }
}
