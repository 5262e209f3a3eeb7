//! Physical-type catalog.
//!
//! Type 0 is the default body taken straight from the server parameters.
//! Every other type is drawn from the `PlayerParam` delta ranges, trading
//! one capability against another so no generated body dominates.

use serde::{Deserialize, Serialize};

use crate::param::{PlayerParam, ServerParam};
use crate::rng::NoiseSource;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerType {
    pub id: usize,
    pub player_speed_max: f64,
    pub stamina_inc_max: f64,
    pub player_decay: f64,
    pub inertia_moment: f64,
    pub dash_power_rate: f64,
    pub player_size: f64,
    pub kickable_margin: f64,
    pub kick_rand: f64,
    pub extra_stamina: f64,
    pub effort_max: f64,
    pub effort_min: f64,
}

impl PlayerType {
    /// The default body, identical to the server-level parameters.
    pub fn default_type(param: &ServerParam) -> Self {
        PlayerType {
            id: 0,
            player_speed_max: param.player_speed_max,
            stamina_inc_max: param.stamina_inc_max,
            player_decay: param.player_decay,
            inertia_moment: param.inertia_moment,
            dash_power_rate: param.dash_power_rate,
            player_size: param.player_size,
            kickable_margin: param.kickable_margin,
            kick_rand: param.kick_rand,
            extra_stamina: param.extra_stamina,
            effort_max: param.effort_init,
            effort_min: param.effort_min,
        }
    }

    /// Generate a heterogeneous body. Deltas come from the shared noise
    /// source so a fixed seed produces the same catalog.
    pub fn generate(
        id: usize,
        param: &ServerParam,
        player_param: &PlayerParam,
        rng: &mut NoiseSource,
    ) -> Self {
        let mut t = PlayerType::default_type(param);
        t.id = id;

        let dpr_delta = rng.uniform(
            player_param.new_dash_power_rate_delta_min,
            player_param.new_dash_power_rate_delta_max,
        );
        t.dash_power_rate = param.dash_power_rate + dpr_delta;
        t.stamina_inc_max =
            param.stamina_inc_max + dpr_delta * player_param.new_stamina_inc_max_delta_factor;

        let decay_delta = rng.uniform(
            player_param.player_decay_delta_min,
            player_param.player_decay_delta_max,
        );
        t.player_decay = param.player_decay + decay_delta;
        t.inertia_moment =
            param.inertia_moment + decay_delta * player_param.inertia_moment_delta_factor;

        let margin_delta = rng.uniform(
            player_param.kickable_margin_delta_min,
            player_param.kickable_margin_delta_max,
        );
        t.kickable_margin = param.kickable_margin + margin_delta;
        t.kick_rand = param.kick_rand + margin_delta * player_param.kick_rand_delta_factor;

        let stamina_delta = rng.uniform(
            player_param.extra_stamina_delta_min,
            player_param.extra_stamina_delta_max,
        );
        t.extra_stamina = param.extra_stamina + stamina_delta;
        t.effort_max = param.effort_init + stamina_delta * player_param.effort_max_delta_factor;
        t.effort_min = param.effort_min + stamina_delta * player_param.effort_min_delta_factor;

        t
    }

    /// Kick reach of this body.
    pub fn kickable_area(&self, ball_size: f64) -> f64 {
        self.player_size + ball_size + self.kickable_margin
    }
}

/// All physical types available for this match.
#[derive(Clone, Debug)]
pub struct PlayerTypeCatalog {
    types: Vec<PlayerType>,
}

impl PlayerTypeCatalog {
    pub fn generate(
        param: &ServerParam,
        player_param: &PlayerParam,
        rng: &mut NoiseSource,
    ) -> Self {
        let mut types = Vec::with_capacity(player_param.player_types);
        types.push(PlayerType::default_type(param));
        for id in 1..player_param.player_types {
            types.push(PlayerType::generate(id, param, player_param, rng));
        }
        PlayerTypeCatalog { types }
    }

    pub fn get(&self, id: usize) -> Option<&PlayerType> {
        self.types.get(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
