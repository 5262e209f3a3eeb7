//! Simulation parameter registry.
//!
//! `ServerParam` is the bag of named tunables every actuator and resource
//! model reads. It is constructed once, shared by reference, and read-only
//! during a cycle. Defaults are the stock competition values. Each tunable
//! carries the protocol version that introduced it so init senders can
//! filter what a given client is allowed to see.
//!
//! `PlayerParam` holds the delta ranges used to generate heterogeneous
//! physical types.

use serde::{Deserialize, Serialize};

/// Pitch geometry. Fixed by the rules, not negotiable per match.
pub const PITCH_LENGTH: f64 = 105.0;
pub const PITCH_WIDTH: f64 = 68.0;
pub const PENALTY_AREA_LENGTH: f64 = 16.5;
pub const PENALTY_AREA_WIDTH: f64 = 40.32;

/// Typed value returned by the by-name lookup.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Double(f64),
    Bool(bool),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerParam {
    // Command power/moment ranges
    /// Max dash/kick power (default: 100.0)
    pub max_power: f64,
    /// Min dash/kick power (default: -100.0)
    pub min_power: f64,
    /// Max turn moment, degrees (default: 180.0)
    pub max_moment: f64,
    /// Min turn moment, degrees (default: -180.0)
    pub min_moment: f64,
    /// Max neck moment, degrees (default: 180.0)
    pub max_neck_moment: f64,
    /// Min neck moment, degrees (default: -180.0)
    pub min_neck_moment: f64,
    /// Max neck angle, degrees (default: 90.0)
    pub max_neck_angle: f64,
    /// Min neck angle, degrees (default: -90.0)
    pub min_neck_angle: f64,

    // Stamina model
    /// Stamina ceiling (default: 8000.0)
    pub stamina_max: f64,
    /// Base stamina regeneration per cycle (default: 45.0)
    pub stamina_inc_max: f64,
    /// Initial recovery multiplier (default: 1.0)
    pub recover_init: f64,
    /// Recovery degrades below this fraction of stamina_max (default: 0.3)
    pub recover_dec_thr: f64,
    /// Recovery decrement (default: 0.002)
    pub recover_dec: f64,
    /// Recovery floor (default: 0.5)
    pub recover_min: f64,
    /// Initial effort multiplier (default: 1.0)
    pub effort_init: f64,
    /// Effort degrades below this fraction of stamina_max (default: 0.3)
    pub effort_dec_thr: f64,
    /// Effort decrement (default: 0.005)
    pub effort_dec: f64,
    /// Default-type effort floor (default: 0.6)
    pub effort_min: f64,
    /// Effort recovers above this fraction of stamina_max (default: 0.6)
    pub effort_inc_thr: f64,
    /// Effort increment (default: 0.01)
    pub effort_inc: f64,
    /// Reserve usable past empty stamina, default type (default: 50.0)
    pub extra_stamina: f64,

    // Player body, default type
    /// Player radius (default: 0.3)
    pub player_size: f64,
    /// Velocity decay per cycle (default: 0.4)
    pub player_decay: f64,
    /// Actuator noise factor for turns (default: 0.1)
    pub player_rand: f64,
    /// Speed ceiling (default: 1.05)
    pub player_speed_max: f64,
    /// Acceleration ceiling (default: 1.0)
    pub player_accel_max: f64,
    /// Turn inertia coefficient (default: 5.0)
    pub inertia_moment: f64,
    /// Dash power to acceleration rate (default: 0.006)
    pub dash_power_rate: f64,

    // Ball and kicking
    /// Ball radius (default: 0.085)
    pub ball_size: f64,
    /// Ball velocity decay per cycle (default: 0.94)
    pub ball_decay: f64,
    /// Ball speed ceiling (default: 3.0)
    pub ball_speed_max: f64,
    /// Kick power to acceleration rate (default: 0.027)
    pub kick_power_rate: f64,
    /// Extra reach beyond contact radius for kicks (default: 0.7)
    pub kickable_margin: f64,
    /// Kick noise factor, default type (default: 0.1)
    pub kick_rand: f64,

    // Tackling
    /// Forward tackle reach (default: 2.0)
    pub tackle_dist: f64,
    /// Backward tackle reach (default: 0.0)
    pub tackle_back_dist: f64,
    /// Lateral tackle reach (default: 1.25)
    pub tackle_width: f64,
    /// Exponent of the failure probability terms (default: 6.0)
    pub tackle_exponent: f64,
    /// Lock duration after a tackle attempt (default: 10)
    pub tackle_cycles: u32,
    /// Tackle power to acceleration rate (default: 0.027)
    pub tackle_power_rate: f64,
    /// Max forward tackle power (default: 100.0)
    pub max_tackle_power: f64,
    /// Max backward tackle power (default: 0.0)
    pub max_back_tackle_power: f64,

    // Goalie catching
    /// Catchable area length (default: 1.2)
    pub catchable_area_l: f64,
    /// Catchable area width (default: 1.0)
    pub catchable_area_w: f64,
    /// Flat catch success probability (default: 1.0)
    pub catch_probability: f64,
    /// Reliable catch area length (default: 1.2)
    pub reliable_catch_area_l: f64,
    /// Lower bound on catch success outside the reliable area (default: 1.0)
    pub min_catch_probability: f64,
    /// Cooldown after any catch attempt (default: 5)
    pub catch_ban_cycle: u32,
    /// Goalie moves allowed after a catch, negative = unlimited (default: 2)
    pub goalie_max_moves: i32,

    // Perception
    /// Default visible angle, degrees (default: 90.0)
    pub visible_angle: f64,
    /// Unconditional visibility radius (default: 3.0)
    pub visible_distance: f64,

    // Audio
    /// Max say message length, bytes (default: 10)
    pub say_msg_size: usize,
    /// Hearing capacity ceiling per sender class (default: 1)
    pub hear_max: i32,
    /// Hearing capacity regeneration per cycle (default: 1)
    pub hear_inc: i32,
    /// Capacity consumed by one fully heard message (default: 1)
    pub hear_decay: i32,

    // Arm pointing
    /// Cycles the arm is locked after pointing (default: 5)
    pub point_to_ban: u32,
    /// Cycles a point gesture stays visible (default: 20)
    pub point_to_duration: u32,

    // Handicap zones
    /// Dash/speed divisor in the upper half for the left team (default: 1.0)
    pub slowness_on_top_for_left_team: f64,
    /// Dash/speed divisor in the upper half for the right team (default: 1.0)
    pub slowness_on_top_for_right_team: f64,
}

impl Default for ServerParam {
    fn default() -> Self {
        ServerParam {
            max_power: 100.0,
            min_power: -100.0,
            max_moment: 180.0,
            min_moment: -180.0,
            max_neck_moment: 180.0,
            min_neck_moment: -180.0,
            max_neck_angle: 90.0,
            min_neck_angle: -90.0,
            stamina_max: 8000.0,
            stamina_inc_max: 45.0,
            recover_init: 1.0,
            recover_dec_thr: 0.3,
            recover_dec: 0.002,
            recover_min: 0.5,
            effort_init: 1.0,
            effort_dec_thr: 0.3,
            effort_dec: 0.005,
            effort_min: 0.6,
            effort_inc_thr: 0.6,
            effort_inc: 0.01,
            extra_stamina: 50.0,
            player_size: 0.3,
            player_decay: 0.4,
            player_rand: 0.1,
            player_speed_max: 1.05,
            player_accel_max: 1.0,
            inertia_moment: 5.0,
            dash_power_rate: 0.006,
            ball_size: 0.085,
            ball_decay: 0.94,
            ball_speed_max: 3.0,
            kick_power_rate: 0.027,
            kickable_margin: 0.7,
            kick_rand: 0.1,
            tackle_dist: 2.0,
            tackle_back_dist: 0.0,
            tackle_width: 1.25,
            tackle_exponent: 6.0,
            tackle_cycles: 10,
            tackle_power_rate: 0.027,
            max_tackle_power: 100.0,
            max_back_tackle_power: 0.0,
            catchable_area_l: 1.2,
            catchable_area_w: 1.0,
            catch_probability: 1.0,
            reliable_catch_area_l: 1.2,
            min_catch_probability: 1.0,
            catch_ban_cycle: 5,
            goalie_max_moves: 2,
            visible_angle: 90.0,
            visible_distance: 3.0,
            say_msg_size: 10,
            hear_max: 1,
            hear_inc: 1,
            hear_decay: 1,
            point_to_ban: 5,
            point_to_duration: 20,
            slowness_on_top_for_left_team: 1.0,
            slowness_on_top_for_right_team: 1.0,
        }
    }
}

impl ServerParam {
    /// Combined reach of a default-type player: body, ball and margin.
    pub fn kickable_area(&self) -> f64 {
        self.player_size + self.ball_size + self.kickable_margin
    }

    /// Look up a tunable by its wire name. Returns the value and the
    /// protocol version that introduced the name. Init senders use the
    /// version to trim the parameter message for older clients.
    pub fn lookup(&self, name: &str) -> Option<(ParamValue, u8)> {
        use ParamValue::{Double, Int};
        let entry = match name {
            "maxpower" => (Double(self.max_power), 7),
            "minpower" => (Double(self.min_power), 7),
            "maxmoment" => (Double(self.max_moment), 7),
            "minmoment" => (Double(self.min_moment), 7),
            "maxneckmoment" => (Double(self.max_neck_moment), 7),
            "minneckmoment" => (Double(self.min_neck_moment), 7),
            "maxneckang" => (Double(self.max_neck_angle), 7),
            "minneckang" => (Double(self.min_neck_angle), 7),
            "stamina_max" => (Double(self.stamina_max), 7),
            "stamina_inc_max" => (Double(self.stamina_inc_max), 7),
            "recover_init" => (Double(self.recover_init), 7),
            "recover_dec_thr" => (Double(self.recover_dec_thr), 7),
            "recover_dec" => (Double(self.recover_dec), 7),
            "recover_min" => (Double(self.recover_min), 7),
            "effort_init" => (Double(self.effort_init), 7),
            "effort_dec_thr" => (Double(self.effort_dec_thr), 7),
            "effort_dec" => (Double(self.effort_dec), 7),
            "effort_min" => (Double(self.effort_min), 7),
            "effort_inc_thr" => (Double(self.effort_inc_thr), 7),
            "effort_inc" => (Double(self.effort_inc), 7),
            "extra_stamina" => (Double(self.extra_stamina), 12),
            "player_size" => (Double(self.player_size), 7),
            "player_decay" => (Double(self.player_decay), 7),
            "prand" => (Double(self.player_rand), 7),
            "player_speed_max" => (Double(self.player_speed_max), 7),
            "player_accel_max" => (Double(self.player_accel_max), 7),
            "inertia_moment" => (Double(self.inertia_moment), 7),
            "dash_power_rate" => (Double(self.dash_power_rate), 7),
            "ball_size" => (Double(self.ball_size), 7),
            "ball_decay" => (Double(self.ball_decay), 7),
            "ball_speed_max" => (Double(self.ball_speed_max), 7),
            "kick_power_rate" => (Double(self.kick_power_rate), 7),
            "kickable_margin" => (Double(self.kickable_margin), 7),
            "kick_rand" => (Double(self.kick_rand), 7),
            "tackle_dist" => (Double(self.tackle_dist), 8),
            "tackle_back_dist" => (Double(self.tackle_back_dist), 8),
            "tackle_width" => (Double(self.tackle_width), 8),
            "tackle_exponent" => (Double(self.tackle_exponent), 8),
            "tackle_cycles" => (Int(self.tackle_cycles as i64), 8),
            "tackle_power_rate" => (Double(self.tackle_power_rate), 8),
            "max_tackle_power" => (Double(self.max_tackle_power), 12),
            "max_back_tackle_power" => (Double(self.max_back_tackle_power), 12),
            "catchable_area_l" => (Double(self.catchable_area_l), 7),
            "catchable_area_w" => (Double(self.catchable_area_w), 7),
            "catch_probability" => (Double(self.catch_probability), 7),
            "reliable_catch_area_l" => (Double(self.reliable_catch_area_l), 13),
            "min_catch_probability" => (Double(self.min_catch_probability), 13),
            "catch_ban_cycle" => (Int(self.catch_ban_cycle as i64), 7),
            "goalie_max_moves" => (Int(self.goalie_max_moves as i64), 7),
            "visible_angle" => (Double(self.visible_angle), 7),
            "visible_distance" => (Double(self.visible_distance), 7),
            "say_msg_size" => (Int(self.say_msg_size as i64), 7),
            "hear_max" => (Int(self.hear_max as i64), 7),
            "hear_inc" => (Int(self.hear_inc as i64), 7),
            "hear_decay" => (Int(self.hear_decay as i64), 7),
            "point_to_ban" => (Int(self.point_to_ban as i64), 8),
            "point_to_duration" => (Int(self.point_to_duration as i64), 8),
            "slowness_on_top_for_left_team" => {
                (Double(self.slowness_on_top_for_left_team), 8)
            }
            "slowness_on_top_for_right_team" => {
                (Double(self.slowness_on_top_for_right_team), 8)
            }
            _ => return None,
        };
        Some(entry)
    }

    /// JSON snapshot of the full registry, for monitors and logs.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Delta ranges for heterogeneous player type generation. A generated type
/// trades one capability against another: a higher dash power rate costs
/// stamina regeneration, a wider kickable margin costs kick accuracy, and
/// extra stamina costs effort bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerParam {
    /// Number of physical types including the default (default: 18)
    pub player_types: usize,
    /// Substitutions allowed per team (default: 3)
    pub subs_max: usize,
    /// Max simultaneous players per non-default type (default: 1)
    pub pt_max: usize,

    /// Dash power rate delta range (default: -0.0012 .. 0.0008)
    pub new_dash_power_rate_delta_min: f64,
    pub new_dash_power_rate_delta_max: f64,
    /// Stamina regeneration traded per dash power rate delta (default: -6000.0)
    pub new_stamina_inc_max_delta_factor: f64,

    /// Player decay delta range (default: -0.1 .. 0.1)
    pub player_decay_delta_min: f64,
    pub player_decay_delta_max: f64,
    /// Inertia moment gained per decay delta (default: 25.0)
    pub inertia_moment_delta_factor: f64,

    /// Kickable margin delta range (default: -0.1 .. 0.1)
    pub kickable_margin_delta_min: f64,
    pub kickable_margin_delta_max: f64,
    /// Kick noise gained per margin delta (default: 1.0)
    pub kick_rand_delta_factor: f64,

    /// Extra stamina delta range (default: 0.0 .. 50.0)
    pub extra_stamina_delta_min: f64,
    pub extra_stamina_delta_max: f64,
    /// Effort ceiling lost per extra stamina delta (default: -0.004)
    pub effort_max_delta_factor: f64,
    /// Effort floor lost per extra stamina delta (default: -0.004)
    pub effort_min_delta_factor: f64,
}

impl Default for PlayerParam {
    fn default() -> Self {
        PlayerParam {
            player_types: 18,
            subs_max: 3,
            pt_max: 1,
            new_dash_power_rate_delta_min: -0.0012,
            new_dash_power_rate_delta_max: 0.0008,
            new_stamina_inc_max_delta_factor: -6000.0,
            player_decay_delta_min: -0.1,
            player_decay_delta_max: 0.1,
            inertia_moment_delta_factor: 25.0,
            kickable_margin_delta_min: -0.1,
            kickable_margin_delta_max: 0.1,
            kick_rand_delta_factor: 1.0,
            extra_stamina_delta_min: 0.0,
            extra_stamina_delta_max: 50.0,
            effort_max_delta_factor: -0.004,
            effort_min_delta_factor: -0.004,
        }
    }
}
