//! Action executor.
//!
//! One primary command per agent per cycle, guarded by `command_done`.
//! Turn-neck carries its own guard and say never counts as primary. Every
//! cross-agent effect (kick and tackle forces, catch ownership, collision
//! passes) goes through the [`MatchContext`] so the stadium applies them
//! in one deterministic integration step.

use std::f64::consts::PI;

use tracing::debug;

use crate::context::{MatchContext, TeamSelector};
use crate::geom::{bound, deg_to_rad, normalize_angle, rad_to_deg, Rect, Vec2};
use crate::play_mode::PlayMode;
use crate::rng::NoiseSource;

use super::{EarMode, Player, ViewQuality, ViewWidth};

impl Player {
    /// Accelerate along the committed body angle. Negative power dashes
    /// backward at twice the stamina cost. The stamina need is clamped to
    /// what is left plus the body's extra-stamina reserve, so the command
    /// always applies with whatever force the tank still affords.
    pub fn dash(&mut self, power: f64) {
        if self.command_done {
            return;
        }
        let power = bound(self.param.min_power, power, self.param.max_power);
        let mut power_need = if power < 0.0 { -2.0 * power } else { power };
        power_need = power_need.min(self.stamina + self.player_type.extra_stamina);
        self.stamina = (self.stamina - power_need).max(0.0);
        self.consumed_stamina += power_need;

        let power = if power < 0.0 { -power_need / 2.0 } else { power_need };
        let mut effective_power = self.effort * power * self.player_type.dash_power_rate;
        if self.pos.y < 0.0 {
            effective_power /= match self.side {
                crate::context::Side::Left => self.param.slowness_on_top_for_left_team,
                crate::context::Side::Right => self.param.slowness_on_top_for_right_team,
            };
        }
        self.accel += Vec2::from_polar(effective_power, self.body_committed);
        self.counters.dash += 1;
        self.command_done = true;
        debug!(unum = self.unum, power, "dash applied");
    }

    /// Rotate the pending body angle. The moment is perturbed by actuator
    /// noise and damped by inertia, so a moving agent turns less.
    pub fn turn(&mut self, moment_deg: f64, rng: &mut NoiseSource) {
        if self.command_done {
            return;
        }
        let moment = deg_to_rad(bound(self.param.min_moment, moment_deg, self.param.max_moment));
        let speed = self.vel.norm();
        let noise = 1.0 + rng.uniform(-self.param.player_rand, self.param.player_rand);
        self.body_pending = normalize_angle(
            self.body_committed
                + noise * moment / (1.0 + self.player_type.inertia_moment * speed),
        );
        self.counters.turn += 1;
        self.command_done = true;
    }

    /// Neck turns are independent of the primary command and clamp the
    /// resulting head angle rather than the moment alone.
    pub fn turn_neck(&mut self, moment_deg: f64) {
        if self.turn_neck_done {
            return;
        }
        let moment = bound(
            self.param.min_neck_moment,
            moment_deg,
            self.param.max_neck_moment,
        );
        let new_neck = bound(
            self.param.min_neck_angle,
            rad_to_deg(self.neck_committed) + moment,
            self.param.max_neck_angle,
        );
        self.neck_pending = deg_to_rad(new_neck);
        self.counters.turn_neck += 1;
        self.turn_neck_done = true;
    }

    /// Kick the ball. Dead-ball restarts swallow the command, an
    /// out-of-reach ball raises a kick fault; neither consumes the cycle.
    /// Effective power drops with angular offset and ball distance, and a
    /// noise vector grows with power used and current ball speed.
    pub fn kick(&mut self, power: f64, dir_deg: f64, ctx: &mut dyn MatchContext, rng: &mut NoiseSource) {
        if self.command_done {
            return;
        }
        self.flags.kicking = true;
        if ctx.play_mode().kick_banned() {
            return;
        }
        let power = bound(self.param.min_power, power, self.param.max_power);
        let dir = deg_to_rad(bound(self.param.min_moment, dir_deg, self.param.max_moment));

        let ball_rel = ctx.ball_pos() - self.pos;
        let dir_diff = normalize_angle(ball_rel.th() - self.body_committed).abs();
        let dist_ball = ball_rel.norm() - self.param.ball_size - self.player_type.player_size;
        if dist_ball > self.player_type.kickable_margin {
            self.flags.kick_fault = true;
            return;
        }

        let effective_power = power
            * self.param.kick_power_rate
            * (1.0
                - 0.25 * dir_diff / PI
                - 0.25 * dist_ball / self.player_type.kickable_margin);
        let mut accel = Vec2::from_polar(effective_power, dir + self.body_committed);

        let pos_rate =
            0.5 + 0.25 * (dir_diff / PI + dist_ball / self.player_type.kickable_margin);
        let speed_rate = 0.5
            + 0.5 * (ctx.ball_vel().norm() / (self.param.ball_speed_max * self.param.ball_decay));
        let max_rand =
            self.player_type.kick_rand * (power / self.param.max_power) * (pos_rate + speed_rate);
        accel += Vec2::from_polar(rng.uniform(0.0, max_rand), rng.uniform(-PI, PI));

        ctx.kick_taken(self.side, self.unum, accel);
        self.counters.kick += 1;
        self.command_done = true;
        debug!(unum = self.unum, power, "kick applied");
    }

    /// Attempt a tackle. Unlike the other primaries the attempt itself
    /// consumes the cycle and starts the lock before any outcome check, so
    /// a hopeless tackle still freezes the agent. Failure probability is
    /// `(|x|/dist)^exp + (|y|/width)^exp` in the committed body frame;
    /// reaching 1 means a guaranteed fault with no random draw.
    pub fn tackle(&mut self, power_or_angle: f64, ctx: &mut dyn MatchContext, rng: &mut NoiseSource) {
        if self.command_done || self.is_tackling() {
            return;
        }
        self.command_done = true;
        self.tackle_cycles = self.param.tackle_cycles;
        self.counters.tackle += 1;

        let ball_rel = (ctx.ball_pos() - self.pos).rotated(-self.body_committed);
        let dist = if ball_rel.x > 0.0 {
            self.param.tackle_dist
        } else {
            self.param.tackle_back_dist
        };
        if dist <= 1.0e-5 {
            self.flags.tackle_fault = true;
            return;
        }
        let prob = (ball_rel.x.abs() / dist).powf(self.param.tackle_exponent)
            + (ball_rel.y.abs() / self.param.tackle_width).powf(self.param.tackle_exponent);
        if prob >= 1.0 {
            self.flags.tackle_fault = true;
            return;
        }
        if !rng.bernoulli(1.0 - prob) {
            self.flags.tackling = true;
            self.flags.tackle_fault = true;
            return;
        }

        self.flags.tackling = true;
        if ctx.play_mode().tackle_force_banned() {
            return;
        }

        let angle_model = self
            .sender
            .map_or(false, |s| s.version().tackle_angle_model());
        let (effective_power, dir, power_rate) = if angle_model {
            let angle =
                deg_to_rad(bound(self.param.min_moment, power_or_angle, self.param.max_moment));
            let eff = (self.param.max_back_tackle_power
                + (self.param.max_tackle_power - self.param.max_back_tackle_power)
                    * (1.0 - angle.abs() / PI))
                * self.param.tackle_power_rate;
            (eff, angle + self.body_committed, 1.0)
        } else {
            let power = bound(
                -self.param.max_back_tackle_power,
                power_or_angle,
                self.param.max_tackle_power,
            );
            let rate = if power >= 0.0 {
                power / self.param.max_tackle_power
            } else {
                -power / self.param.max_back_tackle_power
            };
            (power * self.param.tackle_power_rate, self.body_committed, rate)
        };
        // A ball behind the agent takes less force in both models.
        let effective_power = effective_power * (1.0 - 0.5 * ball_rel.th().abs() / PI);
        let mut accel = Vec2::from_polar(effective_power, dir);

        let pos_rate = 0.5 + 0.5 * (1.0 - prob);
        let speed_rate = 0.5
            + 0.5 * (ctx.ball_vel().norm() / (self.param.ball_speed_max * self.param.ball_decay));
        let max_rand = self.player_type.kick_rand * power_rate * (pos_rate + speed_rate);
        accel += Vec2::from_polar(rng.uniform(0.0, max_rand), rng.uniform(-PI, PI));

        ctx.kick_taken(self.side, self.unum, accel);
        debug!(unum = self.unum, prob, "tackle succeeded");
    }

    /// Goalie catch. Preconditions (goalie flag, no ban, active play) and
    /// an out-of-area ball fault without consuming the cycle, so the
    /// goalie may still issue a primary and retry next cycle. Once the
    /// outer gate and the flat probability draw pass, the ban starts and
    /// the attempt is counted whatever the outcome; a graduated miss past
    /// the reliable area is not marked as a fault.
    pub fn goalie_catch(&mut self, dir_deg: f64, ctx: &mut dyn MatchContext, rng: &mut NoiseSource) {
        if self.command_done {
            return;
        }
        self.flags.catching = true;
        let mode = ctx.play_mode();
        if !self.goalie
            || self.catch_ban > 0
            || !(mode == PlayMode::PlayOn || mode.is_penalty_shootout())
        {
            self.flags.catch_fault = true;
            return;
        }

        let dir = deg_to_rad(bound(self.param.min_moment, dir_deg, self.param.max_moment));
        let ball_rel = (ctx.ball_pos() - self.pos).rotated(-(self.body_committed + dir));

        let outer = Rect::new(
            Vec2::new(self.param.catchable_area_l * 0.5, 0.0),
            Vec2::new(self.param.catchable_area_l, self.param.catchable_area_w),
        );
        if !outer.contains(ball_rel) || !rng.bernoulli(self.param.catch_probability) {
            self.flags.catch_fault = true;
            return;
        }
        self.catch_ban = self.param.catch_ban_cycle;

        let reliable = Rect::new(
            Vec2::new(self.param.reliable_catch_area_l * 0.5, 0.0),
            Vec2::new(self.param.reliable_catch_area_l, self.param.catchable_area_w),
        );
        let success = if reliable.contains(ball_rel) {
            true
        } else {
            let max_fail = 1.0 - self.param.min_catch_probability;
            let speed_rate = max_fail
                * 0.75
                * (ctx.ball_vel().norm()
                    / (self.param.ball_speed_max * self.param.ball_decay));
            let half_w = self.param.catchable_area_w * 0.5;
            let reliable_diag = self.param.reliable_catch_area_l.hypot(half_w);
            let outer_diag = self.param.catchable_area_l.hypot(half_w);
            let span = outer_diag - reliable_diag;
            let dist_rate = if span.abs() < 1.0e-10 {
                max_fail * 0.25
            } else {
                max_fail * 0.25 * (ball_rel.norm() - reliable_diag) / span
            };
            let fail_prob = bound(0.0, speed_rate + dist_rate, 1.0);
            !rng.bernoulli(fail_prob)
        };

        if success {
            let displacement = ctx.ball_pos() - self.pos;
            let radius =
                displacement.norm() - self.param.ball_size - self.player_type.player_size;
            let new_pos = self.pos + displacement.normalized_to(radius);
            self.place(new_pos);
            // Pending only; the committed angle updates at the boundary.
            self.body_pending = displacement.th();
            self.vel = Vec2::ZERO;
            self.moves_since_catch = 0;
            ctx.ball_caught(self.side, self.unum);
            debug!(unum = self.unum, "ball caught");
        }
        self.counters.catch += 1;
        self.command_done = true;
    }

    /// Free repositioning. Coordinates are given in the agent's own frame
    /// and mirrored for the right team. Outside the allowed modes the
    /// command is silently dropped; a catching goalie over its move budget
    /// gets an explicit error instead.
    pub fn move_to(&mut self, x: f64, y: f64, ctx: &mut dyn MatchContext) {
        if self.command_done {
            return;
        }
        let mode = ctx.play_mode();
        let target = Vec2::new(x * self.side.factor(), y * self.side.factor());
        if mode.allows_free_move() {
            self.place(target);
            ctx.resolve_collisions();
        } else if mode.is_free_kick() && ctx.is_ball_catcher(self.side, self.unum) {
            if self.param.goalie_max_moves < 0
                || self.moves_since_catch < self.param.goalie_max_moves
            {
                self.place(target);
                self.moves_since_catch += 1;
            } else {
                self.queue_message("(error too_many_moves)".to_string());
            }
        } else {
            return;
        }
        self.counters.move_to += 1;
        self.command_done = true;
    }

    /// Broadcast a message. Not a primary command; oversized messages are
    /// dropped without reply.
    pub fn say(&mut self, message: &str, ctx: &mut dyn MatchContext) {
        if message.len() > self.param.say_msg_size {
            return;
        }
        ctx.broadcast_audio(self.side, self.unum, message);
        self.counters.say += 1;
    }

    /// Point the arm at a spot given by distance and a head-relative
    /// direction, or lower it. Ignored while the arm is banned.
    pub fn point_to(&mut self, on: bool, dist: f64, head_deg: f64) {
        let target = if on {
            Some(
                self.pos
                    + Vec2::from_polar(
                        dist,
                        self.body_committed + self.neck_committed + deg_to_rad(head_deg),
                    ),
            )
        } else {
            None
        };
        self.arm.point_to(&self.param, target);
    }

    /// Set or clear the perceptual focus target. Unknown teams, disabled
    /// teams, out-of-roster numbers and self-targets are all rejected
    /// without state change.
    pub fn attention_to(
        &mut self,
        on: bool,
        selector: &TeamSelector,
        at_unum: u8,
        ctx: &dyn MatchContext,
    ) {
        if !on {
            self.focus = None;
            self.counters.attention_to += 1;
            return;
        }
        let side = match ctx.resolve_team(self.side, selector) {
            Some(side) => side,
            None => return,
        };
        if !ctx.team_enabled(side) {
            return;
        }
        if at_unum < 1 || at_unum as usize > ctx.team_size(side) {
            return;
        }
        if side == self.side && at_unum == self.unum {
            return;
        }
        self.focus = Some((side, at_unum));
        self.counters.attention_to += 1;
    }

    /// Select view width and quality. Low quality trades detail for a
    /// faster visual stream and is unavailable in synchronized vision.
    /// Returns false when the combination is rejected.
    pub fn change_view(&mut self, width: ViewWidth, quality: ViewQuality) -> bool {
        if self.synch_see && quality == ViewQuality::Low {
            return false;
        }
        self.view_width = width;
        self.view_quality = quality;
        self.recompute_view();
        self.counters.change_view += 1;
        true
    }

    /// Switch to synchronized vision. Quality is forced high and the
    /// angle/period table changes for all width tiers.
    pub fn synch_see(&mut self) {
        self.synch_see = true;
        self.view_quality = ViewQuality::High;
        self.recompute_view();
        self.queue_message("(ok synch_see)".to_string());
    }

    fn recompute_view(&mut self) {
        let default_angle = deg_to_rad(self.param.visible_angle);
        if self.synch_see {
            let (scale, period) = match self.view_width {
                ViewWidth::Narrow => (2.0 / 3.0, 1),
                ViewWidth::Normal => (4.0 / 3.0, 2),
                ViewWidth::Wide => (2.0, 3),
            };
            self.visible_angle = default_angle * scale;
            self.visual_send_period = period;
        } else {
            let (scale, period) = match self.view_width {
                ViewWidth::Narrow => (0.5, 2),
                ViewWidth::Normal => (1.0, 4),
                ViewWidth::Wide => (2.0, 8),
            };
            self.visible_angle = default_angle * scale;
            self.visual_send_period = if self.view_quality == ViewQuality::Low {
                period / 2
            } else {
                period
            };
        }
    }

    /// Choose which message forms of one team to hear. An unknown team
    /// name is reported on the wire.
    pub fn set_ear(&mut self, on: bool, selector: &TeamSelector, mode: EarMode, ctx: &dyn MatchContext) {
        let side = match ctx.resolve_team(self.side, selector) {
            Some(side) => side,
            None => {
                if let TeamSelector::Named(name) = selector {
                    self.queue_message(format!("(error no team with name {})", name));
                }
                return;
            }
        };
        let teammate = side == self.side;
        if mode == EarMode::Complete || mode == EarMode::All {
            if teammate {
                self.ear.teammate_complete = on;
            } else {
                self.ear.opponent_complete = on;
            }
        }
        if mode == EarMode::Partial || mode == EarMode::All {
            if teammate {
                self.ear.teammate_partial = on;
            } else {
                self.ear.opponent_partial = on;
            }
        }
    }

    /// Synchronized-mode barrier signal.
    pub fn done(&mut self) {
        self.done_received = true;
    }

    /// Explicit disconnect. Releases catch ownership before disabling.
    pub fn bye(&mut self, ctx: &mut dyn MatchContext) {
        if ctx.is_ball_catcher(self.side, self.unum) {
            ctx.clear_ball_catcher();
        }
        self.disable();
    }
}
