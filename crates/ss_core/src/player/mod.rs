//! Player agent data model and lifecycle.
//!
//! A `Player` is created once per roster slot and lives for the whole
//! match. The protocol handshake enables it and caches the version-matched
//! sender set; disconnect disables it without destroying the entity. All
//! per-cycle action methods live in [`actions`], the stamina and hearing
//! bookkeeping in [`resource`].

mod actions;
mod resource;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::Side;
use crate::geom::Vec2;
use crate::param::{ServerParam, PITCH_LENGTH, PITCH_WIDTH};
use crate::play_mode::PlayMode;
use crate::player_type::PlayerType;
use crate::sender::SenderSet;
use crate::Result;

/// Exclusive motion state. Everything else about the agent's condition is
/// an independent flag in [`StatusFlags`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryState {
    Disabled,
    Standing,
}

/// Per-cycle condition markers. Kicking and tackling survive into the
/// serializers; the collision trio is cleared by the integration pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    pub kicking: bool,
    pub kick_fault: bool,
    pub tackling: bool,
    pub tackle_fault: bool,
    pub catching: bool,
    pub catch_fault: bool,
    pub ball_collide: bool,
    pub player_collide: bool,
    pub post_collide: bool,
    pub discarded: bool,
}

/// View width tier of the visual sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewWidth {
    Narrow,
    Normal,
    Wide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewQuality {
    Low,
    High,
}

impl ViewQuality {
    pub fn wire_name(&self) -> &'static str {
        match self {
            ViewQuality::Low => "low",
            ViewQuality::High => "high",
        }
    }
}

impl ViewWidth {
    pub fn wire_name(&self) -> &'static str {
        match self {
            ViewWidth::Narrow => "narrow",
            ViewWidth::Normal => "normal",
            ViewWidth::Wide => "wide",
        }
    }
}

/// Which messages of one sender class the agent wants delivered.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EarSettings {
    pub teammate_complete: bool,
    pub teammate_partial: bool,
    pub opponent_complete: bool,
    pub opponent_partial: bool,
}

impl Default for EarSettings {
    fn default() -> Self {
        EarSettings {
            teammate_complete: true,
            teammate_partial: true,
            opponent_complete: true,
            opponent_partial: true,
        }
    }
}

/// Which message form a set_ear command toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EarMode {
    Complete,
    Partial,
    All,
}

/// Arm pointing state. A point gesture locks the arm for `point_to_ban`
/// cycles and stays visible for `point_to_duration` cycles.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Arm {
    pub ban_remaining: u32,
    pub duration_remaining: u32,
    pub target: Option<Vec2>,
    pub count: u32,
}

impl Arm {
    /// Returns false while the arm is still locked from the last gesture.
    pub fn point_to(&mut self, param: &ServerParam, target: Option<Vec2>) -> bool {
        if self.ban_remaining > 0 {
            return false;
        }
        self.target = target;
        self.duration_remaining = if target.is_some() {
            param.point_to_duration
        } else {
            0
        };
        self.ban_remaining = param.point_to_ban;
        self.count += 1;
        true
    }

    pub fn is_pointing(&self) -> bool {
        self.target.is_some()
    }

    pub(crate) fn tick(&mut self) {
        if self.ban_remaining > 0 {
            self.ban_remaining -= 1;
        }
        if self.duration_remaining > 0 {
            self.duration_remaining -= 1;
            if self.duration_remaining == 0 {
                self.target = None;
            }
        }
    }
}

/// Per-command counters reported in sense_body. Arm gestures are counted
/// on [`Arm`] directly.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct CommandCounters {
    pub kick: u32,
    pub dash: u32,
    pub turn: u32,
    pub catch: u32,
    pub move_to: u32,
    pub turn_neck: u32,
    pub change_view: u32,
    pub say: u32,
    pub tackle: u32,
    pub attention_to: u32,
}

pub struct Player {
    // Identity, immutable after creation
    side: Side,
    unum: u8,
    goalie: bool,

    pub(crate) state: PrimaryState,
    pub flags: StatusFlags,

    // Kinematics
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    body_pending: f64,
    body_committed: f64,
    neck_pending: f64,
    neck_committed: f64,

    // Resources
    pub stamina: f64,
    pub recovery: f64,
    pub effort: f64,
    pub consumed_stamina: f64,

    // Perception
    pub visible_angle: f64,
    pub view_width: ViewWidth,
    pub view_quality: ViewQuality,
    pub synch_see: bool,
    pub visual_send_period: u32,
    pub hear_capacity_from_teammate: i32,
    pub hear_capacity_from_opponent: i32,
    pub ear: EarSettings,

    // Command cycle
    pub(crate) command_done: bool,
    pub(crate) turn_neck_done: bool,
    pub(crate) done_received: bool,
    pub tackle_cycles: u32,

    // Goalie
    pub catch_ban: u32,
    pub moves_since_catch: i32,

    pub arm: Arm,
    pub focus: Option<(Side, u8)>,
    offside_mark: Option<Vec2>,

    pub counters: CommandCounters,

    param: Arc<ServerParam>,
    player_type: PlayerType,

    sender: Option<SenderSet>,
    out_queue: Vec<String>,
}

impl Player {
    pub fn new(side: Side, unum: u8, param: Arc<ServerParam>, player_type: PlayerType) -> Self {
        let visible_angle = crate::geom::deg_to_rad(param.visible_angle);
        let mut player = Player {
            side,
            unum,
            goalie: false,
            state: PrimaryState::Disabled,
            flags: StatusFlags::default(),
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            body_pending: side.direction(),
            body_committed: side.direction(),
            neck_pending: 0.0,
            neck_committed: 0.0,
            stamina: param.stamina_max,
            recovery: param.recover_init,
            effort: param.effort_init,
            consumed_stamina: 0.0,
            visible_angle,
            view_width: ViewWidth::Normal,
            view_quality: ViewQuality::High,
            synch_see: false,
            visual_send_period: 4,
            hear_capacity_from_teammate: param.hear_max,
            hear_capacity_from_opponent: param.hear_max,
            ear: EarSettings::default(),
            command_done: false,
            turn_neck_done: false,
            done_received: false,
            tackle_cycles: 0,
            catch_ban: 0,
            moves_since_catch: 0,
            arm: Arm::default(),
            focus: None,
            offside_mark: None,
            counters: CommandCounters::default(),
            param,
            player_type,
            sender: None,
            out_queue: Vec::new(),
        };
        player.move_off_pitch();
        player
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn unum(&self) -> u8 {
        self.unum
    }

    pub fn is_goalie(&self) -> bool {
        self.goalie
    }

    pub fn is_enabled(&self) -> bool {
        self.state == PrimaryState::Standing
    }

    pub fn is_tackling(&self) -> bool {
        self.tackle_cycles > 0
    }

    pub fn param(&self) -> &ServerParam {
        &self.param
    }

    pub fn player_type(&self) -> &PlayerType {
        &self.player_type
    }

    pub fn sender(&self) -> Option<&SenderSet> {
        self.sender.as_ref()
    }

    /// Orientation all physics of the current cycle is computed against.
    pub fn body_committed(&self) -> f64 {
        self.body_committed
    }

    pub fn neck_committed(&self) -> f64 {
        self.neck_committed
    }

    pub fn body_pending(&self) -> f64 {
        self.body_pending
    }

    pub fn neck_pending(&self) -> f64 {
        self.neck_pending
    }

    pub fn offside_mark(&self) -> Option<Vec2> {
        self.offside_mark
    }

    /// Protocol handshake. Resolves the version into a cached sender set
    /// and enables the agent; an unsupported version disables it instead.
    pub fn init(&mut self, version: f64, goalie: bool, mode: PlayMode) -> Result<()> {
        let sender = match SenderSet::resolve(version) {
            Ok(sender) => sender,
            Err(err) => {
                self.disable();
                return Err(err);
            }
        };
        self.goalie = goalie;
        self.state = PrimaryState::Standing;
        self.catch_ban = 0;
        self.moves_since_catch = 0;
        let reply = sender.render_init_reply(self.side, self.unum, mode);
        self.sender = Some(sender);
        self.queue_message(reply);
        info!(
            side = %self.side.letter(),
            unum = self.unum,
            version = sender.version().as_u8(),
            goalie,
            "player connected"
        );
        Ok(())
    }

    /// Disconnect. The entity survives and can be re-enabled by a new
    /// handshake. Callers that track ball ownership must release it.
    pub fn disable(&mut self) {
        if self.state == PrimaryState::Standing {
            info!(
                side = %self.side.letter(),
                unum = self.unum,
                "player disconnected"
            );
        }
        self.state = PrimaryState::Disabled;
        self.sender = None;
        self.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
        self.move_off_pitch();
    }

    /// Remove from or return to active play without destroying the agent.
    pub fn set_discarded(&mut self, discarded: bool) {
        self.flags.discarded = discarded;
    }

    /// Teleport used by free repositioning and the catch model.
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    #[cfg(test)]
    pub(crate) fn set_body_angle(&mut self, angle: f64) {
        let angle = crate::geom::normalize_angle(angle);
        self.body_pending = angle;
        self.body_committed = angle;
    }

    fn move_off_pitch(&mut self) {
        self.pos = Vec2::new(-(PITCH_LENGTH / 2.0 + 3.0), -(PITCH_WIDTH / 2.0 + 3.0));
    }

    /// Cycle-boundary integration of the pending orientations.
    pub fn commit_angles(&mut self) {
        self.body_committed = self.body_pending;
        self.neck_committed = self.neck_pending;
    }

    pub fn set_offside_mark(&mut self, line_x: f64) {
        self.offside_mark = Some(Vec2::new(line_x, self.pos.y));
    }

    pub fn clear_offside_mark(&mut self) {
        self.offside_mark = None;
    }

    pub fn done_received(&self) -> bool {
        self.done_received
    }

    pub(crate) fn queue_message(&mut self, text: String) {
        self.out_queue.push(text);
    }

    /// Drain the messages queued during this cycle for the output pass.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.out_queue)
    }

    /// Inbound text without its NUL terminator is tolerated but warned
    /// about on the wire.
    pub fn note_missing_terminator(&mut self) {
        tracing::warn!(
            side = %self.side.letter(),
            unum = self.unum,
            "message not null terminated"
        );
        self.queue_message("(warning message_not_null_terminated)".to_string());
    }

    /// Reply for text the parser could not make sense of. No state change.
    pub fn note_illegal_command(&mut self) {
        tracing::warn!(
            side = %self.side.letter(),
            unum = self.unum,
            "illegal command form"
        );
        self.queue_message("(error illegal_command_form)".to_string());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Standing player with the default body, enabled at version 13.
    pub fn standing_player(side: Side, unum: u8) -> Player {
        let param = Arc::new(ServerParam::default());
        let ptype = PlayerType::default_type(&param);
        let mut player = Player::new(side, unum, param, ptype);
        player
            .init(13.0, false, PlayMode::BeforeKickOff)
            .expect("version 13 is supported");
        player.take_messages();
        player.place(Vec2::ZERO);
        player.set_body_angle(0.0);
        player
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::standing_player;
    use super::*;

    #[test]
    fn test_new_player_is_disabled_off_pitch() {
        let param = Arc::new(ServerParam::default());
        let ptype = PlayerType::default_type(&param);
        let player = Player::new(Side::Left, 1, param, ptype);
        assert!(!player.is_enabled());
        assert!(player.pos.x < -PITCH_LENGTH / 2.0);
        assert!(player.pos.y < -PITCH_WIDTH / 2.0);
    }

    #[test]
    fn test_init_enables_and_queues_reply() {
        let param = Arc::new(ServerParam::default());
        let ptype = PlayerType::default_type(&param);
        let mut player = Player::new(Side::Right, 5, param, ptype);
        player.init(13.0, true, PlayMode::BeforeKickOff).unwrap();
        assert!(player.is_enabled());
        assert!(player.is_goalie());
        assert_eq!(player.take_messages(), vec!["(init r 5 before_kick_off)"]);
    }

    #[test]
    fn test_init_unsupported_version_disables() {
        let param = Arc::new(ServerParam::default());
        let ptype = PlayerType::default_type(&param);
        let mut player = Player::new(Side::Left, 2, param, ptype);
        assert!(player.init(7.0, false, PlayMode::BeforeKickOff).is_err());
        assert!(!player.is_enabled());
        assert!(player.sender().is_none());
    }

    #[test]
    fn test_reinit_resets_goalie_counters() {
        let mut player = standing_player(Side::Left, 1);
        player.catch_ban = 3;
        player.moves_since_catch = 2;
        player.disable();
        player.init(8.0, true, PlayMode::BeforeKickOff).unwrap();
        assert_eq!(player.catch_ban, 0);
        assert_eq!(player.moves_since_catch, 0);
    }

    #[test]
    fn test_disable_zeroes_motion() {
        let mut player = standing_player(Side::Left, 3);
        player.vel = Vec2::new(0.5, 0.5);
        player.disable();
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(!player.is_enabled());
    }

    #[test]
    fn test_commit_angles_at_cycle_boundary() {
        let mut player = standing_player(Side::Left, 4);
        player.body_pending = 1.0;
        player.neck_pending = 0.5;
        assert_eq!(player.body_committed(), 0.0);
        player.commit_angles();
        assert_eq!(player.body_committed(), 1.0);
        assert_eq!(player.neck_committed(), 0.5);
    }

    #[test]
    fn test_arm_ban_and_duration() {
        let param = ServerParam::default();
        let mut arm = Arm::default();
        assert!(arm.point_to(&param, Some(Vec2::new(10.0, 0.0))));
        assert!(arm.is_pointing());
        assert_eq!(arm.count, 1);
        // Locked for point_to_ban cycles.
        assert!(!arm.point_to(&param, None));
        for _ in 0..param.point_to_ban {
            arm.tick();
        }
        assert_eq!(arm.ban_remaining, 0);
        // Gesture expires after point_to_duration cycles.
        for _ in 0..param.point_to_duration {
            arm.tick();
        }
        assert!(!arm.is_pointing());
    }

    #[test]
    fn test_offside_mark_tracks_line() {
        let mut player = standing_player(Side::Left, 6);
        player.place(Vec2::new(10.0, -5.0));
        player.set_offside_mark(20.0);
        assert_eq!(player.offside_mark(), Some(Vec2::new(20.0, -5.0)));
        player.clear_offside_mark();
        assert_eq!(player.offside_mark(), None);
    }
}
