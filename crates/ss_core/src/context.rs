//! Interface to the surrounding match state.
//!
//! The action executor never touches the shared ball or other agents
//! directly. Kick and tackle forces, catch ownership and collision
//! resolution all go through this trait so the stadium can defer them to a
//! single integration pass and keep outcomes independent of command
//! arrival order.

use serde::{Deserialize, Serialize};

use crate::geom::Vec2;
use crate::play_mode::PlayMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Coordinate mirror factor. Left-team commands use pitch coordinates
    /// as-is, right-team commands are mirrored.
    pub fn factor(&self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Kick-off facing direction for this side.
    pub fn direction(&self) -> f64 {
        match self {
            Side::Left => 0.0,
            Side::Right => std::f64::consts::PI,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Side::Left => 'l',
            Side::Right => 'r',
        }
    }
}

/// Team reference as given in attentionto/ear commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TeamSelector {
    Our,
    Opponent,
    LeftSide,
    RightSide,
    Named(String),
}

pub trait MatchContext {
    fn time(&self) -> u32;
    fn play_mode(&self) -> PlayMode;

    fn ball_pos(&self) -> Vec2;
    fn ball_vel(&self) -> Vec2;

    /// Queue a kick or tackle force for the integration pass.
    fn kick_taken(&mut self, side: Side, unum: u8, accel: Vec2);
    /// Register a successful goalie catch.
    fn ball_caught(&mut self, side: Side, unum: u8);
    fn is_ball_catcher(&self, side: Side, unum: u8) -> bool;
    fn clear_ball_catcher(&mut self);
    /// Run the collision pass after a free repositioning.
    fn resolve_collisions(&mut self);

    /// Forward a say command to the audio broadcaster.
    fn broadcast_audio(&mut self, side: Side, unum: u8, message: &str);

    fn team_name(&self, side: Side) -> Option<String>;
    fn team_enabled(&self, side: Side) -> bool;
    fn team_size(&self, side: Side) -> usize;

    /// Raw in/out command text hook for the match logger.
    fn log_message(&mut self, _side: Side, _unum: u8, _text: &str, _outgoing: bool) {}

    /// Resolve a team selector to a pitch side, from the viewpoint of
    /// `own` side. Unknown team names resolve to `None`.
    fn resolve_team(&self, own: Side, selector: &TeamSelector) -> Option<Side> {
        match selector {
            TeamSelector::Our => Some(own),
            TeamSelector::Opponent => Some(own.opposite()),
            TeamSelector::LeftSide => Some(Side::Left),
            TeamSelector::RightSide => Some(Side::Right),
            TeamSelector::Named(name) => {
                if self.team_name(Side::Left).as_deref() == Some(name.as_str()) {
                    Some(Side::Left)
                } else if self.team_name(Side::Right).as_deref() == Some(name.as_str()) {
                    Some(Side::Right)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Recording stub used by the action executor tests.
    pub struct StubContext {
        pub time: u32,
        pub play_mode: PlayMode,
        pub ball_pos: Vec2,
        pub ball_vel: Vec2,
        pub catcher: Option<(Side, u8)>,
        pub kicks: Vec<(Side, u8, Vec2)>,
        pub catches: Vec<(Side, u8)>,
        pub audio: Vec<(Side, u8, String)>,
        pub collision_passes: usize,
        pub left_name: String,
        pub right_name: String,
        pub team_size: usize,
    }

    impl Default for StubContext {
        fn default() -> Self {
            StubContext {
                time: 0,
                play_mode: PlayMode::PlayOn,
                ball_pos: Vec2::ZERO,
                ball_vel: Vec2::ZERO,
                catcher: None,
                kicks: Vec::new(),
                catches: Vec::new(),
                audio: Vec::new(),
                collision_passes: 0,
                left_name: "left_team".to_string(),
                right_name: "right_team".to_string(),
                team_size: 11,
            }
        }
    }

    impl MatchContext for StubContext {
        fn time(&self) -> u32 {
            self.time
        }

        fn play_mode(&self) -> PlayMode {
            self.play_mode
        }

        fn ball_pos(&self) -> Vec2 {
            self.ball_pos
        }

        fn ball_vel(&self) -> Vec2 {
            self.ball_vel
        }

        fn kick_taken(&mut self, side: Side, unum: u8, accel: Vec2) {
            self.kicks.push((side, unum, accel));
        }

        fn ball_caught(&mut self, side: Side, unum: u8) {
            self.catcher = Some((side, unum));
            self.catches.push((side, unum));
        }

        fn is_ball_catcher(&self, side: Side, unum: u8) -> bool {
            self.catcher == Some((side, unum))
        }

        fn clear_ball_catcher(&mut self) {
            self.catcher = None;
        }

        fn resolve_collisions(&mut self) {
            self.collision_passes += 1;
        }

        fn broadcast_audio(&mut self, side: Side, unum: u8, message: &str) {
            self.audio.push((side, unum, message.to_string()));
        }

        fn team_name(&self, side: Side) -> Option<String> {
            match side {
                Side::Left => Some(self.left_name.clone()),
                Side::Right => Some(self.right_name.clone()),
            }
        }

        fn team_enabled(&self, _side: Side) -> bool {
            true
        }

        fn team_size(&self, _side: Side) -> usize {
            self.team_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::StubContext;
    use super::*;

    #[test]
    fn test_side_factor_and_opposite() {
        assert_eq!(Side::Left.factor(), 1.0);
        assert_eq!(Side::Right.factor(), -1.0);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.letter(), 'r');
    }

    #[test]
    fn test_resolve_team_selectors() {
        let ctx = StubContext::default();
        assert_eq!(ctx.resolve_team(Side::Right, &TeamSelector::Our), Some(Side::Right));
        assert_eq!(ctx.resolve_team(Side::Right, &TeamSelector::Opponent), Some(Side::Left));
        assert_eq!(ctx.resolve_team(Side::Left, &TeamSelector::LeftSide), Some(Side::Left));
        assert_eq!(
            ctx.resolve_team(Side::Left, &TeamSelector::Named("right_team".into())),
            Some(Side::Right)
        );
        assert_eq!(
            ctx.resolve_team(Side::Left, &TeamSelector::Named("nobody".into())),
            None
        );
    }
}
