//! Play modes published by the referee engine.
//!
//! The action executor only consults the predicates below; the rule engine
//! that drives mode transitions lives outside this crate.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    BeforeKickOff,
    TimeOver,
    PlayOn,
    KickOffLeft,
    KickOffRight,
    KickInLeft,
    KickInRight,
    FreeKickLeft,
    FreeKickRight,
    CornerKickLeft,
    CornerKickRight,
    GoalKickLeft,
    GoalKickRight,
    AfterGoalLeft,
    AfterGoalRight,
    OffsideLeft,
    OffsideRight,
    BackPassLeft,
    BackPassRight,
    FreeKickFaultLeft,
    FreeKickFaultRight,
    CatchFaultLeft,
    CatchFaultRight,
    IndFreeKickLeft,
    IndFreeKickRight,
    PenaltySetupLeft,
    PenaltySetupRight,
    PenaltyReadyLeft,
    PenaltyReadyRight,
    PenaltyTakenLeft,
    PenaltyTakenRight,
    PenaltyMissLeft,
    PenaltyMissRight,
    PenaltyScoreLeft,
    PenaltyScoreRight,
}

impl PlayMode {
    /// Dead-ball restarts during which a kick command is silently dropped.
    pub fn kick_banned(&self) -> bool {
        matches!(
            self,
            PlayMode::BeforeKickOff
                | PlayMode::AfterGoalLeft
                | PlayMode::AfterGoalRight
                | PlayMode::OffsideLeft
                | PlayMode::OffsideRight
                | PlayMode::BackPassLeft
                | PlayMode::BackPassRight
                | PlayMode::FreeKickFaultLeft
                | PlayMode::FreeKickFaultRight
                | PlayMode::CatchFaultLeft
                | PlayMode::CatchFaultRight
                | PlayMode::TimeOver
        )
    }

    /// Modes where a successful tackle applies no force to the ball.
    /// Same list as the kick ban except for the catch-fault restarts.
    pub fn tackle_force_banned(&self) -> bool {
        matches!(
            self,
            PlayMode::BeforeKickOff
                | PlayMode::AfterGoalLeft
                | PlayMode::AfterGoalRight
                | PlayMode::OffsideLeft
                | PlayMode::OffsideRight
                | PlayMode::BackPassLeft
                | PlayMode::BackPassRight
                | PlayMode::FreeKickFaultLeft
                | PlayMode::FreeKickFaultRight
                | PlayMode::TimeOver
        )
    }

    pub fn is_penalty_shootout(&self) -> bool {
        matches!(
            self,
            PlayMode::PenaltySetupLeft
                | PlayMode::PenaltySetupRight
                | PlayMode::PenaltyReadyLeft
                | PlayMode::PenaltyReadyRight
                | PlayMode::PenaltyTakenLeft
                | PlayMode::PenaltyTakenRight
                | PlayMode::PenaltyMissLeft
                | PlayMode::PenaltyMissRight
                | PlayMode::PenaltyScoreLeft
                | PlayMode::PenaltyScoreRight
        )
    }

    /// Modes with free repositioning via the move command.
    pub fn allows_free_move(&self) -> bool {
        matches!(
            self,
            PlayMode::BeforeKickOff | PlayMode::AfterGoalLeft | PlayMode::AfterGoalRight
        )
    }

    pub fn is_free_kick(&self) -> bool {
        matches!(self, PlayMode::FreeKickLeft | PlayMode::FreeKickRight)
    }

    /// Token used for this mode on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            PlayMode::BeforeKickOff => "before_kick_off",
            PlayMode::TimeOver => "time_over",
            PlayMode::PlayOn => "play_on",
            PlayMode::KickOffLeft => "kick_off_l",
            PlayMode::KickOffRight => "kick_off_r",
            PlayMode::KickInLeft => "kick_in_l",
            PlayMode::KickInRight => "kick_in_r",
            PlayMode::FreeKickLeft => "free_kick_l",
            PlayMode::FreeKickRight => "free_kick_r",
            PlayMode::CornerKickLeft => "corner_kick_l",
            PlayMode::CornerKickRight => "corner_kick_r",
            PlayMode::GoalKickLeft => "goal_kick_l",
            PlayMode::GoalKickRight => "goal_kick_r",
            PlayMode::AfterGoalLeft => "goal_l",
            PlayMode::AfterGoalRight => "goal_r",
            PlayMode::OffsideLeft => "offside_l",
            PlayMode::OffsideRight => "offside_r",
            PlayMode::BackPassLeft => "back_pass_l",
            PlayMode::BackPassRight => "back_pass_r",
            PlayMode::FreeKickFaultLeft => "free_kick_fault_l",
            PlayMode::FreeKickFaultRight => "free_kick_fault_r",
            PlayMode::CatchFaultLeft => "catch_fault_l",
            PlayMode::CatchFaultRight => "catch_fault_r",
            PlayMode::IndFreeKickLeft => "indirect_free_kick_l",
            PlayMode::IndFreeKickRight => "indirect_free_kick_r",
            PlayMode::PenaltySetupLeft => "penalty_setup_l",
            PlayMode::PenaltySetupRight => "penalty_setup_r",
            PlayMode::PenaltyReadyLeft => "penalty_ready_l",
            PlayMode::PenaltyReadyRight => "penalty_ready_r",
            PlayMode::PenaltyTakenLeft => "penalty_taken_l",
            PlayMode::PenaltyTakenRight => "penalty_taken_r",
            PlayMode::PenaltyMissLeft => "penalty_miss_l",
            PlayMode::PenaltyMissRight => "penalty_miss_r",
            PlayMode::PenaltyScoreLeft => "penalty_score_l",
            PlayMode::PenaltyScoreRight => "penalty_score_r",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_banned_modes() {
        assert!(PlayMode::BeforeKickOff.kick_banned());
        assert!(PlayMode::CatchFaultLeft.kick_banned());
        assert!(!PlayMode::PlayOn.kick_banned());
        assert!(!PlayMode::FreeKickLeft.kick_banned());
    }

    #[test]
    fn test_penalty_shootout_covers_all_phases() {
        assert!(PlayMode::PenaltyTakenRight.is_penalty_shootout());
        assert!(PlayMode::PenaltySetupLeft.is_penalty_shootout());
        assert!(!PlayMode::PlayOn.is_penalty_shootout());
    }

    #[test]
    fn test_free_move_modes() {
        assert!(PlayMode::AfterGoalRight.allows_free_move());
        assert!(!PlayMode::FreeKickLeft.allows_free_move());
        assert!(PlayMode::FreeKickRight.is_free_kick());
    }
}
