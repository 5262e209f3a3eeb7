//! Version-matched sender pipeline.
//!
//! Resolved once at handshake time and cached on the agent, a `SenderSet`
//! pairs the protocol version tag with its serializer singleton and builds
//! the outbound message bodies from a player snapshot.

use std::fmt;
use std::fmt::Write as _;

use crate::context::Side;
use crate::error::CommandError;
use crate::geom::{normalize_angle, rad_to_deg};
use crate::play_mode::PlayMode;
use crate::player::Player;
use crate::serializer::{serializer_for, write_num, ProtocolVersion, Serializer};
use crate::Result;

#[derive(Clone, Copy)]
pub struct SenderSet {
    version: ProtocolVersion,
    serializer: &'static dyn Serializer,
}

impl fmt::Debug for SenderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderSet")
            .field("version", &self.version)
            .finish()
    }
}

impl SenderSet {
    /// Resolve the version a client asked for during the handshake. An
    /// unsupported version is a configuration error fatal to that
    /// connection.
    pub fn resolve(version: f64) -> Result<Self> {
        let tag = ProtocolVersion::from_negotiated(version)
            .ok_or(CommandError::Configuration { version })?;
        Ok(SenderSet {
            version: tag,
            serializer: serializer_for(tag),
        })
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn serializer(&self) -> &'static dyn Serializer {
        self.serializer
    }

    pub fn render_init_reply(&self, side: Side, unum: u8, mode: PlayMode) -> String {
        let mut out = String::new();
        self.serializer.init_reply(&mut out, side.letter(), unum, mode);
        out
    }

    /// The per-cycle proprioception message. Block layout is fixed from
    /// version 8 on; the stamina tuple and the collision block are gated
    /// by the negotiated version.
    pub fn render_sense_body(&self, time: u32, player: &Player) -> String {
        let mut out = String::new();
        let _ = write!(out, "(sense_body {}", time);
        let _ = write!(
            out,
            " (view_mode {} {})",
            player.view_quality.wire_name(),
            player.view_width.wire_name()
        );
        self.serializer.body_stamina(
            &mut out,
            player.stamina,
            player.effort,
            player.stamina_capacity(),
        );

        let speed = player.vel.norm();
        let speed_dir = if speed < 1.0e-10 {
            0
        } else {
            rad_to_deg(normalize_angle(
                player.vel.th() - player.body_committed() - player.neck_committed(),
            ))
            .round() as i32
        };
        out.push_str(" (speed ");
        write_num(&mut out, speed);
        let _ = write!(out, " {})", speed_dir);
        let _ = write!(
            out,
            " (head_angle {})",
            rad_to_deg(player.neck_committed()).round() as i32
        );

        let counters = &player.counters;
        let _ = write!(
            out,
            " (kick {}) (dash {}) (turn {}) (say {}) (turn_neck {}) (catch {}) (move {}) (change_view {})",
            counters.kick,
            counters.dash,
            counters.turn,
            counters.say,
            counters.turn_neck,
            counters.catch,
            counters.move_to,
            counters.change_view,
        );

        let _ = write!(
            out,
            " (arm (movable {}) (expires {})",
            player.arm.ban_remaining, player.arm.duration_remaining
        );
        if let Some(target) = player.arm.target {
            let rel = target - player.pos;
            let dir = rad_to_deg(normalize_angle(
                rel.th() - player.body_committed() - player.neck_committed(),
            ))
            .round() as i32;
            out.push_str(" (target ");
            write_num(&mut out, rel.norm());
            let _ = write!(out, " {})", dir);
        }
        let _ = write!(out, " (count {}))", player.arm.count);

        match player.focus {
            Some((side, unum)) => {
                let _ = write!(
                    out,
                    " (focus (target {} {}) (count {}))",
                    side.letter(),
                    unum,
                    counters.attention_to
                );
            }
            None => {
                let _ = write!(out, " (focus (target none) (count {}))", counters.attention_to);
            }
        }
        let _ = write!(
            out,
            " (tackle (expires {}) (count {}))",
            player.tackle_cycles, counters.tackle
        );

        if self.version.collision_block_in_body() {
            let flags = &player.flags;
            if flags.ball_collide || flags.player_collide || flags.post_collide {
                out.push_str(" (collision");
                if flags.ball_collide {
                    out.push_str(" (ball)");
                }
                if flags.player_collide {
                    out.push_str(" (player)");
                }
                if flags.post_collide {
                    out.push_str(" (post)");
                }
                out.push(')');
            } else {
                out.push_str(" (collision none)");
            }
        }
        out.push(')');
        out
    }

    /// Stamina fragment of a fullstate line for this player.
    pub fn render_fullstate_stamina(&self, player: &Player) -> String {
        let mut out = String::new();
        self.serializer.fullstate_stamina(
            &mut out,
            player.stamina,
            player.effort,
            player.recovery,
            player.stamina_capacity(),
        );
        out
    }
}
