//! Version-indexed wire serializers.
//!
//! Every connected client negotiates a protocol version at handshake time.
//! The version is resolved once into [`ProtocolVersion`] and dispatch is a
//! total match from then on. Serializers are immutable singletons; their
//! methods are pure functions of the state snapshot they are given.
//!
//! Backward compatibility contract: a version never changes the meaning of
//! a token shared with its predecessor, it only appends optional tokens.
//! Clients built against version N can therefore parse the common prefix
//! of version N+1 output.

mod stdv8;
mod stdv13;

pub use stdv8::SerializerStdv8;
pub use stdv13::SerializerStdv13;

use std::fmt::Write as _;

use crate::geom::Vec2;
use crate::play_mode::PlayMode;

/// Supported wire protocol revisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    V8,
    V9,
    V10,
    V11,
    V12,
    V13,
    V14,
}

impl ProtocolVersion {
    /// Resolve the version number a client sent in its init command.
    pub fn from_negotiated(version: f64) -> Option<Self> {
        match version.floor() as i64 {
            8 => Some(ProtocolVersion::V8),
            9 => Some(ProtocolVersion::V9),
            10 => Some(ProtocolVersion::V10),
            11 => Some(ProtocolVersion::V11),
            12 => Some(ProtocolVersion::V12),
            13 => Some(ProtocolVersion::V13),
            14 => Some(ProtocolVersion::V14),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            ProtocolVersion::V8 => 8,
            ProtocolVersion::V9 => 9,
            ProtocolVersion::V10 => 10,
            ProtocolVersion::V11 => 11,
            ProtocolVersion::V12 => 12,
            ProtocolVersion::V13 => 13,
            ProtocolVersion::V14 => 14,
        }
    }

    /// Tackle force parameterized by angle instead of raw power.
    pub fn tackle_angle_model(&self) -> bool {
        *self >= ProtocolVersion::V12
    }

    /// The kicked-state marker is exposed alongside the tackling marker.
    pub fn supports_kicked_marker(&self) -> bool {
        *self >= ProtocolVersion::V13
    }

    /// Stamina capacity figure appears in body/fullstate stamina tuples.
    pub fn stamina_capacity_on_wire(&self) -> bool {
        *self >= ProtocolVersion::V13
    }

    /// Collision block appears in sense_body.
    pub fn collision_block_in_body(&self) -> bool {
        *self >= ProtocolVersion::V12
    }
}

/// Snapshot of a visible non-player object (the ball, markers).
#[derive(Clone, Copy, Debug)]
pub struct ObjectView {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Egocentric distance, already quantized by the perception layer.
    pub dist: f64,
    /// Egocentric direction in degrees, already quantized.
    pub dir: i32,
}

/// Snapshot of a visible player.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub body_dir: i32,
    pub neck_dir: i32,
    pub dist: f64,
    pub dir: i32,
    /// Absolute arm direction in degrees while the player is pointing.
    pub point_dir: Option<i32>,
    pub tackling: bool,
    pub kicked: bool,
}

/// Capability interface shared by all protocol versions. Each method
/// appends one wire fragment to `out`.
pub trait Serializer: Sync {
    fn visual_object(&self, out: &mut String, name: &str, view: &ObjectView);

    fn visual_player(&self, out: &mut String, name: &str, view: &PlayerView);

    /// Stamina tuple inside sense_body. Versions without the capacity
    /// field on the wire ignore `capacity`.
    fn body_stamina(&self, out: &mut String, stamina: f64, effort: f64, capacity: f64);

    fn fullstate_stamina(
        &self,
        out: &mut String,
        stamina: f64,
        effort: f64,
        recovery: f64,
        capacity: f64,
    );

    /// Trailing state marker of a fullstate player entry.
    fn fullstate_player_state(&self, out: &mut String, view: &PlayerView);

    fn init_reply(&self, out: &mut String, side: char, unum: u8, mode: PlayMode);
}

static STD_V8: SerializerStdv8 = SerializerStdv8;
static STD_V13: SerializerStdv13 = SerializerStdv13::new(SerializerStdv8);

/// Singleton lookup. Versions that did not change the wire format share
/// their predecessor's serializer.
pub fn serializer_for(version: ProtocolVersion) -> &'static dyn Serializer {
    match version {
        ProtocolVersion::V8
        | ProtocolVersion::V9
        | ProtocolVersion::V10
        | ProtocolVersion::V11
        | ProtocolVersion::V12 => &STD_V8,
        ProtocolVersion::V13 | ProtocolVersion::V14 => &STD_V13,
    }
}

/// Write a float the way the wire expects: at most two decimals, trailing
/// zeros trimmed.
pub(crate) fn write_num(out: &mut String, value: f64) {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        let _ = write!(out, "{}", rounded as i64);
    } else {
        let mut s = format!("{:.2}", rounded);
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        out.push_str(&s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_negotiated() {
        assert_eq!(ProtocolVersion::from_negotiated(8.0), Some(ProtocolVersion::V8));
        assert_eq!(ProtocolVersion::from_negotiated(13.0), Some(ProtocolVersion::V13));
        assert_eq!(ProtocolVersion::from_negotiated(14.9), Some(ProtocolVersion::V14));
        assert_eq!(ProtocolVersion::from_negotiated(7.0), None);
        assert_eq!(ProtocolVersion::from_negotiated(15.0), None);
    }

    #[test]
    fn test_version_gates() {
        assert!(!ProtocolVersion::V11.tackle_angle_model());
        assert!(ProtocolVersion::V12.tackle_angle_model());
        assert!(!ProtocolVersion::V12.supports_kicked_marker());
        assert!(ProtocolVersion::V13.supports_kicked_marker());
        assert!(ProtocolVersion::V14.stamina_capacity_on_wire());
    }

    #[test]
    fn test_version_serializer_mapping() {
        // Versions 8 through 12 share one wire format; 13 extends it.
        let mut v8 = String::new();
        serializer_for(ProtocolVersion::V8).body_stamina(&mut v8, 4000.0, 0.8, 7900.0);
        let mut v12 = String::new();
        serializer_for(ProtocolVersion::V12).body_stamina(&mut v12, 4000.0, 0.8, 7900.0);
        assert_eq!(v8, v12);
        let mut v13 = String::new();
        serializer_for(ProtocolVersion::V13).body_stamina(&mut v13, 4000.0, 0.8, 7900.0);
        assert_ne!(v8, v13);
        assert!(v13.contains("7900"));
    }

    #[test]
    fn test_write_num_trimming() {
        let mut s = String::new();
        write_num(&mut s, 30.0);
        assert_eq!(s, "30");
        s.clear();
        write_num(&mut s, 3.10);
        assert_eq!(s, "3.1");
        s.clear();
        write_num(&mut s, -0.25);
        assert_eq!(s, "-0.25");
        s.clear();
        write_num(&mut s, 1.234);
        assert_eq!(s, "1.23");
    }
}
