//! Wire format for protocol versions 13 and 14.
//!
//! Visible objects switch to egocentric distance and direction, the
//! kicked-state marker appears alongside (and mutually exclusive with) the
//! tackling marker, and stamina tuples carry the capacity figure.
//! Fragments that did not change delegate to the version 8 renderer.

use std::fmt::Write as _;

use super::stdv8::SerializerStdv8;
use super::{write_num, ObjectView, PlayerView, Serializer};
use crate::play_mode::PlayMode;

pub struct SerializerStdv13 {
    prev: SerializerStdv8,
}

impl SerializerStdv13 {
    pub const fn new(prev: SerializerStdv8) -> Self {
        SerializerStdv13 { prev }
    }

    /// Tackling wins over kicked; the two are never shown together.
    fn state_marker(out: &mut String, view: &PlayerView) {
        if view.tackling {
            out.push_str(" t");
        } else if view.kicked {
            out.push_str(" k");
        }
    }
}

impl Serializer for SerializerStdv13 {
    fn visual_object(&self, out: &mut String, name: &str, view: &ObjectView) {
        out.push_str(" (");
        out.push_str(name);
        out.push(' ');
        write_num(out, view.dist);
        let _ = write!(out, " {}", view.dir);
        out.push(')');
    }

    fn visual_player(&self, out: &mut String, name: &str, view: &PlayerView) {
        out.push_str(" (");
        out.push_str(name);
        out.push(' ');
        write_num(out, view.dist);
        let _ = write!(out, " {}", view.dir);
        if let Some(point_dir) = view.point_dir {
            let _ = write!(out, " {}", point_dir);
        }
        Self::state_marker(out, view);
        out.push(')');
    }

    fn body_stamina(&self, out: &mut String, stamina: f64, effort: f64, capacity: f64) {
        out.push_str(" (stamina ");
        write_num(out, stamina);
        out.push(' ');
        write_num(out, effort);
        out.push(' ');
        write_num(out, capacity);
        out.push(')');
    }

    fn fullstate_stamina(
        &self,
        out: &mut String,
        stamina: f64,
        effort: f64,
        recovery: f64,
        capacity: f64,
    ) {
        out.push_str(" (stamina ");
        write_num(out, stamina);
        out.push(' ');
        write_num(out, effort);
        out.push(' ');
        write_num(out, recovery);
        out.push(' ');
        write_num(out, capacity);
        out.push(')');
    }

    fn fullstate_player_state(&self, out: &mut String, view: &PlayerView) {
        Self::state_marker(out, view);
    }

    fn init_reply(&self, out: &mut String, side: char, unum: u8, mode: PlayMode) {
        self.prev.init_reply(out, side, unum, mode);
    }
}
