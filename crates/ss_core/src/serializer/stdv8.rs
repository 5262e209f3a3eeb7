//! Wire format for protocol versions 8 through 12.
//!
//! Visible objects are rendered with absolute position and velocity plus
//! body and neck orientation. The only state marker is the tackling flag.

use std::fmt::Write as _;

use super::{write_num, ObjectView, PlayerView, Serializer};
use crate::play_mode::PlayMode;

pub struct SerializerStdv8;

impl Serializer for SerializerStdv8 {
    fn visual_object(&self, out: &mut String, name: &str, view: &ObjectView) {
        out.push_str(" (");
        out.push_str(name);
        out.push(' ');
        write_num(out, view.pos.x);
        out.push(' ');
        write_num(out, view.pos.y);
        out.push(' ');
        write_num(out, view.vel.x);
        out.push(' ');
        write_num(out, view.vel.y);
        out.push(')');
    }

    fn visual_player(&self, out: &mut String, name: &str, view: &PlayerView) {
        out.push_str(" (");
        out.push_str(name);
        out.push(' ');
        write_num(out, view.pos.x);
        out.push(' ');
        write_num(out, view.pos.y);
        out.push(' ');
        write_num(out, view.vel.x);
        out.push(' ');
        write_num(out, view.vel.y);
        let _ = write!(out, " {} {}", view.body_dir, view.neck_dir);
        if let Some(point_dir) = view.point_dir {
            let _ = write!(out, " {}", point_dir);
        }
        if view.tackling {
            out.push_str(" t");
        }
        out.push(')');
    }

    fn body_stamina(&self, out: &mut String, stamina: f64, effort: f64, _capacity: f64) {
        out.push_str(" (stamina ");
        write_num(out, stamina);
        out.push(' ');
        write_num(out, effort);
        out.push(')');
    }

    fn fullstate_stamina(
        &self,
        out: &mut String,
        stamina: f64,
        effort: f64,
        recovery: f64,
        _capacity: f64,
    ) {
        out.push_str(" (stamina ");
        write_num(out, stamina);
        out.push(' ');
        write_num(out, effort);
        out.push(' ');
        write_num(out, recovery);
        out.push(')');
    }

    fn fullstate_player_state(&self, out: &mut String, view: &PlayerView) {
        if view.tackling {
            out.push_str(" t");
        }
    }

    fn init_reply(&self, out: &mut String, side: char, unum: u8, mode: PlayMode) {
        let _ = write!(out, "(init {} {} {})", side, unum, mode.wire_name());
    }
}
