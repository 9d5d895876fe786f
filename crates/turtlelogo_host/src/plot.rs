//! Turning a turtle trace into commands for a pen plotter.

use std::io::Write;

use kurbo::{Point, Rect, Size, Vec2};
use turtlelogo::LineSegment;

// Endpoints closer than this are treated as the same point when joining segments.
const JOIN_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    PenUp,
    PenDown,
    MoveTo { x: f64, y: f64 },
}

impl Op {
    /// Clamp a move so that it stays inside `rect`.
    pub fn clamp(self, rect: &Rect) -> Self {
        match self {
            Op::MoveTo { x, y } => Op::MoveTo {
                x: x.clamp(rect.min_x(), rect.max_x()),
                y: y.clamp(rect.min_y(), rect.max_y()),
            },
            other => other,
        }
    }
}

impl std::fmt::Display for Op {
    /// The line-based protocol the plotter firmware reads.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::PenUp => f.write_str("penup"),
            Op::PenDown => f.write_str("pendown"),
            Op::MoveTo { x, y } => {
                let x = x.round() as i32;
                let y = y.round() as i32;
                write!(f, "moveto {x} {y}")
            }
        }
    }
}

/// Where, and how big, a drawing ends up on the plotter.
#[derive(Clone, Debug, PartialEq)]
pub struct Plotter {
    /// The drawable area, in plotter units with y pointing up.
    pub area: Rect,
    /// Plotter units per unit of the turtle's surface.
    pub scale: f64,
}

impl Default for Plotter {
    fn default() -> Plotter {
        Plotter {
            area: Rect::new(-80., 50., 80., 130.),
            scale: 0.1,
        }
    }
}

impl Plotter {
    /// Chooses a scale so that a whole surface of size `surface` fits in the area.
    pub fn fit(area: Rect, surface: Size) -> Plotter {
        let scale = (area.width() / surface.width).min(area.height() / surface.height);
        Plotter { area, scale }
    }

    /// Maps a point on the turtle's surface to the plotter. `home` lands in
    /// the middle of the plotting area, and the y axis is flipped because the
    /// surface is y-down.
    pub fn map(&self, home: Point, x: f64, y: f64) -> Point {
        self.area.center() + Vec2::new(x - home.x, home.y - y) * self.scale
    }

    /// Converts a trace into plotter ops.
    ///
    /// Segments that start where the previous one ended are drawn without
    /// lifting the pen. The pen is always up at the end.
    pub fn ops(&self, home: Point, segments: &[LineSegment]) -> Vec<Op> {
        let mut ret = Vec::new();
        let mut at: Option<Point> = None;

        let mv = |pt: Point| Op::MoveTo { x: pt.x, y: pt.y }.clamp(&self.area);

        for seg in segments {
            let start = self.map(home, seg.x1, seg.y1);
            let end = self.map(home, seg.x2, seg.y2);
            let joined = at.map_or(false, |p| p.distance(start) < JOIN_TOLERANCE);
            if !joined {
                if at.is_some() {
                    ret.push(Op::PenUp);
                }
                ret.push(mv(start));
                ret.push(Op::PenDown);
            }
            ret.push(mv(end));
            at = Some(end);
        }
        if at.is_some() {
            ret.push(Op::PenUp);
        }
        ret
    }
}

/// Writes one op per line.
pub fn write_ops(mut w: impl Write, ops: &[Op]) -> anyhow::Result<()> {
    for op in ops {
        log::debug!("{:?}", op);
        writeln!(w, "{op}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use turtlelogo::{Config, Interpreter};

    fn ops(code: &str) -> Vec<Op> {
        let config = Config::default();
        let mut logo = Interpreter::new(config.clone());
        logo.interpret(code);
        let (hx, hy) = config.home();
        let plotter = Plotter {
            area: Rect::new(-100., -100., 100., 100.),
            scale: 1.0,
        };
        plotter.ops(Point::new(hx, hy), logo.path().segments())
    }

    fn text(ops: &[Op]) -> Vec<String> {
        ops.iter().map(|op| op.to_string()).collect()
    }

    #[test]
    fn joined_segments() {
        let ops = ops("fd 10 rt 90 fd 20");
        assert_eq!(
            text(&ops),
            ["moveto 0 0", "pendown", "moveto 0 10", "moveto 20 10", "penup"]
        );
    }

    #[test]
    fn lifts_between_pieces() {
        let ops = ops("fd 10 pu fd 10 pd fd 10");
        assert_eq!(
            text(&ops),
            [
                "moveto 0 0",
                "pendown",
                "moveto 0 10",
                "penup",
                "moveto 0 20",
                "pendown",
                "moveto 0 30",
                "penup"
            ]
        );
    }

    #[test]
    fn clamped() {
        let ops = ops("rt 90 fd 500");
        assert_eq!(ops[2], Op::MoveTo { x: 100.0, y: 0.0 });
    }

    #[test]
    fn nothing_drawn() {
        assert!(ops("pu fd 10").is_empty());
    }

    #[test]
    fn fit() {
        let p = Plotter::fit(Rect::new(0., 0., 120., 60.), Size::new(1200., 900.));
        assert_eq!(p.scale, 60.0 / 900.0);
    }

    #[test]
    fn write() {
        let mut out = Vec::new();
        write_ops(&mut out, &[Op::PenDown, Op::MoveTo { x: 1.4, y: -2.6 }]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "pendown\nmoveto 1 -3\n");
    }
}
