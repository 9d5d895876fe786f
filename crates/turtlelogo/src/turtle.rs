//! The turtle: a position, a heading and a pen.
//!
//! Coordinates are those of the drawing surface, with `y` increasing
//! downwards. Heading 0 points up the surface and headings increase
//! clockwise, so heading 90 points to the right.

use crate::{builtin::BuiltIn, palette::Color, path::LineSegment};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// In degrees, always in `[0, 360)`.
    pub heading: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pen {
    pub down: bool,
    pub color: Color,
    /// Never less than 1.
    pub width: f64,
    /// Whether the turtle itself should be drawn. Has no effect on the trace.
    pub visible: bool,
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let ret = deg.rem_euclid(360.0);
    // A tiny negative angle can round up to exactly 360.
    if ret >= 360.0 {
        0.0
    } else {
        ret
    }
}

#[derive(Clone, Debug)]
pub struct Turtle {
    pose: Pose,
    pen: Pen,
    home: (f64, f64),
}

impl Turtle {
    /// A turtle sitting at `home`, facing up, with its pen down.
    pub fn new(home: (f64, f64), color: Color, width: f64) -> Turtle {
        Turtle {
            pose: Pose {
                x: home.0,
                y: home.1,
                heading: 0.0,
            },
            pen: Pen {
                down: true,
                color,
                width: width.max(1.0),
                visible: true,
            },
            home,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Moves in a straight line, returning the segment drawn if the pen is down.
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<LineSegment> {
        let (x1, y1) = (self.pose.x, self.pose.y);
        self.pose.x = x;
        self.pose.y = y;
        self.pen.down.then(|| LineSegment {
            x1,
            y1,
            x2: x,
            y2: y,
            color: self.pen.color,
            width: self.pen.width,
        })
    }

    pub fn forward(&mut self, dist: f64) -> Option<LineSegment> {
        // Convert the heading (clockwise from up) to the usual counter-clockwise
        // angle from the x axis. The surface's y axis points down, hence the
        // subtraction.
        let (s, c) = (90.0 - self.pose.heading).to_radians().sin_cos();
        self.move_to(self.pose.x + dist * c, self.pose.y - dist * s)
    }

    pub fn right(&mut self, deg: f64) {
        self.pose.heading = normalize_degrees(self.pose.heading + deg);
    }

    pub fn left(&mut self, deg: f64) {
        self.pose.heading = normalize_degrees(self.pose.heading - deg);
    }

    pub fn set_heading(&mut self, deg: f64) {
        self.pose.heading = normalize_degrees(deg);
    }

    /// Returns to the home position, drawing the way there if the pen is down.
    pub fn home(&mut self) -> Option<LineSegment> {
        let seg = self.move_to(self.home.0, self.home.1);
        self.pose.heading = 0.0;
        seg
    }

    /// Returns to the home position without drawing anything.
    pub fn reset(&mut self) {
        self.pose = Pose {
            x: self.home.0,
            y: self.home.1,
            heading: 0.0,
        };
    }

    /// Approximates an arc by a polygon with one side per degree.
    ///
    /// Positive `degrees` curve to the right. The arc starts at the current
    /// position and tangent to the current heading, and the turtle ends up at
    /// the far end of the arc. For non-integer angles the steps are shrunk so
    /// that the total turn is still exactly `degrees`.
    pub fn arc(&mut self, degrees: f64, radius: f64, out: &mut Vec<LineSegment>) {
        if radius <= 0.0 || degrees == 0.0 {
            return;
        }

        let steps = degrees.abs().ceil();
        let arc_len = degrees.abs() * std::f64::consts::PI * radius / 180.0;
        let step_len = arc_len / steps;
        let turn = degrees / steps;
        for _ in 0..(steps as u64) {
            out.extend(self.forward(step_len));
            self.right(turn);
        }
    }

    /// Applies a primitive, appending whatever gets drawn to `out`.
    pub fn apply(&mut self, builtin: &BuiltIn, out: &mut Vec<LineSegment>) {
        match *builtin {
            BuiltIn::Forward(dist) => out.extend(self.forward(dist)),
            BuiltIn::Back(dist) => out.extend(self.forward(-dist)),
            BuiltIn::Left(deg) => self.left(deg),
            BuiltIn::Right(deg) => self.right(deg),
            BuiltIn::PenUp => self.pen.down = false,
            BuiltIn::PenDown => self.pen.down = true,
            BuiltIn::Home => out.extend(self.home()),
            BuiltIn::SetPenColor(color) => self.pen.color = color,
            BuiltIn::SetPenWidth(width) => self.pen.width = width.max(1.0),
            BuiltIn::SetHeading(deg) => self.set_heading(deg),
            BuiltIn::SetX(x) => out.extend(self.move_to(x, self.pose.y)),
            BuiltIn::SetY(y) => out.extend(self.move_to(self.pose.x, y)),
            BuiltIn::SetXY(x, y) => out.extend(self.move_to(x, y)),
            BuiltIn::HideTurtle => self.pen.visible = false,
            BuiltIn::ShowTurtle => self.pen.visible = true,
            BuiltIn::Arc { degrees, radius } => self.arc(degrees, radius, out),
            // These don't touch the turtle; the interpreter deals with them.
            BuiltIn::ClearScreen | BuiltIn::XCor | BuiltIn::YCor | BuiltIn::Heading => {}
        }
    }
}
