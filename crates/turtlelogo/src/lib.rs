//! An interpreter for a small turtle-graphics dialect of LOGO.
//!
//! ```
//! use turtlelogo::{Config, Interpreter};
//!
//! let mut logo = Interpreter::new(Config::default());
//! let report = logo.interpret("repeat 4 [fd 100 rt 90]");
//! assert_eq!(report.segments.len(), 4);
//! assert!(report.errors.is_empty());
//! ```
//!
//! Each call to [`Interpreter::interpret`] runs one input against the same
//! turtle, so the turtle's position, heading and pen carry over from one call
//! to the next. Nothing in here is fatal: syntax errors and unknown commands
//! are collected in the returned [`Report`] and the interpreter stays usable.

pub mod builtin;
pub mod palette;
pub mod parse;
pub mod path;
pub mod turtle;
pub mod typ;

pub use builtin::{BuiltIn, Keyword};
pub use palette::{Color, IndexedPalette, NamedPalette, Palette};
pub use path::{LineSegment, PathRecorder};
pub use turtle::{Pen, Pose, Turtle};
pub use typ::{LogoError, Node, Span, SyntaxErrorKind, Warning};

/// Settings for a new interpreter.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Width of the drawing surface.
    pub width: f64,
    /// Height of the drawing surface.
    pub height: f64,
    /// Pen width at the start of a session.
    pub pen_width: f64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            width: 1200.0,
            height: 900.0,
            pen_width: 1.0,
        }
    }
}

impl Config {
    /// The turtle's home is the middle of the surface.
    pub fn home(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Something that the turtle's lines can be drawn on.
pub trait Surface {
    /// Called once for each segment, in the order they are drawn.
    fn draw_line(&mut self, segment: &LineSegment);

    /// Called when the screen is cleared.
    fn clear(&mut self) {}
}

/// A surface that throws everything away.
impl Surface for () {
    fn draw_line(&mut self, _segment: &LineSegment) {}
}

impl Surface for Vec<LineSegment> {
    fn draw_line(&mut self, segment: &LineSegment) {
        self.push(segment.clone());
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// What happened during one call to [`Interpreter::interpret`].
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Segments drawn by this input, in order. If the screen was cleared,
    /// only the segments drawn after the last clear are included.
    pub segments: Vec<LineSegment>,
    /// Whether the input cleared the screen.
    pub cleared: bool,
    /// The turtle's pose after running the input.
    pub pose: Pose,
    /// The pen after running the input.
    pub pen: Pen,
    /// Answers to queries like `xcor`.
    pub output: Vec<String>,
    pub errors: Vec<LogoError>,
    pub warnings: Vec<Warning>,
}

pub struct Interpreter {
    config: Config,
    palette: Box<dyn Palette>,
    turtle: Turtle,
    path: PathRecorder,
}

impl Interpreter {
    /// An interpreter using the [`NamedPalette`].
    pub fn new(config: Config) -> Interpreter {
        Interpreter::with_palette(config, NamedPalette::default())
    }

    pub fn with_palette(config: Config, palette: impl Palette + 'static) -> Interpreter {
        let turtle = Turtle::new(config.home(), palette.default_color(), config.pen_width);
        Interpreter {
            config,
            palette: Box::new(palette),
            turtle,
            path: PathRecorder::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    /// Everything drawn since the last clear.
    pub fn path(&self) -> &PathRecorder {
        &self.path
    }

    /// Sends the turtle home (without drawing) and forgets everything drawn so far.
    /// The pen keeps its color and width.
    pub fn reset(&mut self) {
        self.turtle.reset();
        self.path.clear();
    }

    pub fn interpret(&mut self, text: &str) -> Report {
        self.interpret_on(text, &mut ())
    }

    /// Like [`Interpreter::interpret`], but also draws onto `surface` as it goes.
    pub fn interpret_on(&mut self, text: &str, surface: &mut dyn Surface) -> Report {
        let program = parse::program(text);
        let mut report = Report {
            segments: Vec::new(),
            cleared: false,
            pose: self.turtle.pose(),
            pen: self.turtle.pen().clone(),
            output: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        self.exec_block(&program.nodes, surface, &mut report);
        if let Some(e) = program.error {
            log::info!("{e}");
            report.errors.push(e);
        }

        report.pose = self.turtle.pose();
        report.pen = self.turtle.pen().clone();
        report
    }

    fn exec_block(&mut self, nodes: &[Node], surface: &mut dyn Surface, report: &mut Report) {
        // The repeat bodies currently running, innermost last.
        struct Frame {
            start: usize,
            end: usize,
            /// Passes still to run after the current one.
            left: u32,
        }

        let mut stack = vec![Frame {
            start: 0,
            end: nodes.len(),
            left: 0,
        }];
        let mut pc = 0;
        while let Some(frame) = stack.last_mut() {
            if pc == frame.end {
                if frame.left > 0 {
                    frame.left -= 1;
                    pc = frame.start;
                } else {
                    stack.pop();
                }
                continue;
            }

            match &nodes[pc] {
                Node::Command(cmd) => {
                    let builtin = BuiltIn::from_command(cmd, self.palette.as_ref(), &mut report.warnings);
                    self.exec_builtin(&builtin, surface, report);
                    pc += 1;
                }
                Node::Repeat { count, len, .. } => {
                    let start = pc + 1;
                    let end = start + len;
                    if *count == 0 {
                        pc = end;
                    } else {
                        stack.push(Frame {
                            start,
                            end,
                            left: count - 1,
                        });
                        pc = start;
                    }
                }
                Node::Unknown { word, span } => {
                    let e = LogoError::UnknownCommand {
                        word: word.clone(),
                        span: *span,
                    };
                    log::info!("{e}");
                    report.errors.push(e);
                    pc += 1;
                }
                Node::Stray { value, span } => {
                    let e = LogoError::UnusedValue {
                        value: value.clone(),
                        span: *span,
                    };
                    log::info!("{e}");
                    report.errors.push(e);
                    pc += 1;
                }
            }
        }
    }

    fn exec_builtin(&mut self, builtin: &BuiltIn, surface: &mut dyn Surface, report: &mut Report) {
        log::debug!("{builtin:?}");
        let pose = self.turtle.pose();
        match builtin {
            BuiltIn::ClearScreen => {
                self.reset();
                surface.clear();
                report.segments.clear();
                report.cleared = true;
            }
            BuiltIn::XCor => report.output.push(format!("X coordinate: {}", pose.x)),
            BuiltIn::YCor => report.output.push(format!("Y coordinate: {}", pose.y)),
            BuiltIn::Heading => report.output.push(format!("Heading: {}°", pose.heading)),
            other => {
                let mut drawn = Vec::new();
                self.turtle.apply(other, &mut drawn);
                for seg in drawn {
                    log::trace!("drew {seg:?}");
                    surface.draw_line(&seg);
                    self.path.push(seg.clone());
                    report.segments.push(seg);
                }
            }
        }
    }
}
