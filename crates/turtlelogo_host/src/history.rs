//! A log of everything typed into a session, and what came back.

use std::fmt::Write as _;

use turtlelogo::{Pen, Pose, Report};

const RULE: &str = "========================================";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Input,
    Output,
    Error,
}

impl LineKind {
    fn tag(self) -> &'static str {
        match self {
            LineKind::Input => "INPUT",
            LineKind::Output => "OUTPUT",
            LineKind::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    commands: Vec<String>,
    log: Vec<(LineKind, String)>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Every input recorded so far, oldest first.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn log(&self) -> &[(LineKind, String)] {
        &self.log
    }

    pub fn errors(&self) -> usize {
        self.log.iter().filter(|(kind, _)| *kind == LineKind::Error).count()
    }

    /// Records one input and the report that running it produced.
    ///
    /// Clearing the screen also clears the output log, but the input that
    /// did the clearing stays at the top of it.
    pub fn record(&mut self, input: &str, report: &Report) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        self.commands.push(input.to_owned());

        if report.cleared {
            self.log.clear();
        }
        self.log.push((LineKind::Input, format!("? {input}")));
        for w in &report.warnings {
            self.log.push((LineKind::Output, format!("Warning: {w}")));
        }
        for out in &report.output {
            self.log.push((LineKind::Output, out.clone()));
        }
        for e in &report.errors {
            self.log.push((LineKind::Error, format!("Error: {e}")));
        }
    }

    /// The plain-text session report.
    pub fn render(&self, pose: Pose, pen: &Pen) -> String {
        let mut s = String::new();
        // Writing into a String can't fail.
        let _ = self.render_into(&mut s, pose, pen);
        s
    }

    fn render_into(&self, s: &mut String, pose: Pose, pen: &Pen) -> std::fmt::Result {
        writeln!(s, "LOGO Programming Session History")?;
        writeln!(s, "{RULE}")?;
        writeln!(s)?;
        writeln!(s, "SESSION INFORMATION:")?;
        writeln!(s, "- Turtle Position: ({}, {})", pose.x.round(), pose.y.round())?;
        writeln!(s, "- Turtle Heading: {}°", pose.heading.round())?;
        writeln!(s, "- Pen Status: {}", if pen.down { "DOWN" } else { "UP" })?;
        writeln!(s, "- Pen Color: {}", pen.color)?;
        writeln!(s, "- Pen Width: {}px", pen.width)?;
        writeln!(s)?;
        writeln!(s, "STATISTICS:")?;
        writeln!(s, "- Total Commands Executed: {}", self.commands.len())?;
        writeln!(s, "- Errors Encountered: {}", self.errors())?;
        writeln!(s)?;
        writeln!(s, "COMMAND HISTORY:")?;
        writeln!(s, "{RULE}")?;
        for (i, cmd) in self.commands.iter().enumerate() {
            writeln!(s, "{}. {cmd}", i + 1)?;
        }
        writeln!(s)?;
        writeln!(s, "SESSION OUTPUT LOG:")?;
        writeln!(s, "{RULE}")?;
        for (kind, line) in &self.log {
            writeln!(s, "[{}] {line}", kind.tag())?;
        }
        writeln!(s)?;
        writeln!(s, "{RULE}")?;
        writeln!(s, "End of LOGO Programming Session History")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turtlelogo::{Config, Interpreter};

    fn run(lines: &[&str]) -> (Session, Interpreter) {
        let mut logo = Interpreter::new(Config::default());
        let mut session = Session::new();
        for line in lines {
            let report = logo.interpret(line);
            session.record(line, &report);
        }
        (session, logo)
    }

    #[test]
    fn records_everything() {
        let (session, _) = run(&["fd 100", "  ", "xcor", "jump", "fd ten"]);
        assert_eq!(session.commands(), ["fd 100", "xcor", "jump", "fd ten"]);
        assert_eq!(session.errors(), 1);
        assert_eq!(
            session.log()[..4],
            [
                (LineKind::Input, "? fd 100".to_owned()),
                (LineKind::Input, "? xcor".to_owned()),
                (LineKind::Output, "X coordinate: 600".to_owned()),
                (LineKind::Input, "? jump".to_owned()),
            ]
        );
        assert_eq!(
            session.log()[4],
            (LineKind::Error, "Error: I don't know how to JUMP".to_owned())
        );
        assert_eq!(session.log()[6].0, LineKind::Output);
        assert!(session.log()[6].1.starts_with("Warning: "));
    }

    #[test]
    fn clear_empties_log() {
        let (session, _) = run(&["fd 10", "oops", "cs fd 5"]);
        assert_eq!(session.commands().len(), 3);
        assert_eq!(session.log(), [(LineKind::Input, "? cs fd 5".to_owned())]);
    }

    #[test]
    fn render() {
        let (session, logo) = run(&["rt 90.4 fd 10.6", "pu", "jump"]);
        let t = logo.turtle();
        let text = session.render(t.pose(), t.pen());
        let expected = "\
LOGO Programming Session History
========================================

SESSION INFORMATION:
- Turtle Position: (611, 450)
- Turtle Heading: 90°
- Pen Status: UP
- Pen Color: #000000
- Pen Width: 1px

STATISTICS:
- Total Commands Executed: 3
- Errors Encountered: 1

COMMAND HISTORY:
========================================
1. rt 90.4 fd 10.6
2. pu
3. jump

SESSION OUTPUT LOG:
========================================
[INPUT] ? rt 90.4 fd 10.6
[INPUT] ? pu
[INPUT] ? jump
[ERROR] Error: I don't know how to JUMP

========================================
End of LOGO Programming Session History
";
        assert_eq!(text, expected);
    }
}
