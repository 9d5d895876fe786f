//! The fixed set of primitive commands, and the conversion of a parsed
//! [`Command`] into a ready-to-run [`BuiltIn`].

use crate::{
    palette::{Color, Palette},
    typ::{Command, Warning},
};

/// The word that introduces a repeat block. It is handled by the parser and
/// is never dispatched.
pub const REPEAT: &str = "REPEAT";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    Forward,
    Backward,
    Right,
    Left,
    PenUp,
    PenDown,
    Home,
    ClearScreen,
    SetPenColor,
    SetPenWidth,
    SetHeading,
    SetX,
    SetY,
    SetXY,
    HideTurtle,
    ShowTurtle,
    Arc,
    XCor,
    YCor,
    Heading,
}

impl Keyword {
    pub const ALL: [Keyword; 20] = [
        Keyword::Forward,
        Keyword::Backward,
        Keyword::Right,
        Keyword::Left,
        Keyword::PenUp,
        Keyword::PenDown,
        Keyword::Home,
        Keyword::ClearScreen,
        Keyword::SetPenColor,
        Keyword::SetPenWidth,
        Keyword::SetHeading,
        Keyword::SetX,
        Keyword::SetY,
        Keyword::SetXY,
        Keyword::HideTurtle,
        Keyword::ShowTurtle,
        Keyword::Arc,
        Keyword::XCor,
        Keyword::YCor,
        Keyword::Heading,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Keyword::Forward => "FORWARD",
            Keyword::Backward => "BACKWARD",
            Keyword::Right => "RIGHT",
            Keyword::Left => "LEFT",
            Keyword::PenUp => "PENUP",
            Keyword::PenDown => "PENDOWN",
            Keyword::Home => "HOME",
            Keyword::ClearScreen => "CLEARSCREEN",
            Keyword::SetPenColor => "SETPENCOLOR",
            Keyword::SetPenWidth => "SETPENWIDTH",
            Keyword::SetHeading => "SETHEADING",
            Keyword::SetX => "SETX",
            Keyword::SetY => "SETY",
            Keyword::SetXY => "SETXY",
            Keyword::HideTurtle => "HIDETURTLE",
            Keyword::ShowTurtle => "SHOWTURTLE",
            Keyword::Arc => "ARC",
            Keyword::XCor => "XCOR",
            Keyword::YCor => "YCOR",
            Keyword::Heading => "HEADING",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Keyword::Forward => &["FD"],
            Keyword::Backward => &["BK", "BACK"],
            Keyword::Right => &["RT"],
            Keyword::Left => &["LT"],
            Keyword::PenUp => &["PU"],
            Keyword::PenDown => &["PD"],
            Keyword::ClearScreen => &["CS"],
            Keyword::SetPenColor => &["SETPC"],
            Keyword::SetPenWidth => &["SETPW"],
            Keyword::SetHeading => &["SETH"],
            Keyword::HideTurtle => &["HT"],
            Keyword::ShowTurtle => &["ST"],
            _ => &[],
        }
    }

    /// How many inputs the command takes.
    pub fn arity(self) -> usize {
        match self {
            Keyword::SetXY | Keyword::Arc => 2,
            Keyword::Forward
            | Keyword::Backward
            | Keyword::Right
            | Keyword::Left
            | Keyword::SetPenColor
            | Keyword::SetPenWidth
            | Keyword::SetHeading
            | Keyword::SetX
            | Keyword::SetY => 1,
            Keyword::PenUp
            | Keyword::PenDown
            | Keyword::Home
            | Keyword::ClearScreen
            | Keyword::HideTurtle
            | Keyword::ShowTurtle
            | Keyword::XCor
            | Keyword::YCor
            | Keyword::Heading => 0,
        }
    }

    /// Finds the keyword for an (upper case) word, by name or alias.
    pub fn lookup(word: &str) -> Option<Keyword> {
        Keyword::ALL
            .iter()
            .copied()
            .find(|k| k.name() == word || k.aliases().contains(&word))
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive with its inputs evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum BuiltIn {
    Forward(f64),
    Back(f64),
    Left(f64),
    Right(f64),
    PenUp,
    PenDown,
    Home,
    ClearScreen,
    SetPenColor(Color),
    SetPenWidth(f64),
    SetHeading(f64),
    SetX(f64),
    SetY(f64),
    SetXY(f64, f64),
    HideTurtle,
    ShowTurtle,
    Arc { degrees: f64, radius: f64 },
    XCor,
    YCor,
    Heading,
}

/// Reads the `i`th input of `cmd` as a number.
///
/// Missing and non-numeric inputs become 0. That's a deliberate leniency
/// rather than an error, but it gets reported in `warnings`.
fn num_arg(cmd: &Command, i: usize, warnings: &mut Vec<Warning>) -> f64 {
    match cmd.operands.get(i) {
        Some(op) => op.num().unwrap_or_else(|| {
            log::warn!("{} doesn't like {} as input", cmd.keyword, op.text);
            warnings.push(Warning::MalformedOperand {
                command: cmd.keyword,
                operand: op.text.clone(),
                span: op.span,
            });
            0.0
        }),
        None => {
            warnings.push(Warning::MissingOperand {
                command: cmd.keyword,
                span: cmd.span,
            });
            0.0
        }
    }
}

fn color_arg(cmd: &Command, palette: &dyn Palette, warnings: &mut Vec<Warning>) -> Color {
    let Some(op) = cmd.operands.first() else {
        warnings.push(Warning::MissingOperand {
            command: cmd.keyword,
            span: cmd.span,
        });
        return palette.default_color();
    };

    // Accept "RED", "RED (the usual logo word quote) and a bare RED.
    let name = op.text.trim_matches('"');
    palette
        .resolve(name)
        .or_else(|| Color::from_hex(name))
        .unwrap_or_else(|| {
            let fallback = palette.default_color();
            log::warn!("unknown color {name}, using {fallback}");
            warnings.push(Warning::UnknownColor {
                name: name.to_owned(),
                fallback,
                span: op.span,
            });
            fallback
        })
}

impl BuiltIn {
    /// Evaluates the inputs of a parsed command.
    pub fn from_command(cmd: &Command, palette: &dyn Palette, warnings: &mut Vec<Warning>) -> Self {
        let one_arg = |warnings: &mut Vec<Warning>| num_arg(cmd, 0, warnings);

        match cmd.keyword {
            Keyword::Forward => BuiltIn::Forward(one_arg(warnings)),
            Keyword::Backward => BuiltIn::Back(one_arg(warnings)),
            Keyword::Right => BuiltIn::Right(one_arg(warnings)),
            Keyword::Left => BuiltIn::Left(one_arg(warnings)),
            Keyword::PenUp => BuiltIn::PenUp,
            Keyword::PenDown => BuiltIn::PenDown,
            Keyword::Home => BuiltIn::Home,
            Keyword::ClearScreen => BuiltIn::ClearScreen,
            Keyword::SetPenColor => BuiltIn::SetPenColor(color_arg(cmd, palette, warnings)),
            Keyword::SetPenWidth => BuiltIn::SetPenWidth(one_arg(warnings)),
            Keyword::SetHeading => BuiltIn::SetHeading(one_arg(warnings)),
            Keyword::SetX => BuiltIn::SetX(one_arg(warnings)),
            Keyword::SetY => BuiltIn::SetY(one_arg(warnings)),
            Keyword::SetXY => {
                let x = num_arg(cmd, 0, warnings);
                let y = num_arg(cmd, 1, warnings);
                BuiltIn::SetXY(x, y)
            }
            Keyword::HideTurtle => BuiltIn::HideTurtle,
            Keyword::ShowTurtle => BuiltIn::ShowTurtle,
            Keyword::Arc => {
                let degrees = num_arg(cmd, 0, warnings);
                let radius = num_arg(cmd, 1, warnings);
                BuiltIn::Arc { degrees, radius }
            }
            Keyword::XCor => BuiltIn::XCor,
            Keyword::YCor => BuiltIn::YCor,
            Keyword::Heading => BuiltIn::Heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        palette::{IndexedPalette, NamedPalette},
        typ::{Operand, Span},
    };

    fn span() -> Span {
        Span {
            offset: 0,
            len: 0,
            line: 1,
            column: 1,
        }
    }

    fn cmd(keyword: Keyword, operands: &[&str]) -> Command {
        Command {
            keyword,
            operands: operands
                .iter()
                .map(|s| Operand {
                    text: s.to_string(),
                    span: span(),
                })
                .collect(),
            span: span(),
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(Keyword::lookup("FD"), Some(Keyword::Forward));
        assert_eq!(Keyword::lookup("FORWARD"), Some(Keyword::Forward));
        assert_eq!(Keyword::lookup("BACK"), Some(Keyword::Backward));
        assert_eq!(Keyword::lookup("SETXY"), Some(Keyword::SetXY));
        assert_eq!(Keyword::lookup("fd"), None);
        assert_eq!(Keyword::lookup(REPEAT), None);
        for k in Keyword::ALL {
            assert_eq!(Keyword::lookup(k.name()), Some(k));
        }
    }

    #[test]
    fn lenient_numbers() {
        let palette = NamedPalette::default();
        let mut warnings = Vec::new();

        let b = BuiltIn::from_command(&cmd(Keyword::Forward, &["12.5"]), &palette, &mut warnings);
        assert_eq!(b, BuiltIn::Forward(12.5));
        assert!(warnings.is_empty());

        let b = BuiltIn::from_command(&cmd(Keyword::Forward, &["TEN"]), &palette, &mut warnings);
        assert_eq!(b, BuiltIn::Forward(0.0));
        assert!(matches!(warnings[0], Warning::MalformedOperand { .. }));

        let b = BuiltIn::from_command(&cmd(Keyword::SetXY, &["3"]), &palette, &mut warnings);
        assert_eq!(b, BuiltIn::SetXY(3.0, 0.0));
        assert!(matches!(warnings[1], Warning::MissingOperand { .. }));

        let b = BuiltIn::from_command(&cmd(Keyword::Right, &["INF"]), &palette, &mut warnings);
        assert_eq!(b, BuiltIn::Right(0.0));
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn colors() {
        let named = NamedPalette::default();
        let indexed = IndexedPalette::default();
        let mut warnings = Vec::new();
        let red = Color::rgb(255, 0, 0);

        for input in ["\"RED\"", "\"RED", "RED", "#FF0000", "#F00"] {
            let b = BuiltIn::from_command(&cmd(Keyword::SetPenColor, &[input]), &named, &mut warnings);
            assert_eq!(b, BuiltIn::SetPenColor(red));
        }
        assert!(warnings.is_empty());

        let b = BuiltIn::from_command(&cmd(Keyword::SetPenColor, &["4"]), &indexed, &mut warnings);
        assert_eq!(b, BuiltIn::SetPenColor(red));

        let b = BuiltIn::from_command(&cmd(Keyword::SetPenColor, &["\"PLAID"]), &named, &mut warnings);
        assert_eq!(b, BuiltIn::SetPenColor(Color::BLACK));
        assert!(matches!(&warnings[0], Warning::UnknownColor { name, .. } if name == "PLAID"));
    }
}
