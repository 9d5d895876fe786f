use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use kurbo::{Point, Size};
use turtlelogo::{Config, IndexedPalette, Interpreter, NamedPalette, Report};
use turtlelogo_host::{export, history::Session, plot};

#[derive(Parser, Debug)]
#[clap(version, about = "A turtle graphics LOGO interpreter")]
struct Args {
    #[clap(subcommand)]
    cmd: Cmd,

    /// Width of the drawing surface.
    #[clap(long, default_value_t = 1200.0, global = true)]
    width: f64,

    /// Height of the drawing surface.
    #[clap(long, default_value_t = 900.0, global = true)]
    height: f64,

    /// How to interpret the argument to SETPENCOLOR.
    #[clap(long, value_enum, default_value_t = PaletteKind::Named, global = true)]
    palette: PaletteKind,

    /// Write the drawing to this SVG file.
    #[clap(long, global = true)]
    svg: Option<PathBuf>,

    /// Write a session report to this file.
    #[clap(long, global = true)]
    history: Option<PathBuf>,

    /// Write pen plotter commands to this file.
    #[clap(long, global = true)]
    plot: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run a whole file.
    Run { input: PathBuf },
    /// Read commands from stdin, one line at a time.
    Repl,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaletteKind {
    /// Color names like "red" or "orange".
    Named,
    /// Numbered colors, with 4 being red.
    Indexed,
}

fn print_report(report: &Report) {
    for line in &report.output {
        println!("{line}");
    }
    for w in &report.warnings {
        println!("Warning: {w}");
    }
    for e in &report.errors {
        println!("Error: {e}");
    }
}

fn repl(logo: &mut Interpreter, session: &mut Session) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("? ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let report = logo.interpret(&line);
        print_report(&report);
        session.record(&line, &report);
    }
    Ok(())
}

fn save(args: &Args, logo: &Interpreter, session: &Session) -> anyhow::Result<()> {
    let segments = logo.path().segments();
    let config = logo.config();

    if let Some(path) = &args.svg {
        export::save(path, segments, config.width, config.height)?;
    }

    if let Some(path) = &args.history {
        let t = logo.turtle();
        log::info!("writing session history to {}", path.display());
        std::fs::write(path, session.render(t.pose(), t.pen()))?;
    }

    if let Some(path) = &args.plot {
        let plotter = plot::Plotter::fit(
            plot::Plotter::default().area,
            Size::new(config.width, config.height),
        );
        let (hx, hy) = config.home();
        let ops = plotter.ops(Point::new(hx, hy), segments);
        log::info!("writing {} plotter ops to {}", ops.len(), path.display());
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        plot::write_ops(file, &ops)?;
    }
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    if !(args.width > 0.0 && args.height > 0.0) {
        bail!("the drawing surface must have a positive size");
    }
    let config = Config {
        width: args.width,
        height: args.height,
        ..Config::default()
    };
    let mut logo = match args.palette {
        PaletteKind::Named => Interpreter::with_palette(config, NamedPalette::default()),
        PaletteKind::Indexed => Interpreter::with_palette(config, IndexedPalette::default()),
    };
    let mut session = Session::new();

    let mut failed = 0;
    match &args.cmd {
        Cmd::Run { input } => {
            let text = match std::fs::read_to_string(input) {
                Ok(x) => x,
                Err(e) => bail!("Failed to open input file {}: {}", input.display(), e),
            };
            let report = logo.interpret(&text);
            print_report(&report);
            session.record(&text, &report);
            failed = report.errors.len();
        }
        Cmd::Repl => repl(&mut logo, &mut session)?,
    }

    save(&args, &logo, &session)?;

    if failed > 0 {
        bail!("{failed} error(s) while running the program");
    }
    Ok(())
}
