//! Things that sit around the interpreter: writing out what the turtle drew,
//! driving a pen plotter, and keeping a session log.

pub mod export;
pub mod history;
pub mod plot;
