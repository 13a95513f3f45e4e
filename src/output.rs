//! Terminal output for search results and the top-folders report

use std::io::{self, BufWriter, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print the sorted result paths, one per line
pub fn print_paths(paths: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for path in paths {
        writeln!(out, "{path}")?;
    }
    out.flush()
}

/// Print the top-folders report: file count in a fixed-width column, then path
pub fn print_top_folders(rows: &[(String, u64)]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    for (path, count) in rows {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{count:<10}")?;
        stdout.reset()?;
        writeln!(stdout, "{path}")?;
    }

    Ok(())
}
