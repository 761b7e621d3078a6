//! Plain-text export of a run for external renderers.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::System;

/// Write one row per snapshot: the generation followed by `x, y` of every body.
///
/// The header is sized by the first snapshot.
pub fn write_csv_positions(snapshots: &[System], path: impl AsRef<Path>) -> Result<(), io::Error> {
    let mut file = BufWriter::new(File::create(path)?);
    write_positions(snapshots, &mut file)?;
    file.flush()
}

pub fn write_positions(snapshots: &[System], out: &mut impl Write) -> Result<(), io::Error> {
    let num_bodies = snapshots.first().map_or(0, System::len);

    write!(out, "t")?;
    for i in 0..num_bodies {
        write!(out, ",x{i},y{i}")?;
    }
    writeln!(out)?;

    for (t, snapshot) in snapshots.iter().enumerate() {
        write!(out, "{t}")?;
        for body in &snapshot.bodies {
            write!(out, ",{},{}", body.position.x, body.position.y)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
