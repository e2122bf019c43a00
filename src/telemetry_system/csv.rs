use std::io::{self, Write};
use std::path::Path;

use crate::trajectory_system::KinematicState;

pub fn write_trajectory<W: Write>(
    writer: &mut W,
    trajectory: &[KinematicState],
) -> io::Result<()> {
    writeln!(writer, "time_s,altitude_m,velocity_mps,acceleration_mps2")?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.4},{:.4},{:.5},{:.5}",
            s.time, s.position, s.velocity, s.acceleration,
        )?;
    }

    Ok(())
}

pub fn write_trajectory_file<P: AsRef<Path>>(
    path: P,
    trajectory: &[KinematicState],
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
