//! Export helpers for CSV and JSON artifacts.

pub mod samples {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    pub const HEADER: &str = "phase,time_s,speed_m_s,altitude_m,acceleration_m_s2";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row: every sampled quantity at one mission time.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub phase: &'a str,
        pub time_s: f64,
        pub speed_m_s: f64,
        pub altitude_m: f64,
        pub acceleration_m_s2: f64,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.3},{:.6},{:.6},{:.6}",
                self.phase, self.time_s, self.speed_m_s, self.altitude_m, self.acceleration_m_s2,
            )
        }
    }
}

pub mod report {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Run metadata and solved figures written as a JSON sidecar.
    #[derive(Debug, Clone, Serialize)]
    pub struct DescentReport {
        pub scenario: String,
        pub vehicle: String,
        pub body: String,
        pub generated_utc: String,
        pub start_speed_m_s: f64,
        pub start_height_m: f64,
        pub fall_time_s: f64,
        pub burn_time_s: f64,
        pub total_time_s: f64,
        pub ignition_altitude_m: f64,
        pub ignition_speed_m_s: f64,
        pub touchdown_speed_m_s: f64,
        pub height_error_m: f64,
        pub propellant_used_kg: f64,
        pub propellant_remaining_kg: f64,
        pub final_mass_kg: f64,
        pub final_acceleration_m_s2: f64,
        pub delta_v_used_m_s: f64,
        pub delta_v_remaining_m_s: f64,
        pub specific_impulse_s: f64,
        pub evaluations: u64,
    }

    pub fn write_report(path: &Path, report: &DescentReport) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, report)?;
        Ok(())
    }
}
