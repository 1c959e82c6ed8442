use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::log_info;
use crate::number::NumberProfile;
use crate::recon::Footprint;

pub trait Output {
    fn write_to_file(&self, output_file: &str) -> Result<()>;
}

#[derive(Serialize, Default)]
pub struct FootprintOutput {
    pub numbers: Vec<NumberFootprints>,
}

#[derive(Serialize)]
pub struct NumberFootprints {
    pub number: NumberProfile,
    pub footprints: Vec<Footprint>,
}

impl Output for FootprintOutput {
    fn write_to_file(&self, output_file: &str) -> Result<()> {
        write_json(&self, output_file)
    }
}

impl FootprintOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, number: NumberProfile, footprints: Vec<Footprint>) {
        self.numbers.push(NumberFootprints { number, footprints });
    }
}

fn json_path(output_file: &str) -> String {
    if Path::new(output_file)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        output_file.to_string()
    } else {
        format!("{output_file}.json")
    }
}

fn write_json<T: Serialize>(data: &T, output_file: &str) -> Result<()> {
    let output_file = json_path(output_file);

    let file = File::create(&output_file)?;
    serde_json::to_writer_pretty(file, data)?;

    log_info!(format!("JSON output written to: {}", output_file));

    Ok(())
}
