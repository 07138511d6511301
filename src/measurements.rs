// PROCRASTINATOR MEASUREMENT LOADER
// JSON OBJECT: { "<config name>": [t_0, t_1, ...], ... } IN SECONDS.
// FILES ENDING IN .gz ARE GUNZIPPED ON THE FLY.
// KEYS ARE SORTED BEFORE INDEXING, SO CONFIG ID i IS THE i-TH NAME IN ORDER.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::ledger::RunLedger;

pub struct Measurements {
    pub names: Vec<String>,
    pub times: Vec<Vec<f64>>,
}

impl Measurements {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening measurements {}", path.display()))?;
        let reader: Box<dyn Read> = if path.extension().is_some_and(|e| e == "gz") {
            Box::new(flate2::read::GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Self::from_reader(BufReader::new(reader))
            .with_context(|| format!("parsing measurements {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: BTreeMap<String, Vec<f64>> = serde_json::from_reader(reader)?;
        Self::from_map(raw)
    }

    pub fn from_map(raw: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        if raw.is_empty() {
            bail!("no configurations in measurements");
        }
        if let Some((name, t)) = raw.iter()
            .find_map(|(name, row)| row.iter().find(|t| !t.is_finite() || **t < 0.0).map(|t| (name, t)))
        {
            bail!("configuration {} has invalid runtime {}", name, t);
        }
        let (names, times): (Vec<String>, Vec<Vec<f64>>) = raw.into_iter().unzip();
        Ok(Self { names, times })
    }

    pub fn num_configs(&self) -> usize {
        self.names.len()
    }

    pub fn num_instances(&self) -> usize {
        self.times.first().map_or(0, Vec::len)
    }

    // BUILD THE SIMULATED ENVIRONMENT. seed = None DRAWS FROM THE OS.
    pub fn into_ledger(self, ceiling: f64, seed: Option<u64>) -> Result<(Vec<String>, RunLedger)> {
        let ledger = match seed {
            Some(s) => RunLedger::with_seed(self.times, ceiling, s),
            None => RunLedger::new(self.times, ceiling),
        }?;
        Ok((self.names, ledger))
    }
}
