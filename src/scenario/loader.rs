//! Load scenarios from a batch CSV file

use csv::Reader;
use std::error::Error;
use std::path::Path;

use super::Scenario;
use crate::plans::PlanId;

/// Raw CSV row matching the batch scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "Salary")]
    salary: f64,
    #[serde(rename = "GrowthPct")]
    growth_pct: f64,
    #[serde(rename = "Plan")]
    plan: String,
    #[serde(rename = "StartYear")]
    start_year: i32,
    #[serde(rename = "HorizonYears")]
    horizon_years: u32,
    #[serde(rename = "InitialBalance")]
    initial_balance: Option<f64>,
}

/// One loaded batch entry: the scenario plus an optional opening balance for
/// the interest simulation
#[derive(Debug, Clone)]
pub struct ScenarioRecord {
    pub scenario_id: u32,
    pub scenario: Scenario,
    pub initial_balance: Option<f64>,
}

impl CsvRow {
    fn to_record(self) -> Result<ScenarioRecord, Box<dyn Error>> {
        let plan = PlanId::parse(&self.plan)?;

        let scenario = Scenario::with_horizon(
            self.salary,
            self.growth_pct,
            plan,
            self.start_year,
            self.horizon_years,
        );
        scenario.validate()?;

        Ok(ScenarioRecord {
            scenario_id: self.scenario_id,
            scenario,
            initial_balance: self.initial_balance,
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record()?);
    }

    log::debug!("loaded {} scenarios", records.len());
    Ok(records)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ScenarioRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record()?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ScenarioID,Salary,GrowthPct,Plan,StartYear,HorizonYears,InitialBalance
1,20000,5.0,plan2,2025,10,
2,26000,0.0,postgraduate,2025,30,10000
";

    #[test]
    fn test_load_from_reader() {
        let records = load_scenarios_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].scenario_id, 1);
        assert_eq!(records[0].scenario.plan, PlanId::Plan2);
        assert_eq!(records[0].initial_balance, None);

        assert_eq!(records[1].scenario.horizon_years, 30);
        assert_eq!(records[1].initial_balance, Some(10_000.0));
    }

    #[test]
    fn test_unknown_plan_fails_load() {
        let bad = "\
ScenarioID,Salary,GrowthPct,Plan,StartYear,HorizonYears,InitialBalance
1,20000,5.0,plan9,2025,10,
";
        assert!(load_scenarios_from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_invalid_scenario_fails_load() {
        let bad = "\
ScenarioID,Salary,GrowthPct,Plan,StartYear,HorizonYears,InitialBalance
1,-5,5.0,plan2,2025,10,
";
        assert!(load_scenarios_from_reader(bad.as_bytes()).is_err());
    }
}
