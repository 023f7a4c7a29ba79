use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FLAG_HEADER: &str =
    "country,sector,digital_procurement,open_contracting,ai_policy,vendor_transparency,country_modifier";

pub struct TestEnv {
    _tmp: TempDir,
    pub data: PathBuf,
}

impl TestEnv {
    /// A data directory with the three traffic tables and both flag tables.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let data = tmp.path().join("processed");
        fs::create_dir_all(&data).expect("create data dir");
        write_fixture_tables(&data);
        Self { _tmp: tmp, data }
    }

    pub fn empty() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let data = tmp.path().join("processed");
        fs::create_dir_all(&data).expect("create data dir");
        Self { _tmp: tmp, data }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.data.join(file)
    }

    pub fn write(&self, file: &str, body: &str) {
        fs::write(self.path(file), body).expect("write fixture file");
    }

    pub fn read(&self, file: &str) -> String {
        fs::read_to_string(self.path(file)).expect("read output file")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("readiness");
        cmd.env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(&self.data);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn fail_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }
}

fn write_fixture_tables(data: &Path) {
    fs::write(
        data.join("fact_route_passenger_flow.csv"),
        "country,year,passenger_volume\n\
         Kenya,2023,1200000\n\
         Nigeria,2023,950000\n\
         Ghana,2023,410000\n\
         Egypt,2023,300000\n",
    )
    .expect("write passenger flow");
    fs::write(
        data.join("fact_route_cargo_flow.csv"),
        "country,year,cargo_tonnage\n\
         Kenya,2023,52000\n\
         Nigeria,2023,31000.5\n\
         South Africa,2023,88000\n",
    )
    .expect("write cargo flow");
    fs::write(
        data.join("fact_tourism_inbound.csv"),
        "country,year,inbound_tourists\n\
         Kenya,2023,2100000\n\
         Rwanda,2023,1400000\n",
    )
    .expect("write tourism inbound");
    fs::write(
        data.join("fact_aviation_governance_flags.csv"),
        format!(
            "{FLAG_HEADER}\n\
             Kenya,Aviation,true,true,false,true,1.0\n\
             Nigeria,Aviation,true,false,false,false,\n"
        ),
    )
    .expect("write aviation flags");
    fs::write(
        data.join("fact_tourism_governance_flags.csv"),
        format!(
            "{FLAG_HEADER}\n\
             Kenya,Tourism & Hospitality,1,1,1,1,1.1\n"
        ),
    )
    .expect("write tourism flags");
}
