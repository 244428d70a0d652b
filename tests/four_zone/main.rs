/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use airnet::contam::{SimulationResults, TimeSeries};
use airnet::run_translation::{run, RunOptions};
use std::path::PathBuf;
use test_models::{get_grid_building, GridBuildingOptions};

fn tmp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("airnet_four_zone_{}", name))
}

fn write_model(model: &airnet::Model, name: &str) -> Result<String, String> {
    let path = tmp_file(name);
    std::fs::write(&path, model.to_json()?).map_err(|e| e.to_string())?;
    Ok(path.to_string_lossy().to_string())
}

#[test]
fn four_zones_to_stdout() -> Result<(), String> {
    // cargo test --package airnet --test four_zone -- --nocapture
    let model = test_models::four_zone_demo()?;
    let input_file = write_model(&model, "model.json")?;

    let options = RunOptions {
        input_file,
        level: Some("Leaky".into()),
        report: true,
        ..RunOptions::default()
    };
    let mut out: Vec<u8> = Vec::new();
    let prj = run(&options, &mut out)?;
    let out = String::from_utf8(out).map_err(|e| e.to_string())?;

    // Four zones, plus the supply and return of the air loop
    assert_eq!(prj.zones.len(), 6);
    assert_eq!(prj.ahs.len(), 1);
    // 12 exterior and 4 interior surfaces, a supply and a return
    // per zone, and the recirculation, outdoor air and exhaust
    assert_eq!(prj.airflow_paths.len(), 16 + 4 * 2 + 3);
    assert!(prj.valid());

    // The report comes first, then the project
    assert!(out.contains("interior sub-surface"));
    assert!(out.contains("6 ! zones"));
    assert!(out.trim_end().ends_with("* end project file."));
    Ok(())
}

#[test]
fn match_before_translating() -> Result<(), String> {
    let options = GridBuildingOptions {
        zone_per_space: true,
        match_surfaces: false,
        ..GridBuildingOptions::default()
    };
    let model = get_grid_building(&options)?;
    let input_file = write_model(&model, "unmatched.json")?;

    // Every wall leads outside
    let options = RunOptions {
        input_file: input_file.clone(),
        no_hvac: true,
        ..RunOptions::default()
    };
    let prj = run(&options, std::io::sink())?;
    assert_eq!(prj.airflow_paths.len(), 20);
    assert!(prj.airflow_paths.iter().all(|p| p.is_exterior()));

    // Shared walls become interior paths
    let options = RunOptions {
        input_file,
        no_hvac: true,
        match_surfaces: true,
        ..RunOptions::default()
    };
    let prj = run(&options, std::io::sink())?;
    assert_eq!(prj.airflow_paths.len(), 16);
    assert_eq!(prj.airflow_paths.iter().filter(|p| !p.is_exterior()).count(), 4);
    Ok(())
}

#[test]
fn results_and_files() -> Result<(), String> {
    let model = test_models::four_zone_demo()?;
    let input_file = write_model(&model, "with_results.json")?;

    let mut results = SimulationResults::default();
    for n in 1..=4 {
        let zone = test_models::zone_name(n);
        results.add_time_series(
            "Zone Mean Air Temperature",
            zone.to_uppercase(),
            TimeSeries::new("C", vec![20.; 8760]),
        );
        // Keys are upper case, as written by the simulation program
        results.add_time_series(
            "System Node MassFlowRate",
            test_models::supply_node_name(&zone).to_uppercase(),
            TimeSeries::new("kg/s", vec![0.1; 8760]),
        );
    }
    let results_file = tmp_file("results.json");
    let json = serde_json::to_string(&results).map_err(|e| e.to_string())?;
    std::fs::write(&results_file, json).map_err(|e| e.to_string())?;

    let prj_file = tmp_file("out.prj");
    let json_file = tmp_file("out.json");
    let cvf_file = tmp_file("out.cvf");
    let options = RunOptions {
        input_file,
        results: Some(results_file.to_string_lossy().to_string()),
        output: Some(prj_file.to_string_lossy().to_string()),
        json: Some(json_file.to_string_lossy().to_string()),
        cvf: Some(cvf_file.to_string_lossy().to_string()),
        ratio: Some(0.9),
        ratio_override: true,
        ..RunOptions::default()
    };
    let mut out: Vec<u8> = Vec::new();
    let prj = run(&options, &mut out)?;
    // Everything went into files
    assert!(out.is_empty());

    // A temperature, a supply and a return per zone
    assert_eq!(prj.control_nodes.len(), 12);

    let written = std::fs::read_to_string(&prj_file).map_err(|e| e.to_string())?;
    assert_eq!(written, prj.to_prj_string());

    let json = std::fs::read_to_string(&json_file).map_err(|e| e.to_string())?;
    let back = airnet::IndexModel::from_json(&json).map_err(|e| e.to_string())?;
    assert_eq!(back.zones.len(), prj.zones.len());

    let cvf = std::fs::read_to_string(&cvf_file).map_err(|e| e.to_string())?;
    // 4 header lines, 12 names, the first row and a full year
    assert_eq!(cvf.lines().count(), 4 + 12 + 1 + 8760);
    Ok(())
}

#[test]
fn bad_input() {
    let options = RunOptions {
        input_file: "./this/does/not/exist.json".into(),
        ..RunOptions::default()
    };
    assert!(run(&options, std::io::sink()).is_err());
}
