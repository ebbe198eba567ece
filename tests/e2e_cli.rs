use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use cli_helpers::{base_cmd, data_dir, run_cmd, run_cmd_json, simulate_args, write_history};

fn setup_temp_home() -> TempDir {
    TempDir::new().expect("failed to create temp home")
}

/// Scenario data: AAA grows 10% a day, DIV pays one dividend, ^GSPC +10%
fn setup_histories(home: &TempDir) -> String {
    let dir = data_dir(home);
    write_history(
        &dir,
        "AAA",
        &[
            ("2024-01-08", "100", ""),
            ("2024-01-09", "110", ""),
            ("2024-01-10", "121", ""),
        ],
    );
    write_history(
        &dir,
        "DIV",
        &[
            ("2024-01-08", "100", ""),
            ("2024-01-09", "100", "1.0"),
            ("2024-01-10", "110", ""),
        ],
    );
    write_history(
        &dir,
        "^GSPC",
        &[("2024-01-08", "4000", ""), ("2024-01-10", "4400", "")],
    );
    dir.to_string_lossy().into_owned()
}

#[test]
fn simulate_prints_summary_without_ansi() {
    let home = setup_temp_home();
    let dir = setup_histories(&home);

    let mut cmd = base_cmd(&home);
    cmd.args(simulate_args(
        &dir,
        &["-t", "AAA", "-w", "100", "--start", "2024-01-08", "--end", "2024-01-10"],
    ));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("AAA"))
        .stdout(predicate::str::contains("12,100.00"))
        .stdout(predicate::str::contains("+21.00%"))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn simulate_json_with_benchmark() -> Result<()> {
    let home = setup_temp_home();
    let dir = setup_histories(&home);

    let json = run_cmd_json(
        &home,
        &simulate_args(
            &dir,
            &[
                "-t", "DIV", "-w", "100", "--index", "^GSPC", "--start", "2024-01-08", "--end",
                "2024-01-10",
            ],
        ),
    )?;

    assert_eq!(json["portfolio_return"], "11.10");
    assert_eq!(json["index_return"], "10.00");
    assert_eq!(json["index_name"], "S&P 500");

    let traces = json["chart"]["data"].as_array().expect("chart traces");
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["name"], "Your Portfolio");
    assert_eq!(traces[0]["y"][2], 11110.0);
    // Benchmark has no Tuesday close; forward-filled from Monday
    assert_eq!(traces[1]["y"][1], 10000.0);
    Ok(())
}

#[test]
fn simulate_two_assets_exports_csv() -> Result<()> {
    let home = setup_temp_home();
    let dir = setup_histories(&home);
    let export = home.path().join("series.csv");
    let export_arg = export.to_string_lossy().into_owned();

    run_cmd(
        &home,
        &simulate_args(
            &dir,
            &[
                "-t", "AAA", "-w", "60", "-t", "DIV", "-w", "40", "--start", "2024-01-08",
                "--end", "2024-01-10", "--export", &export_arg,
            ],
        ),
    )?;

    let content = std::fs::read_to_string(&export)?;
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "date,portfolio");
    assert_eq!(lines.len(), 4);
    // 60 AAA shares at 121 + 40.4 DIV shares at 110
    assert_eq!(lines[3], "2024-01-10,11704.00");
    Ok(())
}

#[test]
fn weights_not_summing_to_100_fail() {
    let home = setup_temp_home();
    let dir = setup_histories(&home);

    let mut cmd = base_cmd(&home);
    cmd.args(simulate_args(
        &dir,
        &[
            "-t", "AAA", "-w", "50", "-t", "DIV", "-w", "49", "--start", "2024-01-08", "--end",
            "2024-01-10",
        ],
    ));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("weights must sum to 100%"));
}

#[test]
fn non_numeric_weight_fails() {
    let home = setup_temp_home();
    let dir = setup_histories(&home);

    let mut cmd = base_cmd(&home);
    cmd.args(simulate_args(
        &dir,
        &["-t", "AAA", "-w", "lots", "--start", "2024-01-08", "--end", "2024-01-10"],
    ));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"))
        .stderr(predicate::str::contains("lots"));
}

#[test]
fn unavailable_ticker_fails_without_output() {
    let home = setup_temp_home();
    let dir = setup_histories(&home);

    let mut cmd = base_cmd(&home);
    cmd.args(simulate_args(
        &dir,
        &[
            "-t", "AAA", "-w", "50", "-t", "ZZZZ", "-w", "50", "--start", "2024-01-08", "--end",
            "2024-01-10",
        ],
    ));

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ZZZZ has no data for the given period"));
}

#[test]
fn config_file_changes_initial_investment() -> Result<()> {
    let home = setup_temp_home();
    let dir = setup_histories(&home);
    let config = home.path().join("reinvest.toml");
    std::fs::write(&config, "initial_investment = 2000\n")?;
    let config_arg = config.to_string_lossy().into_owned();

    let mut args = vec!["--config", config_arg.as_str()];
    args.extend(simulate_args(
        &dir,
        &["-t", "AAA", "-w", "100", "--start", "2024-01-08", "--end", "2024-01-10"],
    ));
    let json = run_cmd_json(&home, &args)?;

    assert_eq!(json["initial_investment"], "2000");
    assert_eq!(json["final_value"], "2420");
    assert_eq!(json["portfolio_return"], "21.00");
    Ok(())
}

#[test]
fn indices_lists_known_benchmarks() {
    let home = setup_temp_home();

    let mut cmd = base_cmd(&home);
    cmd.arg("indices");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("^GSPC"))
        .stdout(predicate::str::contains("Dow Jones Industrial Average"));
}
