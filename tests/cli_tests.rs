use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    goals_path: PathBuf,
}

impl TestContext {
    fn new(goals_json: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let goals_path = dir.path().join("goals.json");
        let mut goals_file = File::create(&goals_path).unwrap();
        writeln!(goals_file, "{}", goals_json).unwrap();
        Self { dir, goals_path }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", content).unwrap();
        path
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spreadforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad json ({}): {}", e, stdout))
}

#[test]
fn test_stats_command() {
    let output = run(&["stats", "Incineroar", "-e", "252/4/0/0/252/0", "-n", "Careful"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Incineroar (Careful)"));
    assert!(stdout.contains("202"));
    assert!(stdout.contains("EVs: 252 HP / 4 Atk / 252 SpD (508 total)"));
}

#[test]
fn test_stats_unknown_species_fails() {
    let output = run(&["stats", "Missingno"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found in database"));
}

#[test]
fn test_speed_command_compares() {
    let output = run(&[
        "speed",
        "Garchomp",
        "-e",
        "0/0/0/0/0/124",
        "-n",
        "Jolly",
        "--vs",
        "Rillaboom",
        "--vs-evs",
        "0/0/0/0/0/252",
        "--vs-nature",
        "Jolly",
    ]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("moves first by 1"));
}

#[test]
fn test_optimize_json_without_oracle() {
    let ctx = TestContext::new(
        r#"[{"type": "outspeed", "target": {"name": "Rillaboom", "evs": "0/0/0/0/0/252", "nature": "Jolly"}}]"#,
    );
    let output = run(&[
        "optimize",
        "Garchomp",
        "-g",
        ctx.goals_path.to_str().unwrap(),
        "-n",
        "Jolly",
        "--json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["evs"]["spe"], 124);
    assert_eq!(json["goal_results"][0]["achieved"], true);
    assert_eq!(json["ev_total"], 508);
}

#[test]
fn test_optimize_reads_config_file() {
    let ctx = TestContext::new(r#"[{"type": "outspeed", "target": "Rillaboom"}]"#);
    // Slower default speed target than the built-in Timid 252 Spe.
    let config = ctx.write(
        "config.json",
        r#"{"defaults": {"outspeed_evs": "0/0/0/0/0/0", "outspeed_nature": "Hardy"}}"#,
    );

    let output = run(&[
        "optimize",
        "Garchomp",
        "-g",
        ctx.goals_path.to_str().unwrap(),
        "-n",
        "Jolly",
        "--config",
        config.to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());

    // Rillaboom 0 Spe Hardy = 105; Jolly Garchomp already sits at 134.
    let json = stdout_json(&output);
    assert_eq!(json["goal_results"][0]["evs_used"]["spe"], 0);
}

#[cfg(unix)]
#[test]
fn test_optimize_with_oracle_command() {
    let ctx = TestContext::new(
        r#"[{"type": "survive", "attacker": "Flutter Mane", "move": "Moonblast"}]"#,
    );
    let script = ctx.write(
        "oracle.sh",
        r#"cat > /dev/null
echo '{"success":true,"minPercent":40.0,"maxPercent":47.5,"category":"Special"}'"#,
    );
    let oracle_cmd = format!("sh {}", script.to_str().unwrap());

    let output = run(&[
        "optimize",
        "Incineroar",
        "-g",
        ctx.goals_path.to_str().unwrap(),
        "-n",
        "Careful",
        "--oracle-cmd",
        &oracle_cmd,
        "--json",
    ]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    let goal = &json["goal_results"][0];
    assert_eq!(goal["achieved"], true);
    assert_eq!(goal["evs_used"]["hp"], 0);
    assert_eq!(goal["evs_used"]["spd"], 0);
    assert_eq!(goal["detail"], "Takes 40.0-47.5% damage");
}

#[test]
fn test_optimize_missing_goal_file() {
    let output = run(&["optimize", "Garchomp", "-g", "no/such/goals.json"]);
    assert!(!output.status.success());
}
