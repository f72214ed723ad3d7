use std::io::Write;

use assert_cmd::Command;

fn flowpath() -> Command {
    Command::cargo_bin("flowpath").unwrap()
}

fn run_stdout(args: &[&str], stdin: &str) -> String {
    let assert = flowpath().args(args).write_stdin(stdin).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

const PATH_GRAPH: &str = "4 3\n0 1 1\n1 2 2\n0 2 4\n";
const TRIANGLE: &str = "3 3\n0 1 1\n1 2 2\n0 2 3\n";
const DIAMOND: &str = "4 5\n0 1 3\n0 2 2\n1 2 1\n1 3 2\n2 3 3\n";

#[test]
fn shortest_path_prints_distance() {
    assert_eq!(run_stdout(&["shortest-path", "0", "2"], PATH_GRAPH), "3\n");
}

#[test]
fn shortest_path_reports_unreachable_target() {
    assert_eq!(run_stdout(&["shortest-path", "0", "3"], PATH_GRAPH), "not connected\n");
}

#[test]
fn shortest_path_can_print_vertices() {
    assert_eq!(
        run_stdout(&["shortest-path", "0", "2", "--path"], PATH_GRAPH),
        "3\n0 1 2\n"
    );
}

#[test]
fn mst_prints_total_weight() {
    assert_eq!(run_stdout(&["mst"], TRIANGLE), "3\n");
    assert_eq!(run_stdout(&["mst", "--start", "2"], TRIANGLE), "3\n");
}

#[test]
fn mst_of_disconnected_graph() {
    assert_eq!(run_stdout(&["mst"], "4 2\n0 1 1\n2 3 1\n"), "not connected\n");
}

#[test]
fn mst_of_empty_graph_is_zero() {
    assert_eq!(run_stdout(&["mst"], "0 0\n"), "0\n");
    flowpath()
        .args(["mst", "--start", "0"])
        .write_stdin("0 0\n")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn saturated_parallel_edges_stay_exact() {
    let max = u32::MAX as u64;
    let network = format!("2 3\n0 1 {max}\n0 1 {max}\n0 1 {max}\n");
    assert_eq!(
        run_stdout(&["max-flow", "0", "1"], &network),
        format!("Max flow {}\n", 3 * max)
    );

    let path = format!("4 3\n0 1 {max}\n1 2 {max}\n2 3 {max}\n");
    assert_eq!(run_stdout(&["mst"], &path), format!("{}\n", 3 * max));
    assert_eq!(run_stdout(&["shortest-path", "0", "3"], &path), format!("{}\n", 3 * max));
}

#[test]
fn rejects_oversized_weight() {
    let assert = flowpath()
        .args(["max-flow", "0", "1"])
        .write_stdin("2 3\n0 1 9223372036854775807\n0 1 9223372036854775807\n0 1 9223372036854775807\n")
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("edge weight must be at most 4294967295"));
}

#[test]
fn rejects_huge_vertex_count_without_allocating() {
    let assert = flowpath()
        .args(["mst"])
        .write_stdin("9999999999999 0\n")
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("number of vertices must be at most"));
}

#[test]
fn max_flow_prints_value() {
    assert_eq!(run_stdout(&["max-flow", "0", "3"], DIAMOND), "Max flow 4\n");
}

#[test]
fn max_flow_json_includes_cut() {
    let stdout = run_stdout(&["--json", "max-flow", "0", "3"], DIAMOND);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["max_flow"], 4);
    assert!(value["min_cut"].as_array().unwrap().contains(&serde_json::json!(0)));
}

#[test]
fn reads_graph_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DIAMOND.as_bytes()).unwrap();

    flowpath()
        .args(["max-flow", "0", "3", "--input"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("Max flow 4\n");
}

#[test]
fn rejects_out_of_range_edge() {
    let assert = flowpath()
        .args(["mst"])
        .write_stdin("3 1\n0 3 1\n")
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("vertex numbers must be between 0 and 2"));
}

#[test]
fn rejects_non_positive_weight() {
    flowpath()
        .args(["shortest-path", "0", "1"])
        .write_stdin("2 1\n0 1 0\n")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn rejects_invalid_query_vertex() {
    let assert = flowpath()
        .args(["max-flow", "0", "-1"])
        .write_stdin(DIAMOND)
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("vertex -1 must be between 0 and 3"));
}

#[test]
fn missing_input_file_is_an_error() {
    flowpath()
        .args(["mst", "--input", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn empty_input_asks_for_vertex_count() {
    let assert = flowpath().args(["mst"]).write_stdin("").assert().failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("please enter number of vertices"));
}
