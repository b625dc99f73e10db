//! The line-oriented command front end.
//!
//! One command per line: `V <n>` resets the graph to `n` edgeless nodes, `E
//! <i,j><k,l>...` adds edges and triggers a solve cycle, anything else is an
//! invalid argument. Protocol errors are printed and abort the current command
//! only; edges applied before the offending token stay applied. The loop ends on
//! end of input or an empty line.

use std::io::{self, BufRead, Write};

use crate::calc_stats::CalcLog;
use crate::cust_error::{ProtocolError, RunError};
use crate::graph::UGraph;
use crate::supervisor::{self, CycleReport, ExactOutcome, EXACT_BUDGET};

/// Drives the command loop over `input`, printing per-cycle results to `out` and
/// recording calc samples into `calc` when given.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    mut calc: Option<&mut CalcLog>,
) -> Result<(), RunError> {
    let mut graph = UGraph::new(0);
    for line in input.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let cmd = match tokens.next() {
            Some(cmd) => cmd,
            None => break,
        };
        match cmd {
            "V" => {
                match tokens.next().and_then(|arg| arg.parse::<usize>().ok()) {
                    Some(n) => graph = UGraph::new(n),
                    None => writeln!(out, "{}", ProtocolError::InvalidArgument)?,
                }
            },
            "E" => {
                let edge_list = tokens.next().unwrap_or("");
                let mut any_applied = false;
                for (u, v) in scan_edge_tokens(edge_list) {
                    if let Err(e) = apply_edge(&mut graph, u, v) {
                        writeln!(out, "{}", e)?;
                        break;
                    }
                    any_applied = true;
                }
                if any_applied {
                    let report = supervisor::run_cycle(&graph, EXACT_BUDGET, calc.is_some())?;
                    if let Some(log) = calc.as_deref_mut() {
                        log.record(graph.num_nodes(), &report);
                    }
                    write_report(out, &report)?;
                } else {
                    write_empty_report(out)?;
                }
            },
            _ => writeln!(out, "{}", ProtocolError::InvalidArgument)?,
        }
    }
    Ok(())
}

/// Validates one edge token against the current graph and applies it.
/// Self-loops and out-of-range ids never reach the graph.
fn apply_edge(graph: &mut UGraph, u: usize, v: usize) -> Result<(), ProtocolError> {
    if u == v {
        return Err(ProtocolError::SelfLoop)
    }
    if u >= graph.num_nodes() || v >= graph.num_nodes() {
        return Err(ProtocolError::OutOfRange)
    }
    graph.connect(u, v);
    Ok(())
}

/// Extracts all `<i,j>` tokens from `edge_list`, skipping characters that do not
/// open a well-formed token.
pub fn scan_edge_tokens(edge_list: &str) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut rest = edge_list;
    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];
        if let Some((pair, used)) = match_pair(rest) {
            pairs.push(pair);
            rest = &rest[used..];
        }
    }
    pairs
}

/// Matches `i,j>` at the start of `s`, returning the pair and the bytes consumed.
fn match_pair(s: &str) -> Option<((usize, usize), usize)> {
    let bytes = s.as_bytes();
    let mut at = 0;
    let first = take_number(bytes, &mut at)?;
    if bytes.get(at) != Some(&b',') {
        return None
    }
    at += 1;
    let second = take_number(bytes, &mut at)?;
    if bytes.get(at) != Some(&b'>') {
        return None
    }
    Some(((first, second), at + 1))
}

fn take_number(bytes: &[u8], at: &mut usize) -> Option<usize> {
    let start = *at;
    while bytes.get(*at).map_or(false, |b| b.is_ascii_digit()) {
        *at += 1;
    }
    if *at == start {
        return None
    }
    std::str::from_utf8(&bytes[start..*at]).ok()?.parse().ok()
}

fn write_report<W: Write>(out: &mut W, report: &CycleReport) -> Result<(), io::Error> {
    match &report.exact {
        ExactOutcome::Cover(run) => write_cover_line(out, "CNF-SAT-VC", &run.cover)?,
        ExactOutcome::TimedOut => writeln!(out, "CNF-SAT-VC: timeout")?,
    }
    write_cover_line(out, "APPROX-VC-1", &report.approx_one.cover)?;
    write_cover_line(out, "APPROX-VC-2", &report.approx_two.cover)
}

fn write_empty_report<W: Write>(out: &mut W) -> Result<(), io::Error> {
    write_cover_line(out, "CNF-SAT-VC", &[])?;
    write_cover_line(out, "APPROX-VC-1", &[])?;
    write_cover_line(out, "APPROX-VC-2", &[])
}

fn write_cover_line<W: Write>(out: &mut W, label: &str, cover: &[usize]) -> Result<(), io::Error> {
    let mut ids = cover.to_vec();
    ids.sort_unstable();
    let body = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",");
    if body.is_empty() {
        writeln!(out, "{}:", label)
    } else {
        writeln!(out, "{}: {}", label, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(input: &str) -> Vec<String> {
        let mut out = Vec::new();
        run(Cursor::new(input), &mut out, None).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_owned).collect()
    }

    /// Ids of a result line like `CNF-SAT-VC: 1,3`.
    fn ids_of(line: &str) -> Vec<usize> {
        let (_, body) = line.split_once(':').expect("result line has a label");
        body.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse().expect("result ids are numeric"))
            .collect()
    }

    #[test]
    fn scanner_reads_concatenated_tokens() {
        assert_eq!(scan_edge_tokens("<0,1><1,2><2,3>"), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(scan_edge_tokens("<10,3>"), vec![(10, 3)]);
        assert_eq!(scan_edge_tokens(""), vec![]);
    }

    #[test]
    fn scanner_skips_malformed_fragments() {
        assert_eq!(scan_edge_tokens("<1<2,3>"), vec![(2, 3)]);
        assert_eq!(scan_edge_tokens("<a,1><0,2>junk<3,4"), vec![(0, 2)]);
        assert_eq!(scan_edge_tokens("<1,>"), vec![]);
    }

    #[test]
    fn path_end_to_end() {
        let lines = run_session("V 4\nE <0,1><1,2><2,3>\n");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("CNF-SAT-VC:"));
        assert!(lines[1].starts_with("APPROX-VC-1:"));
        assert!(lines[2].starts_with("APPROX-VC-2:"));

        let mut graph = UGraph::new(4);
        graph.connect(0, 1);
        graph.connect(1, 2);
        graph.connect(2, 3);
        let exact = ids_of(&lines[0]);
        assert_eq!(exact.len(), 2);
        assert!(graph.covers_all_edges(&exact));
        assert!(graph.covers_all_edges(&ids_of(&lines[1])));
        assert!(graph.covers_all_edges(&ids_of(&lines[2])));
    }

    #[test]
    fn result_ids_are_sorted() {
        let lines = run_session("V 4\nE <3,2><1,0><2,1>\n");
        for line in &lines {
            let ids = ids_of(line);
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            assert_eq!(ids, sorted);
        }
    }

    #[test]
    fn self_loop_is_rejected_without_solving() {
        let lines = run_session("V 3\nE <2,2>\n");
        assert_eq!(
            lines,
            vec![
                "Error: a node can't get connected to itself",
                "CNF-SAT-VC:",
                "APPROX-VC-1:",
                "APPROX-VC-2:",
            ]
        );
    }

    #[test]
    fn out_of_range_is_rejected_without_solving() {
        let lines = run_session("V 3\nE <0,5>\n");
        assert_eq!(
            lines,
            vec![
                "Error: node number is out of range",
                "CNF-SAT-VC:",
                "APPROX-VC-1:",
                "APPROX-VC-2:",
            ]
        );
    }

    #[test]
    fn unknown_command_is_an_invalid_argument() {
        let lines = run_session("X 3\nV 2\nE <0,1>\n");
        assert_eq!(lines[0], "Error: invalid argument");
        // The loop keeps accepting commands afterwards.
        assert_eq!(lines.len(), 4);
        assert_eq!(ids_of(&lines[1]).len(), 1);
    }

    #[test]
    fn unparseable_vertex_count_is_an_invalid_argument() {
        let lines = run_session("V x\n");
        assert_eq!(lines, vec!["Error: invalid argument"]);
    }

    #[test]
    fn edges_before_a_bad_token_stay_applied() {
        // The self-loop aborts the command, but <0,1> was already applied and the
        // cycle still runs on it.
        let lines = run_session("V 3\nE <0,1><1,1><1,2>\n");
        assert_eq!(lines[0], "Error: a node can't get connected to itself");
        let exact = ids_of(&lines[1]);
        assert_eq!(exact.len(), 1);
        assert!(exact == vec![0] || exact == vec![1]);
    }

    #[test]
    fn edges_accumulate_across_commands() {
        let lines = run_session("V 3\nE <0,1>\nE <1,2>\n");
        assert_eq!(lines.len(), 6);
        // Second cycle sees both edges; node 1 alone covers the path.
        assert_eq!(lines[3], "CNF-SAT-VC: 1");
    }

    #[test]
    fn vertex_command_resets_the_graph() {
        let lines = run_session("V 2\nE <0,1>\nV 3\nE <0,2>\n");
        let second = ids_of(&lines[3]);
        assert_eq!(second.len(), 1);
        assert!(second == vec![0] || second == vec![2]);
    }

    #[test]
    fn empty_edge_list_prints_empty_results() {
        let lines = run_session("V 3\nE\n");
        assert_eq!(lines, vec!["CNF-SAT-VC:", "APPROX-VC-1:", "APPROX-VC-2:"]);
    }

    #[test]
    fn empty_line_ends_the_loop() {
        let lines = run_session("V 3\n\nE <0,1>\n");
        assert!(lines.is_empty());
    }

}
