//! Submission checks as the lesson shell performs them.

use codequest_cli::grade::{clean_output, grade, transcript, validate_source, SubmissionError};
use codequest_cli::{run, RunConfig};

#[test]
fn empty_code_is_rejected_before_running() {
    assert_eq!(validate_source(""), Err(SubmissionError::Empty));
    assert_eq!(validate_source("  \n\t\n"), Err(SubmissionError::Empty));
    assert_eq!(SubmissionError::Empty.to_string(), "Code is empty.");
    assert!(validate_source("# only a comment").is_ok());
}

#[test]
fn clean_output_trims_and_drops_blanks() {
    let lines = vec![
        "  Abracadabra ".to_string(),
        String::new(),
        "   ".to_string(),
        "Abracadabra".to_string(),
    ];
    assert_eq!(clean_output(&lines), "Abracadabra\nAbracadabra");
}

#[test]
fn matching_output_passes() {
    let g = grade(
        "for i in range(3):\n    print('Abracadabra')",
        "Abracadabra\nAbracadabra\nAbracadabra",
        &RunConfig::default(),
    )
    .unwrap();
    assert!(g.passed);
    assert_eq!(g.transcript.len(), 3);
}

#[test]
fn blank_printed_lines_are_ignored() {
    let g = grade("print('')\nprint(' 175 ')", "175", &RunConfig::default()).unwrap();
    assert!(g.passed);
}

#[test]
fn wrong_output_fails() {
    let g = grade("print('Hello')", "Hello, World!", &RunConfig::default()).unwrap();
    assert!(!g.passed);
    assert_eq!(g.transcript, ["Hello"]);
}

#[test]
fn failing_program_fails_with_error_in_transcript() {
    let g = grade("print(nope)", "", &RunConfig::default()).unwrap();
    assert!(!g.passed);
    assert_eq!(g.transcript, ["Error: NameError: name 'nope' is not defined"]);
}

#[test]
fn grade_rejects_empty_code() {
    let err = grade("   ", "anything", &RunConfig::default()).unwrap_err();
    assert_eq!(err, SubmissionError::Empty);
}

#[test]
fn transcript_of_successful_run_is_output() {
    let result = run("print(1)\nprint(2)");
    assert_eq!(transcript(&result), ["1", "2"]);
}
