use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["wordindex".to_string()];
    argv.extend(args.iter().map(|s| s.to_string()));
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = wordindex::run(argv, &mut out, &mut err);
    (code, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let p = dir.join(name);
    fs::write(&p, text).unwrap();
    p.to_string_lossy().to_string()
}

#[test]
fn summary_and_frequency_for_single_file() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "in.txt", "hello world\n");
    let (code, out, err) = run(&["--summary", "--frequency", &input]);
    assert_eq!(code, 0, "{err}");
    let expected = "       keywords  0\n          words  2\n     references  2\n\n          hello  50% (1)  1\n          world  50% (1)  1\n";
    assert_eq!(out, expected);
}

#[test]
fn plus_prefixed_options_work() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "in.txt", "Cat cat CAT\n");
    let (code, out, _) = run(&["+lowercase", &input]);
    assert_eq!(code, 0);
    assert_eq!(out, "            cat  1 1 1\n");
}

#[test]
fn keywords_are_excluded_or_shown_in_reverse() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "in.txt", "the cat the dog\n");
    let stop = write(dir.path(), "stop.txt", "# stop words\nthe\n");

    let (code, out, _) = run(&["-k", &stop, &input]);
    assert_eq!(code, 0);
    assert_eq!(out, "            cat  1\n            dog  1\n");

    let (code, out, _) = run(&["--reverse", &format!("--keywords={stop}"), &input]);
    assert_eq!(code, 0);
    assert_eq!(out, "            the  1 1\n");
}

#[test]
fn one_report_per_input_with_headers() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "x\n");
    let b = write(dir.path(), "b.txt", "y\ny\n");
    let (code, out, _) = run(&[&a, &b]);
    assert_eq!(code, 0);
    assert_eq!(out, format!("{a}:\n              x  1\n\n{b}:\n              y  1 2\n"));
}

#[test]
fn input_list_adds_files_after_arguments() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "alpha\n");
    let b = write(dir.path(), "b.txt", "beta\n");
    let list = write(dir.path(), "list.txt", &format!("# inputs\n{b}\n"));
    let output = dir.path().join("out.txt");
    let output = output.to_string_lossy().to_string();
    let (code, out, err) = run(&["--combine", "-i", &list, "-o", &output, "--jobs", "2", &a]);
    assert_eq!(code, 0, "{err}");
    assert!(out.is_empty());
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, format!("          alpha  {a}:1\n           beta  {b}:1\n"));
}

#[test]
fn output_with_several_inputs_is_rejected() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "x\n");
    let b = write(dir.path(), "b.txt", "y\n");
    let output = dir.path().join("out.txt");
    let (code, out, err) = run(&["-o", &output.to_string_lossy(), &a, &b]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(!output.exists());
    assert!(err.contains("only specify option '--output=filename' with a single input file"), "{err}");
    assert!(err.ends_with("(try option --help).\n"));
}

#[test]
fn ignorecase_is_unsupported() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "x\n");
    let (code, out, err) = run(&["--ignorecase", &a]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert_eq!(err, "wordindex: option --ignorecase is not yet supported (try option --help).\n");
}

#[test]
fn missing_input_aborts_without_report() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "x\n");
    let missing = dir.path().join("missing.txt");
    let (code, out, err) = run(&[&a, &missing.to_string_lossy()]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.contains("cannot open input"), "{err}");
}

#[test]
fn missing_keywords_file_is_reported() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "x\n");
    let (code, _, err) = run(&["-k", "/no/such/stopwords.txt", &a]);
    assert_eq!(code, 1);
    assert!(err.contains("cannot read keywords"), "{err}");
}

#[test]
fn json_report() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "b a\na\n");
    let (code, out, _) = run(&["--json", "-s", "-f", &a]);
    assert_eq!(code, 0);
    assert!(out.contains("\"references\": 3"));
    assert!(out.contains("\"word\": \"a\""));
    assert!(out.contains("\"percent\": 67"));
}

#[test]
fn help_author_and_version() {
    let (code, out, _) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("--keywords <FILE>"));
    assert!(out.contains("Long options also may start with a plus"));

    let (code, out, _) = run(&["+author"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Author: "));

    let (code, out, _) = run(&["--version"]);
    assert_eq!(code, 0);
    assert_eq!(out, format!("wordindex v{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_option_fails() {
    let (code, out, err) = run(&["--bogus"]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.starts_with("wordindex: "));
}
