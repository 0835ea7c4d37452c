use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut err = std::io::stderr();
    match wordindex::run(args, &mut out, &mut err) {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
