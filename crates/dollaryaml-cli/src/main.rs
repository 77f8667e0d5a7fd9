use std::process::ExitCode;

fn main() -> ExitCode {
    dollaryaml_cli::run()
}
