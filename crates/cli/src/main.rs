use std::process::ExitCode;

fn main() -> ExitCode {
    ordina_cli::run()
}
