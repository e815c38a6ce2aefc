//! `fru-codegen` binary.

fn main() {
    fru_codegen_cli::init_tracing();
    std::process::exit(fru_codegen_cli::run_cli(std::env::args().collect()));
}
