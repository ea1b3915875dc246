fn main() {
    if let Err(e) = sqlgen_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
