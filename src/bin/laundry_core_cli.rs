use laundry_core::cli;

fn main() {
    laundry_core::init();
    if let Err(err) = cli::run_cli() {
        eprintln!("fatal: {}", err);
        std::process::exit(1);
    }
}
