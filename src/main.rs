use skyshield::interface_adapters::report;

#[tokio::main]
async fn main() {
    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("-h" | "--help")) {
        print!("{}", report::usage());
        return;
    }

    // Errors are already logged; the exit code is all that is left to report.
    if let Err(e) = skyshield::run_with_config(arg).await {
        eprintln!("skyshield: {e}");
        std::process::exit(1);
    }
}
