fn main() {
    if let Err(err) = flowrender::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
