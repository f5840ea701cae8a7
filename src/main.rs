fn main() {
    if let Err(err) = context_atlas::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
