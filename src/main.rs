fn main() {
    if let Err(err) = svgplate::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
