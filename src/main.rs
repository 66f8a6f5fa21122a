fn main() {
    std::process::exit(dirble_cli::app::run());
}
