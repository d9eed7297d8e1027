fn main() {
    tmplgate::app::cli::run();
}
