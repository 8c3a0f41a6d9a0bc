fn main() {
    makei::app::cli::run();
}
