fn main() {
    scrapesync::app::cli::run();
}
