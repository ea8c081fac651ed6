fn main() {
    #[cfg(feature = "cli")]
    gattcodec::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("gattcodec: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
