use gpio_perf::{
    run_toggle_benchmark, select_and_install_fastest_provider, Error, Platform, BENCHMARK_LINE,
};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let platform = Platform::system();
    // Has to happen before any controller is acquired.
    let provider = select_and_install_fastest_provider(&platform);
    run_toggle_benchmark(&platform, &provider, BENCHMARK_LINE)
}
