mod config;
mod metrics;
mod model;
mod report;
mod runtime;
mod source;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("performativify: {e:#}");
        std::process::exit(1);
    }
}
