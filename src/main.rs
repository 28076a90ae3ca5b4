use std::process;

use rsp::{app, cli};

// Usage: rsp -E <pattern> [-E <pattern>...] [path...]
fn main() {
    let cfg = match cli::parse_args(std::env::args_os()) {
        Ok(cfg) => cfg,
        Err(err) => err.exit(),
    };

    let code = match app::run(&cfg) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            eprintln!("rsp: {err:#}");
            2
        }
    };
    process::exit(code);
}
