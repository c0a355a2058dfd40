//=========================================================================
// Aetheric Showcase: Binary Entry Point
//
// Installs the logger, registers the scenes and hands the main thread to
// the engine until the window closes.
//
// Verbosity follows RUST_LOG (default: info), e.g.
//   RUST_LOG=cards::scheduler=debug cargo run
//
//=========================================================================

use aetheric_showcase::scenes::{self, ShowcaseScene};
use aetheric_showcase::EngineBuilder;
use env_logger::{Builder, Env};

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    EngineBuilder::<ShowcaseScene>::new()
        .build()
        .init(scenes::register)
        .run();
}
