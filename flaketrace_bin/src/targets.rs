//! Internal module containing targets for the [tracing] crate

flaketrace_engine::tracing_targets! {
    MAIN = "main",
    OUTPUT = "output",
}
