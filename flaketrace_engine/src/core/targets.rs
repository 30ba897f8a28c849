use crate::tracing_targets;

tracing_targets! {
    RENDERER = "renderer",
    SCENE = "scene",
    LOADER = "loader",
    ACCEL = "accel",
}
